mod address;
mod coordinates;
mod point;

pub use address::{AddressError, NormalizedAddress};
pub use coordinates::CoordinateResult;
pub use point::Point;
