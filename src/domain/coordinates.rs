use crate::domain::Point;

/// The value published by the geocoder field.
///
/// Always exactly one of a formatted position or one of the two sentinels.
#[derive(Debug, Clone, PartialEq)]
pub enum CoordinateResult {
    /// `"<lat>,<lon>"` of the first candidate.
    Coordinates(Point),
    /// The provider answered but matched nothing.
    NotAvailable,
    /// The lookup failed (transport, status or body).
    GeocodingError,
}

impl CoordinateResult {
    pub const NOT_AVAILABLE: &'static str = "Coordinates not available";
    pub const GEOCODING_ERROR: &'static str = "Geocoding error";

    pub fn as_value(&self) -> String {
        match self {
            Self::Coordinates(point) => point.to_string_format(),
            Self::NotAvailable => Self::NOT_AVAILABLE.to_string(),
            Self::GeocodingError => Self::GEOCODING_ERROR.to_string(),
        }
    }

    pub fn point(&self) -> Option<Point> {
        match self {
            Self::Coordinates(point) => Some(*point),
            _ => None,
        }
    }
}

impl From<Point> for CoordinateResult {
    fn from(point: Point) -> Self {
        Self::Coordinates(point)
    }
}

impl std::fmt::Display for CoordinateResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Coordinates(point) => point.fmt(f),
            Self::NotAvailable => f.write_str(Self::NOT_AVAILABLE),
            Self::GeocodingError => f.write_str(Self::GEOCODING_ERROR),
        }
    }
}
