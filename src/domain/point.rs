/// A WGS84 position.
///
/// Geocoders usually hand out `(x, y)` pairs, which map to (longitude, latitude).
/// The textual form used by form fields is latitude first.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub longitude: f64,
    pub latitude: f64,
}

impl Point {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Build from a provider `(x, y)` pair.
    pub fn from_xy(x: f64, y: f64) -> Self {
        Self::new(y, x)
    }

    /// Convert to "latitude,longitude" string format
    pub fn to_string_format(&self) -> String {
        self.to_string()
    }
}

impl std::fmt::Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{},{}", self.latitude, self.longitude)
    }
}
