use crate::errors::error_chain_fmt;

#[derive(thiserror::Error)]
pub enum GeocodingError {
    #[error("Invalid geocoder endpoint '{0}'")]
    InvalidEndpoint(String),
    // reqwest errors are stored without their URL, the query string carries the API key
    #[error("Failed to reach the geocoding service")]
    Request(#[from] reqwest::Error),
    #[error("Geocoding service returned status {0}")]
    Status(reqwest::StatusCode),
    #[error("Failed to parse the geocoding response")]
    Malformed(#[from] serde_json::Error),
    #[error("Geocoding service reported error {code}: {message}")]
    Provider { code: i64, message: String },
}

impl std::fmt::Debug for GeocodingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}
