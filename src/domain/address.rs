use std::fmt::Display;
use thiserror::Error;

/// A non-empty, trimmed single-line address, ready to be sent to a geocoder.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedAddress(String);

#[derive(Debug, Error, PartialEq)]
pub enum AddressError {
    /// Not a failure for callers: an empty address means "skip resolution".
    #[error("Address cannot be empty.")]
    EmptyAddress,
}

impl NormalizedAddress {
    /// Normalize a raw address string.
    ///
    /// Rules:
    /// - Leading and trailing whitespace is removed
    /// - Anything that is empty after trimming is rejected
    /// - No length or charset restrictions, the provider decides what it can match
    pub fn parse(s: &str) -> Result<NormalizedAddress, AddressError> {
        let trimmed = s.trim();

        if trimmed.is_empty() {
            return Err(AddressError::EmptyAddress);
        }

        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for NormalizedAddress {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Display for NormalizedAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}
