use crate::domain::{CoordinateResult, NormalizedAddress};
use crate::geocoding::GeocodingProvider;

/// Turns a provider lookup into a [`CoordinateResult`].
///
/// Failures never leave this type: they are reported through `tracing`
/// and mapped to the `"Geocoding error"` sentinel.
pub struct GeocodeResolver<P> {
    provider: P,
}

impl<P> GeocodeResolver<P>
where
    P: GeocodingProvider,
{
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    #[tracing::instrument(name = "Resolving address", skip(self, address), fields(address = %address))]
    pub async fn resolve(&self, address: &NormalizedAddress) -> CoordinateResult {
        match self.provider.find_address_candidates(address).await {
            Ok(candidates) => match candidates.first() {
                Some(candidate) => CoordinateResult::Coordinates(candidate.point()),
                None => {
                    tracing::info!("No candidates found");
                    CoordinateResult::NotAvailable
                }
            },
            Err(e) => {
                tracing::error!(
                    error.cause_chain = ?e,
                    error.message = %e,
                    "Geocoding failed"
                );
                CoordinateResult::GeocodingError
            }
        }
    }
}
