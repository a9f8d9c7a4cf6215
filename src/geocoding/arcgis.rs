use crate::configuration::GeocoderSettings;
use crate::domain::NormalizedAddress;
use crate::geocoding::{Candidate, GeocodingError, GeocodingProvider};
use reqwest::Url;
use secrecy::{ExposeSecret, SecretString};

/// ArcGIS World Geocoding Service, `findAddressCandidates` operation.
#[derive(Clone, Debug)]
pub struct ArcGisProvider {
    http_client: reqwest::Client,
    endpoint: Url,
    api_key: SecretString,
    out_fields: String,
}

#[derive(serde::Deserialize)]
#[serde(untagged)]
enum FindCandidatesResponse {
    // ArcGIS answers some failures (bad token, bad parameters) with a 200
    Error { error: ServiceError },
    // Only the first entry has to be a usable candidate
    Candidates { candidates: Vec<serde_json::Value> },
}

#[derive(serde::Deserialize)]
struct ServiceError {
    code: i64,
    #[serde(default)]
    message: String,
}

impl ArcGisProvider {
    pub fn new(settings: &GeocoderSettings) -> Result<Self, GeocodingError> {
        let endpoint = Url::parse(&settings.endpoint)
            .ok()
            .filter(|url| matches!(url.scheme(), "http" | "https"))
            .ok_or_else(|| GeocodingError::InvalidEndpoint(settings.endpoint.clone()))?;

        let http_client = reqwest::Client::builder()
            .timeout(settings.timeout())
            .build()?;

        Ok(Self {
            http_client,
            endpoint,
            api_key: settings.api_key.clone(),
            out_fields: settings.out_fields.join(","),
        })
    }

    fn request_url(&self, address: &NormalizedAddress) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .append_pair("f", "json")
            .append_pair("singleLine", address.as_str())
            .append_pair("outFields", &self.out_fields)
            .append_pair("apiKey", self.api_key.expose_secret());
        url
    }
}

impl GeocodingProvider for ArcGisProvider {
    #[tracing::instrument(
        name = "Querying ArcGIS for address candidates",
        skip(self, address),
        fields(address = %address)
    )]
    async fn find_address_candidates(
        &self,
        address: &NormalizedAddress,
    ) -> Result<Vec<Candidate>, GeocodingError> {
        let response = self
            .http_client
            .get(self.request_url(address))
            .send()
            .await
            .map_err(|e| e.without_url())?;

        let status = response.status();
        if !status.is_success() {
            return Err(GeocodingError::Status(status));
        }

        let body = response.text().await.map_err(|e| e.without_url())?;
        parse_candidates(&body)
    }
}

fn parse_candidates(body: &str) -> Result<Vec<Candidate>, GeocodingError> {
    match serde_json::from_str::<FindCandidatesResponse>(body)? {
        FindCandidatesResponse::Candidates { candidates } => {
            tracing::debug!(count = candidates.len(), "Received address candidates");
            let mut candidates = candidates.into_iter();
            let Some(first) = candidates.next() else {
                return Ok(Vec::new());
            };
            let first: Candidate = serde_json::from_value(first)?;
            let rest = candidates.filter_map(|candidate| {
                serde_json::from_value::<Candidate>(candidate)
                    .map_err(|e| tracing::debug!(error = %e, "Skipping unusable candidate"))
                    .ok()
            });
            Ok(std::iter::once(first).chain(rest).collect())
        }
        FindCandidatesResponse::Error { error } => Err(GeocodingError::Provider {
            code: error.code,
            message: error.message,
        }),
    }
}
