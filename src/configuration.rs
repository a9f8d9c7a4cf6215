use config::builder::DefaultState;
use config::{ConfigBuilder, ConfigError};
use secrecy::SecretString;
use serde_aux::field_attributes::deserialize_number_from_string;
use std::path::Path;
use std::time::Duration;

#[derive(serde::Deserialize, Clone, Debug)]
pub struct Settings {
    pub geocoder: GeocoderSettings,
    #[serde(default)]
    pub field: FieldSettings,
}

#[derive(serde::Deserialize, Clone, Debug)]
pub struct GeocoderSettings {
    /// Full URL of the `findAddressCandidates` operation.
    pub endpoint: String,
    /// Supplied by the host (usually `APP_GEOCODER__API_KEY`), never shipped in the YAML files.
    pub api_key: SecretString,
    pub out_fields: Vec<String>,
    #[serde(
        default = "default_geocoder_timeout_milliseconds",
        deserialize_with = "deserialize_number_from_string"
    )]
    pub timeout_milliseconds: u64,
}

impl GeocoderSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_milliseconds)
    }
}

fn default_geocoder_timeout_milliseconds() -> u64 {
    10_000
}

#[derive(serde::Deserialize, Clone, Debug, Default)]
pub struct FieldSettings {
    #[serde(default)]
    pub read_only: bool,
}

/// The runtime environment for our application.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Environment {
    Local,
    Production,
}
impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Local => "local",
            Self::Production => "production",
        }
    }
}
impl TryFrom<String> for Environment {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        match s.to_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "production" => Ok(Self::Production),
            other => Err(format!(
                "{} is not supported environment.\
                Use either `local` or `production`.",
                other
            )),
        }
    }
}

pub fn get_configuration() -> Result<Settings, ConfigError> {
    let base_path = std::env::current_dir().map_err(|e| {
        ConfigError::Message(format!("Failed to determine the current directory: {e}"))
    })?;
    let configuration_directory = base_path.join("configuration");

    // Detect the running environment.
    // Default to `local` if unspecified.
    let environment: Environment = std::env::var("APP_ENVIRONMENT")
        .unwrap_or_else(|_| "local".into())
        .try_into()
        .map_err(ConfigError::Message)?;

    configuration_builder(&configuration_directory, environment)
        .build()?
        .try_deserialize::<Settings>()
}

/// Layers `base.yaml`, the environment file and `APP_*` variables, in that order.
pub fn configuration_builder(
    configuration_directory: &Path,
    environment: Environment,
) -> ConfigBuilder<DefaultState> {
    layers(configuration_directory, environment, environment_source())
}

fn layers(
    configuration_directory: &Path,
    environment: Environment,
    variables: config::Environment,
) -> ConfigBuilder<DefaultState> {
    let environment_filename = format!("{}.yaml", environment.as_str());

    config::Config::builder()
        .add_source(config::File::from(
            configuration_directory.join("base.yaml"),
        ))
        .add_source(config::File::from(
            configuration_directory.join(environment_filename),
        ))
        .add_source(variables)
}

// E.g. `APP_GEOCODER__TIMEOUT_MILLISECONDS=5000` or `APP_GEOCODER__OUT_FIELDS=Addr_type,Score`
fn environment_source() -> config::Environment {
    config::Environment::with_prefix("APP")
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
        .list_separator(",")
        .with_list_parse_key("geocoder.out_fields")
}
