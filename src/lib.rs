pub mod configuration;
pub mod domain;
pub mod errors;
pub mod field;
pub mod geocoding;
pub mod plugin;
pub mod startup;
pub mod telemetry;
