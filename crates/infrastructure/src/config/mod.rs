//! Application configuration
//!
//! Split into focused sub-modules:
//! - `polling`: scan interval and result caps
//! - `hafas`: endpoints and shared client settings
//! - `store`: config-entry persistence
//! - `telemetry`: log filter and output format

mod hafas;
mod polling;
mod store;
mod telemetry;

use std::collections::HashSet;
use std::path::Path;

use application::PollingSettings;
use config::ConfigError;
use serde::{Deserialize, Serialize};

pub use hafas::HafasAppConfig;
pub use polling::PollingAppConfig;
pub use store::StoreAppConfig;
pub use telemetry::TelemetryAppConfig;

/// Environment variable prefix, e.g. `HAFAS_SENSOR_POLLING__SCAN_INTERVAL_SECS`
const ENV_PREFIX: &str = "HAFAS_SENSOR";

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Sensor polling
    #[serde(default)]
    pub polling: PollingAppConfig,

    /// HAFAS endpoints
    #[serde(default)]
    pub hafas: HafasAppConfig,

    /// Entry persistence
    #[serde(default)]
    pub store: StoreAppConfig,

    /// Logging
    #[serde(default)]
    pub telemetry: TelemetryAppConfig,
}

impl AppConfig {
    /// Load configuration from an optional `config.*` file and the environment
    pub fn load() -> Result<Self, ConfigError> {
        let builder = config::Config::builder()
            // Load from file if exists
            .add_source(config::File::with_name("config").required(false))
            .add_source(environment());

        let config: Self = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from an explicit file, still honouring the environment
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let builder = config::Config::builder()
            .add_source(config::File::from(path.as_ref()))
            .add_source(environment());

        let config: Self = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings no sensor could run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.polling.scan_interval_secs == 0 {
            return Err(invalid("polling.scan_interval_secs must be greater than 0"));
        }
        if self.polling.journey_results == 0 {
            return Err(invalid("polling.journey_results must be greater than 0"));
        }
        if self.polling.departure_results == 0 {
            return Err(invalid("polling.departure_results must be greater than 0"));
        }
        if self.hafas.timeout_secs == 0 {
            return Err(invalid("hafas.timeout_secs must be greater than 0"));
        }
        if let Some((code, _)) = self
            .hafas
            .endpoints
            .iter()
            .find(|(_, url)| url.trim().is_empty())
        {
            return Err(invalid(&format!("hafas.endpoints.{code} must not be empty")));
        }
        let mut codes = HashSet::new();
        for code in self.hafas.endpoints.keys() {
            if !codes.insert(code.to_ascii_uppercase()) {
                return Err(invalid(&format!(
                    "hafas.endpoints lists profile {} more than once",
                    code.to_ascii_uppercase()
                )));
            }
        }
        Ok(())
    }

    /// Polling settings handed to every sensor
    #[must_use]
    pub fn polling_settings(&self) -> PollingSettings {
        PollingSettings::from(&self.polling)
    }
}

fn environment() -> config::Environment {
    config::Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
}

fn invalid(message: &str) -> ConfigError {
    ConfigError::Message(message.to_string())
}
