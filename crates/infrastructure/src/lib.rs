//! Infrastructure layer - Adapters for external systems
//!
//! Implements ports defined in the application layer: the HAFAS transit
//! adapter and client factory, the JSON entry store, configuration loading
//! and logging setup.

pub mod adapters;
pub mod bootstrap;
pub mod config;
pub mod persistence;
pub mod telemetry;

pub use adapters::*;
pub use bootstrap::{build_manager, new_config_flow};
pub use config::{
    AppConfig, HafasAppConfig, PollingAppConfig, StoreAppConfig, TelemetryAppConfig,
};
pub use persistence::JsonFileEntryStore;
pub use telemetry::{TelemetryError, init_logging};
