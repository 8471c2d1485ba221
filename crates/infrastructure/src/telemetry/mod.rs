//! Logging infrastructure

mod logging;

pub use logging::{TelemetryError, init_logging};
