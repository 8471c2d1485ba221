//! Application layer - Use cases and orchestration
//!
//! Contains the setup wizard, the polling sensor and the entry lifecycle,
//! together with the ports they need. Infrastructure adapters implement the
//! ports.

pub mod error;
pub mod executor;
pub mod ports;
pub mod services;

pub use error::ApplicationError;
pub use executor::offload;
pub use ports::*;
pub use services::*;
