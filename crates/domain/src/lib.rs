//! Domain layer for the HaFAS sensor integration
//!
//! Contains the provider profiles, stations, raw trip types returned by a
//! transit client, the candidate transformation and the published sensor
//! state. This layer performs no I/O.

pub mod entities;
pub mod errors;
pub mod format;
pub mod value_objects;

pub use entities::*;
pub use errors::DomainError;
pub use format::format_duration;
pub use value_objects::*;
