//! Port definitions for application layer
//!
//! Ports are interfaces that define how the application interacts with
//! external systems. Adapters in the infrastructure layer implement these ports.

mod client_factory;
mod entry_store;
mod transit_port;

pub use client_factory::ClientFactory;
#[cfg(test)]
pub use client_factory::MockClientFactory;
pub use entry_store::ConfigEntryStore;
#[cfg(test)]
pub use entry_store::MockConfigEntryStore;
#[cfg(test)]
pub use transit_port::MockTransitPort;
pub use transit_port::{DepartureQuery, JourneyQuery, TransitPort};
