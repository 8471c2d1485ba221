//! Infrastructure adapters
//!
//! Adapters connect application ports to concrete implementations.

mod client_factory;
mod hafas_adapter;

pub use client_factory::HafasClientFactory;
pub use hafas_adapter::HafasTransitAdapter;
