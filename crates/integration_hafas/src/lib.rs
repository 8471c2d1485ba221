//! HAFAS integration for the HaFAS sensor
//!
//! Talks to a [`hafas-rest-api`](https://github.com/public-transport/hafas-rest-api)
//! deployment (for example [v6.db.transport.rest](https://v6.db.transport.rest))
//! to search stations, plan journeys, and read departure boards.
//!
//! # Architecture
//!
//! [`TransitClient`] defines the interface, implemented by
//! [`HafasTransitClient`]. Responses are converted into the raw trip types of
//! the `domain` crate. [`catalog`] and [`default_base_url`] describe what each
//! [`domain::Profile`] offers.
//!
//! # Example
//!
//! ```rust,ignore
//! use integration_hafas::{HafasConfig, HafasTransitClient, TransitClient};
//!
//! let config = HafasConfig::new("https://v6.db.transport.rest");
//! let client = HafasTransitClient::new(&config)?;
//!
//! let stations = client.locations("Köln Hbf", 5).await?;
//! ```

mod client;
mod config;
mod error;
mod models;
mod profiles;

pub use client::{DepartureRequest, HafasTransitClient, JourneyRequest, TransitClient};
pub use config::HafasConfig;
pub use error::HafasError;
pub use profiles::{catalog, default_base_url};
