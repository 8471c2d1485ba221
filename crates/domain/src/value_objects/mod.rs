//! Value objects - Immutable domain primitives

pub mod product;
pub mod profile;
pub mod station;
pub mod time_offset;

pub use product::{ProductCatalog, ProductFilter, ProductInfo};
pub use profile::Profile;
pub use station::{Station, dedup_by_name};
pub use time_offset::TimeOffset;
