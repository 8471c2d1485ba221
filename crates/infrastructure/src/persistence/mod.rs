//! Persistence module
//!
//! File-based storage for configured entries.

mod json_entry_store;

pub use json_entry_store::JsonFileEntryStore;
