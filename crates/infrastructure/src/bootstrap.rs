//! Wiring of the concrete adapters into the application services

use std::sync::Arc;

use application::{ConfigFlow, IntegrationManager};
use tracing::info;

use crate::adapters::HafasClientFactory;
use crate::config::AppConfig;
use crate::persistence::JsonFileEntryStore;

/// Build an [`IntegrationManager`] backed by the HAFAS factory and the JSON store
pub fn build_manager(config: &AppConfig) -> IntegrationManager {
    let factory = Arc::new(HafasClientFactory::new(config.hafas.clone()));
    let store = Arc::new(JsonFileEntryStore::new(config.store.path.clone()));

    info!(
        store = %config.store.path.display(),
        scan_interval_secs = config.polling.scan_interval_secs,
        "Integration manager ready"
    );

    IntegrationManager::new(factory, store, config.polling_settings())
}

/// Start a setup wizard using the manager's client factory
pub fn new_config_flow(manager: &IntegrationManager) -> ConfigFlow {
    ConfigFlow::new(manager.factory())
}
