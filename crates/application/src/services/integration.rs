//! Entry lifecycle
//!
//! Creates, sets up, unloads and removes config entries. Each loaded entry
//! owns one [`TransitSensor`] with its polling task.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use domain::{ConfigEntry, EntryConfig};
use tokio::sync::{Mutex, watch};
use tokio::task::JoinHandle;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use crate::error::ApplicationError;
use crate::ports::{ClientFactory, ConfigEntryStore};
use crate::services::sensor::{PollingSettings, TransitSensor};

/// Outcome of [`IntegrationManager::setup_all`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SetupReport {
    /// Entries now running
    pub loaded: usize,
    /// Entries that could not be set up
    pub failed: usize,
}

struct LoadedEntry {
    sensor: Arc<TransitSensor>,
    shutdown: watch::Sender<bool>,
    task: JoinHandle<()>,
}

/// Manages the config entries of the integration
pub struct IntegrationManager {
    factory: Arc<dyn ClientFactory>,
    store: Arc<dyn ConfigEntryStore>,
    settings: PollingSettings,
    loaded: Mutex<HashMap<String, LoadedEntry>>,
}

impl fmt::Debug for IntegrationManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IntegrationManager")
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}

impl IntegrationManager {
    /// Create a manager
    #[must_use]
    pub fn new(
        factory: Arc<dyn ClientFactory>,
        store: Arc<dyn ConfigEntryStore>,
        settings: PollingSettings,
    ) -> Self {
        Self {
            factory,
            store,
            settings,
            loaded: Mutex::new(HashMap::new()),
        }
    }

    /// The client factory, for starting a setup wizard
    #[must_use]
    pub fn factory(&self) -> Arc<dyn ClientFactory> {
        Arc::clone(&self.factory)
    }

    /// Persist a new entry created by the setup wizard
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails.
    #[instrument(skip(self, data))]
    pub async fn create_entry(
        &self,
        title: String,
        data: EntryConfig,
    ) -> Result<ConfigEntry, ApplicationError> {
        let entry = ConfigEntry {
            entry_id: Uuid::new_v4().to_string(),
            title,
            data,
        };

        self.store.save(&entry).await?;
        info!(entry_id = %entry.entry_id, title = %entry.title, "Entry created");
        Ok(entry)
    }

    /// Build the sensor of an entry and start polling
    ///
    /// # Errors
    ///
    /// Returns [`ApplicationError::AlreadyLoaded`] if the entry is running
    /// and [`ApplicationError::SetupFailed`] if no client can be built.
    #[instrument(skip(self, entry), fields(entry_id = %entry.entry_id))]
    pub async fn setup_entry(
        &self,
        entry: ConfigEntry,
    ) -> Result<Arc<TransitSensor>, ApplicationError> {
        let mut loaded = self.loaded.lock().await;
        if loaded.contains_key(&entry.entry_id) {
            return Err(ApplicationError::AlreadyLoaded(entry.entry_id));
        }

        let client = self
            .factory
            .create(entry.data.profile)
            .map_err(|e| ApplicationError::SetupFailed(format!("{}: {e}", entry.title)))?;

        let entry_id = entry.entry_id.clone();
        let sensor = Arc::new(TransitSensor::new(entry, client, self.settings));
        let (shutdown, signal) = watch::channel(false);
        let task = sensor.spawn_polling(signal);

        loaded.insert(
            entry_id.clone(),
            LoadedEntry {
                sensor: Arc::clone(&sensor),
                shutdown,
                task,
            },
        );

        info!(%entry_id, "Entry set up");
        Ok(sensor)
    }

    /// Set up every stored entry
    ///
    /// Entries that fail are logged and counted; the others still start.
    ///
    /// # Errors
    ///
    /// Returns an error only if the store cannot be read.
    pub async fn setup_all(&self) -> Result<SetupReport, ApplicationError> {
        let entries = self.store.load_all().await?;
        let mut report = SetupReport::default();

        for entry in entries {
            let entry_id = entry.entry_id.clone();
            match self.setup_entry(entry).await {
                Ok(_) => report.loaded += 1,
                Err(e) => {
                    warn!(%entry_id, error = %e, "Entry setup failed");
                    report.failed += 1;
                },
            }
        }

        info!(loaded = report.loaded, failed = report.failed, "Entries set up");
        Ok(report)
    }

    /// Stop an entry's polling task
    ///
    /// Returns true if the entry was loaded.
    #[instrument(skip(self))]
    pub async fn unload_entry(&self, entry_id: &str) -> bool {
        let Some(entry) = self.loaded.lock().await.remove(entry_id) else {
            debug!("Entry not loaded");
            return false;
        };

        // The receiver is gone once the task has already ended
        let _ = entry.shutdown.send(true);
        if let Err(e) = entry.task.await {
            warn!(error = %e, "Polling task ended abnormally");
        }

        info!("Entry unloaded");
        true
    }

    /// Unload an entry and delete it from the store
    ///
    /// Returns true if the store held the entry.
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails.
    #[instrument(skip(self))]
    pub async fn remove_entry(&self, entry_id: &str) -> Result<bool, ApplicationError> {
        self.unload_entry(entry_id).await;
        let removed = self.store.remove(entry_id).await?;
        if removed {
            info!("Entry removed");
        }
        Ok(removed)
    }

    /// Unload every entry
    pub async fn unload_all(&self) {
        let ids: Vec<String> = self.loaded.lock().await.keys().cloned().collect();
        for entry_id in ids {
            self.unload_entry(&entry_id).await;
        }
    }

    /// The running sensor of an entry
    pub async fn sensor(&self, entry_id: &str) -> Option<Arc<TransitSensor>> {
        self.loaded
            .lock()
            .await
            .get(entry_id)
            .map(|e| Arc::clone(&e.sensor))
    }

    /// Ids of all loaded entries
    pub async fn loaded_entries(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.loaded.lock().await.keys().cloned().collect();
        ids.sort();
        ids
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use async_trait::async_trait;
    use domain::{ProductCatalog, Profile, Station, TimeOffset};

    use super::*;
    use crate::ports::{MockClientFactory, MockTransitPort, TransitPort};

    #[derive(Debug, Default)]
    struct MemoryStore {
        entries: Mutex<Vec<ConfigEntry>>,
    }

    #[async_trait]
    impl ConfigEntryStore for MemoryStore {
        async fn save(&self, entry: &ConfigEntry) -> Result<(), ApplicationError> {
            let mut entries = self.entries.lock().await;
            entries.retain(|e| e.entry_id != entry.entry_id);
            entries.push(entry.clone());
            Ok(())
        }

        async fn load(&self, entry_id: &str) -> Result<Option<ConfigEntry>, ApplicationError> {
            Ok(self
                .entries
                .lock()
                .await
                .iter()
                .find(|e| e.entry_id == entry_id)
                .cloned())
        }

        async fn load_all(&self) -> Result<Vec<ConfigEntry>, ApplicationError> {
            Ok(self.entries.lock().await.clone())
        }

        async fn remove(&self, entry_id: &str) -> Result<bool, ApplicationError> {
            let mut entries = self.entries.lock().await;
            let before = entries.len();
            entries.retain(|e| e.entry_id != entry_id);
            Ok(entries.len() != before)
        }
    }

    fn config(profile: Profile) -> EntryConfig {
        EntryConfig {
            profile,
            start: Station::new("1", "Neumarkt"),
            destination: None,
            offset: TimeOffset::default(),
            only_direct: false,
            products: vec!["bus".to_string()],
        }
    }

    fn factory() -> MockClientFactory {
        let mut client = MockTransitPort::new();
        client.expect_catalog().returning(ProductCatalog::default);
        client.expect_departure_board().returning(|_| Ok(Vec::new()));
        let client: Arc<dyn TransitPort> = Arc::new(client);

        let mut factory = MockClientFactory::new();
        factory.expect_create().returning(move |profile| {
            if profile == Profile::Db {
                Ok(Arc::clone(&client))
            } else {
                Err(ApplicationError::UnsupportedProfile(
                    profile.code().to_string(),
                ))
            }
        });
        factory
    }

    fn manager() -> (IntegrationManager, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::default());
        let settings = PollingSettings {
            scan_interval: Duration::from_secs(3600),
            ..PollingSettings::default()
        };
        let manager = IntegrationManager::new(
            Arc::new(factory()),
            Arc::clone(&store) as Arc<dyn ConfigEntryStore>,
            settings,
        );
        (manager, store)
    }

    #[tokio::test]
    async fn create_entry_persists_with_fresh_id() {
        let (manager, store) = manager();

        let first = manager
            .create_entry("Neumarkt".to_string(), config(Profile::Db))
            .await
            .unwrap();
        let second = manager
            .create_entry("Neumarkt".to_string(), config(Profile::Db))
            .await
            .unwrap();

        assert_ne!(first.entry_id, second.entry_id);
        assert!(Uuid::parse_str(&first.entry_id).is_ok());
        assert_eq!(store.load_all().await.unwrap().len(), 2);
        assert_eq!(store.load(&first.entry_id).await.unwrap(), Some(first));
    }

    #[tokio::test]
    async fn setup_entry_starts_sensor() {
        let (manager, _) = manager();
        let entry = manager
            .create_entry("Neumarkt".to_string(), config(Profile::Db))
            .await
            .unwrap();

        let sensor = manager.setup_entry(entry.clone()).await.unwrap();
        assert_eq!(sensor.description().unique_id, entry.entry_id);
        assert!(manager.sensor(&entry.entry_id).await.is_some());
        assert_eq!(manager.loaded_entries().await, vec![entry.entry_id.clone()]);

        manager.unload_all().await;
    }

    #[tokio::test]
    async fn setup_entry_twice_is_rejected() {
        let (manager, _) = manager();
        let entry = manager
            .create_entry("Neumarkt".to_string(), config(Profile::Db))
            .await
            .unwrap();

        manager.setup_entry(entry.clone()).await.unwrap();
        let result = manager.setup_entry(entry).await;
        assert!(matches!(result, Err(ApplicationError::AlreadyLoaded(_))));

        manager.unload_all().await;
    }

    #[tokio::test]
    async fn unsupported_profile_is_setup_fatal() {
        let (manager, _) = manager();
        let entry = manager
            .create_entry("Neumarkt".to_string(), config(Profile::Vsn))
            .await
            .unwrap();

        let result = manager.setup_entry(entry.clone()).await;
        assert!(matches!(result, Err(ApplicationError::SetupFailed(_))));
        assert!(manager.sensor(&entry.entry_id).await.is_none());
    }

    #[tokio::test]
    async fn setup_all_counts_failures() {
        let (manager, _) = manager();
        for profile in [Profile::Db, Profile::Kvb, Profile::Db] {
            manager
                .create_entry("Neumarkt".to_string(), config(profile))
                .await
                .unwrap();
        }

        let report = manager.setup_all().await.unwrap();
        assert_eq!(report, SetupReport { loaded: 2, failed: 1 });
        assert_eq!(manager.loaded_entries().await.len(), 2);

        manager.unload_all().await;
        assert!(manager.loaded_entries().await.is_empty());
    }

    #[tokio::test]
    async fn unload_entry_reports_whether_loaded() {
        let (manager, _) = manager();
        let entry = manager
            .create_entry("Neumarkt".to_string(), config(Profile::Db))
            .await
            .unwrap();
        manager.setup_entry(entry.clone()).await.unwrap();

        assert!(manager.unload_entry(&entry.entry_id).await);
        assert!(!manager.unload_entry(&entry.entry_id).await);
        assert!(manager.sensor(&entry.entry_id).await.is_none());
    }

    #[tokio::test]
    async fn remove_entry_unloads_and_deletes() {
        let (manager, store) = manager();
        let entry = manager
            .create_entry("Neumarkt".to_string(), config(Profile::Db))
            .await
            .unwrap();
        manager.setup_entry(entry.clone()).await.unwrap();

        assert!(manager.remove_entry(&entry.entry_id).await.unwrap());
        assert!(manager.sensor(&entry.entry_id).await.is_none());
        assert!(store.load_all().await.unwrap().is_empty());
        assert!(!manager.remove_entry(&entry.entry_id).await.unwrap());
    }

    #[tokio::test]
    async fn store_failure_propagates() {
        let mut store = crate::ports::MockConfigEntryStore::new();
        store
            .expect_load_all()
            .returning(|| Err(ApplicationError::Storage("unreadable".to_string())));

        let manager = IntegrationManager::new(
            Arc::new(factory()),
            Arc::new(store),
            PollingSettings::default(),
        );
        assert!(matches!(
            manager.setup_all().await,
            Err(ApplicationError::Storage(_))
        ));
    }
}
