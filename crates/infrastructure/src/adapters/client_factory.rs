//! Profile-to-client mapping

use std::sync::Arc;

use application::error::ApplicationError;
use application::ports::{ClientFactory, TransitPort};
use domain::Profile;
use tracing::debug;

use super::HafasTransitAdapter;
use crate::config::HafasAppConfig;

/// Builds a [`HafasTransitAdapter`] per profile from the shared HAFAS settings
#[derive(Debug, Clone)]
pub struct HafasClientFactory {
    config: HafasAppConfig,
}

impl HafasClientFactory {
    pub const fn new(config: HafasAppConfig) -> Self {
        Self { config }
    }
}

impl ClientFactory for HafasClientFactory {
    fn create(&self, profile: Profile) -> Result<Arc<dyn TransitPort>, ApplicationError> {
        let config = self.config.client_config(profile).ok_or_else(|| {
            ApplicationError::UnsupportedProfile(format!(
                "no endpoint configured for {}",
                profile.code()
            ))
        })?;

        debug!(profile = %profile.code(), base_url = %config.base_url, "Creating HAFAS client");

        let adapter = HafasTransitAdapter::new(profile, &config).map_err(|e| {
            ApplicationError::UnsupportedProfile(format!("{}: {e}", profile.code()))
        })?;
        Ok(Arc::new(adapter))
    }
}
