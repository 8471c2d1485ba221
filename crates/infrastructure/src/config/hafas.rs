//! HAFAS endpoint settings shared by every profile

use std::collections::HashMap;

use domain::Profile;
use integration_hafas::{HafasConfig, default_base_url};
use serde::{Deserialize, Serialize};

/// Settings applied to every client built by the factory
///
/// `endpoints` maps a profile code (`DB`, `KVB`, ...) to the base URL of a
/// `hafas-rest-api` deployment. A profile without a configured URL falls
/// back to its public default, if it has one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HafasAppConfig {
    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// User agent sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Language for remarks and names
    #[serde(default = "default_language")]
    pub language: String,

    /// Base URL overrides keyed by profile code
    #[serde(default)]
    pub endpoints: HashMap<String, String>,
}

const fn default_timeout_secs() -> u64 {
    10
}

fn default_user_agent() -> String {
    format!("hafas-sensor/{}", env!("CARGO_PKG_VERSION"))
}

fn default_language() -> String {
    "en".to_string()
}

impl Default for HafasAppConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
            language: default_language(),
            endpoints: HashMap::new(),
        }
    }
}

impl HafasAppConfig {
    /// Base URL for a profile: configured override first, then the public default
    ///
    /// Keys are compared case-insensitively because environment sources
    /// lowercase them; `AppConfig::validate` rejects keys differing only in
    /// case.
    #[must_use]
    pub fn endpoint(&self, profile: Profile) -> Option<String> {
        self.endpoints
            .iter()
            .find(|(code, _)| code.eq_ignore_ascii_case(profile.code()))
            .map(|(_, url)| url.clone())
            .or_else(|| default_base_url(profile).map(str::to_string))
    }

    /// Client configuration for a profile, if an endpoint is known
    #[must_use]
    pub fn client_config(&self, profile: Profile) -> Option<HafasConfig> {
        self.endpoint(profile).map(|base_url| HafasConfig {
            base_url,
            timeout_secs: self.timeout_secs,
            user_agent: self.user_agent.clone(),
            language: self.language.clone(),
        })
    }
}
