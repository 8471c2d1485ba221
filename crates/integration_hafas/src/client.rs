//! HAFAS client for `hafas-rest-api` deployments
//!
//! Provides station search, journey planning, and departure boards using a
//! REST facade such as [v6.db.transport.rest](https://v6.db.transport.rest).

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use domain::{Departure, Journey, ProductFilter, Station};
use reqwest::{Client, Url};
use tracing::{debug, instrument, warn};

use crate::config::HafasConfig;
use crate::error::HafasError;
use crate::models::{RawDeparturesResponse, RawJourneysResponse, RawStop};

/// Parameters of a journey search between two resolved stations
#[derive(Debug, Clone)]
pub struct JourneyRequest {
    /// Origin station id
    pub from: String,
    /// Destination station id
    pub to: String,
    /// Earliest departure
    pub departure: DateTime<Utc>,
    /// Maximum number of journeys
    pub results: u8,
    /// Maximum number of transfers (`None` = unlimited)
    pub max_transfers: Option<u8>,
    /// Enabled products
    pub products: ProductFilter,
}

/// Parameters of a departure-board query at one station
#[derive(Debug, Clone)]
pub struct DepartureRequest {
    /// Station id
    pub stop: String,
    /// Earliest departure
    pub when: DateTime<Utc>,
    /// Maximum number of departures
    pub results: u8,
    /// Enabled products
    pub products: ProductFilter,
}

/// Trait for HAFAS clients
#[async_trait]
pub trait TransitClient: Send + Sync {
    /// Search stations by name
    async fn locations(&self, query: &str, max_results: u8) -> Result<Vec<Station>, HafasError>;

    /// Plan journeys between two stations
    async fn journeys(&self, request: &JourneyRequest) -> Result<Vec<Journey>, HafasError>;

    /// Fetch upcoming departures at a station
    async fn departures(&self, request: &DepartureRequest) -> Result<Vec<Departure>, HafasError>;
}

/// HAFAS client talking to one `hafas-rest-api` endpoint
#[derive(Debug)]
pub struct HafasTransitClient {
    client: Client,
    config: HafasConfig,
}

impl HafasTransitClient {
    /// Create a new HAFAS client
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the HTTP client
    /// cannot be initialized.
    pub fn new(config: &HafasConfig) -> Result<Self, HafasError> {
        config.validate().map_err(HafasError::Config)?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|e| HafasError::Unreachable(e.to_string()))?;

        Ok(Self {
            client,
            config: config.clone(),
        })
    }

    /// Base URL without a trailing slash
    fn base_url(&self) -> &str {
        self.config.base_url.trim_end_matches('/')
    }

    /// `<base>/stops/<stop>/departures` with `stop` percent-encoded as one segment
    fn stop_departures_url(&self, stop: &str) -> Result<Url, HafasError> {
        let mut url = Url::parse(self.base_url())
            .map_err(|e| HafasError::Config(format!("Invalid base URL: {e}")))?;
        url.path_segments_mut()
            .map_err(|()| HafasError::Config("Base URL cannot carry a path".to_string()))?
            .pop_if_empty()
            .extend(["stops", stop, "departures"]);
        Ok(url)
    }

    /// Send a GET request and return the body of a successful response
    async fn get(&self, url: &str, params: &[(&str, String)]) -> Result<String, HafasError> {
        let response = self
            .client
            .get(url)
            .query(params)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    HafasError::Timeout {
                        timeout_secs: self.config.timeout_secs,
                    }
                } else {
                    HafasError::Unreachable(e.to_string())
                }
            })?;

        let status = response.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(HafasError::Throttled {
                retry_after_secs: response
                    .headers()
                    .get("retry-after")
                    .and_then(|v| v.to_str().ok())
                    .and_then(|v| v.parse().ok()),
            });
        }

        if !status.is_success() {
            return Err(HafasError::Status {
                status: status.as_u16(),
            });
        }

        response.text().await.map_err(|e| {
            if e.is_timeout() {
                HafasError::Timeout {
                    timeout_secs: self.config.timeout_secs,
                }
            } else {
                HafasError::Malformed(e.to_string())
            }
        })
    }

    /// Append `<product>=true|false` for every product of the filter
    fn push_products<'a>(params: &mut Vec<(&'a str, String)>, products: &'a ProductFilter) {
        for (id, enabled) in products.iter() {
            params.push((id, bool_str(enabled).to_string()));
        }
    }

    fn parse_locations_response(body: &str) -> Result<Vec<Station>, HafasError> {
        let raw: Vec<RawStop> =
            serde_json::from_str(body).map_err(|e| HafasError::Malformed(e.to_string()))?;

        Ok(raw
            .into_iter()
            .filter(|s| s.id.is_some())
            .map(Station::from)
            .collect())
    }

    fn parse_journeys_response(body: &str) -> Result<Vec<Journey>, HafasError> {
        let raw: RawJourneysResponse =
            serde_json::from_str(body).map_err(|e| HafasError::Malformed(e.to_string()))?;

        raw.journeys.into_iter().map(Journey::try_from).collect()
    }

    fn parse_departures_response(body: &str) -> Result<Vec<Departure>, HafasError> {
        let raw: RawDeparturesResponse =
            serde_json::from_str(body).map_err(|e| HafasError::Malformed(e.to_string()))?;

        raw.into_departures()
            .into_iter()
            .map(Departure::try_from)
            .collect()
    }
}

#[async_trait]
impl TransitClient for HafasTransitClient {
    #[instrument(skip(self))]
    async fn locations(&self, query: &str, max_results: u8) -> Result<Vec<Station>, HafasError> {
        if query.trim().is_empty() {
            return Err(HafasError::InvalidLocation(
                "Search query must not be empty".to_string(),
            ));
        }

        let url = format!("{}/locations", self.base_url());

        let params = [
            ("query", query.to_string()),
            ("results", max_results.to_string()),
            ("stops", "true".to_string()),
            ("addresses", "false".to_string()),
            ("poi", "false".to_string()),
            ("fuzzy", "true".to_string()),
            ("language", self.config.language.clone()),
        ];

        debug!(?url, ?query, "Searching stations by name");

        let body = self.get(&url, &params).await?;
        let stations = Self::parse_locations_response(&body)?;

        debug!(count = stations.len(), "Stations found");
        Ok(stations)
    }

    #[instrument(skip(self, request), fields(from = %request.from, to = %request.to))]
    async fn journeys(&self, request: &JourneyRequest) -> Result<Vec<Journey>, HafasError> {
        let url = format!("{}/journeys", self.base_url());

        let mut params: Vec<(&str, String)> = vec![
            ("from", request.from.clone()),
            ("to", request.to.clone()),
            ("departure", request.departure.to_rfc3339()),
            ("results", request.results.to_string()),
            ("stopovers", "true".to_string()),
            ("remarks", "true".to_string()),
            ("language", self.config.language.clone()),
        ];

        if let Some(transfers) = request.max_transfers {
            params.push(("transfers", transfers.to_string()));
        }

        Self::push_products(&mut params, &request.products);

        debug!(?url, "Searching journeys");

        let body = self.get(&url, &params).await?;
        let journeys = Self::parse_journeys_response(&body)?;

        if journeys.is_empty() {
            warn!("No journeys found");
        }

        debug!(count = journeys.len(), "Journeys found");
        Ok(journeys)
    }

    #[instrument(skip(self, request), fields(stop = %request.stop))]
    async fn departures(&self, request: &DepartureRequest) -> Result<Vec<Departure>, HafasError> {
        if request.stop.trim().is_empty() {
            return Err(HafasError::InvalidLocation(
                "Station id must not be empty".to_string(),
            ));
        }

        let url = self.stop_departures_url(&request.stop)?;

        let mut params: Vec<(&str, String)> = vec![
            ("when", request.when.to_rfc3339()),
            ("results", request.results.to_string()),
            ("remarks", "true".to_string()),
            ("language", self.config.language.clone()),
        ];

        Self::push_products(&mut params, &request.products);

        debug!(?url, "Fetching departures");

        let body = self.get(url.as_str(), &params).await?;
        let departures = Self::parse_departures_response(&body)?;

        debug!(count = departures.len(), "Departures found");
        Ok(departures)
    }
}

/// Convert bool to "true"/"false" str for query params
const fn bool_str(val: bool) -> &'static str {
    if val { "true" } else { "false" }
}
