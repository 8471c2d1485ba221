//! HAFAS adapter - Implements TransitPort using integration_hafas

use application::error::ApplicationError;
use application::ports::{DepartureQuery, JourneyQuery, TransitPort};
use async_trait::async_trait;
use domain::{Departure, Journey, ProductCatalog, Profile, Station};
use integration_hafas::{
    DepartureRequest, HafasConfig, HafasError, HafasTransitClient, JourneyRequest, TransitClient,
    catalog,
};
use tracing::{debug, instrument};

/// Station candidates requested per search
const STATION_RESULTS: u8 = 10;

/// Adapter binding a HAFAS client to one provider profile
#[derive(Debug)]
pub struct HafasTransitAdapter {
    client: HafasTransitClient,
    profile: Profile,
    catalog: ProductCatalog,
}

impl HafasTransitAdapter {
    /// Create an adapter for `profile` talking to the endpoint in `config`
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to initialize.
    pub fn new(profile: Profile, config: &HafasConfig) -> Result<Self, HafasError> {
        Ok(Self {
            client: HafasTransitClient::new(config)?,
            profile,
            catalog: catalog(profile),
        })
    }

    /// The profile this adapter is bound to
    pub const fn profile(&self) -> Profile {
        self.profile
    }
}

fn map_error(operation: &str, error: HafasError) -> ApplicationError {
    match error {
        HafasError::InvalidLocation(message) => ApplicationError::NoStationFound(message),
        other => ApplicationError::ExternalService(format!("{operation} failed: {other}")),
    }
}

#[async_trait]
impl TransitPort for HafasTransitAdapter {
    fn catalog(&self) -> ProductCatalog {
        self.catalog.clone()
    }

    #[instrument(skip(self), fields(profile = %self.profile.code()))]
    async fn search_stations(&self, text: &str) -> Result<Vec<Station>, ApplicationError> {
        let stations = self
            .client
            .locations(text, STATION_RESULTS)
            .await
            .map_err(|e| map_error("Station search", e))?;

        debug!(count = stations.len(), "Station search completed");
        Ok(stations)
    }

    #[instrument(
        skip(self, query),
        fields(profile = %self.profile.code(), from = %query.origin.id, to = %query.destination.id)
    )]
    async fn plan_journey(&self, query: &JourneyQuery) -> Result<Vec<Journey>, ApplicationError> {
        let request = JourneyRequest {
            from: query.origin.id.clone(),
            to: query.destination.id.clone(),
            departure: query.departure,
            results: query.max_results,
            max_transfers: query.max_transfers,
            products: query.products.clone(),
        };

        let journeys = self
            .client
            .journeys(&request)
            .await
            .map_err(|e| map_error("Journey search", e))?;

        debug!(count = journeys.len(), "Journey search completed");
        Ok(journeys)
    }

    #[instrument(skip(self, query), fields(profile = %self.profile.code(), stop = %query.station.id))]
    async fn departure_board(
        &self,
        query: &DepartureQuery,
    ) -> Result<Vec<Departure>, ApplicationError> {
        let request = DepartureRequest {
            stop: query.station.id.clone(),
            when: query.when,
            results: query.max_results,
            products: query.products.clone(),
        };

        let departures = self
            .client
            .departures(&request)
            .await
            .map_err(|e| map_error("Departure board", e))?;

        debug!(count = departures.len(), "Departure board loaded");
        Ok(departures)
    }
}
