//! Setup wizard for new entries
//!
//! Three steps, each rendered as a form and submitted with the user's
//! input:
//!
//! 1. `user`: profile, origin and destination text, time offset, direct-only
//! 2. `stations`: pick the exact stations among the search results
//! 3. `products`: pick the products to query
//!
//! The last step yields the [`EntryConfig`] to persist.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use domain::{EntryConfig, ProductCatalog, Profile, Station, TimeOffset, dedup_by_name};
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::{debug, error, info, instrument};

use crate::error::ApplicationError;
use crate::executor::offload;
use crate::ports::{ClientFactory, TransitPort};

/// Error key for errors that concern the whole form
pub const BASE_ERROR: &str = "base";
/// A station text matched nothing, or a choice is not among the candidates
pub const ERROR_INVALID_STATION: &str = "invalid_station";
/// Validation failed for another reason (logged)
pub const ERROR_UNKNOWN: &str = "unknown";
/// No product was selected
pub const ERROR_NO_PRODUCTS: &str = "no_products";
/// A selected product is not offered by the profile
pub const ERROR_INVALID_PRODUCT: &str = "invalid_product";
/// The time offset exceeds [`TimeOffset::MAX_DAYS`]
pub const ERROR_INVALID_OFFSET: &str = "invalid_offset";

/// Wizard step identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FlowStep {
    /// Profile and station texts
    User,
    /// Station selection
    Stations,
    /// Product selection
    Products,
}

impl FlowStep {
    /// Step id as shown to the host
    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Stations => "stations",
            Self::Products => "products",
        }
    }
}

impl fmt::Display for FlowStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id())
    }
}

/// Input widget of a form field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldKind {
    /// Choice among fixed options
    Select {
        /// Option values
        options: Vec<String>,
        /// Whether several options may be chosen
        multiple: bool,
    },
    /// Free text
    Text,
    /// Days/hours/minutes/seconds
    Duration,
    /// Checkbox
    Boolean,
}

/// One field of a form
#[derive(Debug, Clone, PartialEq)]
pub struct FormField {
    /// Field name, also the input key
    pub name: String,
    /// Widget
    pub kind: FieldKind,
    /// Whether a value must be supplied
    pub required: bool,
    /// Suggested value
    pub default: Option<Value>,
}

impl FormField {
    fn new(name: &str, kind: FieldKind, required: bool, default: Option<Value>) -> Self {
        Self {
            name: name.to_string(),
            kind,
            required,
            default,
        }
    }
}

/// A form to show for a step, with the errors of the last submission
#[derive(Debug, Clone, PartialEq)]
pub struct Form {
    /// Step the form belongs to
    pub step: FlowStep,
    /// Fields in display order
    pub fields: Vec<FormField>,
    /// Error codes keyed by field name or [`BASE_ERROR`]
    pub errors: BTreeMap<String, String>,
}

impl Form {
    /// Look up a field by name
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&FormField> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Error code for a field or [`BASE_ERROR`]
    #[must_use]
    pub fn error(&self, key: &str) -> Option<&str> {
        self.errors.get(key).map(String::as_str)
    }
}

/// Outcome of a wizard step
#[derive(Debug, Clone, PartialEq)]
pub enum FlowResult {
    /// Show (or re-show) a form
    ShowForm(Form),
    /// The wizard is complete; persist this entry
    CreateEntry {
        /// Entry title
        title: String,
        /// Collected configuration
        data: EntryConfig,
    },
}

/// Submission of the `user` step
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UserInput {
    /// Provider profile
    pub profile: Profile,
    /// Origin station text
    pub start: String,
    /// Destination station text (empty = departure board)
    #[serde(default)]
    pub destination: String,
    /// Time offset applied to every query
    #[serde(default)]
    pub offset: TimeOffset,
    /// Only plan journeys without transfers
    #[serde(default)]
    pub only_direct: bool,
}

/// Submission of the `stations` step
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StationsInput {
    /// Chosen origin station name
    pub start: String,
    /// Chosen destination station name
    #[serde(default)]
    pub destination: Option<String>,
}

/// Submission of the `products` step
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ProductsInput {
    /// Chosen product ids
    pub products: Vec<String>,
}

#[derive(Debug, Clone, Copy)]
struct Intake {
    profile: Profile,
    offset: TimeOffset,
    only_direct: bool,
}

struct StationChoice {
    intake: Intake,
    client: Arc<dyn TransitPort>,
    start: Vec<Station>,
    destination: Option<Vec<Station>>,
}

struct ProductChoice {
    intake: Intake,
    catalog: ProductCatalog,
    start: Station,
    destination: Option<Station>,
}

enum FlowState {
    User,
    Stations(Box<StationChoice>),
    Products(Box<ProductChoice>),
    Finished,
}

/// The setup wizard for one new entry
pub struct ConfigFlow {
    factory: Arc<dyn ClientFactory>,
    state: FlowState,
}

impl fmt::Debug for ConfigFlow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfigFlow")
            .field("step", &self.current_step())
            .finish_non_exhaustive()
    }
}

impl ConfigFlow {
    /// Start a new wizard at the `user` step
    #[must_use]
    pub fn new(factory: Arc<dyn ClientFactory>) -> Self {
        Self {
            factory,
            state: FlowState::User,
        }
    }

    /// The step awaiting input, `None` once the entry has been created
    #[must_use]
    pub const fn current_step(&self) -> Option<FlowStep> {
        match self.state {
            FlowState::User => Some(FlowStep::User),
            FlowState::Stations(_) => Some(FlowStep::Stations),
            FlowState::Products(_) => Some(FlowStep::Products),
            FlowState::Finished => None,
        }
    }

    /// Show or submit the `user` step
    ///
    /// A valid submission resolves both station texts with one search each
    /// and advances to the `stations` step.
    ///
    /// # Errors
    ///
    /// Returns [`ApplicationError::NotFound`] if this step is not active.
    /// Validation problems are reported in the returned form instead.
    #[instrument(skip(self, input))]
    pub async fn step_user(
        &mut self,
        input: Option<UserInput>,
    ) -> Result<FlowResult, ApplicationError> {
        if !matches!(self.state, FlowState::User) {
            return Err(not_active(FlowStep::User));
        }

        let Some(input) = input else {
            return Ok(FlowResult::ShowForm(user_form(None, BTreeMap::new())));
        };

        if let Err(e) = input.offset.validate() {
            debug!(error = %e, "Offset rejected");
            return Ok(FlowResult::ShowForm(user_form(
                Some(&input),
                errors("offset", ERROR_INVALID_OFFSET),
            )));
        }

        match self.resolve(&input).await {
            Ok(choice) => {
                self.state = FlowState::Stations(Box::new(choice));
                self.step_stations(None)
            },
            Err(code) => Ok(FlowResult::ShowForm(user_form(
                Some(&input),
                errors(BASE_ERROR, code),
            ))),
        }
    }

    /// Show or submit the `stations` step
    ///
    /// # Errors
    ///
    /// Returns [`ApplicationError::NotFound`] if this step is not active.
    pub fn step_stations(
        &mut self,
        input: Option<StationsInput>,
    ) -> Result<FlowResult, ApplicationError> {
        let FlowState::Stations(choice) = &self.state else {
            return Err(not_active(FlowStep::Stations));
        };

        let Some(input) = input else {
            return Ok(FlowResult::ShowForm(stations_form(choice, BTreeMap::new())));
        };

        let start = pick(&choice.start, &input.start);
        let destination = match &choice.destination {
            None => Some(None),
            Some(candidates) => input
                .destination
                .as_deref()
                .and_then(|name| pick(candidates, name))
                .map(Some),
        };

        match (start, destination) {
            (Some(start), Some(destination)) => {
                let next = ProductChoice {
                    intake: choice.intake,
                    catalog: choice.client.catalog(),
                    start,
                    destination,
                };
                self.state = FlowState::Products(Box::new(next));
                self.step_products(None)
            },
            (start, destination) => {
                let mut errors = BTreeMap::new();
                if start.is_none() {
                    errors.insert("start".to_string(), ERROR_INVALID_STATION.to_string());
                }
                if destination.is_none() {
                    errors.insert(
                        "destination".to_string(),
                        ERROR_INVALID_STATION.to_string(),
                    );
                }
                Ok(FlowResult::ShowForm(stations_form(choice, errors)))
            },
        }
    }

    /// Show or submit the `products` step
    ///
    /// # Errors
    ///
    /// Returns [`ApplicationError::NotFound`] if this step is not active.
    pub fn step_products(
        &mut self,
        input: Option<ProductsInput>,
    ) -> Result<FlowResult, ApplicationError> {
        let FlowState::Products(choice) = &self.state else {
            return Err(not_active(FlowStep::Products));
        };

        let Some(input) = input else {
            return Ok(FlowResult::ShowForm(products_form(choice, BTreeMap::new())));
        };

        let problem = if input.products.is_empty() {
            Some(ERROR_NO_PRODUCTS)
        } else if input.products.iter().any(|p| !choice.catalog.contains(p)) {
            Some(ERROR_INVALID_PRODUCT)
        } else {
            None
        };

        if let Some(code) = problem {
            return Ok(FlowResult::ShowForm(products_form(
                choice,
                errors("products", code),
            )));
        }

        let mut products: Vec<String> = Vec::with_capacity(input.products.len());
        for product in input.products {
            if !products.contains(&product) {
                products.push(product);
            }
        }

        let data = EntryConfig {
            profile: choice.intake.profile,
            start: choice.start.clone(),
            destination: choice.destination.clone(),
            offset: choice.intake.offset,
            only_direct: choice.intake.only_direct,
            products,
        };
        let title = data.title();

        info!(%title, profile = %data.profile, "Entry configuration complete");
        self.state = FlowState::Finished;

        Ok(FlowResult::CreateEntry { title, data })
    }

    /// Build a client and resolve the station texts of a `user` submission
    async fn resolve(&self, input: &UserInput) -> Result<StationChoice, &'static str> {
        let client = self.factory.create(input.profile).map_err(|e| {
            error!(profile = %input.profile, error = %e, "Could not create transit client");
            ERROR_UNKNOWN
        })?;

        let start = search(&client, &input.start).await?;

        let destination_text = input.destination.trim();
        let destination = if destination_text.is_empty() {
            None
        } else {
            Some(search(&client, destination_text).await?)
        };

        Ok(StationChoice {
            intake: Intake {
                profile: input.profile,
                offset: input.offset,
                only_direct: input.only_direct,
            },
            client,
            start,
            destination,
        })
    }
}

/// One station search, offloaded from the caller's task
async fn search(client: &Arc<dyn TransitPort>, text: &str) -> Result<Vec<Station>, &'static str> {
    let worker = Arc::clone(client);
    let query = text.to_string();

    match offload(async move { worker.search_stations(&query).await }).await {
        Ok(stations) if stations.is_empty() => {
            debug!(station = %text, "No station matched");
            Err(ERROR_INVALID_STATION)
        },
        Ok(stations) => Ok(dedup_by_name(stations)),
        Err(ApplicationError::NoStationFound(_)) => {
            debug!(station = %text, "No station matched");
            Err(ERROR_INVALID_STATION)
        },
        Err(e) => {
            error!(station = %text, error = %e, "Station lookup failed");
            Err(ERROR_UNKNOWN)
        },
    }
}

fn pick(candidates: &[Station], name: &str) -> Option<Station> {
    candidates.iter().find(|s| s.name == name).cloned()
}

fn not_active(step: FlowStep) -> ApplicationError {
    ApplicationError::NotFound(format!("flow step '{step}' is not active"))
}

fn errors(key: &str, code: &str) -> BTreeMap<String, String> {
    BTreeMap::from([(key.to_string(), code.to_string())])
}

fn user_form(last: Option<&UserInput>, errors: BTreeMap<String, String>) -> Form {
    let profiles = Profile::all().iter().map(|p| p.code().to_string()).collect();
    let profile = last.map_or(Profile::Db, |i| i.profile);
    let offset = last.map_or_else(
        || Some(json!({ "seconds": 0 })),
        |i| serde_json::to_value(i.offset).ok(),
    );

    Form {
        step: FlowStep::User,
        fields: vec![
            FormField::new(
                "profile",
                FieldKind::Select {
                    options: profiles,
                    multiple: false,
                },
                true,
                Some(json!(profile.code())),
            ),
            FormField::new(
                "start",
                FieldKind::Text,
                true,
                last.map(|i| json!(i.start)),
            ),
            FormField::new(
                "destination",
                FieldKind::Text,
                false,
                last.map(|i| json!(i.destination)),
            ),
            FormField::new("offset", FieldKind::Duration, false, offset),
            FormField::new(
                "only_direct",
                FieldKind::Boolean,
                false,
                Some(json!(last.is_some_and(|i| i.only_direct))),
            ),
        ],
        errors,
    }
}

fn station_field(name: &str, candidates: &[Station]) -> FormField {
    let options: Vec<String> = candidates.iter().map(|s| s.name.clone()).collect();
    let default = options.first().map(|n| json!(n));
    FormField::new(
        name,
        FieldKind::Select {
            options,
            multiple: false,
        },
        true,
        default,
    )
}

fn stations_form(choice: &StationChoice, errors: BTreeMap<String, String>) -> Form {
    let mut fields = vec![station_field("start", &choice.start)];
    if let Some(destination) = &choice.destination {
        fields.push(station_field("destination", destination));
    }

    Form {
        step: FlowStep::Stations,
        fields,
        errors,
    }
}

fn products_form(choice: &ProductChoice, errors: BTreeMap<String, String>) -> Form {
    Form {
        step: FlowStep::Products,
        fields: vec![FormField::new(
            "products",
            FieldKind::Select {
                options: choice.catalog.available().map(str::to_string).collect(),
                multiple: true,
            },
            true,
            Some(json!(choice.catalog.defaults())),
        )],
        errors,
    }
}

#[cfg(test)]
mod tests {
    use domain::ProductInfo;

    use super::*;
    use crate::ports::{MockClientFactory, MockTransitPort};

    fn catalog() -> ProductCatalog {
        ProductCatalog::new(vec![
            ProductInfo::new("stadtbahn", "Stadtbahn", true),
            ProductInfo::new("bus", "Bus", true),
            ProductInfo::new("taxibus", "Taxibus", false),
        ])
    }

    fn stations_for(text: &str) -> Vec<Station> {
        match text {
            "Neumarkt" => vec![
                Station::new("1", "Neumarkt"),
                Station::new("2", "Neumarkt"),
                Station::new("3", "Neumarkt Süd"),
            ],
            "Hbf" => vec![Station::new("10", "Köln Hbf")],
            _ => Vec::new(),
        }
    }

    fn client() -> MockTransitPort {
        let mut client = MockTransitPort::new();
        client
            .expect_search_stations()
            .returning(|text| Ok(stations_for(text)));
        client.expect_catalog().returning(catalog);
        client
    }

    fn flow_with(client: MockTransitPort) -> ConfigFlow {
        let client: Arc<dyn TransitPort> = Arc::new(client);
        let mut factory = MockClientFactory::new();
        factory
            .expect_create()
            .returning(move |_| Ok(Arc::clone(&client)));
        ConfigFlow::new(Arc::new(factory))
    }

    fn input(start: &str, destination: &str) -> UserInput {
        UserInput {
            profile: Profile::Kvb,
            start: start.to_string(),
            destination: destination.to_string(),
            offset: TimeOffset::from_minutes(5),
            only_direct: true,
        }
    }

    fn form(result: FlowResult) -> Form {
        match result {
            FlowResult::ShowForm(form) => form,
            FlowResult::CreateEntry { .. } => panic!("expected a form"),
        }
    }

    async fn at_products(flow: &mut ConfigFlow) {
        flow.step_user(Some(input("Neumarkt", "Hbf"))).await.unwrap();
        flow.step_stations(Some(StationsInput {
            start: "Neumarkt Süd".to_string(),
            destination: Some("Köln Hbf".to_string()),
        }))
        .unwrap();
    }

    #[tokio::test]
    async fn user_step_shows_form() {
        let mut flow = flow_with(client());
        let form = form(flow.step_user(None).await.unwrap());

        assert_eq!(form.step, FlowStep::User);
        assert!(form.errors.is_empty());
        assert!(form.field("start").unwrap().required);
        assert!(!form.field("destination").unwrap().required);
        assert_eq!(
            form.field("offset").unwrap().default,
            Some(json!({ "seconds": 0 }))
        );
        assert_eq!(form.field("only_direct").unwrap().default, Some(json!(false)));
    }

    #[tokio::test]
    async fn unmatched_station_is_invalid_station() {
        let mut flow = flow_with(client());
        let form = form(flow.step_user(Some(input("Atlantis", ""))).await.unwrap());

        assert_eq!(form.step, FlowStep::User);
        assert_eq!(form.error(BASE_ERROR), Some(ERROR_INVALID_STATION));
        assert_eq!(form.field("start").unwrap().default, Some(json!("Atlantis")));
        assert_eq!(flow.current_step(), Some(FlowStep::User));
    }

    #[tokio::test]
    async fn unmatched_destination_is_invalid_station() {
        let mut flow = flow_with(client());
        let form = form(flow.step_user(Some(input("Neumarkt", "Atlantis"))).await.unwrap());
        assert_eq!(form.error(BASE_ERROR), Some(ERROR_INVALID_STATION));
    }

    #[tokio::test]
    async fn no_station_found_error_is_invalid_station() {
        let mut client = MockTransitPort::new();
        client
            .expect_search_stations()
            .returning(|text| Err(ApplicationError::NoStationFound(text.to_string())));
        let mut flow = flow_with(client);

        let form = form(flow.step_user(Some(input("", ""))).await.unwrap());
        assert_eq!(form.error(BASE_ERROR), Some(ERROR_INVALID_STATION));
    }

    #[tokio::test]
    async fn oversized_offset_is_rejected_before_searching() {
        let mut client = MockTransitPort::new();
        client.expect_search_stations().never();
        let mut flow = flow_with(client);

        let mut oversized = input("Neumarkt", "Hbf");
        oversized.offset = TimeOffset {
            days: TimeOffset::MAX_DAYS + 1,
            ..TimeOffset::default()
        };
        let form = form(flow.step_user(Some(oversized)).await.unwrap());

        assert_eq!(form.step, FlowStep::User);
        assert_eq!(form.error("offset"), Some(ERROR_INVALID_OFFSET));
        assert_eq!(form.error(BASE_ERROR), None);
        assert_eq!(flow.current_step(), Some(FlowStep::User));
    }

    #[tokio::test]
    async fn lookup_failure_is_unknown() {
        let mut client = MockTransitPort::new();
        client
            .expect_search_stations()
            .returning(|_| Err(ApplicationError::ExternalService("HTTP 503".to_string())));
        let mut flow = flow_with(client);

        let form = form(flow.step_user(Some(input("Neumarkt", ""))).await.unwrap());
        assert_eq!(form.error(BASE_ERROR), Some(ERROR_UNKNOWN));
    }

    #[tokio::test]
    async fn factory_failure_is_unknown() {
        let mut factory = MockClientFactory::new();
        factory
            .expect_create()
            .returning(|p| Err(ApplicationError::UnsupportedProfile(p.code().to_string())));
        let mut flow = ConfigFlow::new(Arc::new(factory));

        let form = form(flow.step_user(Some(input("Neumarkt", ""))).await.unwrap());
        assert_eq!(form.error(BASE_ERROR), Some(ERROR_UNKNOWN));
    }

    #[tokio::test]
    async fn one_search_per_station_text() {
        let mut client = MockTransitPort::new();
        client
            .expect_search_stations()
            .times(2)
            .returning(|text| Ok(stations_for(text)));
        let mut flow = flow_with(client);

        flow.step_user(Some(input("Neumarkt", "Hbf"))).await.unwrap();
        assert_eq!(flow.current_step(), Some(FlowStep::Stations));
    }

    #[tokio::test]
    async fn stations_are_deduplicated_by_name() {
        let mut flow = flow_with(client());
        let form = form(flow.step_user(Some(input("Neumarkt", "Hbf"))).await.unwrap());

        assert_eq!(form.step, FlowStep::Stations);
        let start = form.field("start").unwrap();
        assert_eq!(
            start.kind,
            FieldKind::Select {
                options: vec!["Neumarkt".to_string(), "Neumarkt Süd".to_string()],
                multiple: false,
            }
        );
        assert_eq!(start.default, Some(json!("Neumarkt")));
        assert!(form.field("destination").is_some());
    }

    #[tokio::test]
    async fn departure_board_has_no_destination_choice() {
        let mut client = MockTransitPort::new();
        client
            .expect_search_stations()
            .times(1)
            .returning(|text| Ok(stations_for(text)));
        let mut flow = flow_with(client);

        let form = form(flow.step_user(Some(input("Neumarkt", "  "))).await.unwrap());
        assert!(form.field("destination").is_none());
    }

    #[tokio::test]
    async fn unknown_station_choice_is_rejected() {
        let mut flow = flow_with(client());
        flow.step_user(Some(input("Neumarkt", "Hbf"))).await.unwrap();

        let form = form(
            flow.step_stations(Some(StationsInput {
                start: "Elsewhere".to_string(),
                destination: Some("Köln Hbf".to_string()),
            }))
            .unwrap(),
        );

        assert_eq!(form.step, FlowStep::Stations);
        assert_eq!(form.error("start"), Some(ERROR_INVALID_STATION));
        assert!(form.error("destination").is_none());
    }

    #[tokio::test]
    async fn products_step_defaults_to_recommended_subset() {
        let mut flow = flow_with(client());
        flow.step_user(Some(input("Neumarkt", "Hbf"))).await.unwrap();

        let form = form(
            flow.step_stations(Some(StationsInput {
                start: "Neumarkt".to_string(),
                destination: Some("Köln Hbf".to_string()),
            }))
            .unwrap(),
        );

        assert_eq!(form.step, FlowStep::Products);
        assert_eq!(
            form.field("products").unwrap().default,
            Some(json!(["stadtbahn", "bus"]))
        );
    }

    #[tokio::test]
    async fn empty_product_selection_is_rejected() {
        let mut flow = flow_with(client());
        at_products(&mut flow).await;

        let form = form(
            flow.step_products(Some(ProductsInput { products: vec![] }))
                .unwrap(),
        );
        assert_eq!(form.error("products"), Some(ERROR_NO_PRODUCTS));
    }

    #[tokio::test]
    async fn unknown_product_is_rejected() {
        let mut flow = flow_with(client());
        at_products(&mut flow).await;

        let form = form(
            flow.step_products(Some(ProductsInput {
                products: vec!["bus".to_string(), "hovercraft".to_string()],
            }))
            .unwrap(),
        );
        assert_eq!(form.error("products"), Some(ERROR_INVALID_PRODUCT));
    }

    #[tokio::test]
    async fn completed_flow_creates_entry() {
        let mut flow = flow_with(client());
        at_products(&mut flow).await;

        let result = flow
            .step_products(Some(ProductsInput {
                products: vec!["bus".to_string(), "taxibus".to_string(), "bus".to_string()],
            }))
            .unwrap();

        let FlowResult::CreateEntry { title, data } = result else {
            panic!("expected an entry");
        };
        assert_eq!(title, "Neumarkt Süd to Köln Hbf");
        assert_eq!(data.profile, Profile::Kvb);
        assert_eq!(data.start, Station::new("3", "Neumarkt Süd"));
        assert_eq!(data.destination, Some(Station::new("10", "Köln Hbf")));
        assert_eq!(data.offset, TimeOffset::from_minutes(5));
        assert!(data.only_direct);
        assert_eq!(data.products, vec!["bus".to_string(), "taxibus".to_string()]);
        assert!(flow.current_step().is_none());
    }

    #[tokio::test]
    async fn departure_board_entry_title_is_origin() {
        let mut flow = flow_with(client());
        flow.step_user(Some(input("Neumarkt", ""))).await.unwrap();
        flow.step_stations(Some(StationsInput {
            start: "Neumarkt".to_string(),
            destination: None,
        }))
        .unwrap();

        let result = flow
            .step_products(Some(ProductsInput {
                products: vec!["stadtbahn".to_string()],
            }))
            .unwrap();

        let FlowResult::CreateEntry { title, data } = result else {
            panic!("expected an entry");
        };
        assert_eq!(title, "Neumarkt");
        assert!(data.destination.is_none());
    }

    #[tokio::test]
    async fn steps_out_of_order_are_rejected() {
        let mut flow = flow_with(client());

        assert!(matches!(
            flow.step_products(None),
            Err(ApplicationError::NotFound(_))
        ));
        assert!(matches!(
            flow.step_stations(None),
            Err(ApplicationError::NotFound(_))
        ));

        flow.step_user(Some(input("Neumarkt", ""))).await.unwrap();
        assert!(matches!(
            flow.step_user(None).await,
            Err(ApplicationError::NotFound(_))
        ));
    }

    #[test]
    fn user_input_deserializes_with_defaults() {
        let input: UserInput =
            serde_json::from_str(r#"{ "profile": "DB", "start": "Berlin Hbf" }"#).unwrap();
        assert_eq!(input.profile, Profile::Db);
        assert!(input.destination.is_empty());
        assert!(input.offset.is_zero());
        assert!(!input.only_direct);
    }

    #[test]
    fn step_ids() {
        assert_eq!(FlowStep::User.id(), "user");
        assert_eq!(FlowStep::Stations.to_string(), "stations");
        assert_eq!(FlowStep::Products.id(), "products");
    }
}
