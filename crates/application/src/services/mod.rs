//! Application services - Use case implementations

mod config_flow;
mod integration;
mod sensor;

pub use config_flow::{
    BASE_ERROR, ConfigFlow, ERROR_INVALID_OFFSET, ERROR_INVALID_PRODUCT, ERROR_INVALID_STATION,
    ERROR_NO_PRODUCTS, ERROR_UNKNOWN, FieldKind, FlowResult, FlowStep, Form, FormField, ProductsInput,
    StationsInput, UserInput,
};
pub use integration::{IntegrationManager, SetupReport};
pub use sensor::{
    PollingSettings, SENSOR_DEVICE_CLASS, SENSOR_ICON, SensorDescription, TransitSensor,
};
