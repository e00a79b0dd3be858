//! Model parameters
//!
//! Parameter structures consumed by the engines. Each struct provides defaults
//! and deserialises with `#[serde(default)]`, so partial documents (TOML or
//! JSON) only need to name the values they override.

mod config;
mod gwp;
mod scenario;
mod urban_form;

pub use config::{ForecastHorizon, ModelConfig};
pub use gwp::GwpConstants;
pub use scenario::ScenarioParameters;
pub use urban_form::UrbanFormParameters;
