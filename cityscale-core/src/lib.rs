//! Core computation pipeline for city greenhouse-gas inventories.
//!
//! Sector activity and emission factors are turned into CO2, CH4, N2O and
//! CO2-equivalent emissions, adjusted for urban form and mitigation scenarios,
//! and projected over a forecast horizon under population and GDP growth.
//!
//! # Module Organisation
//!
//! - `emissions`: sector emissions and city-wide aggregates
//! - `urban_form`: activity modifiers derived from density, compactness and transit access
//! - `scenario`: mitigation reductions applied to activity and factors
//! - `forecast`: per-year projection of a single scenario
//! - `simulation`: base year, baseline and mitigation runs and scenario comparison
//!
//! All computations are pure functions of their inputs.

pub mod activity;
pub mod drivers;
pub mod emissions;
pub mod factors;
pub mod forecast;
pub mod parameters;
pub mod results;
pub mod scenario;
pub mod sector;
pub mod simulation;
pub mod urban_form;
pub mod utils;

pub mod errors;
