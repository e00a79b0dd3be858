//! Input loading and run storage for CityScale.
//!
//! These are the collaborators around the computation pipeline in
//! `cityscale_core`: they read activity and factor tables, validate them into
//! core types, persist run results and provide boundary helpers. None of them
//! change the emissions semantics of the values they carry.

pub mod errors;
pub mod geo;
pub mod loader;
pub mod store;
pub mod validation;
