//! Computed emissions

use crate::sector::SectorKind;
use serde::{Deserialize, Serialize};

/// Emissions of one sector for one year and scenario
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SectorResult {
    pub sector: SectorKind,
    /// Activity after growth, urban-form and scenario adjustments
    pub activity_used: f64,
    pub co2: f64,
    pub ch4: f64,
    pub n2o: f64,
    pub co2e: f64,
}

/// City-wide totals for one year and scenario
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AggregateResult {
    pub total_co2e: f64,
    pub per_capita_co2e: f64,
    /// CO2e per unit of total GDP
    pub per_gdp_co2e: f64,
}

/// Sector results ordered from largest to smallest CO2e
pub fn ranked_by_co2e(results: &[SectorResult]) -> Vec<SectorResult> {
    let mut ranked = results.to_vec();
    ranked.sort_by(|a, b| b.co2e.total_cmp(&a.co2e));
    ranked
}
