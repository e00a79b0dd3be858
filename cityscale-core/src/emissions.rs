//! Emissions engine
//!
//! Converts sector activity and emission factors into per-gas emissions and a
//! CO2-equivalent total, then aggregates sectors into city-wide metrics.
//!
//! # Calculation
//!
//! For activity $A$ and factors $f$:
//!
//! $$CO2 = A \cdot f_{CO2}, \quad CH4 = A \cdot f_{CH4}, \quad N2O = A \cdot f_{N2O}$$
//!
//! $$CO2e = CO2 \cdot GWP_{CO2} + CH4 \cdot GWP_{CH4} + N2O \cdot GWP_{N2O}$$
//!
//! No rounding is applied.

use crate::activity::{ActivitySet, SectorActivity};
use crate::errors::{CityScaleError, CityScaleResult};
use crate::factors::{EmissionFactor, EmissionFactorTable};
use crate::parameters::GwpConstants;
use crate::results::{AggregateResult, SectorResult};
use crate::utils::checked_ratio;
use serde::{Deserialize, Serialize};

/// Sector emissions calculator parameterised by a set of GWP constants
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct EmissionsEngine {
    gwp: GwpConstants,
}

impl EmissionsEngine {
    /// Create an engine using the default (AR5) GWP values
    pub fn new() -> Self {
        Self::from_parameters(GwpConstants::default())
    }

    pub fn from_parameters(gwp: GwpConstants) -> Self {
        Self { gwp }
    }

    pub fn gwp(&self) -> &GwpConstants {
        &self.gwp
    }

    /// Emissions of a single sector.
    ///
    /// Fails with [`CityScaleError::InvalidActivity`] for negative activity and
    /// [`CityScaleError::InvalidFactor`] if the factor is invalid or belongs to
    /// another sector.
    pub fn compute_sector(
        &self,
        activity: SectorActivity,
        factor: &EmissionFactor,
    ) -> CityScaleResult<SectorResult> {
        activity.validate()?;
        factor.validate()?;
        if factor.sector != activity.sector {
            return Err(CityScaleError::InvalidFactor {
                sector: activity.sector,
                reason: format!("factor row belongs to sector {}", factor.sector),
            });
        }

        let co2 = activity.value * factor.co2_factor;
        let ch4 = activity.value * factor.ch4_factor;
        let n2o = activity.value * factor.n2o_factor;

        Ok(SectorResult {
            sector: activity.sector,
            activity_used: activity.value,
            co2,
            ch4,
            n2o,
            co2e: self.gwp.co2e(co2, ch4, n2o),
        })
    }

    /// Emissions of every sector present in `activities`, in canonical sector order.
    ///
    /// A sector with activity but no row in `factors` fails with
    /// [`CityScaleError::InvalidFactor`].
    pub fn compute_sectors(
        &self,
        activities: &ActivitySet,
        factors: &EmissionFactorTable,
    ) -> CityScaleResult<Vec<SectorResult>> {
        activities
            .iter()
            .map(|activity| self.compute_sector(activity, factors.get(activity.sector)?))
            .collect()
    }

    /// City-wide totals and intensities.
    ///
    /// Per-GDP intensity is relative to total GDP (`population * gdp_per_capita`).
    /// Fails with [`CityScaleError::DivisionDomain`] if either denominator is not positive.
    pub fn aggregate(
        results: &[SectorResult],
        population: f64,
        gdp_per_capita: f64,
    ) -> CityScaleResult<AggregateResult> {
        let total_co2e: f64 = results.iter().map(|r| r.co2e).sum();
        let per_capita_co2e = checked_ratio(total_co2e, population, "population")?;
        let per_gdp_co2e = checked_ratio(total_co2e, population * gdp_per_capita, "gdp")?;

        Ok(AggregateResult {
            total_co2e,
            per_capita_co2e,
            per_gdp_co2e,
        })
    }
}
