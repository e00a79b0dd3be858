//! Multi-year forecast
//!
//! Projects emissions over an inclusive range of years. Every year is derived
//! from the base-year inputs and its offset `t` from the start year alone, so a
//! single year can be computed (and tested) in isolation.
//!
//! # Per-year pipeline
//!
//! 1. $P_t = P_0 (1 + g_P)^t$ and $Y_t = Y_0 (1 + g_Y)^t$ (GDP per capita)
//! 2. Residential, transport and waste activity scale by $P_t / P_0$; industry and
//!    energy by $\frac{1}{2}(P_t / P_0 + Y_t / Y_0)$
//! 3. Urban form modifiers
//! 4. Scenario adjustment
//! 5. Sector emissions and aggregation using $P_t$ and $Y_t$

use crate::activity::ActivitySet;
use crate::drivers::{growth_ratio, CityProfile};
use crate::emissions::EmissionsEngine;
use crate::errors::CityScaleResult;
use crate::factors::EmissionFactorTable;
use crate::parameters::{ScenarioParameters, UrbanFormParameters};
use crate::results::{AggregateResult, SectorResult};
use crate::scenario::ScenarioEngine;
use crate::sector::GrowthBasis;
use crate::urban_form::{UrbanFormEngine, UrbanFormModifiers};
use crate::utils::year_range;
use serde::{Deserialize, Serialize};

/// Emissions of one scenario in one year
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastYearRecord {
    pub year: i32,
    pub population: f64,
    pub gdp_per_capita: f64,
    pub sector_results: Vec<SectorResult>,
    pub aggregate: AggregateResult,
}

impl ForecastYearRecord {
    /// Total GDP in this year
    pub fn gdp(&self) -> f64 {
        self.population * self.gdp_per_capita
    }
}

/// Growth of the socio-economic drivers at offset `t`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct YearDrivers {
    pub population: f64,
    pub gdp_per_capita: f64,
    /// $P_t / P_0$
    pub population_ratio: f64,
    /// $Y_t / Y_0$
    pub gdp_per_capita_ratio: f64,
}

impl YearDrivers {
    pub fn at(city: &CityProfile, t: u32) -> Self {
        // Ratios come straight from the growth rate so a zero base value cannot
        // poison activity scaling; aggregation still rejects it.
        let population_ratio = growth_ratio(city.population_growth, t);
        let gdp_per_capita_ratio = growth_ratio(city.gdp_growth, t);
        Self {
            population: city.population * population_ratio,
            gdp_per_capita: city.gdp_per_capita * gdp_per_capita_ratio,
            population_ratio,
            gdp_per_capita_ratio,
        }
    }

    /// Activity scaling factor for a growth basis
    pub fn activity_scale(&self, basis: GrowthBasis) -> f64 {
        match basis {
            GrowthBasis::Population => self.population_ratio,
            GrowthBasis::PopulationAndGdp => {
                (self.population_ratio + self.gdp_per_capita_ratio) / 2.0
            }
        }
    }
}

/// Forecast of a single scenario over a range of years
#[derive(Debug, Clone)]
pub struct Forecaster<'a> {
    base_activity: &'a ActivitySet,
    factors: &'a EmissionFactorTable,
    city: &'a CityProfile,
    modifiers: UrbanFormModifiers,
    scenario: ScenarioParameters,
    engine: EmissionsEngine,
}

impl<'a> Forecaster<'a> {
    pub fn new(
        base_activity: &'a ActivitySet,
        factors: &'a EmissionFactorTable,
        city: &'a CityProfile,
        urban_form: &UrbanFormParameters,
        scenario: &ScenarioParameters,
        engine: EmissionsEngine,
    ) -> Self {
        Self::with_modifiers(
            base_activity,
            factors,
            city,
            UrbanFormEngine::compute_modifiers(urban_form),
            scenario,
            engine,
        )
    }

    /// Use precomputed urban form modifiers
    pub fn with_modifiers(
        base_activity: &'a ActivitySet,
        factors: &'a EmissionFactorTable,
        city: &'a CityProfile,
        modifiers: UrbanFormModifiers,
        scenario: &ScenarioParameters,
        engine: EmissionsEngine,
    ) -> Self {
        Self {
            base_activity,
            factors,
            city,
            modifiers,
            scenario: scenario.normalized(),
            engine,
        }
    }

    pub fn modifiers(&self) -> &UrbanFormModifiers {
        &self.modifiers
    }

    /// Base activity scaled by population and GDP growth at offset `t`
    pub fn scaled_activity(&self, drivers: &YearDrivers) -> ActivitySet {
        self.base_activity
            .scaled_by(|sector| drivers.activity_scale(sector.growth_basis()))
    }

    /// Compute the record for `year`, `t` years after the start of the forecast
    pub fn forecast_year(&self, year: i32, t: u32) -> CityScaleResult<ForecastYearRecord> {
        let drivers = YearDrivers::at(self.city, t);

        let scaled = self.scaled_activity(&drivers);
        let shaped = UrbanFormEngine::apply_set(&scaled, &self.modifiers);
        let (activity, factors) =
            ScenarioEngine::apply_scenario(&shaped, self.factors, &self.scenario);

        let sector_results = self.engine.compute_sectors(&activity, &factors)?;
        let aggregate = EmissionsEngine::aggregate(
            &sector_results,
            drivers.population,
            drivers.gdp_per_capita,
        )?;

        log::debug!(
            "{} year {} (t={}): total CO2e {:.3}",
            self.city.name,
            year,
            t,
            aggregate.total_co2e
        );

        Ok(ForecastYearRecord {
            year,
            population: drivers.population,
            gdp_per_capita: drivers.gdp_per_capita,
            sector_results,
            aggregate,
        })
    }

    /// Records for every year of the inclusive range, sorted by year.
    ///
    /// Fails with [`crate::errors::CityScaleError::InvalidRange`] if `end_year < start_year`.
    pub fn forecast(
        &self,
        start_year: i32,
        end_year: i32,
    ) -> CityScaleResult<Vec<ForecastYearRecord>> {
        let years = year_range(start_year, end_year)?;
        let mut records = years
            .into_iter()
            .map(|year| self.forecast_year(year, (year - start_year) as u32))
            .collect::<CityScaleResult<Vec<_>>>()?;
        records.sort_by_key(|record| record.year);
        Ok(records)
    }
}

/// Forecast one scenario over `start_year..=end_year`.
///
/// Call with [`ScenarioParameters::baseline`] for the baseline path.
#[allow(clippy::too_many_arguments)]
pub fn forecast(
    base_activity: &ActivitySet,
    base_factors: &EmissionFactorTable,
    city: &CityProfile,
    urban_form: &UrbanFormParameters,
    scenario: &ScenarioParameters,
    start_year: i32,
    end_year: i32,
    engine: EmissionsEngine,
) -> CityScaleResult<Vec<ForecastYearRecord>> {
    Forecaster::new(
        base_activity,
        base_factors,
        city,
        urban_form,
        scenario,
        engine,
    )
    .forecast(start_year, end_year)
}
