//! Socio-economic drivers
//!
//! Growth rates are fractional per year (0.015 is 1.5%/yr) and may be negative
//! for declining cities. They are never clamped.

use crate::errors::{CityScaleError, CityScaleResult};
use serde::{Deserialize, Serialize};

/// Compound growth of a quantity from its base-year value
fn compound(base: f64, rate: f64, years_from_base: u32) -> f64 {
    base * growth_ratio(rate, years_from_base)
}

/// Ratio of the value `years_from_base` years out to the base-year value
pub fn growth_ratio(rate: f64, years_from_base: u32) -> f64 {
    (1.0 + rate).powi(years_from_base as i32)
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PopulationDriver {
    pub initial_population: f64,
    pub annual_growth_rate: f64,
}

impl PopulationDriver {
    pub fn value_at(&self, years_from_base: u32) -> f64 {
        compound(
            self.initial_population,
            self.annual_growth_rate,
            years_from_base,
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EconomicDriver {
    pub gdp_per_capita: f64,
    pub gdp_growth_rate: f64,
    /// Energy use per unit of GDP, carried through to projections for reporting
    #[serde(default)]
    pub energy_intensity: f64,
}

impl EconomicDriver {
    pub fn gdp_per_capita_at(&self, years_from_base: u32) -> f64 {
        compound(self.gdp_per_capita, self.gdp_growth_rate, years_from_base)
    }
}

/// Base-year description of a city
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CityProfile {
    pub name: String,
    /// Base-year population, expected to be positive
    pub population: f64,
    pub population_growth: f64,
    /// Base-year GDP per capita, expected to be positive
    pub gdp_per_capita: f64,
    pub gdp_growth: f64,
    /// Energy use per unit of GDP; not used by the emissions pipeline
    #[serde(default)]
    pub energy_intensity: f64,
}

/// Driver values for a single projected year
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectionRow {
    pub year: i32,
    pub population: f64,
    pub gdp_per_capita: f64,
    pub gdp: f64,
    pub energy_intensity: f64,
}

impl CityProfile {
    pub fn new(
        name: impl Into<String>,
        population: f64,
        population_growth: f64,
        gdp_per_capita: f64,
        gdp_growth: f64,
    ) -> Self {
        Self {
            name: name.into(),
            population,
            population_growth,
            gdp_per_capita,
            gdp_growth,
            energy_intensity: 0.0,
        }
    }

    pub fn with_energy_intensity(mut self, energy_intensity: f64) -> Self {
        self.energy_intensity = energy_intensity;
        self
    }

    pub fn population_driver(&self) -> PopulationDriver {
        PopulationDriver {
            initial_population: self.population,
            annual_growth_rate: self.population_growth,
        }
    }

    pub fn economic_driver(&self) -> EconomicDriver {
        EconomicDriver {
            gdp_per_capita: self.gdp_per_capita,
            gdp_growth_rate: self.gdp_growth,
            energy_intensity: self.energy_intensity,
        }
    }

    /// Base-year total GDP
    pub fn gdp(&self) -> f64 {
        self.population * self.gdp_per_capita
    }

    /// Projected drivers for each year, measured from `base_year`.
    ///
    /// Fails with [`CityScaleError::InvalidRange`] if any year is before `base_year`.
    pub fn projection(
        &self,
        years: &[i32],
        base_year: i32,
    ) -> CityScaleResult<Vec<ProjectionRow>> {
        let population = self.population_driver();
        let economy = self.economic_driver();
        years
            .iter()
            .map(|&year| {
                if year < base_year {
                    return Err(CityScaleError::InvalidRange {
                        start_year: base_year,
                        end_year: year,
                    });
                }
                let offset = (year - base_year) as u32;
                let population = population.value_at(offset);
                let gdp_per_capita = economy.gdp_per_capita_at(offset);
                Ok(ProjectionRow {
                    year,
                    population,
                    gdp_per_capita,
                    gdp: population * gdp_per_capita,
                    energy_intensity: economy.energy_intensity,
                })
            })
            .collect()
    }
}
