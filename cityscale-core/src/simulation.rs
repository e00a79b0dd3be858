//! Baseline vs mitigation runs
//!
//! [`Simulation`] ties the engines together for one city: base-year inventory,
//! urban form modifiers and forecasts for any number of named scenarios. Its
//! [`RunBundle`] output is the structure handed to presentation, export and
//! storage collaborators, so field names here are part of the on-disk format.

use crate::activity::ActivitySet;
use crate::drivers::CityProfile;
use crate::emissions::EmissionsEngine;
use crate::errors::CityScaleResult;
use crate::factors::EmissionFactorTable;
use crate::forecast::{ForecastYearRecord, Forecaster};
use crate::parameters::{ModelConfig, ScenarioParameters, UrbanFormParameters};
use crate::results::{AggregateResult, SectorResult};
use crate::scenario::Scenario;
use crate::urban_form::{UrbanFormEngine, UrbanFormModifiers};
use serde::{Deserialize, Serialize};

/// Inventory for the base year, computed from unadjusted activity and factors
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BaseYearResult {
    pub sector_results: Vec<SectorResult>,
    pub aggregate: AggregateResult,
}

/// Everything produced by a baseline vs mitigation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunBundle {
    pub base_year: BaseYearResult,
    pub urban_modifiers: UrbanFormModifiers,
    pub baseline: Vec<ForecastYearRecord>,
    pub mitigation: Vec<ForecastYearRecord>,
}

/// One scenario-year row of a [`ScenarioComparison`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonRow {
    pub year: i32,
    pub scenario: String,
    pub total_co2e: f64,
    pub per_capita_co2e: f64,
    pub per_gdp_co2e: f64,
    pub population: f64,
    pub gdp: f64,
    /// Percentage change of total CO2e relative to the baseline in the same year
    pub change_vs_baseline_pct: f64,
}

/// Yearly totals of several scenarios measured against the baseline
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ScenarioComparison {
    pub rows: Vec<ComparisonRow>,
}

impl ScenarioComparison {
    pub fn scenario_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for row in &self.rows {
            if !names.contains(&row.scenario.as_str()) {
                names.push(&row.scenario);
            }
        }
        names
    }

    /// Rows belonging to `scenario`, in year order
    pub fn for_scenario<'a>(
        &'a self,
        scenario: &'a str,
    ) -> impl Iterator<Item = &'a ComparisonRow> {
        self.rows.iter().filter(move |row| row.scenario == scenario)
    }
}

/// Percentage change from `baseline` to `total`, zero when the baseline is zero
fn change_vs_baseline(total: f64, baseline: f64) -> f64 {
    if baseline == 0.0 {
        return 0.0;
    }
    (total - baseline) / baseline * 100.0
}

/// Inputs of a single-city run
#[derive(Debug, Clone)]
pub struct Simulation {
    config: ModelConfig,
    city: CityProfile,
    activity: ActivitySet,
    factors: EmissionFactorTable,
    urban_form: UrbanFormParameters,
}

impl Simulation {
    pub fn new(
        config: ModelConfig,
        city: CityProfile,
        activity: ActivitySet,
        factors: EmissionFactorTable,
        urban_form: UrbanFormParameters,
    ) -> Self {
        Self {
            config,
            city,
            activity,
            factors,
            urban_form,
        }
    }

    pub fn config(&self) -> &ModelConfig {
        &self.config
    }

    pub fn city(&self) -> &CityProfile {
        &self.city
    }

    pub fn engine(&self) -> EmissionsEngine {
        EmissionsEngine::from_parameters(self.config.gwp)
    }

    /// Urban form modifiers applied to every forecast year
    pub fn modifiers(&self) -> UrbanFormModifiers {
        UrbanFormEngine::compute_modifiers(&self.urban_form)
    }

    pub fn base_year(&self) -> CityScaleResult<BaseYearResult> {
        let sector_results = self.engine().compute_sectors(&self.activity, &self.factors)?;
        let aggregate = EmissionsEngine::aggregate(
            &sector_results,
            self.city.population,
            self.city.gdp_per_capita,
        )?;
        Ok(BaseYearResult {
            sector_results,
            aggregate,
        })
    }

    /// Forecast one scenario. The year range must lie inside the configured horizon.
    pub fn forecast(
        &self,
        scenario: &ScenarioParameters,
        start_year: i32,
        end_year: i32,
    ) -> CityScaleResult<Vec<ForecastYearRecord>> {
        self.config.horizon.validate(start_year, end_year)?;
        Forecaster::with_modifiers(
            &self.activity,
            &self.factors,
            &self.city,
            self.modifiers(),
            scenario,
            self.engine(),
        )
        .forecast(start_year, end_year)
    }

    /// Base-year inventory plus baseline and mitigation forecasts
    pub fn run(
        &self,
        mitigation: &ScenarioParameters,
        start_year: i32,
        end_year: i32,
    ) -> CityScaleResult<RunBundle> {
        log::debug!(
            "Running {} from {} to {}",
            self.city.name,
            start_year,
            end_year
        );
        let base_year = self.base_year()?;
        let baseline = self.forecast(&ScenarioParameters::baseline(), start_year, end_year)?;
        let mitigation = self.forecast(mitigation, start_year, end_year)?;

        Ok(RunBundle {
            base_year,
            urban_modifiers: self.modifiers(),
            baseline,
            mitigation,
        })
    }

    /// Forecast each named scenario and express its totals relative to the baseline.
    ///
    /// The baseline is the scenario named "Baseline" (any case). If none is given,
    /// an identity baseline is added in front of the others.
    pub fn compare(
        &self,
        scenarios: &[Scenario],
        start_year: i32,
        end_year: i32,
    ) -> CityScaleResult<ScenarioComparison> {
        let mut scenarios = scenarios.to_vec();
        if !scenarios.iter().any(Scenario::is_baseline) {
            scenarios.insert(0, Scenario::baseline());
        }

        let mut runs = Vec::with_capacity(scenarios.len());
        for scenario in &scenarios {
            log::debug!("Forecasting scenario {}", scenario.name);
            runs.push(self.forecast(&scenario.parameters, start_year, end_year)?);
        }

        let baseline_index = scenarios
            .iter()
            .position(Scenario::is_baseline)
            .unwrap_or_default();
        let baseline_totals: Vec<f64> = runs[baseline_index]
            .iter()
            .map(|record| record.aggregate.total_co2e)
            .collect();

        let mut rows = Vec::new();
        for (scenario, records) in scenarios.iter().zip(&runs) {
            for (record, baseline_total) in records.iter().zip(&baseline_totals) {
                let change_vs_baseline_pct = if scenario.is_baseline() {
                    0.0
                } else {
                    change_vs_baseline(record.aggregate.total_co2e, *baseline_total)
                };
                rows.push(ComparisonRow {
                    year: record.year,
                    scenario: scenario.name.clone(),
                    total_co2e: record.aggregate.total_co2e,
                    per_capita_co2e: record.aggregate.per_capita_co2e,
                    per_gdp_co2e: record.aggregate.per_gdp_co2e,
                    population: record.population,
                    gdp: record.gdp(),
                    change_vs_baseline_pct,
                });
            }
        }

        Ok(ScenarioComparison { rows })
    }
}

/// Serializable description of a run, as received from a front end
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunRequest {
    pub city: CityProfile,
    pub activity: ActivitySet,
    #[serde(default = "EmissionFactorTable::default_table")]
    pub factors: EmissionFactorTable,
    #[serde(default)]
    pub urban_form: UrbanFormParameters,
    #[serde(default)]
    pub scenario: ScenarioParameters,
    pub start_year: i32,
    pub end_year: i32,
    #[serde(default)]
    pub config: ModelConfig,
}

/// Run the full pipeline for a request
pub fn run_pipeline(request: &RunRequest) -> CityScaleResult<RunBundle> {
    Simulation::new(
        request.config,
        request.city.clone(),
        request.activity.clone(),
        request.factors.clone(),
        request.urban_form,
    )
    .run(&request.scenario, request.start_year, request.end_year)
}
