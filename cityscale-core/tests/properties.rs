//! Property tests for the computation pipeline.
//!
//! These tests check the invariants the pipeline must hold end to end:
//! - Exact CO2e arithmetic for any activity and factors
//! - Monotonic response to mitigation parameters
//! - Forecast years computed independently of each other

use approx::assert_relative_eq;
use cityscale_core::activity::{ActivitySet, SectorActivity};
use cityscale_core::drivers::CityProfile;
use cityscale_core::emissions::EmissionsEngine;
use cityscale_core::errors::CityScaleError;
use cityscale_core::factors::{EmissionFactor, EmissionFactorTable};
use cityscale_core::forecast::{forecast, Forecaster};
use cityscale_core::parameters::{ModelConfig, ScenarioParameters, UrbanFormParameters};
use cityscale_core::scenario::ScenarioEngine;
use cityscale_core::sector::SectorKind;
use cityscale_core::simulation::Simulation;
use cityscale_core::urban_form::UrbanFormEngine;

fn full_activity() -> ActivitySet {
    ActivitySet::from_activities([
        SectorActivity::new(SectorKind::Residential, 1_200_000.0),
        SectorActivity::new(SectorKind::Transport, 800_000_000.0),
        SectorActivity::new(SectorKind::Industry, 450_000.0),
        SectorActivity::new(SectorKind::Waste, 180_000.0),
        SectorActivity::new(SectorKind::Energy, 2_300_000.0),
    ])
    .unwrap()
}

fn sample_city() -> CityProfile {
    CityProfile::new("Sample City", 1_500_000.0, 0.015, 18_000.0, 0.02)
}

fn sector_co2e(activity: &ActivitySet, factors: &EmissionFactorTable, sector: SectorKind) -> f64 {
    EmissionsEngine::new()
        .compute_sectors(activity, factors)
        .unwrap()
        .into_iter()
        .find(|r| r.sector == sector)
        .map(|r| r.co2e)
        .unwrap()
}

mod emissions_arithmetic {
    use super::*;

    /// CO2e equals the closed-form expression with default GWP values.
    #[test]
    fn test_co2e_closed_form() {
        let engine = EmissionsEngine::new();
        for activity in [0.0, 1.0, 12.5, 1000.0, 3.2e7] {
            for (co2, ch4, n2o) in [(0.0, 0.0, 0.0), (0.5, 0.001, 0.0001), (2.0, 0.3, 0.07)] {
                let result = engine
                    .compute_sector(
                        SectorActivity::new(SectorKind::Industry, activity),
                        &EmissionFactor::new(SectorKind::Industry, co2, ch4, n2o),
                    )
                    .unwrap();
                let expected =
                    activity * co2 + activity * ch4 * 28.0 + activity * n2o * 265.0;
                assert_eq!(
                    result.co2e, expected,
                    "activity={} factors=({}, {}, {})",
                    activity, co2, ch4, n2o
                );
            }
        }
    }

    /// Aggregation at zero population is a domain error, not zero.
    #[test]
    fn test_aggregate_zero_population() {
        let results = EmissionsEngine::new()
            .compute_sectors(&full_activity(), &EmissionFactorTable::default_table())
            .unwrap();
        assert!(matches!(
            EmissionsEngine::aggregate(&results, 0.0, 18_000.0),
            Err(CityScaleError::DivisionDomain { .. })
        ));
    }
}

mod scenario_monotonicity {
    use super::*;

    fn adjusted_co2e(params: ScenarioParameters, sector: SectorKind) -> f64 {
        let activity = full_activity();
        let factors = EmissionFactorTable::default_table();
        let (activity, factors) = ScenarioEngine::apply_scenario(&activity, &factors, &params);
        sector_co2e(&activity, &factors, sector)
    }

    /// Raising any single mitigation parameter never raises the affected sector's CO2e.
    #[test]
    fn test_single_parameter_monotonic() {
        let setters: [(fn(&mut ScenarioParameters, f64), SectorKind); 6] = [
            (|p, v| p.energy_efficiency = v, SectorKind::Residential),
            (|p, v| p.energy_efficiency = v, SectorKind::Energy),
            (|p, v| p.renewable_share = v, SectorKind::Energy),
            (|p, v| p.modal_shift = v, SectorKind::Transport),
            (|p, v| p.industry_efficiency = v, SectorKind::Industry),
            (|p, v| p.waste_reduction = v, SectorKind::Waste),
        ];

        for (set, sector) in setters {
            let mut previous = f64::INFINITY;
            for step in -2..=12 {
                let mut params = ScenarioParameters {
                    energy_efficiency: 0.1,
                    renewable_share: 0.2,
                    modal_shift: 0.1,
                    industry_efficiency: 0.05,
                    waste_reduction: 0.1,
                };
                set(&mut params, step as f64 / 10.0);
                let co2e = adjusted_co2e(params, sector);
                assert!(
                    co2e <= previous,
                    "CO2e of {} rose from {} to {} at step {}",
                    sector,
                    previous,
                    co2e,
                    step
                );
                previous = co2e;
            }
        }
    }

    /// Renewable share halves energy CO2e exactly when set to 0.5.
    #[test]
    fn test_energy_only_city() {
        let city = CityProfile::new("Energy Town", 500_000.0, 0.0, 10_000.0, 0.0);
        let activity =
            ActivitySet::from_activities([SectorActivity::new(SectorKind::Energy, 1000.0)])
                .unwrap();
        let factors = EmissionFactorTable::from_factors([EmissionFactor::new(
            SectorKind::Energy,
            0.5,
            0.001,
            0.0001,
        )])
        .unwrap();

        let run = |scenario: ScenarioParameters| {
            forecast(
                &activity,
                &factors,
                &city,
                &UrbanFormParameters::neutral(),
                &scenario,
                2025,
                2025,
                EmissionsEngine::new(),
            )
            .unwrap()
        };

        let baseline = run(ScenarioParameters::baseline());
        let mitigation = run(ScenarioParameters {
            renewable_share: 0.5,
            ..Default::default()
        });

        assert_relative_eq!(baseline[0].aggregate.total_co2e, 554.5, epsilon = 1e-9);
        assert_relative_eq!(mitigation[0].aggregate.total_co2e, 277.25, epsilon = 1e-9);
        assert_relative_eq!(
            mitigation[0].aggregate.total_co2e * 2.0,
            baseline[0].aggregate.total_co2e,
            epsilon = 1e-9
        );
    }
}

mod forecast_independence {
    use super::*;

    fn forecaster<'a>(
        activity: &'a ActivitySet,
        factors: &'a EmissionFactorTable,
        city: &'a CityProfile,
    ) -> Forecaster<'a> {
        Forecaster::new(
            activity,
            factors,
            city,
            &UrbanFormParameters::default(),
            &ScenarioParameters {
                energy_efficiency: 0.2,
                renewable_share: 0.3,
                modal_shift: 0.15,
                industry_efficiency: 0.1,
                waste_reduction: 0.15,
            },
            EmissionsEngine::new(),
        )
    }

    /// The first forecast year reproduces the no-growth pipeline result exactly.
    #[test]
    fn test_t0_matches_base_inputs() {
        let activity = full_activity();
        let factors = EmissionFactorTable::default_table();
        let city = sample_city();
        let forecaster = forecaster(&activity, &factors, &city);

        let record = forecaster.forecast_year(2025, 0).unwrap();

        let shaped = UrbanFormEngine::apply_set(
            &activity,
            &UrbanFormEngine::compute_modifiers(&UrbanFormParameters::default()),
        );
        let (adjusted, adjusted_factors) = ScenarioEngine::apply_scenario(
            &shaped,
            &factors,
            &ScenarioParameters {
                energy_efficiency: 0.2,
                renewable_share: 0.3,
                modal_shift: 0.15,
                industry_efficiency: 0.1,
                waste_reduction: 0.15,
            },
        );
        let expected = EmissionsEngine::new()
            .compute_sectors(&adjusted, &adjusted_factors)
            .unwrap();
        let expected_aggregate =
            EmissionsEngine::aggregate(&expected, city.population, city.gdp_per_capita).unwrap();

        assert_eq!(record.population, city.population);
        assert_eq!(record.gdp_per_capita, city.gdp_per_capita);
        assert_eq!(record.sector_results, expected);
        assert_eq!(record.aggregate, expected_aggregate);
    }

    /// With neutral urban form the first baseline year is the base-year inventory.
    #[test]
    fn test_t0_baseline_equals_base_year() {
        let simulation = Simulation::new(
            ModelConfig::default(),
            sample_city(),
            full_activity(),
            EmissionFactorTable::default_table(),
            UrbanFormParameters::neutral(),
        );
        let bundle = simulation
            .run(&ScenarioParameters::baseline(), 2025, 2030)
            .unwrap();

        assert_eq!(bundle.baseline[0].aggregate, bundle.base_year.aggregate);
        assert_eq!(bundle.baseline[0].sector_results, bundle.base_year.sector_results);
    }

    /// The base year is the unadjusted inventory, so urban form only shows up in the forecast.
    #[test]
    fn test_base_year_ignores_urban_form() {
        let simulation = Simulation::new(
            ModelConfig::default(),
            sample_city(),
            full_activity(),
            EmissionFactorTable::default_table(),
            UrbanFormParameters::default(),
        );
        let bundle = simulation
            .run(&ScenarioParameters::baseline(), 2025, 2025)
            .unwrap();

        let raw = EmissionsEngine::new()
            .compute_sectors(&full_activity(), &EmissionFactorTable::default_table())
            .unwrap();
        assert_eq!(bundle.base_year.sector_results, raw);
        assert!(bundle.baseline[0].aggregate.total_co2e < bundle.base_year.aggregate.total_co2e);
    }

    /// A year computed alone equals the same year inside a full forecast.
    #[test]
    fn test_year_in_isolation() {
        let activity = full_activity();
        let factors = EmissionFactorTable::default_table();
        let city = sample_city();
        let forecaster = forecaster(&activity, &factors, &city);

        let full = forecaster.forecast(2025, 2050).unwrap();
        assert_eq!(full.len(), 26);
        assert!(full.windows(2).all(|w| w[0].year < w[1].year));

        let isolated = forecaster.forecast_year(2037, 12).unwrap();
        assert_eq!(full[12], isolated);
    }

    /// Population follows compound growth.
    #[test]
    fn test_population_growth() {
        let activity = full_activity();
        let factors = EmissionFactorTable::default_table();
        let city = CityProfile::new("Growth City", 1_000_000.0, 0.02, 18_000.0, 0.0);
        let records = forecaster(&activity, &factors, &city)
            .forecast(2025, 2030)
            .unwrap();
        assert_relative_eq!(records[5].population, 1_104_080.8032, epsilon = 1e-3);
    }

    /// Declining population shrinks population-driven sectors.
    #[test]
    fn test_negative_growth() {
        let activity = full_activity();
        let factors = EmissionFactorTable::default_table();
        let city = CityProfile::new("Shrinking City", 1_000_000.0, -0.01, 18_000.0, -0.02);
        let records = forecaster(&activity, &factors, &city)
            .forecast(2025, 2035)
            .unwrap();
        assert!(records[10].aggregate.total_co2e < records[0].aggregate.total_co2e);
    }

    #[test]
    fn test_inverted_range() {
        let activity = full_activity();
        let factors = EmissionFactorTable::default_table();
        let city = sample_city();
        assert_eq!(
            forecaster(&activity, &factors, &city)
                .forecast(2025, 2024)
                .unwrap_err(),
            CityScaleError::InvalidRange {
                start_year: 2025,
                end_year: 2024
            }
        );
    }
}

mod urban_form_bounds {
    use super::*;

    #[test]
    fn test_best_form_not_worse_than_neutral() {
        let modifiers = UrbanFormEngine::compute_modifiers(&UrbanFormParameters {
            density: 0.0,
            compactness: 1.0,
            transit_access: 1.0,
        });
        assert!(modifiers.transport <= 1.0);
        assert!(modifiers.residential <= 1.0);
        assert!(modifiers.energy <= 1.0);
    }

    #[test]
    fn test_modifiers_positive_over_grid() {
        for density in [0.0, 100.0, 4000.0, 1e6] {
            for c in 0..=4 {
                for t in 0..=4 {
                    let m = UrbanFormEngine::compute_modifiers(&UrbanFormParameters {
                        density,
                        compactness: c as f64 / 4.0,
                        transit_access: t as f64 / 4.0,
                    });
                    assert!(m.transport > 0.0 && m.residential > 0.0 && m.energy > 0.0);
                }
            }
        }
    }
}
