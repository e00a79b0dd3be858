//! Scenario engine
//!
//! Applies mitigation reductions to an activity set and factor table. The
//! baseline is the identity transform, i.e. [`ScenarioParameters::baseline`].
//!
//! | Sector      | Activity multiplier        | Factor multiplier     |
//! |-------------|----------------------------|-----------------------|
//! | residential | 1 - energy_efficiency      | 1                     |
//! | energy      | 1 - energy_efficiency      | 1 - renewable_share   |
//! | transport   | 1 - modal_shift            | 1                     |
//! | industry    | 1 - industry_efficiency    | 1                     |
//! | waste       | 1 - waste_reduction        | 1                     |

use crate::activity::ActivitySet;
use crate::factors::EmissionFactorTable;
use crate::parameters::ScenarioParameters;
use crate::sector::SectorKind;
use serde::{Deserialize, Serialize};

/// A named set of scenario parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub name: String,
    #[serde(flatten)]
    pub parameters: ScenarioParameters,
}

impl Scenario {
    pub fn new(name: impl Into<String>, parameters: ScenarioParameters) -> Self {
        Self {
            name: name.into(),
            parameters,
        }
    }

    pub fn baseline() -> Self {
        Self::new("Baseline", ScenarioParameters::baseline())
    }

    pub fn is_baseline(&self) -> bool {
        self.name.eq_ignore_ascii_case("baseline")
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ScenarioEngine;

impl ScenarioEngine {
    /// Activity multiplier for `sector` under already normalised parameters
    fn activity_multiplier(sector: SectorKind, params: &ScenarioParameters) -> f64 {
        match sector {
            SectorKind::Residential | SectorKind::Energy => 1.0 - params.energy_efficiency,
            SectorKind::Transport => 1.0 - params.modal_shift,
            SectorKind::Industry => 1.0 - params.industry_efficiency,
            SectorKind::Waste => 1.0 - params.waste_reduction,
        }
    }

    /// Produce the scenario-adjusted activity set and factor table.
    ///
    /// Parameters are clamped into `[0, 1]` first. Only energy-sector factors are
    /// reduced; every other reduction acts on activity.
    pub fn apply_scenario(
        activities: &ActivitySet,
        factors: &EmissionFactorTable,
        params: &ScenarioParameters,
    ) -> (ActivitySet, EmissionFactorTable) {
        let params = params.normalized();

        let adjusted_activity =
            activities.scaled_by(|sector| Self::activity_multiplier(sector, &params));
        let adjusted_factors =
            factors.scaled_sector(SectorKind::Energy, 1.0 - params.renewable_share);

        (adjusted_activity, adjusted_factors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::activity::SectorActivity;
    use crate::factors::EmissionFactor;
    use approx::assert_relative_eq;

    fn base_inputs() -> (ActivitySet, EmissionFactorTable) {
        let activity = ActivitySet::from_activities([
            SectorActivity::new(SectorKind::Residential, 1000.0),
            SectorActivity::new(SectorKind::Transport, 2000.0),
            SectorActivity::new(SectorKind::Industry, 500.0),
            SectorActivity::new(SectorKind::Waste, 200.0),
            SectorActivity::new(SectorKind::Energy, 800.0),
        ])
        .unwrap();
        let factors = EmissionFactorTable::from_factors(
            SectorKind::ALL.map(|sector| EmissionFactor::new(sector, 1.0, 0.0, 0.0)),
        )
        .unwrap();
        (activity, factors)
    }

    #[test]
    fn test_apply_scenario_reduces_targeted_sectors() {
        let (activity, factors) = base_inputs();
        let params = ScenarioParameters {
            energy_efficiency: 0.1,
            modal_shift: 0.2,
            renewable_share: 0.3,
            ..Default::default()
        };

        let (out_activity, out_factors) =
            ScenarioEngine::apply_scenario(&activity, &factors, &params);

        assert_eq!(out_activity.value(SectorKind::Transport), Some(1600.0));
        assert_eq!(out_activity.value(SectorKind::Residential), Some(900.0));
        assert_eq!(out_activity.value(SectorKind::Energy), Some(720.0));
        assert_eq!(out_activity.value(SectorKind::Industry), Some(500.0));
        assert_relative_eq!(
            out_factors.get(SectorKind::Energy).unwrap().co2_factor,
            0.7,
            epsilon = 1e-12
        );
        assert_eq!(out_factors.get(SectorKind::Transport).unwrap().co2_factor, 1.0);
    }

    #[test]
    fn test_baseline_is_identity() {
        let (activity, factors) = base_inputs();
        let (out_activity, out_factors) =
            ScenarioEngine::apply_scenario(&activity, &factors, &ScenarioParameters::baseline());
        assert_eq!(out_activity, activity);
        assert_eq!(out_factors, factors);
    }

    #[test]
    fn test_out_of_range_parameters_are_clamped() {
        let (activity, factors) = base_inputs();
        let params = ScenarioParameters {
            industry_efficiency: 1.5,
            waste_reduction: -0.5,
            ..Default::default()
        };
        let (out_activity, _) = ScenarioEngine::apply_scenario(&activity, &factors, &params);
        assert_eq!(out_activity.value(SectorKind::Industry), Some(0.0));
        assert_eq!(out_activity.value(SectorKind::Waste), Some(200.0));
    }

    #[test]
    fn test_missing_sectors_are_skipped() {
        let activity =
            ActivitySet::from_activities([SectorActivity::new(SectorKind::Waste, 10.0)]).unwrap();
        let factors = EmissionFactorTable::from_factors([EmissionFactor::new(
            SectorKind::Waste,
            1.0,
            0.0,
            0.0,
        )])
        .unwrap();
        let params = ScenarioParameters {
            renewable_share: 0.5,
            waste_reduction: 0.5,
            ..Default::default()
        };
        let (out_activity, out_factors) =
            ScenarioEngine::apply_scenario(&activity, &factors, &params);
        assert_eq!(out_activity.len(), 1);
        assert_eq!(out_activity.value(SectorKind::Waste), Some(5.0));
        assert!(!out_factors.contains(SectorKind::Energy));
    }

    #[test]
    fn test_scenario_serde_flattens_parameters() {
        let scenario: Scenario =
            serde_json::from_str(r#"{"name": "Mitigation", "modal_shift": 0.15}"#).unwrap();
        assert_eq!(scenario.parameters.modal_shift, 0.15);
        assert_eq!(scenario.parameters.energy_efficiency, 0.0);
        assert!(!scenario.is_baseline());
        assert!(Scenario::baseline().is_baseline());
    }
}
