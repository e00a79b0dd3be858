//! Mitigation scenario parameters

use crate::utils::clamp_unit;
use serde::{Deserialize, Serialize};

/// Fractional reductions applied by a mitigation scenario.
///
/// All values are fractions (0.2 means a 20% reduction). They come from
/// user-adjustable sliders, so out-of-range values are clamped into `[0, 1]`
/// by [`ScenarioParameters::normalized`] rather than rejected.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ScenarioParameters {
    /// Reduction of residential and energy-sector activity
    pub energy_efficiency: f64,

    /// Share of grid energy from renewables, reducing all energy-sector factors
    pub renewable_share: f64,

    /// Reduction of transport activity through modal shift
    pub modal_shift: f64,

    /// Reduction of industrial activity
    pub industry_efficiency: f64,

    /// Reduction of waste activity
    pub waste_reduction: f64,
}

impl ScenarioParameters {
    /// Parameters that leave activity and factors unchanged
    pub fn baseline() -> Self {
        Self::default()
    }

    /// Clamp every field into `[0, 1]`.
    ///
    /// Normalising an already normalised set returns it unchanged.
    pub fn normalized(&self) -> Self {
        Self {
            energy_efficiency: clamp_unit(self.energy_efficiency),
            renewable_share: clamp_unit(self.renewable_share),
            modal_shift: clamp_unit(self.modal_shift),
            industry_efficiency: clamp_unit(self.industry_efficiency),
            waste_reduction: clamp_unit(self.waste_reduction),
        }
    }

    /// True when, after clamping, no reduction is applied
    pub fn is_identity(&self) -> bool {
        let n = self.normalized();
        n.energy_efficiency == 0.0
            && n.renewable_share == 0.0
            && n.modal_shift == 0.0
            && n.industry_efficiency == 0.0
            && n.waste_reduction == 0.0
    }
}
