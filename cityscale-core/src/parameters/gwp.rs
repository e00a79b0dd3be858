//! Global warming potential constants

use serde::{Deserialize, Serialize};

/// Multipliers converting a mass of each gas into CO2-equivalent.
///
/// CO2e is calculated as:
///
/// $$CO2e = CO2 \cdot GWP_{CO2} + CH4 \cdot GWP_{CH4} + N2O \cdot GWP_{N2O}$$
///
/// The defaults are the 100-year values from IPCC AR5.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GwpConstants {
    /// GWP of carbon dioxide
    /// default: 1.0
    pub co2: f64,

    /// GWP of methane
    /// default: 28.0
    pub ch4: f64,

    /// GWP of nitrous oxide
    /// default: 265.0
    pub n2o: f64,
}

impl Default for GwpConstants {
    fn default() -> Self {
        Self {
            co2: 1.0,
            ch4: 28.0,
            n2o: 265.0,
        }
    }
}

impl GwpConstants {
    /// Weight the three gases into a single CO2-equivalent value
    pub fn co2e(&self, co2: f64, ch4: f64, n2o: f64) -> f64 {
        co2 * self.co2 + ch4 * self.ch4 + n2o * self.n2o
    }
}
