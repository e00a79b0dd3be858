//! Urban form parameters

use crate::utils::{clamp, clamp_unit};
use serde::{Deserialize, Serialize};

/// Indices describing the built form of a city.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UrbanFormParameters {
    /// Population density
    /// unit: people / km^2
    /// default: 4000.0
    pub density: f64,

    /// Compactness index, 0 (sprawling) to 1 (compact)
    /// default: 0.5
    pub compactness: f64,

    /// Share of residents with good access to public transit, 0 to 1
    /// default: 0.5
    pub transit_access: f64,
}

impl Default for UrbanFormParameters {
    fn default() -> Self {
        Self {
            density: 4000.0,
            compactness: 0.5,
            transit_access: 0.5,
        }
    }
}

impl UrbanFormParameters {
    /// Form with no density, compactness or transit benefit
    pub fn neutral() -> Self {
        Self {
            density: 0.0,
            compactness: 0.0,
            transit_access: 0.0,
        }
    }

    /// Clamp density to be non-negative and the indices into `[0, 1]`
    pub fn normalized(&self) -> Self {
        Self {
            density: clamp(self.density, 0.0, f64::INFINITY),
            compactness: clamp_unit(self.compactness),
            transit_access: clamp_unit(self.transit_access),
        }
    }
}
