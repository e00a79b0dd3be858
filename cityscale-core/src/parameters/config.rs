//! Model-wide configuration
//!
//! Constants that would otherwise be process-wide (GWP values, forecast horizon)
//! are carried in an explicit [`ModelConfig`] that is passed to the engines.

use super::GwpConstants;
use crate::errors::{CityScaleError, CityScaleResult};
use serde::{Deserialize, Serialize};

/// Inclusive range of years a forecast may cover.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForecastHorizon {
    /// default: 2025
    pub min_year: i32,
    /// default: 2050
    pub max_year: i32,
}

impl Default for ForecastHorizon {
    fn default() -> Self {
        Self {
            min_year: 2025,
            max_year: 2050,
        }
    }
}

impl ForecastHorizon {
    pub fn contains(&self, year: i32) -> bool {
        (self.min_year..=self.max_year).contains(&year)
    }

    /// Check a requested range lies within the horizon.
    ///
    /// An inverted range is reported as [`CityScaleError::InvalidRange`] before the
    /// bounds are considered.
    pub fn validate(&self, start_year: i32, end_year: i32) -> CityScaleResult<()> {
        if end_year < start_year {
            return Err(CityScaleError::InvalidRange {
                start_year,
                end_year,
            });
        }
        if !self.contains(start_year) || !self.contains(end_year) {
            return Err(CityScaleError::YearOutsideHorizon {
                start_year,
                end_year,
                min_year: self.min_year,
                max_year: self.max_year,
            });
        }
        Ok(())
    }
}

/// Configuration shared by every computation in a run
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    pub gwp: GwpConstants,
    pub horizon: ForecastHorizon,
}

impl ModelConfig {
    /// Parse a configuration from a TOML document.
    ///
    /// Missing tables or keys fall back to their defaults.
    pub fn from_toml_str(document: &str) -> CityScaleResult<Self> {
        let config: ModelConfig =
            toml::from_str(document).map_err(|e| CityScaleError::Config(e.to_string()))?;
        if config.horizon.max_year < config.horizon.min_year {
            return Err(CityScaleError::Config(format!(
                "horizon max_year {} is before min_year {}",
                config.horizon.max_year, config.horizon.min_year
            )));
        }
        Ok(config)
    }

    pub fn to_toml_string(&self) -> CityScaleResult<String> {
        toml::to_string(self).map_err(|e| CityScaleError::Config(e.to_string()))
    }
}
