//! Emission sectors
//!
//! The inventory covers a fixed set of five sectors. Labels coming from tabular
//! input are parsed into [`SectorKind`] at the loader boundary; anything outside
//! the enumeration is rejected there with [`CityScaleError::UnknownSector`].

use crate::errors::{CityScaleError, CityScaleResult};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use strum::{AsRefStr, Display, EnumIter, EnumString};

/// One of the five emission sectors of a city inventory.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    AsRefStr,
    Display,
    EnumIter,
    EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum SectorKind {
    Residential,
    Transport,
    Industry,
    Waste,
    Energy,
}

/// Driver used to scale a sector's activity over the forecast horizon.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GrowthBasis {
    /// Scales with the population ratio only
    Population,
    /// Scales with the mean of the population and GDP-per-capita ratios
    PopulationAndGdp,
}

impl SectorKind {
    /// All sectors in canonical order
    pub const ALL: [SectorKind; 5] = [
        SectorKind::Residential,
        SectorKind::Transport,
        SectorKind::Industry,
        SectorKind::Waste,
        SectorKind::Energy,
    ];

    /// Parse a sector label, trimming whitespace and ignoring case.
    pub fn parse_label(label: &str) -> CityScaleResult<Self> {
        SectorKind::from_str(&label.trim().to_ascii_lowercase())
            .map_err(|_| CityScaleError::UnknownSector(label.to_string()))
    }

    pub fn growth_basis(&self) -> GrowthBasis {
        match self {
            SectorKind::Residential | SectorKind::Transport | SectorKind::Waste => {
                GrowthBasis::Population
            }
            SectorKind::Industry | SectorKind::Energy => GrowthBasis::PopulationAndGdp,
        }
    }
}
