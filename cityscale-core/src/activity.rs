//! Sector activity records
//!
//! Activity is the quantity an emission factor is multiplied by (energy
//! consumed, vehicle kilometres travelled, tonnes of waste). Each transformation
//! of an [`ActivitySet`] returns a new set; the input is never mutated.

use crate::errors::{CityScaleError, CityScaleResult};
use crate::sector::SectorKind;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Activity level of a single sector
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SectorActivity {
    pub sector: SectorKind,
    pub value: f64,
}

impl SectorActivity {
    pub fn new(sector: SectorKind, value: f64) -> Self {
        Self { sector, value }
    }

    /// Fail with [`CityScaleError::InvalidActivity`] unless the value is a non-negative number
    pub fn validate(&self) -> CityScaleResult<()> {
        if !(self.value >= 0.0) {
            return Err(CityScaleError::InvalidActivity {
                sector: self.sector,
                value: self.value,
            });
        }
        Ok(())
    }

    /// Copy of this record with the value multiplied by `multiplier`
    pub fn scaled(&self, multiplier: f64) -> Self {
        Self::new(self.sector, self.value * multiplier)
    }
}

/// Activity for a subset of sectors, at most one value per sector.
///
/// Iteration follows the canonical sector order of [`SectorKind`].
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActivitySet {
    values: BTreeMap<SectorKind, f64>,
}

impl ActivitySet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a set from individual records.
    ///
    /// Negative activity is rejected. When a sector appears more than once the
    /// first record is kept.
    pub fn from_activities<I>(activities: I) -> CityScaleResult<Self>
    where
        I: IntoIterator<Item = SectorActivity>,
    {
        let mut values = BTreeMap::new();
        for activity in activities {
            activity.validate()?;
            if values.contains_key(&activity.sector) {
                log::debug!(
                    "Ignoring duplicate activity for sector {}",
                    activity.sector
                );
                continue;
            }
            values.insert(activity.sector, activity.value);
        }
        Ok(Self { values })
    }

    pub fn get(&self, sector: SectorKind) -> Option<SectorActivity> {
        self.values
            .get(&sector)
            .map(|value| SectorActivity::new(sector, *value))
    }

    pub fn value(&self, sector: SectorKind) -> Option<f64> {
        self.values.get(&sector).copied()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = SectorActivity> + '_ {
        self.values
            .iter()
            .map(|(sector, value)| SectorActivity::new(*sector, *value))
    }

    pub fn sectors(&self) -> impl Iterator<Item = SectorKind> + '_ {
        self.values.keys().copied()
    }

    /// Sectors whose activity is exactly zero
    pub fn zero_sectors(&self) -> Vec<SectorKind> {
        self.values
            .iter()
            .filter(|(_, value)| **value == 0.0)
            .map(|(sector, _)| *sector)
            .collect()
    }

    /// New set with each sector's value multiplied by `multiplier(sector)`
    pub fn scaled_by<F>(&self, multiplier: F) -> Self
    where
        F: Fn(SectorKind) -> f64,
    {
        Self {
            values: self
                .values
                .iter()
                .map(|(sector, value)| (*sector, value * multiplier(*sector)))
                .collect(),
        }
    }
}
