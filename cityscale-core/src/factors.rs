//! Emission factors
//!
//! Factors give the mass of each gas emitted per unit of sector activity.
//! Units follow whatever the activity table uses; the defaults are tonnes of
//! gas per unit of the activity used by [`EmissionFactorTable::default_table`].

use crate::errors::{CityScaleError, CityScaleResult};
use crate::sector::SectorKind;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Per-gas emission factors for one sector
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EmissionFactor {
    pub sector: SectorKind,
    pub co2_factor: f64,
    pub ch4_factor: f64,
    pub n2o_factor: f64,
}

impl EmissionFactor {
    pub fn new(sector: SectorKind, co2_factor: f64, ch4_factor: f64, n2o_factor: f64) -> Self {
        Self {
            sector,
            co2_factor,
            ch4_factor,
            n2o_factor,
        }
    }

    /// Fail with [`CityScaleError::InvalidFactor`] if any factor is negative or not a number
    pub fn validate(&self) -> CityScaleResult<()> {
        for (gas, value) in [
            ("co2_factor", self.co2_factor),
            ("ch4_factor", self.ch4_factor),
            ("n2o_factor", self.n2o_factor),
        ] {
            if !(value >= 0.0) || value.is_infinite() {
                return Err(CityScaleError::InvalidFactor {
                    sector: self.sector,
                    reason: format!("{} must be a non-negative number, got {}", gas, value),
                });
            }
        }
        Ok(())
    }

    /// Copy with all three factors multiplied by `multiplier`
    pub fn scaled(&self, multiplier: f64) -> Self {
        Self {
            sector: self.sector,
            co2_factor: self.co2_factor * multiplier,
            ch4_factor: self.ch4_factor * multiplier,
            n2o_factor: self.n2o_factor * multiplier,
        }
    }
}

/// The active emission factor for each sector
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmissionFactorTable {
    factors: BTreeMap<SectorKind, EmissionFactor>,
}

impl EmissionFactorTable {
    /// Build a table from factor rows.
    ///
    /// Each row is validated. Duplicate sectors keep the first row.
    pub fn from_factors<I>(factors: I) -> CityScaleResult<Self>
    where
        I: IntoIterator<Item = EmissionFactor>,
    {
        let mut table = BTreeMap::new();
        for factor in factors {
            factor.validate()?;
            if table.contains_key(&factor.sector) {
                log::debug!("Ignoring duplicate factor row for sector {}", factor.sector);
                continue;
            }
            table.insert(factor.sector, factor);
        }
        Ok(Self { factors: table })
    }

    /// Factors used when no table is supplied
    pub fn default_table() -> Self {
        let factors = [
            // MWh of residential fuel
            EmissionFactor::new(SectorKind::Residential, 0.202, 0.00002, 0.000002),
            // vehicle-km
            EmissionFactor::new(SectorKind::Transport, 0.00017, 0.000000005, 0.000000005),
            // tonnes of industrial output
            EmissionFactor::new(SectorKind::Industry, 0.9, 0.00005, 0.00001),
            // tonnes of waste
            EmissionFactor::new(SectorKind::Waste, 0.02, 0.05, 0.0001),
            // MWh of grid electricity
            EmissionFactor::new(SectorKind::Energy, 0.45, 0.00001, 0.000005),
        ];
        Self {
            factors: factors.into_iter().map(|f| (f.sector, f)).collect(),
        }
    }

    /// Look up the factor for a sector, failing if the table has no row for it
    pub fn get(&self, sector: SectorKind) -> CityScaleResult<&EmissionFactor> {
        self.factors
            .get(&sector)
            .ok_or_else(|| CityScaleError::InvalidFactor {
                sector,
                reason: "missing emission factor".to_string(),
            })
    }

    pub fn contains(&self, sector: SectorKind) -> bool {
        self.factors.contains_key(&sector)
    }

    pub fn iter(&self) -> impl Iterator<Item = &EmissionFactor> {
        self.factors.values()
    }

    pub fn len(&self) -> usize {
        self.factors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factors.is_empty()
    }

    /// New table with `factor` replacing the row for its sector
    pub fn with_override(&self, factor: EmissionFactor) -> CityScaleResult<Self> {
        factor.validate()?;
        let mut factors = self.factors.clone();
        factors.insert(factor.sector, factor);
        Ok(Self { factors })
    }

    /// New table with one sector's factors multiplied by `multiplier`
    pub fn scaled_sector(&self, sector: SectorKind, multiplier: f64) -> Self {
        let mut factors = self.factors.clone();
        if let Some(factor) = factors.get_mut(&sector) {
            *factor = factor.scaled(multiplier);
        }
        Self { factors }
    }
}
