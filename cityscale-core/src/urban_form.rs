//! Urban form engine
//!
//! Derives multiplicative activity modifiers from the built form of a city and
//! applies them to sector activity. Modifiers are applied to growth-scaled
//! activity before any mitigation scenario, so scenario reductions are relative
//! to urban-form-adjusted activity.
//!
//! # Modifier curves
//!
//! Each index contributes a clamped linear (or log-linear for density) effect:
//!
//! $$d = clip(1 - 0.08 \ln(1 + \rho / 1000), 0.65, 1)$$
//! $$c = clip(1 - 0.2 \cdot compactness, 0.75, 1)$$
//! $$\tau = clip(1 - 0.25 \cdot transit, 0.7, 1)$$
//!
//! The transport modifier is $clip(d \cdot c \cdot \tau, 0.45, 1.1)$. Residential and
//! energy share a building modifier $clip(1 - 0.1 \cdot compactness, 0.8, 1.05)$ that
//! responds only to compactness. With no density, compactness or transit every
//! modifier is exactly 1, and all of them fall monotonically as the indices rise.

use crate::activity::{ActivitySet, SectorActivity};
use crate::parameters::UrbanFormParameters;
use crate::sector::SectorKind;
use crate::utils::clamp;
use serde::{Deserialize, Serialize};

/// Multipliers applied to activity of the sectors affected by urban form
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UrbanFormModifiers {
    pub transport: f64,
    pub residential: f64,
    pub energy: f64,
}

impl Default for UrbanFormModifiers {
    fn default() -> Self {
        Self::neutral()
    }
}

impl UrbanFormModifiers {
    /// Modifiers that leave activity unchanged
    pub fn neutral() -> Self {
        Self {
            transport: 1.0,
            residential: 1.0,
            energy: 1.0,
        }
    }

    /// Multiplier for `sector`; industry and waste are unaffected by urban form
    pub fn for_sector(&self, sector: SectorKind) -> f64 {
        match sector {
            SectorKind::Transport => self.transport,
            SectorKind::Residential => self.residential,
            SectorKind::Energy => self.energy,
            SectorKind::Industry | SectorKind::Waste => 1.0,
        }
    }
}

/// Urban form modifier calculations
#[derive(Debug, Clone, Copy, Default)]
pub struct UrbanFormEngine;

impl UrbanFormEngine {
    fn density_effect(density: f64) -> f64 {
        clamp(1.0 - 0.08 * (density / 1000.0).ln_1p(), 0.65, 1.0)
    }

    fn compactness_effect(compactness: f64) -> f64 {
        clamp(1.0 - 0.2 * compactness, 0.75, 1.0)
    }

    fn transit_effect(transit_access: f64) -> f64 {
        clamp(1.0 - 0.25 * transit_access, 0.7, 1.0)
    }

    /// Compute modifiers from urban form indices.
    ///
    /// Out-of-range indices are clamped rather than rejected. The result is always
    /// strictly positive.
    pub fn compute_modifiers(params: &UrbanFormParameters) -> UrbanFormModifiers {
        let params = params.normalized();

        let transport = clamp(
            Self::density_effect(params.density)
                * Self::compactness_effect(params.compactness)
                * Self::transit_effect(params.transit_access),
            0.45,
            1.1,
        );
        let building = clamp(1.0 - 0.1 * params.compactness, 0.8, 1.05);

        UrbanFormModifiers {
            transport,
            residential: building,
            energy: building,
        }
    }

    /// Apply modifiers to a single sector's activity
    pub fn apply(activity: SectorActivity, modifiers: &UrbanFormModifiers) -> SectorActivity {
        activity.scaled(modifiers.for_sector(activity.sector))
    }

    /// Apply modifiers to every sector of an activity set
    pub fn apply_set(activities: &ActivitySet, modifiers: &UrbanFormModifiers) -> ActivitySet {
        activities.scaled_by(|sector| modifiers.for_sector(sector))
    }
}
