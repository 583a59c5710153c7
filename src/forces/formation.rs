//! Formation - a deployable military unit
//!
//! Brigades are the only combat-capable kind and the only formations that
//! receive an area of responsibility. Corps are identified through the
//! `corps` field, which names the corps' command formation.

use serde::{Deserialize, Serialize};

use crate::core::types::{FactionId, FormationId, RegionId, UnitId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormationStatus {
    #[default]
    Active,
    Inactive,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormationKind {
    /// Combat-capable manoeuvre formation
    #[default]
    Brigade,
    /// Corps command element; its HQ seeds the corps sector
    CorpsAsset,
    /// Anything else that holds no ground (artillery, logistics)
    Support,
}

impl FormationKind {
    pub fn is_combat_capable(&self) -> bool {
        matches!(self, Self::Brigade)
    }
}

/// Operational stance of a formation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Posture {
    #[default]
    Defend,
    ElasticDefense,
    Probe,
    Attack,
}

impl Posture {
    pub fn is_offensive(&self) -> bool {
        matches!(self, Self::Probe | Self::Attack)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Readiness {
    #[default]
    Active,
    Overextended,
    Degraded,
    Forming,
}

fn default_cohesion() -> u32 {
    60
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Formation {
    pub id: FormationId,
    pub faction: FactionId,
    #[serde(default)]
    pub status: FormationStatus,
    #[serde(default)]
    pub kind: FormationKind,
    #[serde(default)]
    pub hq: Option<UnitId>,
    #[serde(default)]
    pub personnel: u32,
    #[serde(default)]
    pub posture: Posture,
    #[serde(default)]
    pub home_region: Option<RegionId>,
    /// Command formation of the corps this formation belongs to
    #[serde(default)]
    pub corps: Option<FormationId>,
    #[serde(default = "default_cohesion")]
    pub cohesion: u32, // 0 - 100
    #[serde(default)]
    pub readiness: Readiness,
}

impl Formation {
    /// A new active brigade with default posture and no ground
    pub fn brigade(id: impl Into<String>, faction: impl Into<String>) -> Self {
        Self {
            id: FormationId::new(id),
            faction: FactionId::new(faction),
            status: FormationStatus::Active,
            kind: FormationKind::Brigade,
            hq: None,
            personnel: 1000,
            posture: Posture::Defend,
            home_region: None,
            corps: None,
            cohesion: default_cohesion(),
            readiness: Readiness::Active,
        }
    }

    /// A new active corps command element
    pub fn corps_asset(id: impl Into<String>, faction: impl Into<String>) -> Self {
        Self {
            kind: FormationKind::CorpsAsset,
            personnel: 0,
            ..Self::brigade(id, faction)
        }
    }

    pub fn with_hq(mut self, unit: impl Into<String>) -> Self {
        self.hq = Some(UnitId::new(unit));
        self
    }

    pub fn with_home_region(mut self, region: impl Into<String>) -> Self {
        self.home_region = Some(RegionId::new(region));
        self
    }

    pub fn with_corps(mut self, corps: impl Into<String>) -> Self {
        self.corps = Some(FormationId::new(corps));
        self
    }

    pub fn with_personnel(mut self, personnel: u32) -> Self {
        self.personnel = personnel;
        self
    }

    pub fn with_posture(mut self, posture: Posture) -> Self {
        self.posture = posture;
        self
    }

    pub fn with_status(mut self, status: FormationStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_cohesion(mut self, cohesion: u32) -> Self {
        self.cohesion = cohesion;
        self
    }

    pub fn with_readiness(mut self, readiness: Readiness) -> Self {
        self.readiness = readiness;
        self
    }

    pub fn is_active(&self) -> bool {
        self.status == FormationStatus::Active
    }

    /// Active and combat-capable: the only formations that hold ground
    pub fn is_active_brigade(&self) -> bool {
        self.is_active() && self.kind.is_combat_capable()
    }
}
