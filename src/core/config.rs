//! Engine configuration with documented constants
//!
//! All tuning numbers for allocation and the bot command policy are
//! collected here. Strategic-region tables live in the per-faction
//! profiles. Loaded from TOML; every section falls back to defaults.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::bot::strategy::FactionStrategy;
use crate::core::error::{FrontError, Result};
use crate::core::types::FactionId;

/// Region allocation and front detection
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AllocationConfig {
    /// Maximum regions per formation (K), home region included.
    ///
    /// A brigade holds its home region plus up to K-1 neighboring front
    /// regions. Larger K means denser coverage but thinner brigades.
    pub max_regions_per_formation: usize,

    /// Rings of same-faction rear units added behind the front line.
    ///
    /// At 1, every unit directly behind a front-active unit is also
    /// covered, giving brigades operational depth.
    pub front_depth: u32,
}

impl Default for AllocationConfig {
    fn default() -> Self {
        Self {
            max_regions_per_formation: 3,
            front_depth: 1,
        }
    }
}

/// Attack target scoring weights (integer points)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// Bonus for a target nobody holds (garrison = 0)
    pub undefended: i64,
    /// Largest weak-garrison bonus; scales linearly down to 0 at the threshold
    pub weak_garrison_max: i64,
    /// Garrison below which the weakness bonus applies
    pub garrison_weakness_threshold: f32,
    /// Bonus for targets in the attacker's corridor-priority regions
    pub corridor_priority: i64,
    /// Bonus for targets in the attacker's strategic-offensive regions
    pub strategic_offensive: i64,
    /// Bonus for recapturing units in the brigade's home region
    pub home_region: i64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            undefended: 100,
            weak_garrison_max: 50,
            garrison_weakness_threshold: 120.0,
            corridor_priority: 95,
            strategic_offensive: 85,
            home_region: 60,
        }
    }
}

/// Bot command policy thresholds shared by all factions
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PolicyConfig {
    /// Density (personnel per held unit) below which a brigade is understaffed.
    ///
    /// Understaffed brigades fall back to elastic defense. Also the
    /// minimum density for probing inside a strategic-offensive zone.
    pub understaffed_density: f32,

    /// Density at or above which a brigade can donate a unit to a neighbor.
    ///
    /// Must exceed `understaffed_density`, otherwise donors would end up
    /// understaffed after a single transfer.
    pub surplus_density: f32,

    /// Enemy pressure advantage on an adjacency that marks it threatened
    pub pressure_imbalance_margin: f32,

    /// Reshape (one-unit transfer) orders per faction per turn
    pub max_reshape_orders: usize,

    /// Brigades per faction allowed in elastic defense through economy of force
    pub max_elastic_defense: usize,

    /// Skip attack targets already chosen by a lower-id brigade of the faction
    pub exclusive_attack_targets: bool,

    pub scoring: ScoringConfig,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            understaffed_density: 55.0,
            surplus_density: 140.0,
            pressure_imbalance_margin: 1.8,
            max_reshape_orders: 3,
            max_elastic_defense: 2,
            exclusive_attack_targets: true,
            scoring: ScoringConfig::default(),
        }
    }
}

/// Complete engine configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub allocation: AllocationConfig,
    pub policy: PolicyConfig,
    /// Per-faction strategy profiles; factions without one use the default
    pub factions: BTreeMap<FactionId, FactionStrategy>,
}

impl EngineConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse and validate a TOML document
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: EngineConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Strategy profile for a faction (default profile when unconfigured)
    pub fn strategy(&self, faction: &FactionId) -> FactionStrategy {
        self.factions.get(faction).cloned().unwrap_or_default()
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        if self.allocation.max_regions_per_formation == 0 {
            return Err(FrontError::InvalidConfig(
                "max_regions_per_formation must be at least 1".into(),
            ));
        }

        let policy = &self.policy;
        if policy.understaffed_density < 0.0 || policy.pressure_imbalance_margin < 0.0 {
            return Err(FrontError::InvalidConfig(
                "density and pressure thresholds must be non-negative".into(),
            ));
        }
        if policy.understaffed_density >= policy.surplus_density {
            return Err(FrontError::InvalidConfig(format!(
                "understaffed_density ({}) should be < surplus_density ({})",
                policy.understaffed_density, policy.surplus_density
            )));
        }
        if policy.scoring.garrison_weakness_threshold <= 0.0 {
            return Err(FrontError::InvalidConfig(
                "garrison_weakness_threshold must be positive".into(),
            ));
        }

        for (faction, strategy) in &self.factions {
            if !(0.0..=1.0).contains(&strategy.max_offensive_share) {
                return Err(FrontError::InvalidConfig(format!(
                    "faction {}: max_offensive_share ({}) must lie in [0, 1]",
                    faction, strategy.max_offensive_share
                )));
            }
            if !strategy.preferred_offensive.is_offensive() {
                return Err(FrontError::InvalidConfig(format!(
                    "faction {}: preferred_offensive must be probe or attack",
                    faction
                )));
            }
        }

        Ok(())
    }
}

/// Load and validate an engine configuration from a TOML file
pub fn load_config(path: impl AsRef<Path>) -> Result<EngineConfig> {
    let contents = fs::read_to_string(path.as_ref())?;
    EngineConfig::from_toml_str(&contents)
}
