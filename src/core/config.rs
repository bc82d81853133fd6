//! Simulation rule configuration
//!
//! The three periods drive the whole population dynamic, so they are
//! collected here rather than scattered as magic numbers.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::core::error::Result;

/// Species rule periods, in generations.
///
/// Counters use `i32` because a freshly bred or newborn occupant carries a
/// `-1` sentinel so the aging pass brings it to 0 instead of 1 at the end
/// of its first generation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RuleConfig {
    /// Generations a wolf must survive without breeding before it spawns
    /// an offspring on its next move.
    pub wolf_breeding_period: i32,
    /// Same threshold for squirrels (on ground or tree).
    pub squirrel_breeding_period: i32,
    /// Generations without eating before a wolf dies on the aging pass.
    pub wolf_starvation_period: i32,
}

impl RuleConfig {
    pub fn new(wolf_breeding: i32, squirrel_breeding: i32, wolf_starvation: i32) -> Self {
        Self {
            wolf_breeding_period: wolf_breeding,
            squirrel_breeding_period: squirrel_breeding,
            wolf_starvation_period: wolf_starvation,
        }
    }

    /// Load periods from a TOML file.
    ///
    /// Expected keys match the field names:
    /// `wolf_breeding_period`, `squirrel_breeding_period`,
    /// `wolf_starvation_period`.
    pub fn from_toml_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config = toml::from_str(&content)?;
        Ok(config)
    }
}

impl Default for RuleConfig {
    fn default() -> Self {
        Self::new(5, 5, 5)
    }
}
