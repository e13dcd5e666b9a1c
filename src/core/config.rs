//! Battle configuration.
//!
//! Hosts configure a match at startup with a `BattleConfig`. Every field
//! has a default, so a config file only needs the values it changes:
//!
//! ```
//! use duel_core::core::{BattleConfig, TargetMode};
//!
//! let config = BattleConfig::from_json_str(r#"{ "enemy_turn_delay_ms": 250 }"#).unwrap();
//! assert_eq!(config.starting_health.get(), 3);
//! assert_eq!(config.enemy_turn_delay().as_millis(), 250);
//! assert_eq!(config.target_mode, TargetMode::Confirm);
//! ```

use std::num::NonZeroU32;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::error::ConfigError;

/// How damage cards are resolved.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetMode {
    /// Select the card, then confirm the enemy as target.
    #[default]
    Confirm,
    /// Damage resolves as soon as the card is played.
    Immediate,
}

/// Match parameters.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BattleConfig {
    /// Health both combatants start with. A match cannot start at 0.
    pub starting_health: NonZeroU32,

    /// Delay before the enemy resolves its turn, in milliseconds.
    pub enemy_turn_delay_ms: u64,

    /// Damage-card protocol.
    pub target_mode: TargetMode,

    /// Seed for the enemy's card choice. `None` draws from OS entropy.
    pub seed: Option<u64>,
}

const DEFAULT_STARTING_HEALTH: NonZeroU32 = match NonZeroU32::new(3) {
    Some(health) => health,
    None => panic!("default starting health is zero"),
};

impl Default for BattleConfig {
    fn default() -> Self {
        Self {
            starting_health: DEFAULT_STARTING_HEALTH,
            enemy_turn_delay_ms: 1500,
            target_mode: TargetMode::Confirm,
            seed: None,
        }
    }
}

impl BattleConfig {
    /// Parse a JSON config. A zero `starting_health` fails to parse.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a JSON config file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// The enemy-turn delay.
    #[must_use]
    pub fn enemy_turn_delay(&self) -> Duration {
        Duration::from_millis(self.enemy_turn_delay_ms)
    }

    /// Set the starting health.
    #[must_use]
    pub fn with_starting_health(mut self, health: NonZeroU32) -> Self {
        self.starting_health = health;
        self
    }

    /// Set the enemy-turn delay.
    #[must_use]
    pub fn with_enemy_turn_delay(mut self, delay: Duration) -> Self {
        self.enemy_turn_delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX);
        self
    }

    /// Set the damage-card protocol.
    #[must_use]
    pub fn with_target_mode(mut self, mode: TargetMode) -> Self {
        self.target_mode = mode;
        self
    }

    /// Fix the enemy's RNG seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}
