//! Core data types: cards, sides, combatants, randomness, configuration, errors.

pub mod card;
pub mod combatant;
pub mod config;
pub mod error;
pub mod rng;
pub mod side;

pub use card::{seed_deck, CardEffect, CardType};
pub use combatant::{apply_effect, Combatant, Hand};
pub use config::{BattleConfig, TargetMode};
pub use error::{CommandError, ConfigError, ScheduleError};
pub use rng::{GameRng, IndexSource, ScriptedIndices};
pub use side::{Side, SideMap};
