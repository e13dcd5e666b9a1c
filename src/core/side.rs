//! Combatant sides and per-side data storage.
//!
//! ## Side
//!
//! The duel always has exactly two sides. `Side` doubles as the turn owner.
//!
//! ## SideMap
//!
//! Fixed two-slot storage indexed by `Side`, so engine code never has to
//! branch on which combatant it is touching.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// One of the two combatants.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    /// The human-controlled side.
    Player,
    /// The autonomous opponent.
    Enemy,
}

impl Side {
    /// The other side.
    #[must_use]
    pub const fn opponent(self) -> Side {
        match self {
            Side::Player => Side::Enemy,
            Side::Enemy => Side::Player,
        }
    }

    const fn index(self) -> usize {
        match self {
            Side::Player => 0,
            Side::Enemy => 1,
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::Player => f.write_str("Player"),
            Side::Enemy => f.write_str("Enemy"),
        }
    }
}

/// Per-side data storage.
///
/// ## Example
///
/// ```
/// use duel_core::core::{Side, SideMap};
///
/// let mut health: SideMap<u32> = SideMap::new(|_| 3);
/// health[Side::Enemy] = 1;
/// assert_eq!(health[Side::Player], 3);
/// assert_eq!(health[Side::Enemy], 1);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SideMap<T> {
    data: [T; 2],
}

impl<T> SideMap<T> {
    /// Create a new SideMap with values from a factory function.
    pub fn new(factory: impl Fn(Side) -> T) -> Self {
        Self {
            data: [factory(Side::Player), factory(Side::Enemy)],
        }
    }

    /// Get a reference to a side's data.
    #[must_use]
    pub fn get(&self, side: Side) -> &T {
        &self.data[side.index()]
    }

    /// Get a mutable reference to a side's data.
    pub fn get_mut(&mut self, side: Side) -> &mut T {
        &mut self.data[side.index()]
    }

    /// Borrow `side`'s entry and its opponent's entry mutably at once.
    pub fn split_mut(&mut self, side: Side) -> (&mut T, &mut T) {
        let [player, enemy] = &mut self.data;
        match side {
            Side::Player => (player, enemy),
            Side::Enemy => (enemy, player),
        }
    }
}

impl<T> Index<Side> for SideMap<T> {
    type Output = T;

    fn index(&self, side: Side) -> &Self::Output {
        self.get(side)
    }
}

impl<T> IndexMut<Side> for SideMap<T> {
    fn index_mut(&mut self, side: Side) -> &mut Self::Output {
        self.get_mut(side)
    }
}
