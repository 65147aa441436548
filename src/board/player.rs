//! Players and their per-level colors.

use serde::Serialize;

use super::color::{derive_shades, Color, Shades};
use super::level::Level;

/// Index of a player in `World::players`.
///
/// Provinces refer to their owner through this id; a province never holds the
/// player record itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct PlayerId(pub usize);

/// A map participant.
///
/// The shade table is derived once from the base color and the full level set
/// at construction. Nothing mutates the base color afterwards.
#[derive(Debug, Clone, Serialize)]
pub struct Player {
    /// Key of the entry in the ownership table.
    pub key: String,
    pub name: String,
    pub external_id: i64,
    pub balance: u64,
    base_color: Color,
    shades: Shades,
}

impl Player {
    /// Creates a player and derives its shade for every level in `levels`.
    pub fn new(
        key: impl Into<String>,
        name: impl Into<String>,
        external_id: i64,
        base_color: Color,
        levels: &[Level],
    ) -> Self {
        let key = key.into();
        tracing::debug!(player = %key, base = %base_color, "generating level colors");
        Player {
            key,
            name: name.into(),
            external_id,
            balance: 0,
            base_color,
            shades: derive_shades(base_color, levels),
        }
    }

    /// Sets the starting balance.
    pub fn with_balance(mut self, balance: u64) -> Self {
        self.balance = balance;
        self
    }

    /// The color of tier-one provinces.
    pub fn base_color(&self) -> Color {
        self.base_color
    }

    /// Returns this player's color for provinces at the named level.
    pub fn shade(&self, level: &str) -> Option<Color> {
        self.shades.get(level)
    }

    /// Every shade, in tier order.
    pub fn shades(&self) -> &Shades {
        &self.shades
    }
}
