//! Ownership tiers.
//!
//! A level fixes a province's claim cost, its output, and the color it is
//! painted with while unowned. The level set is loaded once and never changes.

use serde::Serialize;

use super::color::Color;

/// Index of a level in `World::levels`, which is in tier order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct LevelId(pub usize);

/// One ownership/development tier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Level {
    /// Key of the entry in the level table.
    pub key: String,
    pub name: String,
    pub cost: u32,
    pub product: u32,
    /// Color of unowned provinces at this level.
    pub color: Color,
}

impl Level {
    /// Creates a level from its table key and fields.
    pub fn new(
        key: impl Into<String>,
        name: impl Into<String>,
        cost: u32,
        product: u32,
        color: Color,
    ) -> Self {
        Level {
            key: key.into(),
            name: name.into(),
            cost,
            product,
            color,
        }
    }
}

/// Resolves a level reference, trying table keys before display names.
pub fn find_level(levels: &[Level], reference: &str) -> Option<LevelId> {
    levels
        .iter()
        .position(|l| l.key == reference)
        .or_else(|| levels.iter().position(|l| l.name == reference))
        .map(LevelId)
}
