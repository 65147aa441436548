//! Provinces and regions.
//!
//! A province is the smallest ownable unit of the map. It belongs to one
//! region, sits at one ownership level, and is located on the raster by a
//! seed pixel that lies somewhere inside its colored area.

use std::collections::BTreeSet;

use serde::Serialize;

use super::level::LevelId;
use super::player::PlayerId;

/// Index of a province in `World::provinces`, assigned in load order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ProvinceId(pub usize);

/// Index of a region in `World::regions`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct RegionId(pub usize);

/// A pixel coordinate on the map raster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub struct Position {
    pub x: u32,
    pub y: u32,
}

impl Position {
    /// Creates a position from pixel coordinates.
    pub const fn new(x: u32, y: u32) -> Self {
        Position { x, y }
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Static description of a province, as read from the topology table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProvinceSpec {
    pub name: String,
    /// Level key or level name.
    pub level: String,
    pub position: Position,
    pub adjacent: Vec<String>,
    pub ocean: bool,
    pub sea: bool,
    pub seas: Vec<String>,
}

/// A province on the map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Province {
    pub name: String,
    pub region: RegionId,
    pub level: LevelId,
    pub owner: Option<PlayerId>,
    pub position: Position,
    /// Names of land-bordering provinces. Entries may name provinces that were
    /// never loaded; lookups skip them.
    pub adjacent: BTreeSet<String>,
    pub ocean: bool,
    pub sea: bool,
    /// Names of the seas this province touches. Only meaningful when `sea`.
    pub seas: BTreeSet<String>,
}

impl Province {
    /// Returns true if any player owns this province.
    pub fn is_owned(&self) -> bool {
        self.owner.is_some()
    }

    /// Returns true if `player` owns this province.
    pub fn is_owned_by(&self, player: PlayerId) -> bool {
        self.owner == Some(player)
    }

    /// Returns true if this province connects to others across water.
    pub fn is_water_linked(&self) -> bool {
        self.ocean || (self.sea && !self.seas.is_empty())
    }
}

/// A named grouping of provinces used for bulk ownership assignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Region {
    pub name: String,
    pub provinces: Vec<ProvinceId>,
}

impl Region {
    /// Creates an empty region.
    pub fn new(name: impl Into<String>) -> Self {
        Region {
            name: name.into(),
            provinces: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn province() -> Province {
        Province {
            name: "QUE".to_string(),
            region: RegionId(0),
            level: LevelId(0),
            owner: None,
            position: Position::new(3, 4),
            adjacent: BTreeSet::new(),
            ocean: false,
            sea: false,
            seas: BTreeSet::new(),
        }
    }

    #[test]
    fn ownership_queries() {
        let mut p = province();
        assert!(!p.is_owned());
        p.owner = Some(PlayerId(2));
        assert!(p.is_owned());
        assert!(p.is_owned_by(PlayerId(2)));
        assert!(!p.is_owned_by(PlayerId(1)));
    }

    #[test]
    fn water_link_needs_ocean_or_named_sea() {
        let mut p = province();
        assert!(!p.is_water_linked());
        p.sea = true;
        assert!(!p.is_water_linked());
        p.seas.insert("baltic".to_string());
        assert!(p.is_water_linked());

        let mut q = province();
        q.ocean = true;
        assert!(q.is_water_linked());
    }

    #[test]
    fn position_display() {
        assert_eq!(Position::new(900, 200).to_string(), "(900, 200)");
    }
}
