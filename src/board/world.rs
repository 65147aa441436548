//! The world aggregate.
//!
//! Owns every level, region, province, and player, plus the water indexes
//! used for reachability. It is built once per run in the fixed order
//! levels → regions/provinces → players/ownership, since each stage refers
//! to entities created by the one before it.

use std::collections::{BTreeMap, HashMap};

use super::color::Color;
use super::level::{find_level, Level, LevelId};
use super::player::{Player, PlayerId};
use super::province::{Province, ProvinceId, ProvinceSpec, Region, RegionId};

/// Errors raised while assembling a world.
#[derive(Debug, thiserror::Error)]
pub enum WorldError {
    #[error("province '{province}' references unknown level '{level}'")]
    UnknownLevel { province: String, level: String },

    #[error("province '{0}' is defined more than once")]
    DuplicateProvince(String),

    #[error("player '{0}' is defined more than once")]
    DuplicatePlayer(String),
}

/// In-memory graph of levels, regions, provinces, and players.
#[derive(Debug, Clone, Default)]
pub struct World {
    levels: Vec<Level>,
    regions: Vec<Region>,
    region_index: HashMap<String, RegionId>,
    provinces: Vec<Province>,
    province_index: HashMap<String, ProvinceId>,
    players: Vec<Player>,
    player_index: HashMap<String, PlayerId>,
    ocean_provinces: Vec<ProvinceId>,
    sea_provinces: BTreeMap<String, Vec<ProvinceId>>,
}

impl World {
    /// Creates an empty world over a fixed, tier-ordered level set.
    pub fn new(levels: Vec<Level>) -> Self {
        World {
            levels,
            ..World::default()
        }
    }

    // ------------------------------------------------------------------
    // Construction
    // ------------------------------------------------------------------

    /// Adds a region, or returns the existing one with the same name.
    pub fn add_region(&mut self, name: &str) -> RegionId {
        if let Some(id) = self.region_index.get(name) {
            return *id;
        }
        let id = RegionId(self.regions.len());
        self.regions.push(Region::new(name));
        self.region_index.insert(name.to_string(), id);
        id
    }

    /// Adds a province to `region`, indexing its ocean and sea links.
    pub fn add_province(
        &mut self,
        region: RegionId,
        spec: ProvinceSpec,
    ) -> Result<ProvinceId, WorldError> {
        if self.province_index.contains_key(&spec.name) {
            return Err(WorldError::DuplicateProvince(spec.name));
        }
        let level =
            find_level(&self.levels, &spec.level).ok_or_else(|| WorldError::UnknownLevel {
                province: spec.name.clone(),
                level: spec.level.clone(),
            })?;

        let id = ProvinceId(self.provinces.len());
        if spec.ocean {
            self.ocean_provinces.push(id);
        }
        if spec.sea {
            for sea in &spec.seas {
                let members = self.sea_provinces.entry(sea.clone()).or_default();
                if !members.contains(&id) {
                    members.push(id);
                }
            }
        }

        tracing::debug!(
            province = %spec.name,
            region = %self.regions[region.0].name,
            "adding province"
        );
        self.regions[region.0].provinces.push(id);
        self.province_index.insert(spec.name.clone(), id);
        self.provinces.push(Province {
            name: spec.name,
            region,
            level,
            owner: None,
            position: spec.position,
            adjacent: spec.adjacent.into_iter().collect(),
            ocean: spec.ocean,
            sea: spec.sea,
            seas: if spec.sea { spec.seas.into_iter().collect() } else { Default::default() },
        });
        Ok(id)
    }

    /// Adds a player. Keys must be unique.
    pub fn add_player(&mut self, player: Player) -> Result<PlayerId, WorldError> {
        if self.player_index.contains_key(&player.key) {
            return Err(WorldError::DuplicatePlayer(player.key));
        }
        let id = PlayerId(self.players.len());
        self.player_index.insert(player.key.clone(), id);
        self.players.push(player);
        Ok(id)
    }

    /// Gives every province of the named region to `player`.
    ///
    /// Returns false if the region is unknown.
    pub fn assign_region(&mut self, player: PlayerId, region: &str) -> bool {
        let Some(rid) = self.region_id(region) else {
            return false;
        };
        let members = self.regions[rid.0].provinces.clone();
        for id in members {
            self.set_owner(id, Some(player));
        }
        true
    }

    /// Gives the named province to `player`. Returns false if it is unknown.
    pub fn assign_province(&mut self, player: PlayerId, province: &str) -> bool {
        match self.province_id(province) {
            Some(id) => {
                self.set_owner(id, Some(player));
                true
            }
            None => false,
        }
    }

    /// Sets or clears the owner of a province.
    ///
    /// `owner` is stored as given. An id that names no player is painted
    /// with the level color.
    pub fn set_owner(&mut self, province: ProvinceId, owner: Option<PlayerId>) {
        let p = &mut self.provinces[province.0];
        if let Some(o) = owner {
            let key = self.players.get(o.0).map(|pl| pl.key.as_str()).unwrap_or("<unknown>");
            tracing::debug!(province = %p.name, owner = key, "updating owner");
        }
        p.owner = owner;
    }

    // ------------------------------------------------------------------
    // Lookups
    // ------------------------------------------------------------------

    /// All levels, in tier order.
    pub fn levels(&self) -> &[Level] {
        &self.levels
    }

    /// The level with the given id.
    pub fn level(&self, id: LevelId) -> &Level {
        &self.levels[id.0]
    }

    /// All regions, in load order.
    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    /// Looks a region up by name.
    pub fn region_id(&self, name: &str) -> Option<RegionId> {
        self.region_index.get(name).copied()
    }

    /// All provinces, in load order.
    pub fn provinces(&self) -> &[Province] {
        &self.provinces
    }

    /// The province with the given id.
    pub fn province(&self, id: ProvinceId) -> &Province {
        &self.provinces[id.0]
    }

    /// Looks a province up by name.
    pub fn province_id(&self, name: &str) -> Option<ProvinceId> {
        self.province_index.get(name).copied()
    }

    /// Iterates over all province ids in load order.
    pub fn province_ids(&self) -> impl Iterator<Item = ProvinceId> {
        (0..self.provinces.len()).map(ProvinceId)
    }

    /// All players, in load order.
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    /// The player with the given id.
    pub fn player(&self, id: PlayerId) -> &Player {
        &self.players[id.0]
    }

    /// Mutable access to a player, for balance updates.
    pub fn player_mut(&mut self, id: PlayerId) -> &mut Player {
        &mut self.players[id.0]
    }

    /// Looks a player up by ownership-table key.
    pub fn player_id(&self, key: &str) -> Option<PlayerId> {
        self.player_index.get(key).copied()
    }

    /// Provinces flagged `ocean`, in load order.
    pub fn ocean_provinces(&self) -> &[ProvinceId] {
        &self.ocean_provinces
    }

    /// Provinces flagged `sea` that touch the named sea.
    pub fn sea_provinces(&self, sea: &str) -> &[ProvinceId] {
        self.sea_provinces.get(sea).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Names of every sea referenced by some province.
    pub fn seas(&self) -> impl Iterator<Item = &str> {
        self.sea_provinces.keys().map(String::as_str)
    }

    /// Provinces currently owned by `player`, in load order.
    pub fn owned_provinces(&self, player: PlayerId) -> Vec<ProvinceId> {
        self.province_ids()
            .filter(|id| self.provinces[id.0].is_owned_by(player))
            .collect()
    }

    /// The color a province should be painted with right now.
    ///
    /// Owned provinces take the owner's shade for the province's level;
    /// unowned ones take the level's base color.
    pub fn province_color(&self, id: ProvinceId) -> Color {
        let province = &self.provinces[id.0];
        let level = &self.levels[province.level.0];
        province
            .owner
            .and_then(|o| self.players.get(o.0))
            .and_then(|p| p.shade(&level.name))
            .unwrap_or(level.color)
    }

    /// Lists one-directional land borders as `(from, to)` name pairs.
    ///
    /// Adjacency is trusted as given and never symmetrized; this only reports
    /// links whose reverse is missing. Links to unknown provinces are ignored.
    pub fn asymmetric_adjacencies(&self) -> Vec<(String, String)> {
        let mut out = Vec::new();
        for p in &self.provinces {
            for adj in &p.adjacent {
                if let Some(other) = self.province_id(adj) {
                    if !self.provinces[other.0].adjacent.contains(&p.name) {
                        out.push((p.name.clone(), adj.clone()));
                    }
                }
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::province::Position;

    fn levels() -> Vec<Level> {
        vec![
            Level::new("level1", "level1", 5, 1, Color::new(0, 178, 0)),
            Level::new("level2", "level2", 10, 3, Color::new(0, 127, 0)),
        ]
    }

    fn spec(name: &str, level: &str) -> ProvinceSpec {
        ProvinceSpec {
            name: name.to_string(),
            level: level.to_string(),
            position: Position::new(1, 1),
            ..ProvinceSpec::default()
        }
    }

    #[test]
    fn unknown_level_is_rejected() {
        let mut world = World::new(levels());
        let r = world.add_region("north");
        let err = world.add_province(r, spec("A", "level9")).unwrap_err();
        assert!(matches!(err, WorldError::UnknownLevel { .. }));
        assert!(world.provinces().is_empty());
    }

    #[test]
    fn duplicate_province_is_rejected() {
        let mut world = World::new(levels());
        let r = world.add_region("north");
        world.add_province(r, spec("A", "level1")).unwrap();
        let r2 = world.add_region("south");
        assert!(matches!(
            world.add_province(r2, spec("A", "level1")),
            Err(WorldError::DuplicateProvince(_))
        ));
    }

    #[test]
    fn water_indexes() {
        let mut world = World::new(levels());
        let r = world.add_region("coast");
        let mut a = spec("A", "level1");
        a.ocean = true;
        let mut b = spec("B", "level1");
        b.sea = true;
        b.seas = vec!["med".to_string(), "black".to_string()];
        let mut c = spec("C", "level1");
        // Seas are ignored unless the province is flagged `sea`.
        c.seas = vec!["med".to_string()];
        let a = world.add_province(r, a).unwrap();
        let b = world.add_province(r, b).unwrap();
        world.add_province(r, c).unwrap();

        assert_eq!(world.ocean_provinces(), &[a]);
        assert_eq!(world.sea_provinces("med"), &[b]);
        assert_eq!(world.sea_provinces("black"), &[b]);
        assert!(world.sea_provinces("red").is_empty());
        assert_eq!(world.seas().collect::<Vec<_>>(), vec!["black", "med"]);
    }

    #[test]
    fn region_assignment_expands_to_provinces() {
        let mut world = World::new(levels());
        let r = world.add_region("north");
        let a = world.add_province(r, spec("A", "level1")).unwrap();
        let b = world.add_province(r, spec("B", "level2")).unwrap();
        let p = world
            .add_player(Player::new("p1", "Alice", 1, Color::new(120, 120, 120), world.levels()))
            .unwrap();

        assert!(world.assign_region(p, "north"));
        assert!(!world.assign_region(p, "nowhere"));
        assert!(!world.assign_province(p, "Z"));
        assert_eq!(world.owned_provinces(p), vec![a, b]);
        assert_eq!(world.province_color(a), Color::new(120, 120, 120));
        assert_eq!(world.province_color(b), Color::new(60, 60, 60));

        world.set_owner(b, None);
        assert_eq!(world.province_color(b), Color::new(0, 127, 0));
    }

    #[test]
    fn stale_owner_id_does_not_panic() {
        let mut world = World::new(levels());
        let r = world.add_region("north");
        let a = world.add_province(r, spec("A", "level1")).unwrap();
        world.set_owner(a, Some(PlayerId(7)));
        assert!(world.province(a).is_owned_by(PlayerId(7)));
        assert_eq!(world.province_color(a), Color::new(0, 178, 0));
    }

    #[test]
    fn region_lookup() {
        let mut world = World::new(levels());
        let north = world.add_region("north");
        assert_eq!(world.add_region("north"), north);
        assert_eq!(world.region_id("north"), Some(north));
        assert_eq!(world.region_id("south"), None);
    }

    #[test]
    fn duplicate_player_is_rejected() {
        let mut world = World::new(levels());
        let player = Player::new("p1", "Alice", 1, Color::BLACK, world.levels());
        world.add_player(player.clone()).unwrap();
        assert!(matches!(world.add_player(player), Err(WorldError::DuplicatePlayer(_))));
    }

    #[test]
    fn asymmetric_links_are_reported_not_fixed() {
        let mut world = World::new(levels());
        let r = world.add_region("north");
        let mut a = spec("A", "level1");
        a.adjacent = vec!["B".to_string(), "GHOST".to_string()];
        let b = spec("B", "level1");
        world.add_province(r, a).unwrap();
        let b = world.add_province(r, b).unwrap();

        assert_eq!(world.asymmetric_adjacencies(), vec![("A".to_string(), "B".to_string())]);
        assert!(world.province(b).adjacent.is_empty());
    }
}
