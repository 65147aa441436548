//! Input tables and world assembly.
//!
//! Three tables describe a map: levels, topology (regions → provinces), and
//! ownership (players and what they own). Entry order in each table is
//! preserved; level order is tier order.

use std::fmt;
use std::marker::PhantomData;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::de::{DeserializeOwned, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::board::{Color, Level, Palette, Player, Position, ProvinceSpec, World, WorldError};

/// A key → entry table that keeps document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderedTable<T>(Vec<(String, T)>);

impl<T> Default for OrderedTable<T> {
    fn default() -> Self {
        OrderedTable(Vec::new())
    }
}

impl<T> OrderedTable<T> {
    /// Wraps entries that are already in document order.
    pub fn new(entries: Vec<(String, T)>) -> Self {
        OrderedTable(entries)
    }

    /// Iterates entries in document order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &T)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Returns the first entry with `key`.
    pub fn get(&self, key: &str) -> Option<&T> {
        self.0.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the table has no entries.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

struct TableVisitor<T>(PhantomData<T>);

impl<'de, T: Deserialize<'de>> Visitor<'de> for TableVisitor<T> {
    type Value = OrderedTable<T>;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a map of named entries")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
        let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
        while let Some((key, value)) = map.next_entry::<String, T>()? {
            entries.push((key, value));
        }
        Ok(OrderedTable(entries))
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for OrderedTable<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(TableVisitor(PhantomData))
    }
}

impl<T: Serialize> Serialize for OrderedTable<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (k, v) in &self.0 {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

/// One row of the level table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelEntry {
    pub name: String,
    pub cost: u32,
    pub product: u32,
    pub color: [i64; 3],
}

/// One province of the topology table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProvinceEntry {
    /// Level key or level name.
    pub level: String,
    pub pos: [u32; 2],
    #[serde(default)]
    pub adjacent: Vec<String>,
    #[serde(default)]
    pub ocean: bool,
    #[serde(default)]
    pub sea: bool,
    #[serde(default)]
    pub seas: Vec<String>,
}

/// Territory granted to a player at load time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OwnedEntry {
    #[serde(default)]
    pub regions: Vec<String>,
    #[serde(default)]
    pub provinces: Vec<String>,
}

/// One player of the ownership table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerEntry {
    pub name: String,
    #[serde(alias = "externalId", alias = "snowflake")]
    pub external_id: i64,
    /// Palette color name.
    #[serde(default)]
    pub color: Option<String>,
    /// Explicit color; wins over `color`.
    #[serde(default)]
    pub custom_color: Option<[i64; 3]>,
    #[serde(default)]
    pub balance: u64,
    #[serde(default)]
    pub owned: OwnedEntry,
}

pub type LevelTable = OrderedTable<LevelEntry>;
pub type TopologyTable = OrderedTable<OrderedTable<ProvinceEntry>>;
pub type OwnershipTable = OrderedTable<PlayerEntry>;

/// The three input tables of a run.
#[derive(Debug, Clone, Default)]
pub struct Tables {
    pub levels: LevelTable,
    pub topology: TopologyTable,
    pub ownership: OwnershipTable,
}

/// Clamps a table color, warning when a channel leaves 0..=255.
fn table_color(owner: &str, channels: [i64; 3]) -> Color {
    let (color, clipped) = Color::clamped(channels);
    if clipped {
        tracing::warn!(entry = owner, ?channels, %color, "color channel out of range, clamped");
    }
    color
}

/// Picks a player's base color: custom color, then palette name, then a
/// palette color chosen from the player's external id.
fn player_color(key: &str, entry: &PlayerEntry, palette: &Palette) -> Color {
    if let Some(channels) = entry.custom_color {
        return table_color(key, channels);
    }
    if let Some(name) = &entry.color {
        if let Some(color) = palette.get(name) {
            return color;
        }
        tracing::warn!(player = key, color = %name, "unknown palette color");
    }
    if palette.is_empty() {
        return Color::BLACK;
    }
    let mut rng = SmallRng::seed_from_u64(entry.external_id as u64);
    let (name, color) = palette
        .nth(rng.gen_range(0..palette.len()))
        .unwrap_or(("black", Color::BLACK));
    tracing::warn!(player = key, fallback = name, "no usable color, picked one from the palette");
    color
}

/// Builds a world from the input tables.
///
/// Ownership entries naming unknown regions or provinces are skipped with a
/// warning. A province naming an unknown level is an error.
pub fn build_world(tables: &Tables, palette: &Palette) -> Result<World, WorldError> {
    let levels: Vec<Level> = tables
        .levels
        .iter()
        .map(|(key, e)| {
            Level::new(key, &e.name, e.cost, e.product, table_color(key, e.color))
        })
        .collect();
    let mut world = World::new(levels);

    for (region, provinces) in tables.topology.iter() {
        let rid = world.add_region(region);
        for (name, e) in provinces.iter() {
            world.add_province(
                rid,
                ProvinceSpec {
                    name: name.to_string(),
                    level: e.level.clone(),
                    position: Position::new(e.pos[0], e.pos[1]),
                    adjacent: e.adjacent.clone(),
                    ocean: e.ocean,
                    sea: e.sea,
                    seas: e.seas.clone(),
                },
            )?;
        }
    }

    for (key, e) in tables.ownership.iter() {
        let color = player_color(key, e, palette);
        let player = Player::new(key, &e.name, e.external_id, color, world.levels())
            .with_balance(e.balance);
        let id = world.add_player(player)?;

        for region in &e.owned.regions {
            if !world.assign_region(id, region) {
                tracing::warn!(player = key, region = %region, "ownership names unknown region");
            }
        }
        for province in &e.owned.provinces {
            if !world.assign_province(id, province) {
                tracing::warn!(
                    player = key,
                    province = %province,
                    "ownership names unknown province"
                );
            }
        }
    }

    tracing::info!(
        levels = world.levels().len(),
        regions = world.regions().len(),
        provinces = world.provinces().len(),
        players = world.players().len(),
        "world built"
    );
    Ok(world)
}

/// Parses a table from JSON text. Convenience for tests and tools.
pub fn from_json<T: DeserializeOwned>(text: &str) -> Result<T, serde_json::Error> {
    serde_json::from_str(text)
}
