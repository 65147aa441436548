//! Map representation.
//!
//! Contains the core data structures for levels, colors, provinces, regions,
//! players, the world aggregate, and reachability over the province graph.

pub mod adjacency;
pub mod color;
pub mod level;
pub mod player;
pub mod province;
pub mod world;

pub use adjacency::{
    direct_neighbors, player_borders, player_frontier, player_reach, province_frontier,
};
pub use color::{derive_shades, Color, Palette, Shades};
pub use level::{Level, LevelId};
pub use player::{Player, PlayerId};
pub use province::{Position, Province, ProvinceId, ProvinceSpec, Region, RegionId};
pub use world::{World, WorldError};
