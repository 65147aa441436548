//! Input tables and their on-disk formats.
//!
//! `table` defines the level, topology, and ownership tables and assembles a
//! [`World`](crate::board::World) from them. `source` reads and writes those
//! tables as JSON or RON.

pub mod source;
pub mod table;

pub use source::{
    load_table, read_table, write_table, SourceError, SourceFormat, SOURCE_FORMATS,
};
pub use table::{
    build_world, LevelEntry, LevelTable, OrderedTable, OwnedEntry, OwnershipTable, PlayerEntry,
    ProvinceEntry, Tables, TopologyTable,
};
