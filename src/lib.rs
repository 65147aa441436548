//! Province ownership map library.
//!
//! Exposes the map model, claim pricing, raster rendering, and table formats
//! for use by integration tests and the binary entry points.

pub mod board;
pub mod claim;
pub mod config;
pub mod engine;
pub mod protocol;
pub mod render;
