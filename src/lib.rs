//! Tile placement manipulation for floorplan macro configuration files.
//!
//! Reads `name x y orientation` placement records, applies an ordered list of
//! rotations, translations and row/column spacing changes, and writes the
//! result back in one of two output dialects.

pub use anyhow::{anyhow, Result};

pub mod cli;
pub mod config;
pub mod coord;
pub mod error;
pub mod grid;
pub mod io;
pub mod paths;
pub mod plan;
pub mod tile;
pub mod transform;

pub use error::TileError;
pub use tile::{Orientation, Rules, TileRecord, TileSet};
