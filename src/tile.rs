use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TileError;

pub const DEFAULT_MEMORY_MARKER: &str = "BlockRAM";
pub const DEFAULT_NORTH_TERM_MARKER: &str = "N_term";
pub const DEFAULT_SOUTH_TERM_MARKER: &str = "S_term";
/// Shift added to the x coordinate of every rotated tile.
pub const DEFAULT_ROTATION_SHIFT_X: f64 = 2000.0;
/// Number of row units spanned by a memory macro.
pub const DEFAULT_MEMORY_ROW_UNITS: u32 = 2;

/// Placement orientation of a tile.
///
/// [`Orientation::N`] is the identity (unrotated, unmirrored) placement.
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Orientation {
    #[default]
    N,
    S,
    E,
    W,
    FN,
    FS,
    FE,
    FW,
}

impl Orientation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Orientation::N => "N",
            Orientation::S => "S",
            Orientation::E => "E",
            Orientation::W => "W",
            Orientation::FN => "FN",
            Orientation::FS => "FS",
            Orientation::FE => "FE",
            Orientation::FW => "FW",
        }
    }

    #[inline]
    pub fn is_identity(&self) -> bool {
        *self == Orientation::N
    }
}

impl FromStr for Orientation {
    type Err = TileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "N" => Orientation::N,
            "S" => Orientation::S,
            "E" => Orientation::E,
            "W" => Orientation::W,
            "FN" => Orientation::FN,
            "FS" => Orientation::FS,
            "FE" => Orientation::FE,
            "FW" => Orientation::FW,
            _ => return Err(TileError::format(format!("unknown orientation `{s}`"))),
        })
    }
}

impl Display for Orientation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single placed macro instance.
#[derive(Debug, Clone, PartialEq)]
pub struct TileRecord {
    pub name: String,
    pub x: f64,
    pub y: f64,
    pub orientation: Orientation,
}

impl TileRecord {
    pub fn new(name: impl Into<String>, x: f64, y: f64, orientation: Orientation) -> Self {
        Self {
            name: name.into(),
            x,
            y,
            orientation,
        }
    }
}

impl Display for TileRecord {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "TILE name: {} x: {:?}, y: {:?}, flip: {}",
            self.name, self.x, self.y, self.orientation
        )
    }
}

/// Tiles in input-file order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TileSet {
    tiles: Vec<TileRecord>,
}

impl TileSet {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn push(&mut self, tile: TileRecord) {
        self.tiles.push(tile);
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TileRecord> {
        self.tiles.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, TileRecord> {
        self.tiles.iter_mut()
    }

    pub fn get(&self, name: &str) -> Option<&TileRecord> {
        self.tiles.iter().find(|t| t.name == name)
    }
}

impl std::ops::Index<usize> for TileSet {
    type Output = TileRecord;

    fn index(&self, index: usize) -> &Self::Output {
        &self.tiles[index]
    }
}

impl std::ops::IndexMut<usize> for TileSet {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        &mut self.tiles[index]
    }
}

impl From<Vec<TileRecord>> for TileSet {
    fn from(tiles: Vec<TileRecord>) -> Self {
        Self { tiles }
    }
}

impl FromIterator<TileRecord> for TileSet {
    fn from_iter<I: IntoIterator<Item = TileRecord>>(iter: I) -> Self {
        Self {
            tiles: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a TileSet {
    type Item = &'a TileRecord;
    type IntoIter = std::slice::Iter<'a, TileRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.tiles.iter()
    }
}

impl Display for TileSet {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for tile in self.tiles.iter() {
            writeln!(f, "{tile}")?;
        }
        Ok(())
    }
}

/// Name-based tile classification shared by every transform.
///
/// Owned by the pipeline and passed by reference; a tile whose name contains
/// any of the `ignore` substrings is never moved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Rules {
    pub ignore: Vec<String>,
    pub memory_marker: String,
    pub north_term_marker: String,
    pub south_term_marker: String,
    pub rotation_shift_x: f64,
    pub memory_row_units: u32,
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            ignore: Vec::new(),
            memory_marker: DEFAULT_MEMORY_MARKER.to_string(),
            north_term_marker: DEFAULT_NORTH_TERM_MARKER.to_string(),
            south_term_marker: DEFAULT_SOUTH_TERM_MARKER.to_string(),
            rotation_shift_x: DEFAULT_ROTATION_SHIFT_X,
            memory_row_units: DEFAULT_MEMORY_ROW_UNITS,
        }
    }
}

impl Rules {
    pub fn with_ignore<S: Into<String>>(mut self, ignore: impl IntoIterator<Item = S>) -> Self {
        self.ignore = ignore.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_rotation_shift_x(mut self, shift: f64) -> Self {
        self.rotation_shift_x = shift;
        self
    }

    pub fn is_ignored(&self, tile: &TileRecord) -> bool {
        self.ignore.iter().any(|s| tile.name.contains(s.as_str()))
    }

    pub fn is_memory(&self, tile: &TileRecord) -> bool {
        tile.name.contains(self.memory_marker.as_str())
    }

    pub fn is_north_term(&self, tile: &TileRecord) -> bool {
        tile.name.contains(self.north_term_marker.as_str())
    }

    pub fn is_south_term(&self, tile: &TileRecord) -> bool {
        tile.name.contains(self.south_term_marker.as_str())
    }

    /// Indices of every tile that transforms may move.
    pub(crate) fn eligible<'a>(&'a self, tiles: &'a TileSet) -> impl Iterator<Item = usize> + 'a {
        tiles
            .iter()
            .enumerate()
            .filter(move |(_, tile)| !self.is_ignored(tile))
            .map(|(i, _)| i)
    }
}
