//! Geometric operations over a [`TileSet`].
//!
//! Every transform mutates the tiles it is given in place and skips tiles
//! matched by the ignore set in [`Rules`](crate::tile::Rules).

use itertools::Itertools;

use crate::tile::TileSet;

pub mod horizontal;
pub mod rotate;
pub mod translate;
pub mod vertical;

pub use horizontal::{space_horizontal, HorizontalSpacing, Window};
pub use rotate::{rotate_tiles, Point};
pub use translate::move_tiles;
pub use vertical::{space_vertical, VerticalSpacing};

/// Traversal direction along an axis.
///
/// `Ascending` walks from the lowest coordinate upward and pushes tiles toward
/// larger coordinates; `Descending` does the opposite.
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Direction {
    #[default]
    Ascending,
    Descending,
}

impl Direction {
    pub fn from_ascending(ascending: bool) -> Self {
        if ascending {
            Direction::Ascending
        } else {
            Direction::Descending
        }
    }

    #[inline]
    pub fn sign(&self) -> f64 {
        match self {
            Direction::Ascending => 1.0,
            Direction::Descending => -1.0,
        }
    }

    pub fn reverse(&self) -> Self {
        match self {
            Direction::Ascending => Direction::Descending,
            Direction::Descending => Direction::Ascending,
        }
    }

    /// Whether `a` comes strictly before `b` when walking in this direction.
    pub fn precedes(&self, a: i64, b: i64) -> bool {
        match self {
            Direction::Ascending => a < b,
            Direction::Descending => a > b,
        }
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Axis {
    X,
    Y,
}

impl Axis {
    pub fn other(&self) -> Self {
        match self {
            Axis::X => Axis::Y,
            Axis::Y => Axis::X,
        }
    }
}

fn axis_coord(tiles: &TileSet, i: usize, axis: Axis) -> f64 {
    match axis {
        Axis::X => tiles[i].x,
        Axis::Y => tiles[i].y,
    }
}

/// Tiles sharing one coordinate along an axis.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Group {
    pub coord: f64,
    /// Indices into the tile set, sorted by the other axis.
    pub members: Vec<usize>,
}

/// Groups the tiles at `indices` by exact equality of their `axis` coordinate.
///
/// No tolerance is applied: coordinates that differ only in the last bit split
/// what was meant to be one row or column into two.
///
/// Groups are returned in `dir` order. Members keep input order on ties of the
/// secondary coordinate.
pub(crate) fn group_by_coord(
    tiles: &TileSet,
    indices: impl IntoIterator<Item = usize>,
    axis: Axis,
    dir: Direction,
) -> Vec<Group> {
    let mut indices = indices.into_iter().collect::<Vec<_>>();
    indices.sort_by(|&a, &b| axis_coord(tiles, a, axis).total_cmp(&axis_coord(tiles, b, axis)));

    let grouped = indices.into_iter().group_by(|&i| axis_coord(tiles, i, axis));
    let mut groups = grouped
        .into_iter()
        .map(|(coord, members)| {
            let mut members = members.collect::<Vec<_>>();
            let other = axis.other();
            members.sort_by(|&a, &b| {
                axis_coord(tiles, a, other).total_cmp(&axis_coord(tiles, b, other))
            });
            Group { coord, members }
        })
        .collect::<Vec<_>>();

    if dir == Direction::Descending {
        groups.reverse();
    }
    groups
}
