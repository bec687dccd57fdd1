use derive_builder::Builder;
use serde::{Deserialize, Serialize};

use super::{group_by_coord, Axis, Direction};
use crate::coord::parse_coordinates;
use crate::error::Result;
use crate::tile::{Rules, TileSet};

/// Fabric column range over which horizontal spacing is applied.
///
/// `start` and `stop` are fabric X coordinates, in traversal order.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct Window {
    pub start: u32,
    pub stop: u32,
}

#[derive(Debug, Copy, Clone, PartialEq, Builder)]
#[builder(derive(Debug))]
pub struct HorizontalSpacing {
    /// Space added between consecutive columns. May be negative.
    pub space: f64,
    /// `Ascending` walks columns left to right.
    #[builder(default)]
    pub direction: Direction,
    #[builder(default, setter(strip_option))]
    pub window: Option<Window>,
}

impl HorizontalSpacing {
    #[inline]
    pub fn builder() -> HorizontalSpacingBuilder {
        HorizontalSpacingBuilder::default()
    }
}

/// Changes the horizontal space between tile columns.
///
/// Columns are tiles with bit-identical `x`. Walking columns in
/// `params.direction`, each column moves by the offset accumulated so far,
/// and the offset grows by `space` after every column.
///
/// With a window, the offset only grows after columns from fabric X `start`
/// up to, but not including, the column holding fabric X `stop`. Tiles before
/// `start` and memory macros, which carry no fabric coordinate, are not moved.
pub fn space_horizontal(
    tiles: &mut TileSet,
    rules: &Rules,
    params: &HorizontalSpacing,
) -> Result<()> {
    let HorizontalSpacing {
        space,
        direction,
        window,
    } = *params;
    let sign = direction.sign();

    let columns = group_by_coord(tiles, rules.eligible(tiles), Axis::X, direction);

    // Fabric X of each column member, parsed before anything moves. Memory
    // macros carry no fabric coordinate and map to `None`.
    let fabric_xs = match window {
        Some(_) => columns
            .iter()
            .map(|column| {
                column
                    .members
                    .iter()
                    .map(|&i| {
                        if rules.is_memory(&tiles[i]) {
                            Ok(None)
                        } else {
                            parse_coordinates(&tiles[i].name).map(|(x, _)| Some(x))
                        }
                    })
                    .collect::<Result<Vec<_>>>()
            })
            .collect::<Result<Vec<_>>>()?,
        None => Vec::new(),
    };

    let mut offset = 0.0;
    let mut reached_start = window.is_none();
    let mut reached_end = false;
    for (c, column) in columns.iter().enumerate() {
        for (m, &i) in column.members.iter().enumerate() {
            if let Some(window) = window {
                let fabric_x = match fabric_xs[c][m] {
                    Some(x) => x,
                    None => continue,
                };
                if direction.precedes(fabric_x as i64, window.start as i64) {
                    continue;
                }
                reached_start = true;
                if fabric_x == window.stop {
                    reached_end = true;
                }
            }
            tiles[i].x += sign * offset;
        }
        log::debug!(
            "column at x = {}: {} tiles, offset {}",
            column.coord,
            column.members.len(),
            sign * offset
        );

        if reached_start && !reached_end {
            offset += space;
        }
    }

    Ok(())
}
