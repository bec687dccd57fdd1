use derive_builder::Builder;

use super::{group_by_coord, Axis, Direction};
use crate::error::{Result, TileError};
use crate::grid::clip_to_next_multiple;
use crate::tile::{Rules, TileSet};

#[derive(Debug, Copy, Clone, PartialEq, Builder)]
#[builder(derive(Debug))]
pub struct VerticalSpacing {
    /// Space added between consecutive rows. May be negative.
    pub space: f64,
    /// Vertical pitch of the power grid that terminator tiles snap to.
    pub pdn_pitch: f64,
    /// `Ascending` walks rows bottom to top.
    #[builder(default)]
    pub direction: Direction,
}

impl VerticalSpacing {
    #[inline]
    pub fn builder() -> VerticalSpacingBuilder {
        VerticalSpacingBuilder::default()
    }
}

/// Changes the vertical space between tile rows.
///
/// Rows are tiles with bit-identical `y`. Walking rows in `params.direction`,
/// the n-th row moves by `n * space` away from the starting edge. The
/// terminator on the far edge (north when walking up, south when walking down)
/// instead moves by that offset rounded up to a multiple of the PDN pitch.
///
/// Memory macros span [`Rules::memory_row_units`] rows and are handled on
/// their own: walking their rows in the reverse direction, only the first tile
/// of each row moves, by a multiple of `memory_row_units * space`.
///
/// Supertile outlines are not touched.
pub fn space_vertical(tiles: &mut TileSet, rules: &Rules, params: &VerticalSpacing) -> Result<()> {
    let VerticalSpacing {
        space,
        pdn_pitch,
        direction,
    } = *params;

    if pdn_pitch.is_nan() || pdn_pitch <= 0.0 {
        return Err(TileError::Validation(format!(
            "PDN pitch must be positive, got {pdn_pitch}"
        )));
    }

    log::warn!(
        "changed vertical space between tiles; make sure to adjust the height of all supertiles by {space:.1}"
    );

    let sign = direction.sign();
    let (rams, others): (Vec<usize>, Vec<usize>) = rules
        .eligible(tiles)
        .partition(|&i| rules.is_memory(&tiles[i]));

    let ram_step = space * rules.memory_row_units as f64;
    let mut ram_offset = 0.0;
    for group in group_by_coord(tiles, rams, Axis::Y, direction.reverse()) {
        if let Some(&first) = group.members.iter().min() {
            tiles[first].y += sign * ram_offset;
            log::debug!(
                "memory row at y = {}: moved {} by {}",
                group.coord,
                tiles[first].name,
                sign * ram_offset
            );
        }
        ram_offset += ram_step;
    }

    let mut offset = 0.0;
    for row in group_by_coord(tiles, others, Axis::Y, direction) {
        let aligned = clip_to_next_multiple(offset, pdn_pitch)?;
        for &i in row.members.iter() {
            let tile = &mut tiles[i];
            let terminator = match direction {
                Direction::Ascending => rules.is_north_term(tile),
                Direction::Descending => rules.is_south_term(tile),
            };
            let shift = if terminator { aligned } else { offset };
            tile.y += sign * shift;
        }
        log::debug!(
            "row at y = {}: {} tiles moved by {}",
            row.coord,
            row.members.len(),
            sign * offset
        );
        offset += space;
    }

    Ok(())
}
