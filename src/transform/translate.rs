use crate::tile::{Rules, TileSet};

/// Shifts every eligible tile by (`x_offset`, `y_offset`).
pub fn move_tiles(tiles: &mut TileSet, rules: &Rules, x_offset: f64, y_offset: f64) {
    for tile in tiles.iter_mut() {
        if rules.is_ignored(tile) {
            continue;
        }
        tile.x += x_offset;
        tile.y += y_offset;
    }
}
