use crate::tile::{Orientation, Rules, TileSet};

#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Rotates this point counterclockwise by `angle` radians about `origin`.
    pub fn rotate(&self, origin: Point, angle: f64) -> Point {
        let (sin, cos) = angle.sin_cos();
        let dx = self.x - origin.x;
        let dy = self.y - origin.y;
        Point {
            x: origin.x + cos * dx - sin * dy,
            y: origin.y + sin * dx + cos * dy,
        }
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

/// Rotates every eligible tile by `angle_degrees` (counterclockwise) about `origin`.
///
/// Rotated tiles are shifted by [`Rules::rotation_shift_x`] along x and have
/// their orientation reset to the identity.
pub fn rotate_tiles(tiles: &mut TileSet, rules: &Rules, origin: Point, angle_degrees: f64) {
    let angle = angle_degrees.to_radians();
    log::debug!(
        "rotating tiles by {angle_degrees} degrees about ({}, {})",
        origin.x,
        origin.y
    );

    for tile in tiles.iter_mut() {
        if rules.is_ignored(tile) {
            continue;
        }
        let q = Point::new(tile.x, tile.y).rotate(origin, angle);
        tile.x = q.x + rules.rotation_shift_x;
        tile.y = q.y;
        tile.orientation = Orientation::N;
    }
}
