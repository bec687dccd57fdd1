use std::io::Write;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;

use crate::error::Result;
use crate::tile::{Orientation, TileRecord, TileSet};

/// Output dialect of the placement file.
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WriteFormat {
    /// Coordinates in shortest round-trip form; identity orientation written as `W`.
    Flip,
    /// Coordinates with one decimal digit; orientation unchanged.
    #[default]
    Precision,
}

/// Orientation literal the placement tool expects for an unrotated tile.
const FLIP_IDENTITY: Orientation = Orientation::W;

impl WriteFormat {
    pub fn write_tile(&self, w: &mut impl Write, tile: &TileRecord) -> std::io::Result<()> {
        match self {
            WriteFormat::Flip => {
                let orientation = if tile.orientation.is_identity() {
                    FLIP_IDENTITY
                } else {
                    tile.orientation
                };
                writeln!(w, "{} {:?} {:?} {}", tile.name, tile.x, tile.y, orientation)
            }
            WriteFormat::Precision => writeln!(
                w,
                "{} {:.1} {:.1} {}",
                tile.name, tile.x, tile.y, tile.orientation
            ),
        }
    }

    pub fn write_all(&self, w: &mut impl Write, tiles: &TileSet) -> std::io::Result<()> {
        for tile in tiles {
            self.write_tile(w, tile)?;
        }
        Ok(())
    }
}

pub fn to_string(tiles: &TileSet, format: WriteFormat) -> String {
    let mut buf = Vec::new();
    // Writing into a Vec cannot fail.
    let _ = format.write_all(&mut buf, tiles);
    String::from_utf8_lossy(&buf).into_owned()
}

/// Writes `tiles` to `path`, replacing any existing file.
///
/// The tiles go to a temporary file next to `path` that is renamed over it
/// once complete, so a failed write leaves the previous file intact.
pub fn write_tiles(tiles: &TileSet, path: impl AsRef<Path>, format: WriteFormat) -> Result<()> {
    let path = path.as_ref();
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir)?;

    let mut tmp = NamedTempFile::new_in(dir)?;
    {
        let mut f = std::io::BufWriter::new(&mut tmp);
        format.write_all(&mut f, tiles)?;
        f.flush()?;
    }
    tmp.persist(path).map_err(|e| e.error)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;
    use crate::error::TileError;
    use crate::io::read::read_tiles;

    fn tiles() -> TileSet {
        TileSet::from(vec![
            TileRecord::new("Tile_X0Y1_W_IO", 1887.0, 1000.3, Orientation::N),
            TileRecord::new("Tile_X1Y1_LUT4AB", -3.5, 12.0, Orientation::FS),
        ])
    }

    #[test]
    fn test_flip_format() {
        assert_eq!(
            to_string(&tiles(), WriteFormat::Flip),
            "Tile_X0Y1_W_IO 1887.0 1000.3 W\nTile_X1Y1_LUT4AB -3.5 12.0 FS\n"
        );
    }

    #[test]
    fn test_precision_format() {
        assert_eq!(
            to_string(&tiles(), WriteFormat::Precision),
            "Tile_X0Y1_W_IO 1887.0 1000.3 N\nTile_X1Y1_LUT4AB -3.5 12.0 FS\n"
        );
    }

    #[test]
    fn test_precision_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out/macro_manipulated.cfg");
        let tiles = TileSet::from(vec![
            TileRecord::new("Tile_X0Y0_A", 0.04, 199.96, Orientation::N),
            TileRecord::new("Tile_X1Y0_B", 215.55, -7.0, Orientation::FN),
            TileRecord::new("Tile_X2Y0_C", 431.0, 0.0, Orientation::S),
        ]);

        write_tiles(&tiles, &path, WriteFormat::Precision).unwrap();
        let read = read_tiles(&path).unwrap();

        assert_eq!(read.len(), tiles.len());
        for (a, b) in tiles.iter().zip(read.iter()) {
            assert_eq!(a.name, b.name);
            assert_eq!(a.orientation, b.orientation);
            assert_abs_diff_eq!(a.x, b.x, epsilon = 0.05 + 1e-9);
            assert_abs_diff_eq!(a.y, b.y, epsilon = 0.05 + 1e-9);
        }
    }

    #[test]
    fn test_unwritable_output() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("file.cfg");
        std::fs::write(&blocker, "not a directory\n").unwrap();

        let err = write_tiles(&tiles(), blocker.join("out.cfg"), WriteFormat::Flip).unwrap_err();
        assert!(matches!(err, TileError::Io(_)));
        assert_eq!(
            std::fs::read_to_string(&blocker).unwrap(),
            "not a directory\n"
        );
    }

    #[test]
    fn test_replaces_existing_output() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("macro_manipulated.cfg");
        std::fs::write(&path, "stale contents\n").unwrap();

        write_tiles(&tiles(), &path, WriteFormat::Precision).unwrap();

        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            to_string(&tiles(), WriteFormat::Precision)
        );
        let entries = std::fs::read_dir(dir.path()).unwrap().count();
        assert_eq!(entries, 1);
    }
}
