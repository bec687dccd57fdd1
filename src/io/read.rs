use std::path::Path;

use crate::error::{Result, TileError};
use crate::tile::{Orientation, TileRecord, TileSet};

/// Reads the tile placement file at `path`.
pub fn read_tiles(path: impl AsRef<Path>) -> Result<TileSet> {
    let src = std::fs::read_to_string(path)?;
    parse_str(&src)
}

/// Parses placement records from `src`.
///
/// Blank lines and lines starting with whitespace are skipped. Every other
/// line must hold at least `name x y orientation`; trailing fields are ignored.
pub fn parse_str(src: &str) -> Result<TileSet> {
    let mut tiles = TileSet::new();
    for (i, line) in src.lines().enumerate() {
        if line.trim().is_empty() || line.starts_with(char::is_whitespace) {
            continue;
        }
        tiles.push(parse_line(i + 1, line)?);
    }
    Ok(tiles)
}

fn parse_line(lineno: usize, line: &str) -> Result<TileRecord> {
    let fields = line.split_whitespace().collect::<Vec<_>>();
    if fields.len() < 4 {
        return Err(TileError::format_at(
            lineno,
            format!("expected 4 fields, found {}", fields.len()),
        ));
    }

    let coord = |s: &str| {
        s.parse::<f64>()
            .map_err(|_| TileError::format_at(lineno, format!("invalid coordinate `{s}`")))
    };
    let orientation = fields[3]
        .parse::<Orientation>()
        .map_err(|e| match e {
            TileError::Format { message, .. } => TileError::format_at(lineno, message),
            e => e,
        })?;

    Ok(TileRecord {
        name: fields[0].to_string(),
        x: coord(fields[1])?,
        y: coord(fields[2])?,
        orientation,
    })
}
