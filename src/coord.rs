use lazy_static::lazy_static;
use regex::Regex;

use crate::error::{Result, TileError};

lazy_static! {
    static ref FABRIC_COORD: Regex = Regex::new(r"X(\d+)Y(\d+)").unwrap();
}

/// Extracts the fabric coordinate embedded in a tile name as `X<int>Y<int>`.
///
/// Only the first occurrence is considered.
pub fn parse_coordinates(name: &str) -> Result<(u32, u32)> {
    let caps = FABRIC_COORD
        .captures(name)
        .ok_or_else(|| TileError::format(format!("no fabric coordinates in `{name}`")))?;

    let parse = |i: usize| {
        caps[i]
            .parse::<u32>()
            .map_err(|e| TileError::format(format!("bad fabric coordinate in `{name}`: {e}")))
    };

    Ok((parse(1)?, parse(2)?))
}
