//! Placement file reading and writing.

pub mod read;
pub mod write;

pub use read::{parse_str, read_tiles};
pub use write::{write_tiles, WriteFormat};
