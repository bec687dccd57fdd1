use crate::error::{Result, TileError};

/// Rounds `offset` up to the nearest multiple of `pitch`.
pub fn clip_to_next_multiple(offset: f64, pitch: f64) -> Result<f64> {
    if pitch.is_nan() || pitch <= 0.0 {
        return Err(TileError::Validation(format!(
            "pitch must be positive, got {pitch}"
        )));
    }

    let clipped = (offset / pitch).ceil() * pitch;
    // ceil of a small negative ratio is -0.0
    Ok(if clipped == 0.0 { 0.0 } else { clipped })
}
