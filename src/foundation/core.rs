pub use kurbo::{Affine, Point, Vec2};

/// Number of whole output frames covering `duration_sec` at integer `fps`.
///
/// Rounds to the nearest frame so a 3.0 s timeline at 24 fps is exactly 72
/// frames rather than drifting one short through float error.
pub fn duration_to_frames(duration_sec: f64, fps: u32) -> u64 {
    if !duration_sec.is_finite() || duration_sec <= 0.0 || fps == 0 {
        return 0;
    }
    (duration_sec * f64::from(fps)).round() as u64
}

/// Timeline time in seconds at which frame `frame` is sampled.
pub fn frame_time_sec(frame: u64, fps: u32) -> f64 {
    if fps == 0 {
        return 0.0;
    }
    (frame as f64) / f64::from(fps)
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
