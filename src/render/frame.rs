use crate::{
    foundation::error::{StillcastError, StillcastResult},
    foundation::math::scale_premul_rgba8_in_place,
    timeline::schedule::Timeline,
};

/// A single rendered frame in RGBA8.
#[derive(Clone, Debug)]
pub struct FrameRGBA {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Row-major pixel bytes.
    pub data: Vec<u8>,
    /// Whether `data` is premultiplied by alpha.
    pub premultiplied: bool,
}

/// Sample the timeline at `t` seconds into a premultiplied RGBA frame.
///
/// Pure with respect to the timeline: the clip covering `t` renders its
/// animation transform at the clip-local time, then the scheduler's
/// transition ramps multiply on top.
pub fn sample_timeline_frame(timeline: &Timeline, t: f64) -> StillcastResult<FrameRGBA> {
    let (scheduled, local_t) = timeline.clip_at(t).ok_or_else(|| {
        StillcastError::validation(format!(
            "sample time {t}s is outside the timeline span [0, {}s)",
            timeline.duration_sec
        ))
    })?;

    let mut frame = scheduled.clip.frame_at(local_t);
    let gain = scheduled.fade_gain(local_t);
    if gain < 1.0 {
        scale_premul_rgba8_in_place(&mut frame.data, gain);
    }
    Ok(frame)
}

#[cfg(test)]
#[path = "../../tests/unit/render/frame.rs"]
mod tests;
