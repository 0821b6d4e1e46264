use crate::{
    compose::clip::Clip,
    foundation::error::{StillcastError, StillcastResult},
};

/// Fade length applied to both ends of a lone clip.
pub const SINGLE_CLIP_FADE_SEC: f64 = 0.5;

/// One clip placed on the timeline with its boundary fade ramps.
///
/// `fade_in_sec`/`fade_out_sec` are the scheduler's transition ramps; they
/// compose multiplicatively with any opacity the clip's own animation applies.
#[derive(Clone, Debug)]
pub struct ScheduledClip {
    /// The composed clip.
    pub clip: Clip,
    /// Timeline time at which this clip starts, in seconds.
    pub start_sec: f64,
    /// Opacity ramp 0 -> 1 over this many seconds at the clip head.
    pub fade_in_sec: f64,
    /// Opacity ramp 1 -> 0 over this many seconds at the clip tail.
    pub fade_out_sec: f64,
}

impl ScheduledClip {
    /// Transition opacity gain at clip-local time `t`.
    pub fn fade_gain(&self, t: f64) -> f64 {
        let mut gain = 1.0f64;
        if self.fade_in_sec > 0.0 && t < self.fade_in_sec {
            gain *= (t / self.fade_in_sec).clamp(0.0, 1.0);
        }
        if self.fade_out_sec > 0.0 {
            let remaining = self.clip.duration_sec - t;
            if remaining < self.fade_out_sec {
                gain *= (remaining / self.fade_out_sec).clamp(0.0, 1.0);
            }
        }
        gain
    }

    fn end_sec(&self) -> f64 {
        self.start_sec + self.clip.duration_sec
    }
}

/// The ordered, time-concatenated sequence of clips forming the video track.
#[derive(Clone, Debug)]
pub struct Timeline {
    /// Clips in playback order with their fade ramps.
    pub clips: Vec<ScheduledClip>,
    /// Total duration: the sum of clip durations. Transitions are opacity
    /// ramps inside existing clip spans and never add runtime.
    pub duration_sec: f64,
}

impl Timeline {
    /// The scheduled clip covering timeline time `t`, with the clip-local
    /// time, or `None` when `t` is outside `[0, duration_sec)`.
    pub fn clip_at(&self, t: f64) -> Option<(&ScheduledClip, f64)> {
        if !t.is_finite() || t < 0.0 || t >= self.duration_sec {
            return None;
        }
        // A handful of clips per render; a linear scan is fine.
        self.clips
            .iter()
            .find(|sc| t < sc.end_sec())
            .or(self.clips.last())
            .map(|sc| (sc, t - sc.start_sec))
    }
}

/// Sequence clips into a single timeline with cross-fade transitions.
///
/// A lone clip gets an independent [`SINGLE_CLIP_FADE_SEC`] fade at both
/// ends. With multiple clips, every clip except the last fades out over
/// `transition_duration` at its tail and the very start of the sequence fades
/// in over the same length. Ramps are clamped to the owning clip's duration
/// so a transition longer than a clip can never produce a negative visible
/// span.
pub fn schedule_clips(clips: Vec<Clip>, transition_duration: f64) -> StillcastResult<Timeline> {
    if clips.is_empty() {
        return Err(StillcastError::validation(
            "timeline requires at least one clip",
        ));
    }
    if !transition_duration.is_finite() || transition_duration < 0.0 {
        return Err(StillcastError::validation(
            "transition_duration must be a non-negative number of seconds",
        ));
    }

    let count = clips.len();
    let mut scheduled = Vec::with_capacity(count);
    let mut cursor = 0.0f64;

    for (i, clip) in clips.into_iter().enumerate() {
        let duration = clip.duration_sec;
        let (fade_in_sec, fade_out_sec) = if count == 1 {
            let ramp = SINGLE_CLIP_FADE_SEC.min(duration);
            (ramp, ramp)
        } else {
            let head = if i == 0 {
                transition_duration.min(duration)
            } else {
                0.0
            };
            let tail = if i + 1 == count {
                0.0
            } else {
                transition_duration.min(duration)
            };
            (head, tail)
        };

        scheduled.push(ScheduledClip {
            clip,
            start_sec: cursor,
            fade_in_sec,
            fade_out_sec,
        });
        cursor += duration;
    }

    Ok(Timeline {
        clips: scheduled,
        duration_sec: cursor,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/schedule.rs"]
mod tests;
