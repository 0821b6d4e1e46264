use std::path::Path;

use anyhow::Context;

use crate::{assets::media::AudioPcm, foundation::error::StillcastResult};

/// Audio matched exactly against the video timeline duration.
#[derive(Clone, Debug)]
pub struct AudioTrack {
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Channel count.
    pub channels: u16,
    /// Interleaved PCM samples, exactly `round(video_duration * sample_rate)`
    /// sample frames long.
    pub interleaved_f32: Vec<f32>,
}

impl AudioTrack {
    /// Number of per-channel sample frames.
    pub fn sample_frames(&self) -> usize {
        if self.channels == 0 {
            return 0;
        }
        self.interleaved_f32.len() / usize::from(self.channels)
    }

    /// Track duration in seconds.
    pub fn duration_sec(&self) -> f64 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        (self.sample_frames() as f64) / f64::from(self.sample_rate)
    }
}

/// Reconcile an optional audio source against the video duration.
///
/// - No source -> no track (silent output).
/// - Source longer than the video -> trimmed to `[0, video_duration]`.
/// - Source shorter -> looped (`floor(video/audio) + 1` copies) then trimmed.
/// - Equal -> used as-is.
///
/// The returned track's duration equals `video_duration_sec` exactly (to the
/// sample) in every branch. A source with no decodable sample frames yields
/// no track.
pub fn mix_audio(audio: Option<&AudioPcm>, video_duration_sec: f64) -> Option<AudioTrack> {
    let pcm = audio?;
    let src_frames = pcm.sample_frames();
    if src_frames == 0 || pcm.sample_rate == 0 {
        return None;
    }
    if !video_duration_sec.is_finite() || video_duration_sec <= 0.0 {
        return None;
    }

    let channels = usize::from(pcm.channels);
    let target_frames = (video_duration_sec * f64::from(pcm.sample_rate)).round() as usize;

    let mut interleaved_f32 = Vec::with_capacity(target_frames * channels);
    for frame in 0..target_frames {
        // Wrapping the read index realizes loop-then-trim; a source at least
        // as long as the video never wraps, which is plain trimming.
        let src_frame = frame % src_frames;
        let at = src_frame * channels;
        interleaved_f32.extend_from_slice(&pcm.interleaved_f32[at..at + channels]);
    }

    Some(AudioTrack {
        sample_rate: pcm.sample_rate,
        channels: pcm.channels,
        interleaved_f32,
    })
}

/// Spill a mixed track to a raw little-endian f32 PCM file for the encoder.
pub fn write_track_to_f32le_file(track: &AudioTrack, out_path: &Path) -> StillcastResult<()> {
    if let Some(parent) = out_path.parent() {
        std::fs::create_dir_all(parent).with_context(|| {
            format!(
                "create audio spill output directory '{}'",
                parent.display()
            )
        })?;
    }

    let mut bytes = Vec::<u8>::with_capacity(track.interleaved_f32.len() * 4);
    for &sample in &track.interleaved_f32 {
        bytes.extend_from_slice(&sample.to_le_bytes());
    }
    std::fs::write(out_path, bytes)
        .with_context(|| format!("write mixed audio file '{}'", out_path.display()))?;
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/audio/mix.rs"]
mod tests;
