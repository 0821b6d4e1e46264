use std::path::Path;

use crate::foundation::error::{StillcastError, StillcastResult};

/// Sample rate all decoded audio is resampled to before mixing.
pub const MIX_SAMPLE_RATE: u32 = 48_000;

/// Decoded audio stored as interleaved `f32` PCM.
#[derive(Clone, Debug)]
pub struct AudioPcm {
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Channel count.
    pub channels: u16,
    /// Interleaved PCM samples.
    pub interleaved_f32: Vec<f32>,
}

impl AudioPcm {
    /// Number of per-channel sample frames.
    pub fn sample_frames(&self) -> usize {
        if self.channels == 0 {
            return 0;
        }
        self.interleaved_f32.len() / usize::from(self.channels)
    }

    /// Source duration in seconds.
    pub fn duration_sec(&self) -> f64 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        (self.sample_frames() as f64) / f64::from(self.sample_rate)
    }
}

/// Decode an audio file to interleaved stereo f32 PCM at `sample_rate`.
///
/// Uses the system `ffmpeg` binary so any container/codec ffmpeg understands
/// is accepted, without native FFmpeg dev header/lib requirements.
pub fn decode_audio_f32_stereo(path: &Path, sample_rate: u32) -> StillcastResult<AudioPcm> {
    let out = std::process::Command::new("ffmpeg")
        .args(["-v", "error", "-i"])
        .arg(path)
        .args([
            "-vn",
            "-f",
            "f32le",
            "-acodec",
            "pcm_f32le",
            "-ac",
            "2",
            "-ar",
            &sample_rate.to_string(),
            "pipe:1",
        ])
        .output()
        .map_err(|e| {
            StillcastError::Other(anyhow::anyhow!("failed to run ffmpeg for audio decode: {e}"))
        })?;

    if !out.status.success() {
        return Err(StillcastError::Other(anyhow::anyhow!(
            "ffmpeg audio decode failed for '{}': {}",
            path.display(),
            String::from_utf8_lossy(&out.stderr).trim()
        )));
    }

    if out.stdout.is_empty() || !out.stdout.len().is_multiple_of(4) {
        return Err(StillcastError::Other(anyhow::anyhow!(
            "'{}' contains no decodable audio samples",
            path.display()
        )));
    }

    let mut interleaved_f32 = Vec::with_capacity(out.stdout.len() / 4);
    for chunk in out.stdout.chunks_exact(4) {
        interleaved_f32.push(f32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]));
    }

    Ok(AudioPcm {
        sample_rate,
        channels: 2,
        interleaved_f32,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/assets/media.rs"]
mod tests;
