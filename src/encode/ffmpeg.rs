use std::{
    path::{Path, PathBuf},
    process::{Child, ChildStdin, Command, Stdio},
};

use crate::{
    foundation::error::{StillcastError, StillcastResult},
    foundation::math::mul_div255_u16,
    render::frame::FrameRGBA,
};

/// Raw f32le PCM input muxed alongside the video stream.
#[derive(Clone, Debug)]
pub struct AudioInputConfig {
    /// Path to the interleaved f32le PCM file.
    pub path: PathBuf,
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Channel count.
    pub channels: u16,
}

/// Encoder configuration for one output file.
#[derive(Clone, Debug)]
pub struct EncodeConfig {
    /// Output width in pixels (even, non-zero).
    pub width: u32,
    /// Output height in pixels (even, non-zero).
    pub height: u32,
    /// Output frame rate.
    pub fps: u32,
    /// Output MP4 file path.
    pub out_path: PathBuf,
    /// Overwrite the output file if it already exists.
    pub overwrite: bool,
    /// Optional audio stream to mux.
    pub audio: Option<AudioInputConfig>,
}

impl EncodeConfig {
    /// Check the configuration before spawning ffmpeg.
    pub fn validate(&self) -> StillcastResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(StillcastError::validation(
                "encode width/height must be non-zero",
            ));
        }
        if self.fps == 0 {
            return Err(StillcastError::validation("encode fps must be non-zero"));
        }
        if !self.width.is_multiple_of(2) || !self.height.is_multiple_of(2) {
            // yuv420p output subsamples chroma 2x2.
            return Err(StillcastError::validation(
                "encode width/height must be even (required for yuv420p mp4 output)",
            ));
        }
        if let Some(audio) = &self.audio {
            if audio.sample_rate == 0 {
                return Err(StillcastError::validation(
                    "audio sample_rate must be non-zero when audio is enabled",
                ));
            }
            if audio.channels == 0 {
                return Err(StillcastError::validation(
                    "audio channels must be non-zero when audio is enabled",
                ));
            }
        }
        Ok(())
    }
}

/// Where the rendered file should land.
///
/// Injected rather than relying on ambient temp-file behavior so tests can
/// pin an exact path.
#[derive(Clone, Debug)]
pub enum OutputTarget {
    /// Write to exactly this path.
    Explicit(PathBuf),
    /// Write to a uniquely named `.mp4` inside this directory.
    UniqueIn(PathBuf),
}

impl OutputTarget {
    /// Resolve to a concrete output path.
    pub fn resolve(&self) -> PathBuf {
        match self {
            Self::Explicit(path) => path.clone(),
            Self::UniqueIn(dir) => dir.join(format!(
                "stillcast_{}_{}.mp4",
                std::process::id(),
                std::time::SystemTime::now()
                    .duration_since(std::time::UNIX_EPOCH)
                    .map(|d| d.as_nanos())
                    .unwrap_or(0)
            )),
        }
    }
}

/// True when the system `ffmpeg` binary is runnable.
pub fn is_ffmpeg_on_path() -> bool {
    Command::new("ffmpeg")
        .arg("-version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

/// Create the parent directory of `path` if it does not exist yet.
pub fn ensure_parent_dir(path: &Path) -> StillcastResult<()> {
    if let Some(parent) = path.parent() {
        use anyhow::Context as _;
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create output directory '{}'", parent.display()))?;
    }
    Ok(())
}

/// Streams raw RGBA frames into the system `ffmpeg` binary.
///
/// We intentionally drive the `ffmpeg` binary rather than linking a codec
/// library: the pipeline stays independent of the codec binding and carries
/// no native FFmpeg dev header/lib requirements.
///
/// A partially written output file is removed on every failure path: both
/// when [`finish`](FfmpegEncoder::finish) reports an ffmpeg error and when
/// the encoder is dropped without being finished.
pub struct FfmpegEncoder {
    cfg: EncodeConfig,
    bg_rgba: [u8; 4],
    child: Option<Child>,
    stdin: Option<ChildStdin>,
    scratch: Vec<u8>,
}

impl FfmpegEncoder {
    /// Spawn ffmpeg for `cfg`, flattening alpha over `bg_rgba`.
    pub fn new(cfg: EncodeConfig, bg_rgba: [u8; 4]) -> StillcastResult<Self> {
        cfg.validate()?;
        ensure_parent_dir(&cfg.out_path)?;

        if !cfg.overwrite && cfg.out_path.exists() {
            return Err(StillcastError::validation(format!(
                "output file '{}' already exists",
                cfg.out_path.display()
            )));
        }

        if !is_ffmpeg_on_path() {
            return Err(StillcastError::Other(anyhow::anyhow!(
                "ffmpeg is required for MP4 encoding, but was not found on PATH"
            )));
        }

        let mut cmd = Command::new("ffmpeg");
        cmd.stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped());

        if cfg.overwrite {
            cmd.arg("-y");
        } else {
            cmd.arg("-n");
        }

        cmd.args([
            "-loglevel",
            "error",
            "-f",
            "rawvideo",
            "-pix_fmt",
            "rgba",
            "-s",
            &format!("{}x{}", cfg.width, cfg.height),
            "-r",
            &cfg.fps.to_string(),
            "-i",
            "pipe:0",
        ]);

        // `scale` re-applies the exact target size on the composed stream as
        // a final safeguard against rounding drift from per-clip transforms.
        let scale_filter = format!("scale={}:{}", cfg.width, cfg.height);

        if let Some(audio) = cfg.audio.as_ref() {
            cmd.args([
                "-f",
                "f32le",
                "-ar",
                &audio.sample_rate.to_string(),
                "-ac",
                &audio.channels.to_string(),
                "-i",
            ])
            .arg(&audio.path)
            .args([
                "-vf",
                &scale_filter,
                "-c:v",
                "libx264",
                "-pix_fmt",
                "yuv420p",
                "-c:a",
                "aac",
                "-shortest",
                "-movflags",
                "+faststart",
            ]);
        } else {
            cmd.args([
                "-an",
                "-vf",
                &scale_filter,
                "-c:v",
                "libx264",
                "-pix_fmt",
                "yuv420p",
                "-movflags",
                "+faststart",
            ]);
        }
        cmd.arg(&cfg.out_path);

        let mut child = cmd.spawn().map_err(|e| {
            StillcastError::Other(anyhow::anyhow!(
                "failed to spawn ffmpeg (is it installed and on PATH?): {e}"
            ))
        })?;

        let stdin = child.stdin.take().ok_or_else(|| {
            StillcastError::Other(anyhow::anyhow!("failed to open ffmpeg stdin (unexpected)"))
        })?;

        Ok(Self {
            scratch: vec![0u8; (cfg.width as usize) * (cfg.height as usize) * 4],
            cfg,
            bg_rgba,
            child: Some(child),
            stdin: Some(stdin),
        })
    }

    /// Write one frame to the encoder.
    pub fn encode_frame(&mut self, frame: &FrameRGBA) -> StillcastResult<()> {
        if frame.width != self.cfg.width || frame.height != self.cfg.height {
            return Err(StillcastError::validation(format!(
                "frame size mismatch: got {}x{}, expected {}x{}",
                frame.width, frame.height, self.cfg.width, self.cfg.height
            )));
        }
        if frame.data.len() != self.scratch.len() {
            return Err(StillcastError::validation(
                "frame.data size mismatch with width*height*4",
            ));
        }

        flatten_to_opaque_rgba8(
            &mut self.scratch,
            &frame.data,
            frame.premultiplied,
            self.bg_rgba,
        )?;

        let Some(stdin) = self.stdin.as_mut() else {
            return Err(StillcastError::Other(anyhow::anyhow!(
                "ffmpeg encoder is already finalized"
            )));
        };

        use std::io::Write as _;
        stdin.write_all(&self.scratch).map_err(|e| {
            StillcastError::Other(anyhow::anyhow!("failed to write frame to ffmpeg stdin: {e}"))
        })?;

        Ok(())
    }

    /// Close the stream, wait for ffmpeg, and return the output path.
    ///
    /// On ffmpeg failure the partially written output file is removed; no
    /// partial output survives as an apparent success.
    pub fn finish(mut self) -> StillcastResult<PathBuf> {
        drop(self.stdin.take());

        let child = self.child.take().ok_or_else(|| {
            StillcastError::Other(anyhow::anyhow!("ffmpeg encoder is already finalized"))
        })?;
        let output = child.wait_with_output().map_err(|e| {
            StillcastError::Other(anyhow::anyhow!("failed to wait for ffmpeg to finish: {e}"))
        })?;

        if !output.status.success() {
            let _ = std::fs::remove_file(&self.cfg.out_path);
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(StillcastError::Other(anyhow::anyhow!(
                "ffmpeg exited with status {}: {}",
                output.status,
                stderr.trim()
            )));
        }

        Ok(self.cfg.out_path.clone())
    }
}

impl Drop for FfmpegEncoder {
    fn drop(&mut self) {
        // Reached only when finish() was never called: abort the encode and
        // take the partial output with it.
        if let Some(mut child) = self.child.take() {
            drop(self.stdin.take());
            let _ = child.kill();
            let _ = child.wait();
            let _ = std::fs::remove_file(&self.cfg.out_path);
        }
    }
}

fn flatten_to_opaque_rgba8(
    dst: &mut [u8],
    src: &[u8],
    src_is_premul: bool,
    bg_rgba: [u8; 4],
) -> StillcastResult<()> {
    if dst.len() != src.len() || !dst.len().is_multiple_of(4) {
        return Err(StillcastError::validation(
            "flatten_to_opaque_rgba8 expects equal-length rgba8 buffers",
        ));
    }

    let bg_r = bg_rgba[0] as u16;
    let bg_g = bg_rgba[1] as u16;
    let bg_b = bg_rgba[2] as u16;

    for (d, s) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
        let a = s[3] as u16;
        if a == 255 {
            d.copy_from_slice(s);
            d[3] = 255;
            continue;
        }

        let inv = 255u16 - a;

        let (r, g, b) = if src_is_premul {
            (
                s[0] as u16 + mul_div255_u16(bg_r, inv),
                s[1] as u16 + mul_div255_u16(bg_g, inv),
                s[2] as u16 + mul_div255_u16(bg_b, inv),
            )
        } else {
            (
                mul_div255_u16(s[0] as u16, a) + mul_div255_u16(bg_r, inv),
                mul_div255_u16(s[1] as u16, a) + mul_div255_u16(bg_g, inv),
                mul_div255_u16(s[2] as u16, a) + mul_div255_u16(bg_b, inv),
            )
        };

        d[0] = r.min(255) as u8;
        d[1] = g.min(255) as u8;
        d[2] = b.min(255) as u8;
        d[3] = 255;
    }

    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/encode/ffmpeg.rs"]
mod tests;
