use std::path::PathBuf;

use tracing::{debug, info};

use crate::{
    assets::decode::load_image,
    assets::media::{MIX_SAMPLE_RATE, decode_audio_f32_stereo},
    assets::validate::validate_media,
    audio::mix::{mix_audio, write_track_to_f32le_file},
    compose::clip::compose_clip,
    encode::ffmpeg::{AudioInputConfig, EncodeConfig, FfmpegEncoder, OutputTarget},
    foundation::core::{duration_to_frames, frame_time_sec},
    foundation::error::{RenderStage, StillcastError, StillcastResult},
    render::frame::sample_timeline_frame,
    script::resolve::RenderParameters,
    timeline::schedule::schedule_clips,
};

/// The unit of work for one invocation: assets plus parameters.
///
/// Stateless across invocations; concurrent requests share nothing, so any
/// number may render at once. Cancellation is the caller's concern: run the
/// render as an abortable unit of work and discard the result.
#[derive(Clone, Debug)]
pub struct RenderRequest {
    /// Ordered image file paths, one clip each.
    pub images: Vec<PathBuf>,
    /// Optional audio file path.
    pub audio: Option<PathBuf>,
    /// Fully resolved render parameters.
    pub params: RenderParameters,
}

/// Options for [`render_to_mp4`].
#[derive(Clone, Debug)]
pub struct RenderOpts {
    /// Where the output file lands.
    pub output: OutputTarget,
    /// Whether an existing file at the output path may be replaced.
    pub overwrite: bool,
    /// Background color frames are flattened over (RGBA8, straight alpha).
    pub bg_rgba: [u8; 4],
}

impl Default for RenderOpts {
    fn default() -> Self {
        Self {
            output: OutputTarget::UniqueIn(std::env::temp_dir()),
            overwrite: true,
            bg_rgba: [0, 0, 0, 255],
        }
    }
}

/// Render a request end-to-end into a single MP4 and return its path.
///
/// Validation gates everything: a failed report short-circuits before any
/// work is performed or file produced. Later failures surface as
/// [`StillcastError::Render`] naming the failing stage; no partial output
/// survives on any path. The call blocks until the file is written.
pub fn render_to_mp4(request: &RenderRequest, opts: &RenderOpts) -> StillcastResult<PathBuf> {
    let report = validate_media(&request.images, request.audio.as_deref());
    if !report.valid {
        return Err(StillcastError::validation(report.errors.join("; ")));
    }
    request.params.validate()?;

    let params = &request.params;
    let out_path = opts.output.resolve();
    let cfg = EncodeConfig {
        width: params.target_width,
        height: params.target_height,
        fps: params.fps,
        out_path: out_path.clone(),
        overwrite: opts.overwrite,
        audio: None,
    };
    // Surface encoder config problems (odd dimensions, zero fps) pre-flight,
    // before any decode work happens.
    cfg.validate()?;

    debug!(
        images = request.images.len(),
        audio = request.audio.is_some(),
        fps = params.fps,
        animation = %params.animation_type,
        "inputs validated"
    );

    let mut clips = Vec::with_capacity(request.images.len());
    for path in &request.images {
        let image =
            load_image(path).map_err(|e| StillcastError::render(RenderStage::Compose, e))?;
        let clip = compose_clip(&image, params)
            .map_err(|e| StillcastError::render(RenderStage::Compose, e))?;
        clips.push(clip);
    }

    let timeline = schedule_clips(clips, params.transition_duration)
        .map_err(|e| StillcastError::render(RenderStage::Schedule, e))?;
    debug!(
        clips = timeline.clips.len(),
        duration_sec = timeline.duration_sec,
        "timeline scheduled"
    );

    let mut audio_spill = TempFileGuard(None);
    let audio_cfg = match &request.audio {
        None => None,
        Some(audio_path) => {
            let pcm = decode_audio_f32_stereo(audio_path, MIX_SAMPLE_RATE)
                .map_err(|e| StillcastError::render(RenderStage::Mix, e))?;
            match mix_audio(Some(&pcm), timeline.duration_sec) {
                None => None,
                Some(track) => {
                    let spill_path = std::env::temp_dir().join(format!(
                        "stillcast_audio_mix_{}_{}.f32le",
                        std::process::id(),
                        std::time::SystemTime::now()
                            .duration_since(std::time::UNIX_EPOCH)
                            .map(|d| d.as_nanos())
                            .unwrap_or(0)
                    ));
                    write_track_to_f32le_file(&track, &spill_path)
                        .map_err(|e| StillcastError::render(RenderStage::Mix, e))?;
                    audio_spill.0 = Some(spill_path.clone());
                    Some(AudioInputConfig {
                        path: spill_path,
                        sample_rate: track.sample_rate,
                        channels: track.channels,
                    })
                }
            }
        }
    };

    let cfg = EncodeConfig {
        audio: audio_cfg,
        ..cfg
    };
    let mut encoder =
        FfmpegEncoder::new(cfg, opts.bg_rgba).map_err(|e| match e {
            e @ StillcastError::Validation(_) => e,
            e => StillcastError::render(RenderStage::Encode, e),
        })?;

    // A timeline shorter than half a frame still emits one frame.
    let total_frames = duration_to_frames(timeline.duration_sec, params.fps).max(1);
    for frame_idx in 0..total_frames {
        let t = frame_time_sec(frame_idx, params.fps);
        let frame = sample_timeline_frame(&timeline, t)
            .map_err(|e| StillcastError::render(RenderStage::Compose, e))?;
        encoder
            .encode_frame(&frame)
            .map_err(|e| StillcastError::render(RenderStage::Encode, e))?;
    }

    let out_path = encoder
        .finish()
        .map_err(|e| StillcastError::render(RenderStage::Encode, e))?;

    info!(
        frames = total_frames,
        duration_sec = timeline.duration_sec,
        path = %out_path.display(),
        "render finished"
    );
    Ok(out_path)
}

struct TempFileGuard(Option<PathBuf>);

impl Drop for TempFileGuard {
    fn drop(&mut self) {
        if let Some(path) = self.0.take() {
            let _ = std::fs::remove_file(path);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/pipeline.rs"]
mod tests;
