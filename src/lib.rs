//! Stillcast assembles a short video from a sequence of still images, an
//! optional audio track, and a set of rendering parameters.
//!
//! The pipeline is a straight line; every stage is gated by the one before it:
//!
//! 1. **Validate**: check that every input asset exists and is usable
//!    ([`validate_media`]); nothing else runs on a failed report
//! 2. **Resolve**: turn a script payload (JSON or free-form text) into a fully
//!    valid [`RenderParameters`] set ([`resolve_script`], fail-soft)
//! 3. **Compose**: build one timed, transformed clip per image
//!    ([`compose_clip`]: resize-to-cover, center-crop, animation transform)
//! 4. **Schedule**: concatenate clips into a [`Timeline`] with cross-fade
//!    ramps that never add runtime ([`schedule_clips`])
//! 5. **Mix**: reconcile the optional audio duration against the timeline
//!    ([`mix_audio`]: trim, or loop-then-trim)
//! 6. **Encode**: stream frames to the system `ffmpeg` binary and mux the
//!    audio into a single MP4 ([`render_to_mp4`])
//!
//! Key design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Pure time functions**: animation and fade transforms are pure functions
//!   of elapsed time, unit-testable without rendering real video.
//! - **Premultiplied RGBA8** end-to-end: frames stay premultiplied until they
//!   are flattened for the encoder.
//! - **No codec linkage**: encoding drives the system `ffmpeg` binary over a
//!   narrow seam; the pipeline logic is independent of the codec binding.
//! - **Stateless requests**: a [`RenderRequest`] owns its assets, timeline and
//!   output path; concurrent renders share no mutable state.
#![forbid(unsafe_code)]

mod assets;
mod audio;
mod compose;
mod encode;
mod foundation;
mod render;
mod script;
mod timeline;

pub use assets::decode::{PreparedImage, decode_image, load_image};
pub use assets::media::{AudioPcm, MIX_SAMPLE_RATE, decode_audio_f32_stereo};
pub use assets::validate::{MediaValidation, validate_media};
pub use audio::mix::{AudioTrack, mix_audio, write_track_to_f32le_file};
pub use compose::clip::{
    ANIMATION_FADE_SEC, Clip, PAN_OVERSCAN, PAN_SPEED_PX_PER_SEC, ZOOM_RATE_PER_SEC, compose_clip,
    cover_dimensions, fade_opacity_at, pan_offset_at, zoom_scale_at,
};
pub use encode::ffmpeg::{
    AudioInputConfig, EncodeConfig, FfmpegEncoder, OutputTarget, ensure_parent_dir,
    is_ffmpeg_on_path,
};
pub use foundation::core::{Affine, Point, Vec2, duration_to_frames, frame_time_sec};
pub use foundation::error::{RenderStage, StillcastError, StillcastResult};
pub use render::frame::{FrameRGBA, sample_timeline_frame};
pub use render::pipeline::{RenderOpts, RenderRequest, render_to_mp4};
pub use script::resolve::{AnimationType, RenderParameters, resolve_script};
pub use timeline::schedule::{SINGLE_CLIP_FADE_SEC, ScheduledClip, Timeline, schedule_clips};
