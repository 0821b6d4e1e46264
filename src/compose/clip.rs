use std::sync::Arc;

use crate::{
    assets::decode::PreparedImage,
    foundation::core::{Affine, Point},
    foundation::error::{StillcastError, StillcastResult},
    foundation::math::{resample_affine_rgba8, scale_premul_rgba8_in_place},
    render::frame::FrameRGBA,
    script::resolve::{AnimationType, RenderParameters},
};

/// Zoom growth rate: scale(t) = 1 + 0.05 * t.
pub const ZOOM_RATE_PER_SEC: f64 = 0.05;
/// Pan speed in source pixels per second.
pub const PAN_SPEED_PX_PER_SEC: f64 = 100.0;
/// Pan base is pre-covered at 1.2x the target size to leave room to slide.
pub const PAN_OVERSCAN: f64 = 1.2;
/// Ramp length of the fade animation at each clip boundary.
pub const ANIMATION_FADE_SEC: f64 = 0.5;

/// One image's timed visual segment with its animation transform applied.
///
/// A clip is a pure function of local time: [`Clip::frame_at`] produces an
/// exact target-size frame for any `t` in `[0, duration_sec)`. The covered
/// base pixels are immutable and shared, so cloning a clip is cheap.
#[derive(Clone, Debug)]
pub struct Clip {
    /// Target frame width in pixels.
    pub width: u32,
    /// Target frame height in pixels.
    pub height: u32,
    /// Clip duration in seconds.
    pub duration_sec: f64,
    /// Animation transform selected for the render.
    pub animation: AnimationType,
    base: Arc<Vec<u8>>,
    base_width: u32,
    base_height: u32,
}

/// Scaled-then-cropped base dimensions for covering `(tw, th)` from a
/// `(sw, sh)` source: uniform scale = max(tw/sw, th/sh).
pub fn cover_dimensions(sw: u32, sh: u32, tw: u32, th: u32) -> (u32, u32) {
    let scale = (f64::from(tw) / f64::from(sw)).max(f64::from(th) / f64::from(sh));
    let w = (f64::from(sw) * scale).ceil() as u32;
    let h = (f64::from(sh) * scale).ceil() as u32;
    (w.max(tw), h.max(th))
}

/// Zoom scale factor at elapsed time `t`.
pub fn zoom_scale_at(t: f64) -> f64 {
    1.0 + ZOOM_RATE_PER_SEC * t.max(0.0)
}

/// Pan window offset at elapsed time `t`, clamped to the overscan width.
pub fn pan_offset_at(t: f64, max_offset: f64) -> f64 {
    (PAN_SPEED_PX_PER_SEC * t.max(0.0)).min(max_offset.max(0.0))
}

/// Fade animation opacity at elapsed time `t` of a `duration`-second clip:
/// 0 -> 1 over the first ramp, 1 -> 0 over the last. Ramps shrink for clips
/// shorter than two full ramps so they never overlap into negative opacity.
pub fn fade_opacity_at(t: f64, duration: f64) -> f64 {
    let ramp = ANIMATION_FADE_SEC.min(duration / 2.0);
    if ramp <= 0.0 {
        return 1.0;
    }
    let mut gain = 1.0;
    if t < ramp {
        gain *= (t / ramp).clamp(0.0, 1.0);
    }
    let remaining = duration - t;
    if remaining < ramp {
        gain *= (remaining / ramp).clamp(0.0, 1.0);
    }
    gain
}

/// Build one timed, transformed clip from a decoded image.
///
/// The image is scaled uniformly so it fully covers the target rectangle and
/// cropped symmetrically about its center, so every produced frame is exactly
/// `target_width x target_height` regardless of the source aspect ratio. For
/// the pan animation the base is covered at [`PAN_OVERSCAN`] times the target
/// so the window has room to slide.
pub fn compose_clip(image: &PreparedImage, params: &RenderParameters) -> StillcastResult<Clip> {
    if image.width == 0 || image.height == 0 {
        return Err(StillcastError::validation(
            "source image has zero dimensions",
        ));
    }
    params.validate()?;

    let (tw, th) = (params.target_width, params.target_height);
    let (bw, bh) = match params.animation_type {
        AnimationType::Pan => (
            (f64::from(tw) * PAN_OVERSCAN).round() as u32,
            (f64::from(th) * PAN_OVERSCAN).round() as u32,
        ),
        _ => (tw, th),
    };

    let base = cover_crop(image, bw, bh)?;

    Ok(Clip {
        width: tw,
        height: th,
        duration_sec: params.duration_per_image,
        animation: params.animation_type,
        base: Arc::new(base),
        base_width: bw,
        base_height: bh,
    })
}

impl Clip {
    /// Render the clip frame at local time `t` (clamped into the clip's span).
    ///
    /// Returns premultiplied RGBA8 at exactly the target size.
    pub fn frame_at(&self, t: f64) -> FrameRGBA {
        let t = t.clamp(0.0, self.duration_sec);
        let (dw, dh) = (self.width, self.height);
        let mut data = vec![0u8; (dw as usize) * (dh as usize) * 4];

        match self.animation {
            AnimationType::Fade => {
                data.copy_from_slice(&self.base);
                scale_premul_rgba8_in_place(&mut data, fade_opacity_at(t, self.duration_sec));
            }
            AnimationType::Zoom => {
                let s = zoom_scale_at(t);
                let center = Point::new(f64::from(dw) / 2.0, f64::from(dh) / 2.0);
                // dst -> src: shrink about the center by 1/s.
                let dst_to_src = Affine::translate(center.to_vec2())
                    * Affine::scale(1.0 / s)
                    * Affine::translate(-center.to_vec2());
                resample_affine_rgba8(
                    &self.base,
                    self.base_width,
                    self.base_height,
                    &mut data,
                    dw,
                    dh,
                    dst_to_src,
                );
            }
            AnimationType::Pan => {
                let max_x = f64::from(self.base_width) - f64::from(dw);
                let x0 = pan_offset_at(t, max_x);
                let y0 = (f64::from(self.base_height) - f64::from(dh)) / 2.0;
                let dst_to_src = Affine::translate((x0, y0));
                resample_affine_rgba8(
                    &self.base,
                    self.base_width,
                    self.base_height,
                    &mut data,
                    dw,
                    dh,
                    dst_to_src,
                );
            }
        }

        FrameRGBA {
            width: dw,
            height: dh,
            data,
            premultiplied: true,
        }
    }
}

/// Resize-to-cover then center-crop `image` to exactly `(tw, th)`.
fn cover_crop(image: &PreparedImage, tw: u32, th: u32) -> StillcastResult<Vec<u8>> {
    let (scaled_w, scaled_h) = cover_dimensions(image.width, image.height, tw, th);

    let src = image::RgbaImage::from_raw(
        image.width,
        image.height,
        image.rgba8_premul.as_ref().clone(),
    )
    .ok_or_else(|| {
        StillcastError::validation("image buffer does not match its declared dimensions")
    })?;
    // Premultiplied channels interpolate correctly under linear filtering.
    let scaled = image::imageops::resize(
        &src,
        scaled_w,
        scaled_h,
        image::imageops::FilterType::Triangle,
    );

    let x0 = ((scaled_w - tw) / 2) as usize;
    let y0 = ((scaled_h - th) / 2) as usize;
    let scaled_raw = scaled.into_raw();
    let src_stride = (scaled_w as usize) * 4;

    let mut out = Vec::with_capacity((tw as usize) * (th as usize) * 4);
    for row in 0..(th as usize) {
        let start = (y0 + row) * src_stride + x0 * 4;
        out.extend_from_slice(&scaled_raw[start..start + (tw as usize) * 4]);
    }
    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/unit/compose/clip.rs"]
mod tests;
