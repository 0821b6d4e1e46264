use serde_json::Value;

use crate::foundation::error::{StillcastError, StillcastResult};

/// Animation style applied uniformly to every clip in a render.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnimationType {
    /// Opacity ramps in over the first 0.5 s and out over the last 0.5 s.
    #[default]
    Fade,
    /// Scale grows about the frame center over the clip duration.
    Zoom,
    /// Oversized frame slides left-to-right, vertically centered.
    Pan,
}

impl AnimationType {
    /// Parse the external schema's string form (`"fade" | "zoom" | "pan"`).
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fade" => Some(Self::Fade),
            "zoom" => Some(Self::Zoom),
            "pan" => Some(Self::Pan),
            _ => None,
        }
    }
}

impl std::fmt::Display for AnimationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Fade => "fade",
            Self::Zoom => "zoom",
            Self::Pan => "pan",
        };
        f.write_str(name)
    }
}

/// Fully validated render parameter set.
///
/// [`resolve_script`] and the `Default` impl are the only producers, and both
/// guarantee every field is inside its declared domain; a value of this type
/// is never partially valid. Callers constructing one by hand should run
/// [`RenderParameters::validate`] before handing it to the pipeline.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RenderParameters {
    /// Output frame rate (frames per second, > 0).
    pub fps: u32,
    /// Seconds each image is displayed (> 0).
    pub duration_per_image: f64,
    /// Length of the cross-fade at clip boundaries in seconds (>= 0).
    pub transition_duration: f64,
    /// Animation style for the whole render.
    pub animation_type: AnimationType,
    /// Output width in pixels (> 0).
    pub target_width: u32,
    /// Output height in pixels (> 0).
    pub target_height: u32,
}

impl Default for RenderParameters {
    /// 24 fps, 3 s per image, 0.5 s transitions, fade animation, 720x1280
    /// portrait (phone playback).
    fn default() -> Self {
        Self {
            fps: 24,
            duration_per_image: 3.0,
            transition_duration: 0.5,
            animation_type: AnimationType::Fade,
            target_width: 720,
            target_height: 1280,
        }
    }
}

impl RenderParameters {
    /// Check the declared field domains on a hand-constructed value.
    pub fn validate(&self) -> StillcastResult<()> {
        if self.fps == 0 {
            return Err(StillcastError::validation("fps must be > 0"));
        }
        if !self.duration_per_image.is_finite() || self.duration_per_image <= 0.0 {
            return Err(StillcastError::validation(
                "duration_per_image must be a positive number of seconds",
            ));
        }
        if !self.transition_duration.is_finite() || self.transition_duration < 0.0 {
            return Err(StillcastError::validation(
                "transition_duration must be a non-negative number of seconds",
            ));
        }
        if self.target_width == 0 || self.target_height == 0 {
            return Err(StillcastError::validation(
                "target dimensions must be non-zero",
            ));
        }
        Ok(())
    }
}

/// Resolve a script payload into a fully valid parameter set.
///
/// Accepts either structured JSON matching the external schema
/// (`{fps, duration_per_image, transition_duration, animation_type, theme?,
/// style?, overall_duration?}`) or free-form text from which values are
/// opportunistically extracted. Never fails: each field falls back to its
/// value in `defaults` independently, and wholly unparseable input degrades
/// to `defaults` unchanged, so an unreliable upstream text generator never
/// blocks rendering.
///
/// Target width/height are always carried from `defaults`; the script schema
/// does not cover them.
pub fn resolve_script(raw: &str, defaults: &RenderParameters) -> RenderParameters {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return defaults.clone();
    }

    if let Ok(value) = serde_json::from_str::<Value>(trimmed)
        && value.is_object()
    {
        return resolve_from_json(&value, defaults);
    }

    resolve_from_text(trimmed, defaults)
}

fn resolve_from_json(value: &Value, defaults: &RenderParameters) -> RenderParameters {
    let mut params = defaults.clone();

    if let Some(fps) = value.get("fps").and_then(Value::as_f64)
        && fps.is_finite()
        && fps > 0.0
        && fps.fract() == 0.0
        && fps <= f64::from(u32::MAX)
    {
        params.fps = fps as u32;
    }
    if let Some(v) = value.get("duration_per_image").and_then(Value::as_f64)
        && v.is_finite()
        && v > 0.0
    {
        params.duration_per_image = v;
    }
    if let Some(v) = value.get("transition_duration").and_then(Value::as_f64)
        && v.is_finite()
        && v >= 0.0
    {
        params.transition_duration = v;
    }
    if let Some(kind) = value
        .get("animation_type")
        .and_then(Value::as_str)
        .and_then(AnimationType::parse)
    {
        params.animation_type = kind;
    }

    params
}

fn resolve_from_text(text: &str, defaults: &RenderParameters) -> RenderParameters {
    let mut params = defaults.clone();

    if let Some(v) = extract_marked_seconds(text, "时长")
        && v > 0.0
    {
        params.duration_per_image = v;
    }
    if let Some(v) = extract_marked_seconds(text, "转场") {
        params.transition_duration = v;
    }
    if let Some(kind) = extract_animation_keyword(text) {
        params.animation_type = kind;
    }
    if let Some(fps) = extract_fps_token(text) {
        params.fps = fps;
    }

    params
}

/// Extract `<marker>[:：] <number> 秒` from free-form text.
fn extract_marked_seconds(text: &str, marker: &str) -> Option<f64> {
    let at = text.find(marker)?;
    let rest = text[at + marker.len()..].trim_start();
    let rest = rest.strip_prefix([':', '：'])?.trim_start();

    let digits_end = rest
        .char_indices()
        .find(|(_, c)| !(c.is_ascii_digit() || *c == '.'))
        .map(|(i, _)| i)
        .unwrap_or(rest.len());
    if digits_end == 0 {
        return None;
    }
    let value: f64 = rest[..digits_end].parse().ok()?;
    if !value.is_finite() || value < 0.0 {
        return None;
    }

    rest[digits_end..]
        .trim_start()
        .starts_with('秒')
        .then_some(value)
}

fn extract_animation_keyword(text: &str) -> Option<AnimationType> {
    const ZOOM_WORDS: [&str; 3] = ["缩放", "放大", "缩小"];
    const PAN_WORDS: [&str; 3] = ["平移", "移动", "摇镜头"];
    const FADE_WORDS: [&str; 2] = ["淡入淡出", "渐变"];

    let lower = text.to_lowercase();
    if ZOOM_WORDS.iter().any(|w| text.contains(w)) || lower.contains("zoom") {
        return Some(AnimationType::Zoom);
    }
    if PAN_WORDS.iter().any(|w| text.contains(w)) || lower.contains("pan") {
        return Some(AnimationType::Pan);
    }
    if FADE_WORDS.iter().any(|w| text.contains(w)) || lower.contains("fade") {
        return Some(AnimationType::Fade);
    }
    None
}

/// Extract a `<digits>fps` / `<digits>FPS` token (digits directly adjacent).
fn extract_fps_token(text: &str) -> Option<u32> {
    let mut best: Option<(usize, u32)> = None;
    for pat in ["fps", "FPS"] {
        for (at, _) in text.match_indices(pat) {
            let digits_start = text[..at]
                .rfind(|c: char| !c.is_ascii_digit())
                .map(|i| i + text[i..].chars().next().map_or(1, char::len_utf8))
                .unwrap_or(0);
            if digits_start >= at {
                continue;
            }
            if let Ok(fps) = text[digits_start..at].parse::<u32>()
                && fps > 0
                && best.is_none_or(|(b, _)| digits_start < b)
            {
                best = Some((digits_start, fps));
            }
        }
    }
    best.map(|(_, fps)| fps)
}

#[cfg(test)]
#[path = "../../tests/unit/script/resolve.rs"]
mod tests;
