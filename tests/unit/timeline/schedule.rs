use super::*;

use std::sync::Arc;

use crate::{
    assets::decode::PreparedImage,
    compose::clip::compose_clip,
    script::resolve::{AnimationType, RenderParameters},
};

fn clip(duration_sec: f64) -> Clip {
    let image = PreparedImage {
        width: 4,
        height: 4,
        rgba8_premul: Arc::new(vec![255u8; 4 * 4 * 4]),
    };
    let params = RenderParameters {
        duration_per_image: duration_sec,
        animation_type: AnimationType::Fade,
        target_width: 4,
        target_height: 4,
        ..RenderParameters::default()
    };
    compose_clip(&image, &params).unwrap()
}

#[test]
fn single_clip_gets_half_second_fades() {
    let timeline = schedule_clips(vec![clip(3.0)], 0.5).unwrap();
    assert_eq!(timeline.clips.len(), 1);
    assert_eq!(timeline.duration_sec, 3.0);

    let only = &timeline.clips[0];
    assert_eq!(only.start_sec, 0.0);
    assert_eq!(only.fade_in_sec, SINGLE_CLIP_FADE_SEC);
    assert_eq!(only.fade_out_sec, SINGLE_CLIP_FADE_SEC);
}

#[test]
fn transitions_never_add_runtime() {
    let timeline = schedule_clips(vec![clip(2.0), clip(2.0), clip(2.0)], 0.5).unwrap();
    assert_eq!(timeline.duration_sec, 6.0);
    assert_eq!(timeline.clips[0].start_sec, 0.0);
    assert_eq!(timeline.clips[1].start_sec, 2.0);
    assert_eq!(timeline.clips[2].start_sec, 4.0);
}

#[test]
fn every_clip_but_the_last_fades_out() {
    let timeline = schedule_clips(vec![clip(2.0), clip(2.0), clip(2.0)], 0.5).unwrap();
    assert_eq!(timeline.clips[0].fade_out_sec, 0.5);
    assert_eq!(timeline.clips[1].fade_out_sec, 0.5);
    assert_eq!(timeline.clips[2].fade_out_sec, 0.0);

    // Only the sequence head fades in.
    assert_eq!(timeline.clips[0].fade_in_sec, 0.5);
    assert_eq!(timeline.clips[1].fade_in_sec, 0.0);
    assert_eq!(timeline.clips[2].fade_in_sec, 0.0);
}

#[test]
fn long_transitions_are_clamped_to_clip_duration() {
    let timeline = schedule_clips(vec![clip(0.3), clip(0.3)], 0.5).unwrap();
    assert_eq!(timeline.clips[0].fade_in_sec, 0.3);
    assert_eq!(timeline.clips[0].fade_out_sec, 0.3);

    let single = schedule_clips(vec![clip(0.2)], 0.5).unwrap();
    assert_eq!(single.clips[0].fade_in_sec, 0.2);
    assert_eq!(single.clips[0].fade_out_sec, 0.2);
}

#[test]
fn zero_transition_means_hard_cuts() {
    let timeline = schedule_clips(vec![clip(2.0), clip(2.0)], 0.0).unwrap();
    assert!(timeline.clips.iter().all(|sc| sc.fade_in_sec == 0.0));
    assert!(timeline.clips.iter().all(|sc| sc.fade_out_sec == 0.0));
    assert_eq!(timeline.clips[0].fade_gain(0.0), 1.0);
}

#[test]
fn empty_or_invalid_inputs_are_rejected() {
    assert!(schedule_clips(Vec::new(), 0.5).is_err());
    assert!(schedule_clips(vec![clip(2.0)], -0.1).is_err());
    assert!(schedule_clips(vec![clip(2.0)], f64::NAN).is_err());
}

#[test]
fn clip_lookup_maps_to_local_time() {
    let timeline = schedule_clips(vec![clip(2.0), clip(2.0), clip(2.0)], 0.5).unwrap();

    let (first, local) = timeline.clip_at(0.0).unwrap();
    assert_eq!(first.start_sec, 0.0);
    assert_eq!(local, 0.0);

    let (second, local) = timeline.clip_at(2.5).unwrap();
    assert_eq!(second.start_sec, 2.0);
    assert!((local - 0.5).abs() < 1e-12);

    assert!(timeline.clip_at(6.0).is_none());
    assert!(timeline.clip_at(-0.1).is_none());
    assert!(timeline.clip_at(f64::NAN).is_none());
}

#[test]
fn fade_gain_ramps_inside_the_clip_span() {
    let timeline = schedule_clips(vec![clip(2.0), clip(2.0)], 0.5).unwrap();
    let head = &timeline.clips[0];

    assert_eq!(head.fade_gain(0.0), 0.0);
    assert!((head.fade_gain(0.25) - 0.5).abs() < 1e-9);
    assert_eq!(head.fade_gain(1.0), 1.0);
    assert!((head.fade_gain(1.75) - 0.5).abs() < 1e-9);
    assert!(head.fade_gain(2.0).abs() < 1e-9);

    let tail = &timeline.clips[1];
    assert_eq!(tail.fade_gain(0.0), 1.0);
    assert_eq!(tail.fade_gain(2.0), 1.0);
}
