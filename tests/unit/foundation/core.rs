use super::*;

#[test]
fn whole_second_durations_map_to_exact_frame_counts() {
    assert_eq!(duration_to_frames(3.0, 24), 72);
    assert_eq!(duration_to_frames(6.0, 24), 144);
    assert_eq!(duration_to_frames(1.0, 30), 30);
}

#[test]
fn fractional_durations_round_to_nearest_frame() {
    assert_eq!(duration_to_frames(2.6, 1), 3);
    assert_eq!(duration_to_frames(2.4, 1), 2);
}

#[test]
fn degenerate_inputs_produce_zero_frames() {
    assert_eq!(duration_to_frames(0.0, 24), 0);
    assert_eq!(duration_to_frames(-1.0, 24), 0);
    assert_eq!(duration_to_frames(f64::NAN, 24), 0);
    assert_eq!(duration_to_frames(3.0, 0), 0);
}

#[test]
fn frame_times_are_uniform() {
    assert_eq!(frame_time_sec(0, 24), 0.0);
    assert_eq!(frame_time_sec(24, 24), 1.0);
    assert_eq!(frame_time_sec(12, 24), 0.5);
}

#[test]
fn last_sampled_frame_stays_inside_duration() {
    let duration = 2.99;
    let fps = 24;
    let frames = duration_to_frames(duration, fps);
    assert!(frame_time_sec(frames - 1, fps) < duration);
}
