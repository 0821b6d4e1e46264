use super::*;

fn pcm(frames: usize, sample_rate: u32) -> AudioPcm {
    // Stereo ramp so loop boundaries are observable in the samples.
    let mut interleaved_f32 = Vec::with_capacity(frames * 2);
    for i in 0..frames {
        let v = (i as f32) / 100.0;
        interleaved_f32.push(v);
        interleaved_f32.push(-v);
    }
    AudioPcm {
        sample_rate,
        channels: 2,
        interleaved_f32,
    }
}

#[test]
fn no_source_means_no_track() {
    assert!(mix_audio(None, 6.0).is_none());
}

#[test]
fn shorter_audio_is_looped_then_trimmed() {
    // 2 s of audio against a 6 s video.
    let src = pcm(8, 4);
    let track = mix_audio(Some(&src), 6.0).unwrap();
    assert_eq!(track.sample_frames(), 24);
    assert_eq!(track.duration_sec(), 6.0);

    // Content restarts at every source boundary.
    for i in 0..24 {
        let expected = src.interleaved_f32[(i % 8) * 2];
        assert_eq!(track.interleaved_f32[i * 2], expected);
    }
}

#[test]
fn longer_audio_is_trimmed() {
    // 10 s of audio against a 4 s video: first 4 s survive.
    let src = pcm(40, 4);
    let track = mix_audio(Some(&src), 4.0).unwrap();
    assert_eq!(track.sample_frames(), 16);
    assert_eq!(track.duration_sec(), 4.0);
    assert_eq!(
        track.interleaved_f32[..],
        src.interleaved_f32[..16 * 2]
    );
}

#[test]
fn equal_durations_pass_through() {
    let src = pcm(12, 4);
    let track = mix_audio(Some(&src), 3.0).unwrap();
    assert_eq!(track.interleaved_f32, src.interleaved_f32);
}

#[test]
fn track_duration_matches_video_to_the_sample() {
    let src = pcm(7, 48_000);
    for video_sec in [0.25, 1.0, 2.5, 3.333] {
        let track = mix_audio(Some(&src), video_sec).unwrap();
        let expected = (video_sec * 48_000.0).round() as usize;
        assert_eq!(track.sample_frames(), expected, "video {video_sec}s");
    }
}

#[test]
fn degenerate_sources_yield_silence() {
    let empty = AudioPcm {
        sample_rate: 48_000,
        channels: 2,
        interleaved_f32: Vec::new(),
    };
    assert!(mix_audio(Some(&empty), 5.0).is_none());
    assert!(mix_audio(Some(&pcm(8, 4)), 0.0).is_none());
    assert!(mix_audio(Some(&pcm(8, 4)), f64::NAN).is_none());
}

#[test]
fn spill_file_is_raw_f32le() {
    let track = AudioTrack {
        sample_rate: 4,
        channels: 2,
        interleaved_f32: vec![0.5, -0.5, 1.0, -1.0],
    };
    let path = std::env::temp_dir().join(format!(
        "stillcast_mix_spill_{}.f32le",
        std::process::id()
    ));
    write_track_to_f32le_file(&track, &path).unwrap();

    let bytes = std::fs::read(&path).unwrap();
    assert_eq!(bytes.len(), 16);
    assert_eq!(&bytes[..4], &0.5f32.to_le_bytes());
    assert_eq!(&bytes[12..], &(-1.0f32).to_le_bytes());
    let _ = std::fs::remove_file(&path);
}
