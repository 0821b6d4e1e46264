use super::*;

#[test]
fn sample_frames_counts_per_channel() {
    let pcm = AudioPcm {
        sample_rate: 4,
        channels: 2,
        interleaved_f32: vec![0.0; 8],
    };
    assert_eq!(pcm.sample_frames(), 4);
    assert_eq!(pcm.duration_sec(), 1.0);
}

#[test]
fn degenerate_pcm_reports_zero_duration() {
    let pcm = AudioPcm {
        sample_rate: 0,
        channels: 0,
        interleaved_f32: Vec::new(),
    };
    assert_eq!(pcm.sample_frames(), 0);
    assert_eq!(pcm.duration_sec(), 0.0);
}

#[test]
fn decode_rejects_missing_files_when_ffmpeg_is_present() {
    if !crate::encode::ffmpeg::is_ffmpeg_on_path() {
        eprintln!("skipping: ffmpeg not on PATH");
        return;
    }
    let err = decode_audio_f32_stereo(
        std::path::Path::new("/nonexistent/missing.mp3"),
        MIX_SAMPLE_RATE,
    )
    .unwrap_err();
    assert!(err.to_string().contains("missing.mp3"));
}
