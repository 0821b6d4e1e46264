use super::*;

fn scratch_dir(tag: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("stillcast_validate_{}_{tag}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
fn empty_image_list_is_invalid() {
    let report = validate_media(&[], None);
    assert!(!report.valid);
    assert!(!report.errors.is_empty());
}

#[test]
fn existing_regular_files_are_valid() {
    let dir = scratch_dir("ok");
    let a = dir.join("a.png");
    let b = dir.join("b.png");
    let audio = dir.join("tone.wav");
    std::fs::write(&a, b"x").unwrap();
    std::fs::write(&b, b"x").unwrap();
    std::fs::write(&audio, b"x").unwrap();

    let report = validate_media(&[a, b], Some(&audio));
    assert!(report.valid);
    assert!(report.errors.is_empty());
}

#[test]
fn missing_paths_are_reported_per_file() {
    let dir = scratch_dir("missing");
    let present = dir.join("present.png");
    std::fs::write(&present, b"x").unwrap();
    let gone_img = dir.join("gone.png");
    let gone_audio = dir.join("gone.mp3");

    let report = validate_media(&[present, gone_img.clone()], Some(&gone_audio));
    assert!(!report.valid);
    assert_eq!(report.errors.len(), 2);
    assert!(report.errors[0].contains("gone.png"));
    assert!(report.errors[1].contains("gone.mp3"));
}

#[test]
fn directories_are_not_regular_files() {
    let dir = scratch_dir("dir_as_image");
    let report = validate_media(&[dir], None);
    assert!(!report.valid);
    assert!(report.errors[0].contains("not a regular image file"));
}

#[test]
fn validation_never_stops_at_the_first_error() {
    let report = validate_media(
        &[PathBuf::from("/nonexistent/one.png"), PathBuf::from("/nonexistent/two.png")],
        None,
    );
    assert_eq!(report.errors.len(), 2);
}
