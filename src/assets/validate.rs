use std::path::{Path, PathBuf};

/// Result of pre-flight media validation.
///
/// Infallible by construction: every failed check becomes an entry in
/// `errors` rather than an `Err`. Downstream pipeline stages must not run
/// when `valid` is false.
#[derive(Clone, Debug)]
pub struct MediaValidation {
    /// True when every input asset exists and is a regular file.
    pub valid: bool,
    /// One human-readable message per failed check.
    pub errors: Vec<String>,
}

/// Check input assets before any composition work begins.
///
/// Fails the report when the image list is empty, or when any image/audio
/// path does not exist or is not a regular file.
pub fn validate_media(images: &[PathBuf], audio: Option<&Path>) -> MediaValidation {
    let mut errors = Vec::new();

    if images.is_empty() {
        errors.push("at least one image is required".to_string());
    } else {
        for path in images {
            check_regular_file(path, "image", &mut errors);
        }
    }

    if let Some(path) = audio {
        check_regular_file(path, "audio", &mut errors);
    }

    MediaValidation {
        valid: errors.is_empty(),
        errors,
    }
}

fn check_regular_file(path: &Path, kind: &str, errors: &mut Vec<String>) {
    match std::fs::metadata(path) {
        Err(_) => errors.push(format!("{kind} file does not exist: {}", path.display())),
        Ok(meta) if !meta.is_file() => {
            errors.push(format!("not a regular {kind} file: {}", path.display()));
        }
        Ok(_) => {}
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/validate.rs"]
mod tests;
