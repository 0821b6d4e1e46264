use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        StillcastError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    let err = StillcastError::render(RenderStage::Encode, anyhow::anyhow!("boom"));
    assert!(err.to_string().contains("render error in encode stage"));
}

#[test]
fn stage_names_match_pipeline_order() {
    let stages = [
        (RenderStage::Compose, "compose"),
        (RenderStage::Schedule, "schedule"),
        (RenderStage::Mix, "mix"),
        (RenderStage::Encode, "encode"),
    ];
    for (stage, name) in stages {
        assert_eq!(stage.to_string(), name);
    }
}

#[test]
fn render_errors_expose_stage_and_cause() {
    let err = StillcastError::render(RenderStage::Mix, anyhow::anyhow!("no samples"));
    assert_eq!(err.stage(), Some(RenderStage::Mix));
    assert!(err.to_string().contains("no samples"));

    assert_eq!(StillcastError::validation("x").stage(), None);
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = StillcastError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
