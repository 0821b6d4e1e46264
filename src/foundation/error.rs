/// Convenience result type used across Stillcast.
pub type StillcastResult<T> = Result<T, StillcastError>;

/// Pipeline stage named by [`StillcastError::Render`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RenderStage {
    /// Building per-image clips (decode, cover/crop, animation transform).
    Compose,
    /// Sequencing clips into the timeline.
    Schedule,
    /// Reconciling audio duration against the timeline.
    Mix,
    /// Frame/audio encoding and muxing.
    Encode,
}

impl std::fmt::Display for RenderStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Compose => "compose",
            Self::Schedule => "schedule",
            Self::Mix => "mix",
            Self::Encode => "encode",
        };
        f.write_str(name)
    }
}

/// Top-level error taxonomy used by engine APIs.
///
/// Parameter errors from script resolution never appear here: the resolver is
/// fail-soft and recovers locally by defaulting (see
/// [`resolve_script`](crate::resolve_script)).
#[derive(thiserror::Error, Debug)]
pub enum StillcastError {
    /// Missing or unusable input assets/configuration, detected pre-flight.
    /// No partial work has been performed when this is returned.
    #[error("validation error: {0}")]
    Validation(String),

    /// Fatal failure during composition, mixing, or encoding, tagged with the
    /// stage that failed. Not retried internally.
    #[error("render error in {stage} stage: {source}")]
    Render {
        /// The stage that failed.
        stage: RenderStage,
        /// The originating cause.
        #[source]
        source: anyhow::Error,
    },

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl StillcastError {
    /// Build a [`StillcastError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Wrap `source` as a [`StillcastError::Render`] for `stage`.
    pub fn render(stage: RenderStage, source: impl Into<anyhow::Error>) -> Self {
        Self::Render {
            stage,
            source: source.into(),
        }
    }

    /// The failing stage, when this is a render error.
    pub fn stage(&self) -> Option<RenderStage> {
        match self {
            Self::Render { stage, .. } => Some(*stage),
            _ => None,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
