// ============================================================
// Layer 3 — Pipeline Errors
// ============================================================
// Fatal conditions that callers may want to match on.
// Recoverable conditions (empty text, degenerate spans) are
// handled where they occur and never show up here.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PipelineError {
    /// The dataset JSON is malformed or misses `chunks` / `comments` / `text`
    #[error("Invalid dataset input: {0}")]
    InputFormat(String),

    /// The token classifier produced an id outside O / B-SITE / I-SITE / B-GENERAL / I-GENERAL
    #[error("Unknown token label id {0}")]
    UnknownLabelId(u32),

    /// The sequence classifier produced a class other than 0 (non-spam) or 1 (spam)
    #[error("Unknown classification id {0}")]
    UnknownClassId(i64),

    /// The classifier returned a different number of predictions than texts it was given
    #[error("Classifier returned {actual} predictions for a batch of {expected} texts")]
    BatchLengthMismatch { expected: usize, actual: usize },

    /// Artifacts are write-once; refusing to replace an existing file
    #[error("Artifact '{0}' already exists")]
    ArtifactExists(String),
}

impl PipelineError {
    pub fn input_format(err: impl std::fmt::Display) -> Self {
        PipelineError::InputFormat(err.to_string())
    }
}
