//! Error types for the page-number inference engine.

use thiserror::Error;

/// Inference error kinds.
#[derive(Debug, Error)]
pub enum PageNumError {
    #[error("composite value {0:?} failed to re-parse against its own template")]
    InvalidComposite(String),

    #[error("candidate belongs to scheme {candidate_scheme:?}, sequence is scheme {sequence_scheme:?}")]
    SchemeMismatch {
        candidate_scheme: crate::scheme::SchemeId,
        sequence_scheme: crate::scheme::SchemeId,
    },

    #[error("candidate constructed as synthetic but carries an observation")]
    SyntheticWithObservation,

    #[error("classifier training is underdetermined (zero positives or zero negatives)")]
    TrainingUnderdetermined,

    #[error("composite scheme cap ({limit}) reached; no further composites admitted")]
    CompositeCapReached { limit: usize },

    #[error("external I/O failure: {0}")]
    ExternalIoFailure(#[from] std::io::Error),

    #[error("malformed input document: {0}")]
    MalformedInput(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, PageNumError>;
