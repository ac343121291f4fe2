use std::path::PathBuf;
use thiserror::Error;

/// Errors produced while driving a test run.
///
/// `DirectoryRead` and `AmbiguousInitial` abort the whole run before any
/// sample is dispatched. The remaining variants are per-sample: the
/// dispatcher catches them, records them under the sample's identifier, and
/// keeps the rest of the batch running.
#[derive(Debug, Error)]
pub enum HarnessError {
    #[error("failed to read sample directory {path}")]
    DirectoryRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("multiple initial samples in batch: {first} and {second}")]
    AmbiguousInitial { first: String, second: String },

    #[error("failed to read audio file {path}")]
    AudioRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("detection call for {sample} failed: {cause}")]
    DetectionCall { sample: String, cause: anyhow::Error },

    #[error("malformed parameter payload for {sample}: {reason}")]
    Decode { sample: String, reason: String },
}

impl HarnessError {
    /// Whether this error aborts the run rather than one sample.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            HarnessError::DirectoryRead { .. } | HarnessError::AmbiguousInitial { .. }
        )
    }
}
