//! History error types.

use thiserror::Error;

/// Errors raised while moving snapshots in and out of the history.
///
/// Reaching either end of the history is not an error: navigation at a
/// boundary returns `Ok(None)`.
#[derive(Debug, Error)]
pub enum HistoryError {
    /// The live state could not be represented as a snapshot payload.
    #[error("failed to encode snapshot: {0}")]
    Serialization(#[source] serde_json::Error),

    /// The stored payload is corrupt or does not match the requested state type.
    #[error("failed to decode snapshot: {0}")]
    Deserialization(#[source] serde_json::Error),

    /// The payload was written by some other format.
    #[error("unknown snapshot format: {0:?}")]
    UnknownFormat(String),

    /// The payload was written by a schema version this build does not read.
    #[error("unsupported snapshot version {found} (supported: {supported})")]
    UnsupportedVersion { found: u32, supported: u32 },
}

impl HistoryError {
    /// True for failures that happen while recording an edit.
    pub fn is_encode(&self) -> bool {
        matches!(self, HistoryError::Serialization(_))
    }

    /// True for failures that happen while restoring a snapshot.
    pub fn is_decode(&self) -> bool {
        matches!(
            self,
            HistoryError::Deserialization(_)
                | HistoryError::UnknownFormat(_)
                | HistoryError::UnsupportedVersion { .. }
        )
    }
}


pub type Result<T> = std::result::Result<T, HistoryError>;
