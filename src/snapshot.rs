//! # Snapshot Codec
//!
//! Converts a live, mutable editing state into an immutable [`Snapshot`] and
//! back. Every snapshot is a fully serialized copy, so mutating the live state
//! after recording can never reach a stored entry, and every decode hands out
//! a fresh value the caller may mutate freely.
//!
//! ## Payload format
//! [`JsonCodec`] writes a JSON envelope:
//!
//! ```text
//! {"format":"canvas-history","version":1,"state":<serialized state>}
//! ```
//!
//! The envelope is checked before the state is read, so a payload from another
//! format or schema version is rejected instead of being misread. States holding
//! NaN or infinite floats are refused at encode time, since JSON cannot carry them.
//!
//! ## Dependencies
//! - `serde` / `serde_json`: payload encoding
//! - `chrono`: recording timestamps

use crate::error::{HistoryError, Result};
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

mod finite;

pub const FORMAT_TAG: &str = "canvas-history";
pub const FORMAT_VERSION: u32 = 1;

/// One immutable, encoded editing state.
#[derive(Debug, Clone)]
pub struct Snapshot {
    payload: String,
    recorded_at: DateTime<Utc>,
}

impl Snapshot {
    /// Wraps an already encoded payload.
    pub fn from_payload(payload: impl Into<String>) -> Self {
        Self {
            payload: payload.into(),
            recorded_at: Utc::now(),
        }
    }

    pub fn payload(&self) -> &str {
        &self.payload
    }

    /// When the snapshot was taken. Diagnostic only.
    pub fn recorded_at(&self) -> DateTime<Utc> {
        self.recorded_at
    }

    /// Size of the encoded payload in bytes.
    pub fn size(&self) -> usize {
        self.payload.len()
    }
}

/// Encodes live states into snapshots and decodes them back.
pub trait SnapshotCodec {
    fn encode<T: Serialize>(&self, state: &T) -> Result<Snapshot>;
    fn decode<T: DeserializeOwned>(&self, snapshot: &Snapshot) -> Result<T>;
}

/// The default codec: a versioned `serde_json` envelope.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

#[derive(Serialize)]
struct EnvelopeRef<'a, T> {
    format: &'a str,
    version: u32,
    state: &'a T,
}

#[derive(Deserialize)]
struct Envelope {
    format: String,
    version: u32,
    state: serde_json::Value,
}

impl SnapshotCodec for JsonCodec {
    fn encode<T: Serialize>(&self, state: &T) -> Result<Snapshot> {
        finite::check(state).map_err(HistoryError::Serialization)?;
        let envelope = EnvelopeRef {
            format: FORMAT_TAG,
            version: FORMAT_VERSION,
            state,
        };
        let payload = serde_json::to_string(&envelope).map_err(HistoryError::Serialization)?;
        Ok(Snapshot::from_payload(payload))
    }

    fn decode<T: DeserializeOwned>(&self, snapshot: &Snapshot) -> Result<T> {
        let envelope: Envelope =
            serde_json::from_str(snapshot.payload()).map_err(HistoryError::Deserialization)?;

        if envelope.format != FORMAT_TAG {
            return Err(HistoryError::UnknownFormat(envelope.format));
        }
        if envelope.version != FORMAT_VERSION {
            return Err(HistoryError::UnsupportedVersion {
                found: envelope.version,
                supported: FORMAT_VERSION,
            });
        }

        serde_json::from_value(envelope.state).map_err(HistoryError::Deserialization)
    }
}
