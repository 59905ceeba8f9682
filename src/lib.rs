//! Editing history for a diagram canvas.
//!
//! Each committed edit is encoded into an immutable [`Snapshot`] and pushed onto
//! a bounded, linear [`HistoryStack`]. Undo and redo move a cursor through the
//! stack and hand back freshly decoded copies, so the editor can apply them to
//! the live canvas without aliasing anything stored in the history.
//!
//! ```
//! use canvas_history::EditSession;
//!
//! let mut session: EditSession<Vec<String>> = EditSession::new();
//! session.record(&vec!["start".to_string()]).unwrap();
//! session.record(&vec!["start".to_string(), "box".to_string()]).unwrap();
//!
//! assert_eq!(session.undo().unwrap(), Some(vec!["start".to_string()]));
//! assert_eq!(session.undo().unwrap(), None);
//! ```

pub mod canvas;
pub mod error;
pub mod history;
pub mod replay;
pub mod session;
pub mod settings;
pub mod snapshot;

pub use error::{HistoryError, Result};
pub use history::{DEFAULT_MAX_RECORDS, HistoryStack};
pub use session::{EditSession, SharedSession};
pub use settings::HistorySettings;
pub use snapshot::{JsonCodec, Snapshot, SnapshotCodec};
