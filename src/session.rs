//! Per-project editing session: one history stack plus the codec that fills it.

use crate::error::Result;
use crate::history::HistoryStack;
use crate::settings::HistorySettings;
use crate::snapshot::{JsonCodec, SnapshotCodec};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::marker::PhantomData;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Owns the undo history of one open project.
///
/// States go in through [`EditSession::record`] and come back out of
/// [`EditSession::undo`] / [`EditSession::redo`] as freshly decoded copies.
pub struct EditSession<T, C = JsonCodec> {
    history: HistoryStack,
    codec: C,
    _state: PhantomData<fn() -> T>,
}

impl<T> EditSession<T, JsonCodec>
where
    T: Serialize + DeserializeOwned,
{
    pub fn new() -> Self {
        Self::with_codec(JsonCodec, HistoryStack::new())
    }

    pub fn with_settings(settings: &HistorySettings) -> Self {
        Self::with_codec(JsonCodec, HistoryStack::with_capacity(settings.max_records()))
    }
}

impl<T> Default for EditSession<T, JsonCodec>
where
    T: Serialize + DeserializeOwned,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T, C> EditSession<T, C>
where
    T: Serialize + DeserializeOwned,
    C: SnapshotCodec,
{
    pub fn with_codec(codec: C, history: HistoryStack) -> Self {
        Self {
            history,
            codec,
            _state: PhantomData,
        }
    }

    /// Records a committed edit. On error nothing is recorded.
    pub fn record(&mut self, state: &T) -> Result<()> {
        let snapshot = self
            .codec
            .encode(state)
            .inspect_err(|e| log::warn!("edit not recorded: {}", e))?;
        self.history.push(snapshot);
        Ok(())
    }

    /// Steps back one edit. `Ok(None)` when there is nothing to undo.
    pub fn undo(&mut self) -> Result<Option<T>> {
        let codec = &self.codec;
        self.history
            .undo_with(|snapshot| codec.decode(snapshot))
            .inspect_err(|e| log::warn!("undo failed: {}", e))
    }

    /// Steps forward one edit. `Ok(None)` when there is nothing to redo.
    pub fn redo(&mut self) -> Result<Option<T>> {
        let codec = &self.codec;
        self.history
            .redo_with(|snapshot| codec.decode(snapshot))
            .inspect_err(|e| log::warn!("redo failed: {}", e))
    }

    /// Decoded copy of the active snapshot.
    pub fn current(&self) -> Result<Option<T>> {
        self.history
            .current()
            .map(|snapshot| self.codec.decode(snapshot))
            .transpose()
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn clear(&mut self) {
        self.history.clear();
    }

    /// Starts over from `initial`, as when a project is opened.
    pub fn reset(&mut self, initial: &T) -> Result<()> {
        self.history.clear();
        self.record(initial)
    }

    pub fn history(&self) -> &HistoryStack {
        &self.history
    }

    /// Mutable access for callers that manage snapshots themselves.
    pub fn history_mut(&mut self) -> &mut HistoryStack {
        &mut self.history
    }
}

/// An [`EditSession`] shared between threads.
///
/// Every call holds the lock for its whole duration, so no caller ever sees
/// a half-applied push.
pub struct SharedSession<T, C = JsonCodec> {
    inner: Arc<Mutex<EditSession<T, C>>>,
}

impl<T, C> Clone for SharedSession<T, C> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T, C> SharedSession<T, C>
where
    T: Serialize + DeserializeOwned,
    C: SnapshotCodec,
{
    pub fn new(session: EditSession<T, C>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(session)),
        }
    }

    // Mutations either finish or roll back before unlocking, so a poisoned
    // lock still guards a consistent stack.
    fn lock(&self) -> MutexGuard<'_, EditSession<T, C>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn record(&self, state: &T) -> Result<()> {
        self.lock().record(state)
    }

    pub fn undo(&self) -> Result<Option<T>> {
        self.lock().undo()
    }

    pub fn redo(&self) -> Result<Option<T>> {
        self.lock().redo()
    }

    pub fn current(&self) -> Result<Option<T>> {
        self.lock().current()
    }

    pub fn can_undo(&self) -> bool {
        self.lock().can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.lock().can_redo()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    /// Runs `f` with the session locked.
    pub fn with<R>(&self, f: impl FnOnce(&mut EditSession<T, C>) -> R) -> R {
        f(&mut self.lock())
    }
}
