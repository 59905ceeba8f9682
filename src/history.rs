use crate::snapshot::Snapshot;
use std::collections::VecDeque;

/// Default bound on stored snapshots.
pub const DEFAULT_MAX_RECORDS: usize = 50;

/// Bounded, linear undo history of encoded snapshots.
///
/// `current_index` points at the active snapshot; `None` means nothing has
/// been recorded yet. Entries after it are only reachable through redo and are
/// dropped by the next push.
#[derive(Debug, Clone)]
pub struct HistoryStack {
    history: VecDeque<Snapshot>,
    current_index: Option<usize>,
    max_records: usize,
}

impl Default for HistoryStack {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_MAX_RECORDS)
    }
}

impl HistoryStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// A stack holding at most `max_records` snapshots (at least one).
    pub fn with_capacity(max_records: usize) -> Self {
        let max_records = max_records.max(1);
        Self {
            history: VecDeque::with_capacity(max_records.min(DEFAULT_MAX_RECORDS) + 1),
            current_index: None,
            max_records,
        }
    }

    pub fn push(&mut self, snapshot: Snapshot) {
        // If we are not at the end, truncate future
        let keep = self.current_index.map_or(0, |index| index + 1);
        if keep < self.history.len() {
            log::debug!("discarding {} redo entries", self.history.len() - keep);
            self.history.truncate(keep);
        }

        self.history.push_back(snapshot);
        self.current_index = Some(self.history.len() - 1);

        if self.history.len() > self.max_records {
            if let Some(evicted) = self.history.pop_front() {
                log::debug!(
                    "history full, evicted snapshot recorded at {} ({} bytes)",
                    evicted.recorded_at().to_rfc3339(),
                    evicted.size()
                );
            }
            self.current_index = self.current_index.map(|index| index.saturating_sub(1));
        }
    }

    pub fn undo(&mut self) -> Option<&Snapshot> {
        let target = self.undo_target()?;
        self.current_index = Some(target);
        self.history.get(target)
    }

    pub fn redo(&mut self) -> Option<&Snapshot> {
        let target = self.redo_target()?;
        self.current_index = Some(target);
        self.history.get(target)
    }

    /// Undo that only commits when `apply` accepts the previous snapshot.
    ///
    /// Returns `Ok(None)` when there is nothing to undo. On `Err` the cursor
    /// stays where it was.
    pub fn undo_with<T, E>(
        &mut self,
        apply: impl FnOnce(&Snapshot) -> Result<T, E>,
    ) -> Result<Option<T>, E> {
        match self.undo_target() {
            Some(target) => self.step_to(target, apply).map(Some),
            None => Ok(None),
        }
    }

    /// Redo counterpart of [`HistoryStack::undo_with`].
    pub fn redo_with<T, E>(
        &mut self,
        apply: impl FnOnce(&Snapshot) -> Result<T, E>,
    ) -> Result<Option<T>, E> {
        match self.redo_target() {
            Some(target) => self.step_to(target, apply).map(Some),
            None => Ok(None),
        }
    }

    fn step_to<T, E>(
        &mut self,
        target: usize,
        apply: impl FnOnce(&Snapshot) -> Result<T, E>,
    ) -> Result<T, E> {
        let value = apply(&self.history[target])?;
        self.current_index = Some(target);
        Ok(value)
    }

    fn undo_target(&self) -> Option<usize> {
        match self.current_index {
            Some(index) if index > 0 => Some(index - 1),
            _ => None,
        }
    }

    fn redo_target(&self) -> Option<usize> {
        let next = self.current_index.map_or(0, |index| index + 1);
        (next < self.history.len()).then_some(next)
    }

    pub fn can_undo(&self) -> bool {
        self.undo_target().is_some()
    }

    pub fn can_redo(&self) -> bool {
        self.redo_target().is_some()
    }

    pub fn clear(&mut self) {
        self.history.clear();
        self.current_index = None;
    }

    pub fn len(&self) -> usize {
        self.history.len()
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.max_records
    }

    /// Index of the active snapshot, oldest entry first.
    pub fn position(&self) -> Option<usize> {
        self.current_index
    }

    pub fn current(&self) -> Option<&Snapshot> {
        self.current_index.and_then(|index| self.history.get(index))
    }

    /// Stored snapshots from oldest to newest, including redo entries.
    pub fn iter(&self) -> impl Iterator<Item = &Snapshot> {
        self.history.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snap(label: &str) -> Snapshot {
        Snapshot::from_payload(label)
    }

    fn payloads(stack: &HistoryStack) -> Vec<&str> {
        stack.iter().map(Snapshot::payload).collect()
    }

    #[test]
    fn new_stack_is_empty() {
        let stack = HistoryStack::new();
        assert!(stack.is_empty());
        assert_eq!(stack.position(), None);
        assert_eq!(stack.capacity(), DEFAULT_MAX_RECORDS);
        assert!(!stack.can_undo());
        assert!(!stack.can_redo());
        assert!(stack.current().is_none());
    }

    #[test]
    fn push_moves_cursor_to_tail() {
        let mut stack = HistoryStack::new();
        stack.push(snap("a"));
        stack.push(snap("b"));
        assert_eq!(stack.position(), Some(1));
        assert_eq!(stack.current().map(Snapshot::payload), Some("b"));
    }

    #[test]
    fn undo_and_redo_walk_the_cursor() {
        let mut stack = HistoryStack::new();
        stack.push(snap("a"));
        stack.push(snap("b"));

        assert_eq!(stack.undo().map(Snapshot::payload), Some("a"));
        assert_eq!(stack.position(), Some(0));
        assert!(stack.can_redo());

        assert_eq!(stack.redo().map(Snapshot::payload), Some("b"));
        assert_eq!(stack.position(), Some(1));
        assert!(!stack.can_redo());
    }

    #[test]
    fn push_after_undo_truncates_redo_branch() {
        let mut stack = HistoryStack::new();
        stack.push(snap("A"));
        stack.push(snap("B"));
        stack.push(snap("C"));
        assert_eq!(stack.position(), Some(2));

        stack.undo();
        assert_eq!(stack.position(), Some(1));

        stack.push(snap("D"));
        assert_eq!(stack.len(), 3);
        assert_eq!(payloads(&stack), vec!["A", "B", "D"]);
        assert_eq!(stack.position(), Some(2));
        assert!(stack.redo().is_none());
    }

    #[test]
    fn push_after_undo_to_second_entry_keeps_prefix() {
        let mut stack = HistoryStack::new();
        stack.push(snap("A"));
        stack.push(snap("B"));
        stack.push(snap("C"));
        stack.undo();
        stack.undo();

        stack.push(snap("D"));
        assert_eq!(payloads(&stack), vec!["A", "D"]);
        assert_eq!(stack.position(), Some(1));
        assert!(!stack.can_redo());
    }

    #[test]
    fn overflow_evicts_exactly_the_oldest_entry() {
        let mut stack = HistoryStack::new();
        for i in 0..=DEFAULT_MAX_RECORDS {
            stack.push(snap(&i.to_string()));
        }
        assert_eq!(stack.len(), DEFAULT_MAX_RECORDS);
        assert_eq!(stack.position(), Some(DEFAULT_MAX_RECORDS - 1));
        assert_eq!(stack.iter().next().map(Snapshot::payload), Some("1"));
        assert_eq!(stack.current().map(Snapshot::payload), Some("50"));
    }

    #[test]
    fn eviction_keeps_cursor_on_the_same_entry() {
        let mut stack = HistoryStack::with_capacity(3);
        stack.push(snap("a"));
        stack.push(snap("b"));
        stack.push(snap("c"));
        stack.push(snap("d"));
        assert_eq!(payloads(&stack), vec!["b", "c", "d"]);
        assert_eq!(stack.current().map(Snapshot::payload), Some("d"));
        assert_eq!(stack.undo().map(Snapshot::payload), Some("c"));
    }

    #[test]
    fn boundaries_are_no_ops() {
        let mut stack = HistoryStack::new();
        assert!(stack.undo().is_none());
        assert!(stack.redo().is_none());
        assert_eq!(stack.len(), 0);
        assert_eq!(stack.position(), None);

        stack.push(snap("only"));
        assert!(stack.undo().is_none());
        assert!(stack.redo().is_none());
        assert_eq!(stack.position(), Some(0));
    }

    #[test]
    fn clear_is_idempotent() {
        let mut stack = HistoryStack::new();
        stack.push(snap("a"));
        stack.push(snap("b"));
        stack.clear();
        stack.clear();
        assert!(stack.is_empty());
        assert_eq!(stack.position(), None);
        assert!(!stack.can_undo());
        assert!(!stack.can_redo());
    }

    #[test]
    fn zero_capacity_is_clamped_to_one() {
        let mut stack = HistoryStack::with_capacity(0);
        stack.push(snap("a"));
        stack.push(snap("b"));
        assert_eq!(stack.capacity(), 1);
        assert_eq!(payloads(&stack), vec!["b"]);
        assert_eq!(stack.position(), Some(0));
    }

    #[test]
    fn huge_capacity_does_not_preallocate() {
        let mut stack = HistoryStack::with_capacity(usize::MAX);
        assert_eq!(stack.capacity(), usize::MAX);
        stack.push(snap("a"));
        stack.push(snap("b"));
        assert_eq!(stack.len(), 2);
        assert_eq!(stack.position(), Some(1));
    }

    #[test]
    fn failed_redo_with_leaves_cursor_untouched() {
        let mut stack = HistoryStack::new();
        stack.push(snap("a"));
        stack.push(snap("b"));
        stack.undo();

        let result: Result<Option<()>, &str> = stack.redo_with(|_| Err("corrupt"));
        assert_eq!(result, Err("corrupt"));
        assert_eq!(stack.position(), Some(0));
        assert_eq!(stack.len(), 2);
        assert!(stack.can_redo());
    }

    #[test]
    fn successful_undo_with_commits() {
        let mut stack = HistoryStack::new();
        stack.push(snap("a"));
        stack.push(snap("b"));

        let result: Result<_, ()> = stack.undo_with(|s| Ok(s.payload().to_uppercase()));
        assert_eq!(result, Ok(Some("A".to_string())));
        assert_eq!(stack.position(), Some(0));

        let result = stack.undo_with(|_| -> Result<String, ()> { panic!("not called") });
        assert_eq!(result, Ok(None));
    }
}
