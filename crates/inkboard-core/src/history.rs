//! Linear undo/redo over full element snapshots.

use crate::element::Element;
use std::collections::VecDeque;

/// Maximum number of undo states to keep.
pub const MAX_UNDO_HISTORY: usize = 50;

/// Undo and redo stacks of element sequence snapshots.
///
/// Every snapshot is an owned deep copy, so editing the live scene never
/// touches stored history.
#[derive(Debug, Clone)]
pub struct History {
    undo_stack: VecDeque<Vec<Element>>,
    redo_stack: Vec<Vec<Element>>,
    limit: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}

impl History {
    pub fn new() -> Self {
        Self::with_limit(MAX_UNDO_HISTORY)
    }

    /// Create a history keeping at most `limit` undo states (at least one).
    pub fn with_limit(limit: usize) -> Self {
        Self {
            undo_stack: VecDeque::new(),
            redo_stack: Vec::new(),
            limit: limit.max(1),
        }
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Push the state before a mutation (call before making changes).
    pub fn record(&mut self, current: &[Element]) {
        self.undo_stack.push_back(current.to_vec());

        // A new edit discards the redo branch
        self.redo_stack.clear();

        while self.undo_stack.len() > self.limit {
            self.undo_stack.pop_front();
        }
    }

    /// Pop the most recent undo state, parking `current` for redo.
    pub fn undo(&mut self, current: &[Element]) -> Option<Vec<Element>> {
        let snapshot = self.undo_stack.pop_back()?;
        self.redo_stack.push(current.to_vec());
        Some(snapshot)
    }

    /// Pop the most recent redo state, parking `current` for undo.
    pub fn redo(&mut self, current: &[Element]) -> Option<Vec<Element>> {
        let snapshot = self.redo_stack.pop()?;
        self.undo_stack.push_back(current.to_vec());
        while self.undo_stack.len() > self.limit {
            self.undo_stack.pop_front();
        }
        Some(snapshot)
    }

    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_len(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_len(&self) -> usize {
        self.redo_stack.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::ElementKind;

    fn rect(id: &str) -> Element {
        Element::with_id(id, ElementKind::Rect.default_body())
    }

    #[test]
    fn test_undo_empty_stack() {
        let mut history = History::new();
        assert!(!history.can_undo());
        assert!(history.undo(&[]).is_none());
        assert!(!history.can_redo());
        assert!(history.redo(&[]).is_none());
    }

    #[test]
    fn test_undo_then_redo() {
        let mut history = History::new();
        let before = vec![rect("a")];
        let after = vec![rect("a"), rect("b")];

        history.record(&before);
        let restored = history.undo(&after).unwrap();
        assert_eq!(restored, before);
        assert!(history.can_redo());

        let replayed = history.redo(&restored).unwrap();
        assert_eq!(replayed, after);
        assert_eq!(history.undo_len(), 1);
        assert_eq!(history.redo_len(), 0);
    }

    #[test]
    fn test_record_clears_redo() {
        let mut history = History::new();
        history.record(&[]);
        history.undo(&[rect("a")]);
        assert!(history.can_redo());

        history.record(&[]);
        assert!(!history.can_redo());
    }

    #[test]
    fn test_limit_evicts_oldest() {
        let mut history = History::with_limit(3);
        for i in 0..5 {
            history.record(&[rect(&i.to_string())]);
        }
        assert_eq!(history.undo_len(), 3);

        let mut seen = Vec::new();
        while let Some(snapshot) = history.undo(&[]) {
            seen.push(snapshot[0].id().to_string());
        }
        assert_eq!(seen, vec!["4", "3", "2"]);
    }

    #[test]
    fn test_snapshots_are_independent() {
        let mut history = History::new();
        let mut live = vec![rect("a")];
        history.record(&live);
        live[0].x = 99.0;

        let restored = history.undo(&live).unwrap();
        assert!((restored[0].x - 0.0).abs() < f64::EPSILON);
    }
}
