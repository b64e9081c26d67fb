//! Snapshot-based undo/redo history.

use std::collections::VecDeque;

use crate::text::{StyledDocument, TextRun};

use super::selection::Selection;

/// Editor state captured before an edit.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub runs: Vec<TextRun>,
    pub anchor: usize,
    pub head: usize,
}

impl Snapshot {
    /// Capture a document and selection.
    pub fn capture(doc: &StyledDocument, selection: &Selection) -> Self {
        Self {
            runs: doc.runs().to_vec(),
            anchor: selection.anchor,
            head: selection.head,
        }
    }

    /// The flattened text of the snapshot.
    pub fn text(&self) -> String {
        self.runs.iter().map(|run| run.text.as_str()).collect()
    }

    pub fn selection(&self) -> Selection {
        Selection {
            anchor: self.anchor,
            head: self.head,
        }
    }
}

/// Bounded undo and redo stacks.
///
/// Pushing drops the oldest snapshot once `limit` is exceeded and clears the
/// redo stack. A snapshot equal to the most recent one is not stored twice.
#[derive(Debug)]
pub struct UndoHistory {
    undo: VecDeque<Snapshot>,
    redo: Vec<Snapshot>,
    limit: usize,
}

impl UndoHistory {
    pub fn new(limit: usize) -> Self {
        Self {
            undo: VecDeque::new(),
            redo: Vec::new(),
            limit,
        }
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Change the limit, dropping the oldest snapshots if needed.
    pub fn set_limit(&mut self, limit: usize) {
        self.limit = limit;
        self.enforce_limit();
    }

    /// Record the state before a new edit.
    pub fn push(&mut self, snapshot: Snapshot) {
        self.redo.clear();
        if self.undo.back() == Some(&snapshot) {
            return;
        }
        self.undo.push_back(snapshot);
        self.enforce_limit();
    }

    /// Step back: returns the snapshot to restore and keeps `current` for redo.
    pub fn undo(&mut self, current: Snapshot) -> Option<Snapshot> {
        let previous = self.undo.pop_back()?;
        self.redo.push(current);
        Some(previous)
    }

    /// Step forward: returns the snapshot to restore and keeps `current` for undo.
    pub fn redo(&mut self, current: Snapshot) -> Option<Snapshot> {
        let next = self.redo.pop()?;
        self.undo.push_back(current);
        self.enforce_limit();
        Some(next)
    }

    pub fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    pub fn undo_len(&self) -> usize {
        self.undo.len()
    }

    pub fn clear(&mut self) {
        self.undo.clear();
        self.redo.clear();
    }

    fn enforce_limit(&mut self) {
        while self.undo.len() > self.limit {
            self.undo.pop_front();
        }
    }
}

impl Default for UndoHistory {
    fn default() -> Self {
        Self::new(100)
    }
}
