//! History Manager
//!
//! Bounded undo/redo over whole snapshots of the placed-entity collection.
//! The session records a snapshot immediately before every mutating commit;
//! recording always clears the redo stack. Snapshots clone cheaply because
//! placed groups hold their definitions behind `Arc`.

use crate::building::types::PlacedEntity;

/// Maximum number of snapshots retained. The oldest entries drop first.
pub const MAX_HISTORY_DEPTH: usize = 50;

/// An immutable copy of the placed-entity collection at a point in time.
pub type SceneSnapshot = Vec<PlacedEntity>;

/// Two-stack snapshot history.
#[derive(Debug)]
pub struct History {
    undo: Vec<SceneSnapshot>,
    redo: Vec<SceneSnapshot>,
    max_depth: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}

impl History {
    pub fn new() -> Self {
        Self::with_depth(MAX_HISTORY_DEPTH)
    }

    pub fn with_depth(max_depth: usize) -> Self {
        Self {
            undo: Vec::new(),
            redo: Vec::new(),
            max_depth,
        }
    }

    /// Record the current collection, to be called immediately before a
    /// mutation. Evicts the oldest snapshot past the depth bound and clears
    /// the redo stack unconditionally.
    pub fn record(&mut self, current: &[PlacedEntity]) {
        self.undo.push(current.to_vec());
        if self.undo.len() > self.max_depth {
            let excess = self.undo.len() - self.max_depth;
            self.undo.drain(0..excess);
        }
        self.redo.clear();
    }

    /// Swap `current` for the most recent snapshot, moving the replaced
    /// state onto the redo stack. Returns false (and leaves `current`
    /// untouched) when there is nothing to undo.
    pub fn undo(&mut self, current: &mut SceneSnapshot) -> bool {
        let Some(previous) = self.undo.pop() else {
            return false;
        };
        self.redo.push(std::mem::replace(current, previous));
        true
    }

    /// Symmetric to [`History::undo`].
    pub fn redo(&mut self, current: &mut SceneSnapshot) -> bool {
        let Some(next) = self.redo.pop() else {
            return false;
        };
        self.undo.push(std::mem::replace(current, next));
        true
    }

    pub fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    pub fn undo_count(&self) -> usize {
        self.undo.len()
    }

    pub fn redo_count(&self) -> usize {
        self.redo.len()
    }

    /// Drop all history, e.g. after loading a project. A freshly loaded
    /// state has nothing to undo.
    pub fn clear(&mut self) {
        self.undo.clear();
        self.redo.clear();
    }
}
