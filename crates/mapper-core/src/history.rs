use std::collections::VecDeque;
use std::mem;

use crate::state::MapState;

/// Snapshots retained before the oldest ones are evicted.
pub const DEFAULT_CAPACITY: usize = 100;

/// Bounded undo/redo over full [`MapState`] snapshots.
///
/// Every mutating operation records a pre-image snapshot exactly once; the
/// undo stack evicts its oldest entry when full, and any new record clears the
/// redo stack. Snapshots are structural clones, deep and independent.
#[derive(Clone, Debug)]
pub struct History {
    undo: VecDeque<MapState>,
    redo: Vec<MapState>,
    capacity: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl History {
    pub fn new(capacity: usize) -> Self {
        Self { undo: VecDeque::new(), redo: Vec::new(), capacity }
    }

    /// Record the state as it was before a mutation.
    pub fn record(&mut self, snapshot: MapState) {
        self.undo.push_back(snapshot);
        if self.undo.len() > self.capacity {
            self.undo.pop_front();
        }
        self.redo.clear();
    }

    /// Swap `current` for the most recent snapshot. Returns false (leaving
    /// `current` untouched) when there is nothing to undo.
    pub fn undo(&mut self, current: &mut MapState) -> bool {
        let Some(previous) = self.undo.pop_back() else {
            return false;
        };
        self.redo.push(mem::replace(current, previous));
        true
    }

    /// Inverse of [`History::undo`].
    pub fn redo(&mut self, current: &mut MapState) -> bool {
        let Some(next) = self.redo.pop() else {
            return false;
        };
        self.undo.push_back(mem::replace(current, next));
        true
    }

    pub fn undo_depth(&self) -> usize {
        self.undo.len()
    }

    pub fn redo_depth(&self) -> usize {
        self.redo.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Edge, Pos};

    fn state_with_wall(x: i32) -> MapState {
        let mut state = MapState::new();
        state.set_wall(1, Pos::new(x, 0), Edge::N, true).unwrap();
        state
    }

    #[test]
    fn undo_restores_the_recorded_snapshot() {
        let mut history = History::default();
        let before = MapState::new();
        let mut current = before.clone();

        history.record(current.clone());
        current.set_wall(1, Pos::new(1, 1), Edge::E, true).unwrap();
        assert_ne!(current, before);

        assert!(history.undo(&mut current));
        assert_eq!(current, before);
    }

    #[test]
    fn redo_restores_the_undone_state() {
        let mut history = History::default();
        let mut current = MapState::new();

        history.record(current.clone());
        current.set_wall(1, Pos::new(1, 1), Edge::E, true).unwrap();
        let mutated = current.clone();

        assert!(history.undo(&mut current));
        assert!(history.redo(&mut current));
        assert_eq!(current, mutated);
    }

    #[test]
    fn empty_stacks_are_silent_no_ops() {
        let mut history = History::default();
        let before = state_with_wall(3);
        let mut current = before.clone();
        assert!(!history.undo(&mut current));
        assert!(!history.redo(&mut current));
        assert_eq!(current, before);
    }

    #[test]
    fn a_new_record_clears_the_redo_stack() {
        let mut history = History::default();
        let mut current = MapState::new();

        history.record(current.clone());
        current = state_with_wall(1);
        history.undo(&mut current);
        assert_eq!(history.redo_depth(), 1);

        history.record(current.clone());
        assert_eq!(history.redo_depth(), 0);
        assert!(!history.redo(&mut current));
    }

    #[test]
    fn capacity_evicts_the_oldest_snapshot_first() {
        let mut history = History::new(2);
        let mut current = MapState::new();
        for x in 0..3 {
            history.record(current.clone());
            current = state_with_wall(x);
        }
        assert_eq!(history.undo_depth(), 2);

        // Two undos land on the snapshots taken before walls at x=2 and x=1;
        // the pre-image of the very first mutation was evicted.
        assert!(history.undo(&mut current));
        assert_eq!(current, state_with_wall(1));
        assert!(history.undo(&mut current));
        assert_eq!(current, state_with_wall(0));
        assert!(!history.undo(&mut current));
    }
}
