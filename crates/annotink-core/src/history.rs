//! Undo/redo history over serialized surface snapshots.

use crate::error::EditorResult;
use crate::surface::{Snapshot, Surface};
use std::collections::VecDeque;
use std::mem;

/// Default maximum number of undo entries.
pub const DEFAULT_CAPACITY: usize = 100;

/// Undo and redo stacks of snapshots plus the snapshot of the live surface.
///
/// While a snapshot is being replayed into the surface the manager is
/// locked: every `save_state`, `undo` and `redo` is dropped until
/// [`HistoryManager::finish_replay`] is called.
#[derive(Debug, Clone)]
pub struct HistoryManager {
    undo_stack: VecDeque<Snapshot>,
    redo_stack: VecDeque<Snapshot>,
    current: Snapshot,
    capacity: usize,
    locked: bool,
}

impl HistoryManager {
    /// Create a history whose baseline is `current`.
    pub fn new(current: Snapshot, capacity: usize) -> Self {
        Self {
            undo_stack: VecDeque::new(),
            redo_stack: VecDeque::new(),
            current,
            capacity,
            locked: false,
        }
    }

    /// Create a history whose baseline is the surface's present state.
    pub fn from_surface<S: Surface>(surface: &S, capacity: usize) -> EditorResult<Self> {
        Ok(Self::new(surface.snapshot()?, capacity))
    }

    /// Commit the surface's present state.
    ///
    /// Returns false when nothing was recorded.
    pub fn save_state<S: Surface>(&mut self, surface: &S) -> bool {
        if self.locked {
            log::debug!("History locked, dropping save");
            return false;
        }
        let next = match surface.snapshot() {
            Ok(snapshot) => snapshot,
            Err(e) => {
                log::warn!("Failed to snapshot surface: {e}");
                return false;
            }
        };
        let previous = mem::replace(&mut self.current, next);
        push_bounded(&mut self.undo_stack, previous, self.capacity);
        self.redo_stack.clear();
        true
    }

    /// Step back one entry.
    ///
    /// Returns the snapshot the surface must load; the manager stays locked
    /// until the load completes.
    pub fn undo(&mut self) -> Option<Snapshot> {
        if self.locked {
            log::debug!("History locked, dropping undo");
            return None;
        }
        let snapshot = self.undo_stack.pop_back()?;
        let previous = mem::replace(&mut self.current, snapshot.clone());
        push_bounded(&mut self.redo_stack, previous, self.capacity);
        self.locked = true;
        Some(snapshot)
    }

    /// Step forward one entry. Mirror of [`HistoryManager::undo`].
    pub fn redo(&mut self) -> Option<Snapshot> {
        if self.locked {
            log::debug!("History locked, dropping redo");
            return None;
        }
        let snapshot = self.redo_stack.pop_back()?;
        let previous = mem::replace(&mut self.current, snapshot.clone());
        push_bounded(&mut self.undo_stack, previous, self.capacity);
        self.locked = true;
        Some(snapshot)
    }

    /// Release the replay lock once the surface has loaded the snapshot.
    pub fn finish_replay(&mut self) {
        self.locked = false;
    }

    /// Drop both stacks and take the surface's present state as the new baseline.
    pub fn reset<S: Surface>(&mut self, surface: &S) -> EditorResult<()> {
        self.current = surface.snapshot()?;
        self.undo_stack.clear();
        self.redo_stack.clear();
        self.locked = false;
        Ok(())
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    pub fn undo_len(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_len(&self) -> usize {
        self.redo_stack.len()
    }

    /// Snapshot of the surface after the last commit or replay.
    pub fn current(&self) -> &Snapshot {
        &self.current
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

/// Push onto the back, evicting from the front once `capacity` is reached.
fn push_bounded(stack: &mut VecDeque<Snapshot>, snapshot: Snapshot, capacity: usize) {
    if capacity == 0 {
        return;
    }
    while stack.len() >= capacity {
        stack.pop_front();
    }
    stack.push_back(snapshot);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::Scene;
    use crate::shapes::{Rectangle, Shape};
    use kurbo::Point;

    fn add_rect(scene: &mut Scene, x: f64) {
        scene.add(Shape::Rectangle(Rectangle::new(Point::new(x, 0.0), 10.0, 10.0)));
    }

    fn replay(history: &mut HistoryManager, scene: &mut Scene, snapshot: Option<Snapshot>) {
        let snapshot = snapshot.expect("expected a snapshot to replay");
        scene.load_snapshot(&snapshot).unwrap();
        history.finish_replay();
    }

    #[test]
    fn test_undo_redo_restores_snapshot() {
        let mut scene = Scene::new();
        let mut history = HistoryManager::from_surface(&scene, DEFAULT_CAPACITY).unwrap();

        for i in 0..5 {
            add_rect(&mut scene, f64::from(i) * 20.0);
            assert!(history.save_state(&scene));
        }
        let before_undo = scene.snapshot().unwrap();

        let snapshot = history.undo();
        replay(&mut history, &mut scene, snapshot);
        assert_eq!(scene.len(), 4);

        let snapshot = history.redo();
        replay(&mut history, &mut scene, snapshot);
        assert_eq!(scene.snapshot().unwrap(), before_undo);
        assert_eq!(history.current(), &before_undo);
    }

    #[test]
    fn test_capacity_evicts_oldest() {
        let mut scene = Scene::new();
        let mut history = HistoryManager::from_surface(&scene, DEFAULT_CAPACITY).unwrap();
        let baseline = history.current().clone();

        for i in 0..101 {
            add_rect(&mut scene, f64::from(i));
            history.save_state(&scene);
        }
        assert_eq!(history.undo_len(), 100);

        // The baseline was the oldest entry and is gone.
        let mut oldest = None;
        while let Some(snapshot) = history.undo() {
            history.finish_replay();
            oldest = Some(snapshot);
        }
        assert_ne!(oldest, Some(baseline));
        assert_eq!(history.redo_len(), 100);
    }

    #[test]
    fn test_locked_calls_are_noops() {
        let mut scene = Scene::new();
        let mut history = HistoryManager::from_surface(&scene, DEFAULT_CAPACITY).unwrap();
        add_rect(&mut scene, 0.0);
        history.save_state(&scene);
        add_rect(&mut scene, 20.0);
        history.save_state(&scene);

        assert!(history.undo().is_some());
        assert!(history.is_locked());
        let (undo_len, redo_len) = (history.undo_len(), history.redo_len());
        let current = history.current().clone();

        add_rect(&mut scene, 40.0);
        assert!(!history.save_state(&scene));
        assert!(history.undo().is_none());
        assert!(history.redo().is_none());
        assert_eq!(history.undo_len(), undo_len);
        assert_eq!(history.redo_len(), redo_len);
        assert_eq!(history.current(), &current);

        history.finish_replay();
        assert!(history.redo().is_some());
    }

    #[test]
    fn test_save_clears_redo() {
        let mut scene = Scene::new();
        let mut history = HistoryManager::from_surface(&scene, DEFAULT_CAPACITY).unwrap();
        add_rect(&mut scene, 0.0);
        history.save_state(&scene);

        let snapshot = history.undo();
        replay(&mut history, &mut scene, snapshot);
        assert!(history.can_redo());

        add_rect(&mut scene, 50.0);
        history.save_state(&scene);
        assert!(!history.can_redo());
        assert_eq!(history.redo_len(), 0);
    }

    #[test]
    fn test_empty_stacks_are_noops() {
        let scene = Scene::new();
        let mut history = HistoryManager::from_surface(&scene, DEFAULT_CAPACITY).unwrap();
        assert!(history.undo().is_none());
        assert!(history.redo().is_none());
        assert!(!history.is_locked());
    }

    #[test]
    fn test_reset_takes_new_baseline() {
        let mut scene = Scene::new();
        let mut history = HistoryManager::from_surface(&scene, DEFAULT_CAPACITY).unwrap();
        add_rect(&mut scene, 0.0);
        history.save_state(&scene);
        add_rect(&mut scene, 30.0);

        history.reset(&scene).unwrap();
        assert!(!history.can_undo());
        assert!(!history.can_redo());
        assert_eq!(history.current(), &scene.snapshot().unwrap());
    }
}
