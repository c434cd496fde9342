//! # Execution snapshot and ordering policy.
//!
//! The snapshot is the frozen, ordered view of the active set that one execution
//! pass walks. It is rebuilt lazily: lifecycle changes only mark it dirty, and the
//! next [`Scheduler::execute_tasks`](crate::Scheduler::execute_tasks) re-sorts the
//! active set and refreshes it.
//!
//! ## Ordering
//! Ascending priority; ties keep the order in which tasks entered the active set.
//! The active set is appended to on activate/resume and sorted with a stable sort,
//! so no timestamps are needed to keep ties deterministic.
//!
//! ## Liveness
//! Each slot remembers the activation epoch it was taken with. A slot is live only
//! while its task is still `Active` **and** has not left `Active` since, so a task
//! paused (or paused and resumed) mid-pass is skipped for the rest of that pass.
//!
//! ```text
//! active: [B(2) A(1) C(1)] ──stable sort──► [A(1) C(1) B(2)]
//!                                              │     │     │
//! snapshot:                                  (A,e1)(C,e3)(B,e2)
//! ```

use std::cmp::Ordering;

use crate::core::handle::TaskId;
use crate::core::registry::{Entry, Registry};

/// One position of an execution pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct SnapshotSlot {
    pub id: TaskId,
    pub epoch: u64,
}

/// Cached, priority-ordered copy of the active set.
#[derive(Debug, Default)]
pub(crate) struct Snapshot {
    slots: Vec<SnapshotSlot>,
    dirty: bool,
}

/// Ordering rule for execution passes.
#[inline]
pub(crate) fn ascending_priority(a: &Entry, b: &Entry) -> Ordering {
    a.priority.cmp(&b.priority)
}

impl Snapshot {
    /// Marks the snapshot stale; the current pass keeps walking the old slots.
    #[inline]
    pub fn invalidate(&mut self) {
        self.dirty = true;
    }

    #[inline]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Re-sorts the active set and copies it. Returns `true` if a rebuild happened.
    pub fn refresh(&mut self, registry: &mut Registry) -> bool {
        if !self.dirty {
            return false;
        }
        registry.sort_active(ascending_priority);
        self.slots.clear();
        self.slots.extend(registry.active().iter().filter_map(|&id| {
            registry
                .get(id)
                .map(|entry| SnapshotSlot { id, epoch: entry.epoch })
        }));
        self.dirty = false;
        true
    }

    /// Drops every slot; used when the active set is empty.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.dirty = false;
    }

    /// Slot at `cursor`, if any.
    #[inline]
    pub fn get(&self, cursor: usize) -> Option<SnapshotSlot> {
        self.slots.get(cursor).copied()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn ids(&self) -> impl Iterator<Item = TaskId> + '_ {
        self.slots.iter().map(|s| s.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::handle::SchedulerId;
    use crate::core::Context;
    use crate::error::TaskError;
    use crate::tasks::{Priority, Task};

    struct P(Priority);

    impl Task for P {
        fn priority(&self) -> Priority {
            self.0
        }
        fn on_activate(&mut self, _: &mut Context<'_>) -> Result<(), TaskError> {
            Ok(())
        }
        fn on_terminate(&mut self, _: &mut Context<'_>) -> Result<(), TaskError> {
            Ok(())
        }
        fn execute(&mut self, _: &mut Context<'_>) -> Result<(), TaskError> {
            Ok(())
        }
    }

    #[test]
    fn test_refresh_sorts_stably() {
        let mut reg = Registry::new(SchedulerId::next(), 4);
        let a = reg.insert(Box::new(P(1))).unwrap();
        let b = reg.insert(Box::new(P(2))).unwrap();
        let c = reg.insert(Box::new(P(1))).unwrap();
        reg.activate(a);
        reg.activate(b);
        reg.activate(c);

        let mut snap = Snapshot::default();
        snap.invalidate();
        assert!(snap.refresh(&mut reg));
        assert!(!snap.is_dirty());
        assert_eq!(snap.ids().collect::<Vec<_>>(), vec![a, c, b]);
        assert_eq!(reg.active(), &[a, c, b]);
    }

    #[test]
    fn test_refresh_is_lazy() {
        let mut reg = Registry::new(SchedulerId::next(), 1);
        let a = reg.insert(Box::new(P(1))).unwrap();
        reg.activate(a);

        let mut snap = Snapshot::default();
        assert!(!snap.refresh(&mut reg));
        assert_eq!(snap.len(), 0);

        snap.invalidate();
        assert!(snap.refresh(&mut reg));
        assert_eq!(snap.len(), 1);
    }

    #[test]
    fn test_clear_empties_and_validates() {
        let mut reg = Registry::new(SchedulerId::next(), 1);
        let a = reg.insert(Box::new(P(0))).unwrap();
        reg.activate(a);

        let mut snap = Snapshot::default();
        snap.invalidate();
        snap.refresh(&mut reg);
        reg.terminate(a);
        snap.invalidate();

        snap.clear();
        assert_eq!(snap.len(), 0);
        assert!(!snap.is_dirty());
    }

    #[test]
    fn test_slots_carry_activation_epoch() {
        let mut reg = Registry::new(SchedulerId::next(), 1);
        let a = reg.insert(Box::new(P(0))).unwrap();
        reg.activate(a);

        let mut snap = Snapshot::default();
        snap.invalidate();
        snap.refresh(&mut reg);
        let slot = snap.get(0).unwrap();
        assert!(reg.is_live(slot.id, slot.epoch));

        reg.pause(a);
        reg.resume(a);
        assert!(!reg.is_live(slot.id, slot.epoch));
    }
}
