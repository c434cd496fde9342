//! Stable handles for schedulers and the tasks they own.
//!
//! A [`TaskId`] is `{scheduler, index, generation}`. The index addresses a slot in
//! the owning scheduler's arena; the generation is bumped whenever that slot is
//! vacated, so handles kept after `unregister` simply stop resolving instead of
//! pointing at whatever task reuses the slot.

use std::fmt;
use std::sync::atomic::{AtomicU32, Ordering};

/// Global counter for scheduler identities.
static SCHEDULER_SEQ: AtomicU32 = AtomicU32::new(1);

/// Process-unique identity of a [`Scheduler`](crate::Scheduler).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SchedulerId(u32);

impl SchedulerId {
    pub(crate) fn next() -> Self {
        SchedulerId(SCHEDULER_SEQ.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for SchedulerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "scheduler-{}", self.0)
    }
}

/// Handle to a task registered in a scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskId {
    pub(crate) scheduler: SchedulerId,
    pub(crate) index: u32,
    pub(crate) generation: u32,
}

impl TaskId {
    /// Scheduler that issued this handle.
    #[inline]
    pub fn scheduler(&self) -> SchedulerId {
        self.scheduler
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}v{}@{}", self.index, self.generation, self.scheduler.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scheduler_ids_are_unique() {
        let a = SchedulerId::next();
        let b = SchedulerId::next();
        assert_ne!(a, b);
    }

    #[test]
    fn test_task_id_display() {
        let id = TaskId {
            scheduler: SchedulerId(7),
            index: 3,
            generation: 2,
        };
        assert_eq!(id.to_string(), "#3v2@7");
        assert_eq!(id.scheduler(), SchedulerId(7));
    }
}
