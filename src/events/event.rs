//! # Scheduler events.
//!
//! The [`EventKind`] enum classifies event types across three categories:
//! - **Lifecycle events**: registration and state transitions of tasks
//! - **Execution events**: snapshot rebuilds and (optionally) per-task executions
//! - **Diagnostic events**: rejected calls and failing hooks
//!
//! The [`Event`] struct carries additional metadata such as timestamps, task name,
//! handle, priority and reasons.
//!
//! ## Ordering guarantees
//! Each event has a globally unique sequence number (`seq`) that increases monotonically.
//! Within one scheduler events are published synchronously, so `seq` order is also
//! the order in which things happened.
//!
//! ## Example
//! ```rust
//! use tickvisor::{Event, EventKind, TaskState};
//!
//! let ev = Event::new(EventKind::TaskPaused)
//!     .with_task("physics")
//!     .with_state(TaskState::Paused)
//!     .with_reason("menu opened");
//!
//! assert_eq!(ev.kind, EventKind::TaskPaused);
//! assert_eq!(ev.task.as_deref(), Some("physics"));
//! assert_eq!(ev.state, Some(TaskState::Paused));
//! ```

use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use std::sync::Arc;
use std::time::SystemTime;

use crate::core::TaskId;
use crate::tasks::{Priority, TaskState};

/// Global sequence counter for event ordering.
static EVENT_SEQ: AtomicU64 = AtomicU64::new(0);

/// Classification of scheduler events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    // === Lifecycle events ===
    /// Task entered the scheduler.
    ///
    /// Sets:
    /// - `task`, `id`, `priority`
    TaskRegistered,

    /// Task became `Active` (its `on_activate` runs right after).
    ///
    /// Sets:
    /// - `task`, `id`, `priority`, `state`
    TaskActivated,

    /// Task became `Paused`.
    ///
    /// Sets:
    /// - `task`, `id`, `state`
    TaskPaused,

    /// Task went from `Paused` back to `Active`.
    ///
    /// Sets:
    /// - `task`, `id`, `state`
    TaskResumed,

    /// Task went back to `Registered`.
    ///
    /// Sets:
    /// - `task`, `id`, `state`
    TaskTerminated,

    /// Task left the scheduler.
    ///
    /// Sets:
    /// - `task`, `id`, `state`
    TaskUnregistered,

    /// Task priority changed.
    ///
    /// Sets:
    /// - `task`, `id`, `priority` (new value)
    PriorityChanged,

    // === Execution events ===
    /// Execution snapshot was rebuilt at the start of a pass.
    ///
    /// Sets:
    /// - `reason`: number of slots, e.g. `"slots=3"`
    SnapshotRebuilt,

    /// Per-cycle hook of a task ran (only with `emit_execution_events`).
    ///
    /// Sets:
    /// - `task`, `id`
    TaskExecuted,

    // === Diagnostic events ===
    /// A hook returned an error.
    ///
    /// Sets:
    /// - `task`, `id`, `reason`: hook name and error message
    HookFailed,

    /// A lifecycle call was rejected.
    ///
    /// Sets:
    /// - `task` (when known), `reason`: error message
    ContractViolation,
}

/// Scheduler event with optional metadata.
///
/// - `seq`: monotonic global sequence for ordering
/// - `at`: wall-clock timestamp (for logs)
/// - other optional fields are set depending on the [`EventKind`]
#[derive(Debug, Clone)]
pub struct Event {
    /// Globally unique, monotonically increasing sequence number.
    pub seq: u64,
    /// Wall-clock timestamp.
    pub at: SystemTime,
    /// Event classification.
    pub kind: EventKind,
    /// Task label (name, or handle for anonymous tasks).
    pub task: Option<Arc<str>>,
    /// Task handle.
    pub id: Option<TaskId>,
    /// Task priority.
    pub priority: Option<Priority>,
    /// State the task is in after the event.
    pub state: Option<TaskState>,
    /// Human-readable reason (errors, counters, etc.).
    pub reason: Option<Arc<str>>,
}

impl Event {
    /// Creates a new event of the given kind with current timestamp and next sequence number.
    pub fn new(kind: EventKind) -> Self {
        Self {
            seq: EVENT_SEQ.fetch_add(1, AtomicOrdering::Relaxed),
            at: SystemTime::now(),
            kind,
            task: None,
            id: None,
            priority: None,
            state: None,
            reason: None,
        }
    }

    /// Attaches a task label.
    #[inline]
    pub fn with_task(mut self, task: impl Into<Arc<str>>) -> Self {
        self.task = Some(task.into());
        self
    }

    /// Attaches a task handle.
    #[inline]
    pub fn with_id(mut self, id: TaskId) -> Self {
        self.id = Some(id);
        self
    }

    /// Attaches a priority.
    #[inline]
    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Attaches the resulting state.
    #[inline]
    pub fn with_state(mut self, state: TaskState) -> Self {
        self.state = Some(state);
        self
    }

    /// Attaches a human-readable reason.
    #[inline]
    pub fn with_reason(mut self, reason: impl Into<Arc<str>>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    /// True for events describing a state transition.
    #[inline]
    pub fn is_transition(&self) -> bool {
        matches!(
            self.kind,
            EventKind::TaskActivated
                | EventKind::TaskPaused
                | EventKind::TaskResumed
                | EventKind::TaskTerminated
        )
    }

    #[inline]
    pub fn is_diagnostic(&self) -> bool {
        matches!(self.kind, EventKind::HookFailed | EventKind::ContractViolation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seq_is_monotonic() {
        let a = Event::new(EventKind::TaskRegistered);
        let b = Event::new(EventKind::TaskRegistered);
        assert!(b.seq > a.seq);
    }

    #[test]
    fn test_classification() {
        assert!(Event::new(EventKind::TaskResumed).is_transition());
        assert!(!Event::new(EventKind::TaskRegistered).is_transition());
        assert!(Event::new(EventKind::ContractViolation).is_diagnostic());
        assert!(!Event::new(EventKind::SnapshotRebuilt).is_diagnostic());
    }
}
