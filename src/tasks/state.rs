//! # Lifecycle states and the operations that move tasks between them.
//!
//! ```text
//!                 register            activate
//!  Unregistered ───────────► Registered ───────► Active ◄──┐
//!       ▲                     │   ▲                 │      │ resume
//!       └─────────────────────┘   │ terminate       │pause │
//!              unregister         ├─────────────────┤      │
//!                                 │                 ▼      │
//!                                 └────────────── Paused ──┘
//! ```
//!
//! Any transition not drawn above fails with
//! [`SchedulerError::InvalidState`](crate::SchedulerError::InvalidState).

use std::fmt;

/// Task priority. Lower values run first within an execution pass.
pub type Priority = i32;

/// Lifecycle state of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskState {
    /// Not owned by any scheduler.
    Unregistered,
    /// Owned by a scheduler but not running.
    Registered,
    /// Executed once per tick.
    Active,
    /// Kept registered and loaded, skipped by execution passes.
    Paused,
}

impl TaskState {
    /// True for `Active` and `Paused`.
    #[inline]
    pub fn is_running(self) -> bool {
        matches!(self, TaskState::Active | TaskState::Paused)
    }

    /// Short uppercase name used in console output.
    pub fn as_str(self) -> &'static str {
        match self {
            TaskState::Unregistered => "UNREGISTERED",
            TaskState::Registered => "REGISTERED",
            TaskState::Active => "ACTIVE",
            TaskState::Paused => "PAUSED",
        }
    }
}

impl fmt::Display for TaskState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifecycle operation requested on a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Activate,
    Pause,
    Resume,
    Terminate,
    Unregister,
    ChangePriority,
}

impl Operation {
    /// States from which this operation is allowed.
    pub fn allowed_from(self) -> &'static [TaskState] {
        match self {
            Operation::Activate => &[TaskState::Registered],
            Operation::Pause => &[TaskState::Active],
            Operation::Resume => &[TaskState::Paused],
            Operation::Terminate => &[TaskState::Active, TaskState::Paused],
            Operation::Unregister | Operation::ChangePriority => {
                &[TaskState::Registered, TaskState::Active, TaskState::Paused]
            }
        }
    }

    /// Returns `true` if the operation may start from `state`.
    #[inline]
    pub fn permits(self, state: TaskState) -> bool {
        self.allowed_from().contains(&state)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Operation::Activate => "activate",
            Operation::Pause => "pause",
            Operation::Resume => "resume",
            Operation::Terminate => "terminate",
            Operation::Unregister => "unregister",
            Operation::ChangePriority => "change priority of",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_machine_edges() {
        assert!(Operation::Activate.permits(TaskState::Registered));
        assert!(!Operation::Activate.permits(TaskState::Active));
        assert!(!Operation::Activate.permits(TaskState::Paused));

        assert!(Operation::Pause.permits(TaskState::Active));
        assert!(!Operation::Pause.permits(TaskState::Paused));

        assert!(Operation::Resume.permits(TaskState::Paused));
        assert!(!Operation::Resume.permits(TaskState::Active));

        assert!(Operation::Terminate.permits(TaskState::Active));
        assert!(Operation::Terminate.permits(TaskState::Paused));
        assert!(!Operation::Terminate.permits(TaskState::Registered));
    }

    #[test]
    fn test_nothing_starts_from_unregistered() {
        for op in [
            Operation::Activate,
            Operation::Pause,
            Operation::Resume,
            Operation::Terminate,
            Operation::Unregister,
            Operation::ChangePriority,
        ] {
            assert!(!op.permits(TaskState::Unregistered), "{op}");
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(TaskState::Paused.to_string(), "PAUSED");
        assert_eq!(Operation::Terminate.to_string(), "terminate");
        assert!(TaskState::Paused.is_running());
        assert!(!TaskState::Registered.is_running());
    }
}
