//! Error types used by the tickvisor scheduler and its tasks.
//!
//! This module defines two main error enums:
//!
//! - [`SchedulerError`]: contract violations detected by the scheduler, plus
//!   wrapped hook failures.
//! - [`TaskError`]: errors reported by a task's own hooks.
//!
//! Both types provide helper methods (`as_label`, `as_message`) for logging/metrics.
//!
//! ## Failure semantics
//! Every lifecycle operation validates ownership and the required source state
//! **before** touching any registry. A rejected call leaves the scheduler exactly
//! as it was. Hook failures are different: the transition is committed first and
//! the hook runs second, so a [`SchedulerError::Hook`] always describes a task
//! that already sits in its new state.

use thiserror::Error;

use crate::core::SchedulerId;
use crate::tasks::{Hook, Operation, TaskState};

/// # Errors produced by the scheduler.
///
/// The first five variants are programmer-contract violations: they are never
/// retried and indicate a defect in the driving application.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum SchedulerError {
    /// Operation is forbidden from the task's current lifecycle state.
    #[error("cannot {operation} task {task}: state is {actual}, expected one of {expected:?}")]
    InvalidState {
        /// Task label (name, or handle for anonymous tasks).
        task: String,
        /// Attempted operation.
        operation: Operation,
        /// States from which the operation is allowed.
        expected: &'static [TaskState],
        /// State the task was actually in.
        actual: TaskState,
    },

    /// Task handle belongs to another scheduler, or to none at all.
    #[error("task {task} is not owned by this scheduler (owner: {})", owner_label(.owner))]
    Ownership {
        /// Task label.
        task: String,
        /// Scheduler currently owning the task, if any.
        owner: Option<SchedulerId>,
    },

    /// A task with the same non-empty name is already registered.
    #[error("task name {name:?} is already registered")]
    NameConflict {
        /// Conflicting name.
        name: String,
    },

    /// Argument is unusable (e.g. an absent task reference).
    ///
    /// Not produced by this crate's typed API, where a task reference cannot be
    /// absent; available to wrappers that accept untyped input.
    #[error("invalid argument: {reason}")]
    InvalidArgument {
        /// What was wrong with the argument.
        reason: String,
    },

    /// Task is running one of its own hooks and cannot be moved out of the scheduler.
    #[error("task {task} is busy running a hook")]
    TaskBusy {
        /// Task label.
        task: String,
    },

    /// A task hook reported a failure after its transition was committed.
    #[error("task {task} failed in {hook}: {source}")]
    Hook {
        /// Task label.
        task: String,
        /// Hook that failed.
        hook: Hook,
        /// Failure reported by the task.
        #[source]
        source: TaskError,
    },
}

impl SchedulerError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use tickvisor::SchedulerError;
    ///
    /// let err = SchedulerError::NameConflict { name: "physics".into() };
    /// assert_eq!(err.as_label(), "scheduler_name_conflict");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            SchedulerError::InvalidState { .. } => "scheduler_invalid_state",
            SchedulerError::Ownership { .. } => "scheduler_ownership",
            SchedulerError::NameConflict { .. } => "scheduler_name_conflict",
            SchedulerError::InvalidArgument { .. } => "scheduler_invalid_argument",
            SchedulerError::TaskBusy { .. } => "scheduler_task_busy",
            SchedulerError::Hook { .. } => "scheduler_hook_failed",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            SchedulerError::InvalidState {
                task,
                operation,
                expected,
                actual,
            } => format!("{operation} {task}: actual={actual} expected={expected:?}"),
            SchedulerError::Ownership { task, owner } => match owner {
                Some(owner) => format!("task {task} owned by {owner}"),
                None => format!("task {task} is unregistered"),
            },
            SchedulerError::NameConflict { name } => format!("duplicate name: {name}"),
            SchedulerError::InvalidArgument { reason } => format!("invalid argument: {reason}"),
            SchedulerError::TaskBusy { task } => format!("task {task} is running a hook"),
            SchedulerError::Hook { task, hook, source } => {
                format!("{hook} of {task}: {}", source.as_message())
            }
        }
    }

    /// True for contract violations (everything except wrapped hook failures).
    pub fn is_violation(&self) -> bool {
        !matches!(self, SchedulerError::Hook { .. })
    }

    /// Label of the task the error is about, if any.
    pub fn task(&self) -> Option<&str> {
        match self {
            SchedulerError::InvalidState { task, .. }
            | SchedulerError::Ownership { task, .. }
            | SchedulerError::TaskBusy { task }
            | SchedulerError::Hook { task, .. } => Some(task),
            SchedulerError::NameConflict { name } => Some(name),
            SchedulerError::InvalidArgument { .. } => None,
        }
    }
}

fn owner_label(owner: &Option<SchedulerId>) -> String {
    owner.map_or_else(|| "none".to_string(), |o| o.to_string())
}

/// # Errors reported by task hooks.
///
/// Returned from [`Task`](crate::Task) hooks. The scheduler wraps them into
/// [`SchedulerError::Hook`] and propagates them to the caller.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TaskError {
    /// Hook failed; the task stays in whatever state it was moved to.
    #[error("execution failed: {error}")]
    Fail {
        /// The underlying error message.
        error: String,
    },

    /// Non-recoverable failure. When returned from the per-cycle hook the
    /// scheduler terminates the task before propagating.
    #[error("fatal error: {error}")]
    Fatal {
        /// The underlying error message.
        error: String,
    },
}

impl TaskError {
    /// Shorthand for [`TaskError::Fail`].
    pub fn fail(error: impl Into<String>) -> Self {
        TaskError::Fail {
            error: error.into(),
        }
    }

    /// Shorthand for [`TaskError::Fatal`].
    pub fn fatal(error: impl Into<String>) -> Self {
        TaskError::Fatal {
            error: error.into(),
        }
    }

    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use tickvisor::TaskError;
    ///
    /// assert_eq!(TaskError::fail("boom").as_label(), "task_failed");
    /// assert_eq!(TaskError::fatal("boom").as_label(), "task_fatal");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            TaskError::Fail { .. } => "task_failed",
            TaskError::Fatal { .. } => "task_fatal",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            TaskError::Fail { error } => format!("error: {error}"),
            TaskError::Fatal { error } => format!("fatal: {error}"),
        }
    }

    /// Indicates whether the scheduler should terminate the task.
    pub fn is_fatal(&self) -> bool {
        matches!(self, TaskError::Fatal { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels_are_stable() {
        let err = SchedulerError::InvalidState {
            task: "ai".into(),
            operation: Operation::Pause,
            expected: Operation::Pause.allowed_from(),
            actual: TaskState::Registered,
        };
        assert_eq!(err.as_label(), "scheduler_invalid_state");
        assert!(err.is_violation());

        let hook = SchedulerError::Hook {
            task: "ai".into(),
            hook: Hook::Execute,
            source: TaskError::fail("boom"),
        };
        assert_eq!(hook.as_label(), "scheduler_hook_failed");
        assert!(!hook.is_violation());
    }

    #[test]
    fn test_invalid_state_message_names_states() {
        let err = SchedulerError::InvalidState {
            task: "ai".into(),
            operation: Operation::Resume,
            expected: Operation::Resume.allowed_from(),
            actual: TaskState::Active,
        };
        let text = err.to_string();
        assert!(text.contains("resume"), "{text}");
        assert!(text.contains("ai"), "{text}");
        assert!(text.contains("ACTIVE"), "{text}");
        assert!(text.contains("Paused"), "{text}");
    }

    #[test]
    fn test_ownership_without_owner() {
        let err = SchedulerError::Ownership {
            task: "ghost".into(),
            owner: None,
        };
        assert!(err.to_string().contains("owner: none"));
        assert_eq!(err.as_message(), "task ghost is unregistered");
    }

    #[test]
    fn test_invalid_argument_has_no_task() {
        let err = SchedulerError::InvalidArgument {
            reason: "missing task".into(),
        };
        assert_eq!(err.as_label(), "scheduler_invalid_argument");
        assert_eq!(err.task(), None);
        assert!(err.is_violation());
        assert_eq!(err.to_string(), "invalid argument: missing task");
    }

    #[test]
    fn test_task_error_fatality() {
        assert!(TaskError::fatal("x").is_fatal());
        assert!(!TaskError::fail("x").is_fatal());
        assert_eq!(TaskError::fail("x").as_message(), "error: x");
    }
}
