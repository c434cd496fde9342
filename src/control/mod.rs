//! # Console-style task control.
//!
//! Text commands addressed to a task by name, as a debug console would issue
//! them: `physics pause`, `ai resume`, `music state`.
//!
//! A command that does not fit the task's current state is **not** an error
//! here: it comes back as [`ControlOutcome::Rejected`] and nothing changes, so a
//! console can print it and carry on. Unknown names fail with
//! [`ControlError::NotFound`].
//!
//! ## Example
//! ```rust
//! use tickvisor::{ControlCommand, ControlOutcome, Scheduler, TaskFn, TaskState};
//!
//! let mut scheduler = Scheduler::new();
//! scheduler.register_task(TaskFn::new("physics", |_| Ok(()))).unwrap();
//!
//! let cmd: ControlCommand = "start".parse().unwrap();
//! let out = scheduler.control("physics", cmd).unwrap();
//! assert_eq!(out.state(), TaskState::Active);
//!
//! let out = scheduler.control("physics", ControlCommand::Resume).unwrap();
//! assert!(matches!(out, ControlOutcome::Rejected { actual: TaskState::Active, .. }));
//! ```

mod command;
mod error;

use std::fmt;

pub use command::ControlCommand;
pub use error::{ControlError, ControlParseError};

use crate::core::{Scheduler, TaskId};
use crate::tasks::{Operation, TaskState};

/// Result of a control command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControlOutcome {
    /// Transition performed; `state` is the new state.
    Applied { task: TaskId, state: TaskState },
    /// Command does not fit the current state; nothing changed.
    Rejected {
        task: TaskId,
        operation: Operation,
        actual: TaskState,
        expected: &'static [TaskState],
    },
    /// Current state, for `state`.
    Report { task: TaskId, state: TaskState },
}

impl ControlOutcome {
    /// State of the task after the command.
    pub fn state(&self) -> TaskState {
        match self {
            ControlOutcome::Applied { state, .. } | ControlOutcome::Report { state, .. } => *state,
            ControlOutcome::Rejected { actual, .. } => *actual,
        }
    }

    pub fn is_applied(&self) -> bool {
        matches!(self, ControlOutcome::Applied { .. })
    }
}

impl fmt::Display for ControlOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ControlOutcome::Applied { state, .. } => write!(f, "ok: now {state}"),
            ControlOutcome::Rejected {
                operation,
                actual,
                expected,
                ..
            } => write!(f, "cannot {operation}: state is {actual}, needs one of {expected:?}"),
            ControlOutcome::Report { state, .. } => write!(f, "{state}"),
        }
    }
}

impl Scheduler {
    /// Applies a control command to the task registered under `name`.
    pub fn control(
        &mut self,
        name: &str,
        command: ControlCommand,
    ) -> Result<ControlOutcome, ControlError> {
        let task = self.lookup_task(name).ok_or_else(|| ControlError::NotFound {
            name: name.to_string(),
        })?;
        let actual = self.state(task);

        let Some(operation) = command.operation() else {
            return Ok(ControlOutcome::Report { task, state: actual });
        };
        if !operation.permits(actual) {
            tracing::debug!(task = name, %operation, state = %actual, "control command rejected");
            return Ok(ControlOutcome::Rejected {
                task,
                operation,
                actual,
                expected: operation.allowed_from(),
            });
        }

        match command {
            ControlCommand::Start => self.activate_task(task)?,
            ControlCommand::Pause => self.pause_task(task)?,
            ControlCommand::Resume => self.resume_task(task)?,
            ControlCommand::Stop => self.terminate_task(task)?,
            ControlCommand::State => {}
        }
        Ok(ControlOutcome::Applied {
            task,
            state: self.state(task),
        })
    }
}
