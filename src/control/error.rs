use thiserror::Error;

use crate::error::SchedulerError;

/// Error returned when parsing a [`ControlCommand`](crate::ControlCommand).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ControlParseError {
    #[error("unknown command {word:?}")]
    UnknownCommand { word: String },
}

/// Error returned by [`Scheduler::control`](crate::Scheduler::control).
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum ControlError {
    /// No registered task has this name.
    #[error("no task named {name:?}")]
    NotFound { name: String },

    /// The transition happened but a hook failed, or the call was rejected.
    #[error(transparent)]
    Scheduler(#[from] SchedulerError),
}

impl ControlError {
    pub fn as_label(&self) -> &'static str {
        match self {
            ControlError::NotFound { .. } => "control_not_found",
            ControlError::Scheduler(err) => err.as_label(),
        }
    }
}
