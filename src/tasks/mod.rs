//! # Task abstractions.
//!
//! This module provides the task-related types:
//! - [`Task`] - trait for cooperative, tick-driven tasks
//! - [`TaskState`] / [`Operation`] - lifecycle states and the transitions between them
//! - [`TaskFn`] - closure-backed task
//! - [`UpdateTask`] - runs an [`Update`] subsystem as a task
//! - [`TimedTask`] / [`ChronicTask`] - [`Trigger`]-driven wrappers

mod state;
mod task;
mod task_fn;
mod timed;
mod trigger;
mod update;

pub use state::{Operation, Priority, TaskState};
pub use task::{Hook, Task};
pub use task_fn::TaskFn;
pub use timed::{ChronicTask, Expiry, TimedTask};
pub use trigger::Trigger;
pub use update::{Update, UpdateTask};
