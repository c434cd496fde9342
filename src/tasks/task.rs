//! # Task abstraction.
//!
//! A [`Task`] is a named, prioritized unit of repeating work. Once registered in a
//! [`Scheduler`](crate::Scheduler) and activated, its per-cycle hook runs once per
//! call to [`Scheduler::execute_tasks`](crate::Scheduler::execute_tasks).
//!
//! Every hook receives a [`Context`] through which the task may drive the scheduler
//! that is calling it: pause a sibling, terminate itself, register helpers, etc.
//! Changes made this way apply to the registries immediately, while the order of the
//! current execution pass stays frozen until the next tick.

use std::fmt;

use crate::core::Context;
use crate::error::TaskError;
use crate::tasks::state::Priority;

/// # Cooperative, tick-driven unit of work.
///
/// `on_activate` and `on_terminate` are required; `on_paused` / `on_resumed`
/// default to no-ops. `execute` holds the actual work; `on_execute` is the
/// per-cycle entry point and simply forwards to `execute` unless a task type
/// wants to wrap it (see [`TimedTask`](crate::TimedTask)).
///
/// Hooks run synchronously on the caller's thread and must not block: a stalled
/// hook stalls the whole tick.
///
/// # Example
/// ```
/// use tickvisor::{Context, Scheduler, Task, TaskError};
///
/// struct Counter { ticks: u32 }
///
/// impl Task for Counter {
///     fn name(&self) -> &str { "counter" }
///
///     fn on_activate(&mut self, _ctx: &mut Context<'_>) -> Result<(), TaskError> {
///         self.ticks = 0;
///         Ok(())
///     }
///
///     fn on_terminate(&mut self, _ctx: &mut Context<'_>) -> Result<(), TaskError> {
///         Ok(())
///     }
///
///     fn execute(&mut self, ctx: &mut Context<'_>) -> Result<(), TaskError> {
///         self.ticks += 1;
///         if self.ticks == 3 {
///             ctx.terminate_self().map_err(|e| TaskError::fail(e.to_string()))?;
///         }
///         Ok(())
///     }
/// }
///
/// let mut scheduler = Scheduler::new();
/// let id = scheduler.register_task(Counter { ticks: 0 }).unwrap();
/// scheduler.activate_task(id).unwrap();
/// for _ in 0..5 {
///     scheduler.execute_tasks().unwrap();
/// }
/// assert_eq!(scheduler.executions(id), Some(3));
/// ```
pub trait Task: 'static {
    /// Manager-unique name; empty means anonymous.
    fn name(&self) -> &str {
        ""
    }

    /// Priority used when the task is registered.
    fn priority(&self) -> Priority {
        0
    }

    /// Called right after the task became `Active`.
    fn on_activate(&mut self, ctx: &mut Context<'_>) -> Result<(), TaskError>;

    /// Called right after the task became `Paused`.
    fn on_paused(&mut self, _ctx: &mut Context<'_>) -> Result<(), TaskError> {
        Ok(())
    }

    /// Called right after the task went from `Paused` back to `Active`.
    fn on_resumed(&mut self, _ctx: &mut Context<'_>) -> Result<(), TaskError> {
        Ok(())
    }

    /// Called right after the task went back to `Registered`.
    fn on_terminate(&mut self, ctx: &mut Context<'_>) -> Result<(), TaskError>;

    /// Per-cycle entry point used by the scheduler.
    fn on_execute(&mut self, ctx: &mut Context<'_>) -> Result<(), TaskError> {
        self.execute(ctx)
    }

    /// The task's work for one cycle.
    fn execute(&mut self, ctx: &mut Context<'_>) -> Result<(), TaskError>;
}

/// Hook invoked by the scheduler on a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hook {
    Activate,
    Paused,
    Resumed,
    Terminate,
    Execute,
}

impl Hook {
    pub(crate) fn call(
        self,
        task: &mut dyn Task,
        ctx: &mut Context<'_>,
    ) -> Result<(), TaskError> {
        match self {
            Hook::Activate => task.on_activate(ctx),
            Hook::Paused => task.on_paused(ctx),
            Hook::Resumed => task.on_resumed(ctx),
            Hook::Terminate => task.on_terminate(ctx),
            Hook::Execute => task.on_execute(ctx),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Hook::Activate => "on_activate",
            Hook::Paused => "on_paused",
            Hook::Resumed => "on_resumed",
            Hook::Terminate => "on_terminate",
            Hook::Execute => "on_execute",
        }
    }
}

impl fmt::Display for Hook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
