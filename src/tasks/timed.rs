//! # Trigger-driven task wrappers.
//!
//! - [`TimedTask`] runs its inner task every cycle **until** the trigger fires,
//!   then pauses (or terminates) itself on the next cycle.
//! - [`ChronicTask`] runs its inner task **only** on cycles following a firing,
//!   once per firing.
//!
//! The wrappers only look at the [`Trigger`]; whatever fires it (a frame clock,
//! a timer subsystem driven by an [`UpdateTask`](crate::UpdateTask)) is up to the
//! application. Firings that arrive while the wrapper is not `Active` are dropped
//! when it is activated or resumed.
//!
//! ```text
//! tick:      1     2     3   fire   4          5
//! Timed:   exec  exec  exec   ──►  pause()    (skipped)
//! Chronic:  -     -     -     ──►  exec        -
//! ```

use crate::core::Context;
use crate::error::{SchedulerError, TaskError};
use crate::tasks::state::Priority;
use crate::tasks::task::Task;
use crate::tasks::trigger::Trigger;

fn self_transition(result: Result<(), SchedulerError>) -> Result<(), TaskError> {
    result.map_err(|e| TaskError::fail(e.to_string()))
}

/// What a [`TimedTask`] does once its time is up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Expiry {
    /// Pause; a later resume starts a new period.
    #[default]
    Pause,
    /// Terminate; a later activation starts a new period.
    Terminate,
}

/// Runs the inner task until its trigger fires.
///
/// ```
/// use tickvisor::{Expiry, Scheduler, TaskFn, TaskState, TimedTask, Trigger};
///
/// let trigger = Trigger::new();
/// let task = TimedTask::new(TaskFn::new("warmup", |_| Ok(())), trigger.clone())
///     .with_expiry(Expiry::Terminate);
///
/// let mut scheduler = Scheduler::new();
/// let id = scheduler.register_task(task).unwrap();
/// scheduler.activate_task(id).unwrap();
///
/// scheduler.execute_tasks().unwrap();
/// trigger.fire();
/// scheduler.execute_tasks().unwrap();
/// assert_eq!(scheduler.state(id), TaskState::Registered);
/// assert_eq!(scheduler.executions(id), Some(2));
/// ```
pub struct TimedTask<T> {
    inner: T,
    trigger: Trigger,
    expiry: Expiry,
}

impl<T: Task> TimedTask<T> {
    pub fn new(inner: T, trigger: Trigger) -> Self {
        Self {
            inner,
            trigger,
            expiry: Expiry::Pause,
        }
    }

    pub fn with_expiry(mut self, expiry: Expiry) -> Self {
        self.expiry = expiry;
        self
    }

    pub fn trigger(&self) -> &Trigger {
        &self.trigger
    }

    pub fn inner(&self) -> &T {
        &self.inner
    }

    pub fn into_inner(self) -> T {
        self.inner
    }
}

impl<T: Task> Task for TimedTask<T> {
    fn name(&self) -> &str {
        self.inner.name()
    }

    fn priority(&self) -> Priority {
        self.inner.priority()
    }

    fn on_activate(&mut self, ctx: &mut Context<'_>) -> Result<(), TaskError> {
        self.trigger.reset();
        self.inner.on_activate(ctx)
    }

    fn on_paused(&mut self, ctx: &mut Context<'_>) -> Result<(), TaskError> {
        self.inner.on_paused(ctx)
    }

    fn on_resumed(&mut self, ctx: &mut Context<'_>) -> Result<(), TaskError> {
        self.trigger.reset();
        self.inner.on_resumed(ctx)
    }

    fn on_terminate(&mut self, ctx: &mut Context<'_>) -> Result<(), TaskError> {
        self.inner.on_terminate(ctx)
    }

    fn on_execute(&mut self, ctx: &mut Context<'_>) -> Result<(), TaskError> {
        if !self.trigger.take() {
            return self.inner.on_execute(ctx);
        }
        match self.expiry {
            Expiry::Pause => self_transition(ctx.pause_self()),
            Expiry::Terminate => self_transition(ctx.terminate_self()),
        }
    }

    fn execute(&mut self, ctx: &mut Context<'_>) -> Result<(), TaskError> {
        self.inner.execute(ctx)
    }
}

/// Runs the inner task once per trigger firing.
pub struct ChronicTask<T> {
    inner: T,
    trigger: Trigger,
}

impl<T: Task> ChronicTask<T> {
    pub fn new(inner: T, trigger: Trigger) -> Self {
        Self { inner, trigger }
    }

    pub fn trigger(&self) -> &Trigger {
        &self.trigger
    }

    pub fn into_inner(self) -> T {
        self.inner
    }
}

impl<T: Task> Task for ChronicTask<T> {
    fn name(&self) -> &str {
        self.inner.name()
    }

    fn priority(&self) -> Priority {
        self.inner.priority()
    }

    fn on_activate(&mut self, ctx: &mut Context<'_>) -> Result<(), TaskError> {
        self.trigger.reset();
        self.inner.on_activate(ctx)
    }

    fn on_paused(&mut self, ctx: &mut Context<'_>) -> Result<(), TaskError> {
        self.inner.on_paused(ctx)
    }

    fn on_resumed(&mut self, ctx: &mut Context<'_>) -> Result<(), TaskError> {
        self.trigger.reset();
        self.inner.on_resumed(ctx)
    }

    fn on_terminate(&mut self, ctx: &mut Context<'_>) -> Result<(), TaskError> {
        self.inner.on_terminate(ctx)
    }

    fn on_execute(&mut self, ctx: &mut Context<'_>) -> Result<(), TaskError> {
        if self.trigger.take() {
            self.inner.on_execute(ctx)
        } else {
            Ok(())
        }
    }

    fn execute(&mut self, ctx: &mut Context<'_>) -> Result<(), TaskError> {
        self.inner.execute(ctx)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::*;
    use crate::core::Scheduler;
    use crate::tasks::{TaskFn, TaskState};

    fn counting(name: &'static str) -> (TaskFn, Rc<Cell<u32>>) {
        let runs = Rc::new(Cell::new(0));
        let seen = Rc::clone(&runs);
        let task = TaskFn::new(name, move |_| {
            seen.set(seen.get() + 1);
            Ok(())
        });
        (task, runs)
    }

    #[test]
    fn test_timed_pauses_on_cycle_after_firing() {
        let (inner, runs) = counting("timed");
        let trigger = Trigger::new();
        let mut scheduler = Scheduler::new();
        let id = scheduler
            .register_task(TimedTask::new(inner, trigger.clone()))
            .unwrap();
        scheduler.activate_task(id).unwrap();

        scheduler.execute_tasks().unwrap();
        scheduler.execute_tasks().unwrap();
        trigger.fire();
        scheduler.execute_tasks().unwrap();

        assert_eq!(runs.get(), 2);
        assert_eq!(scheduler.state(id), TaskState::Paused);
        assert!(!trigger.is_fired());
    }

    #[test]
    fn test_timed_resume_discards_stale_firing() {
        let (inner, runs) = counting("timed");
        let trigger = Trigger::new();
        let mut scheduler = Scheduler::new();
        let id = scheduler
            .register_task(TimedTask::new(inner, trigger.clone()))
            .unwrap();
        scheduler.activate_task(id).unwrap();
        scheduler.pause_task(id).unwrap();

        trigger.fire();
        scheduler.resume_task(id).unwrap();
        scheduler.execute_tasks().unwrap();

        assert_eq!(runs.get(), 1);
        assert_eq!(scheduler.state(id), TaskState::Active);
    }

    #[test]
    fn test_chronic_runs_once_per_firing() {
        let (inner, runs) = counting("chronic");
        let trigger = Trigger::new();
        let mut scheduler = Scheduler::new();
        let id = scheduler
            .register_task(ChronicTask::new(inner, trigger.clone()))
            .unwrap();
        scheduler.activate_task(id).unwrap();

        scheduler.execute_tasks().unwrap();
        assert_eq!(runs.get(), 0);

        trigger.fire();
        scheduler.execute_tasks().unwrap();
        scheduler.execute_tasks().unwrap();
        assert_eq!(runs.get(), 1);
        assert_eq!(scheduler.executions(id), Some(3));
    }
}
