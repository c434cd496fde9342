//! # Function-backed task (`TaskFn`)
//!
//! [`TaskFn`] wraps a closure `FnMut(&mut Context<'_>) -> Result<(), TaskError>` as
//! the task's per-cycle work. The lifecycle hooks default to no-ops and can be
//! replaced one by one with the `on_*` builder methods.
//!
//! Closures own their state; share it with the rest of the program through
//! `Rc<RefCell<..>>` explicitly when needed.
//!
//! ## Example
//! ```rust
//! use tickvisor::{Scheduler, TaskFn, TaskState};
//!
//! let mut remaining = 2;
//! let task = TaskFn::new("countdown", move |ctx| {
//!     remaining -= 1;
//!     if remaining == 0 {
//!         ctx.terminate_self().map_err(|e| tickvisor::TaskError::fail(e.to_string()))?;
//!     }
//!     Ok(())
//! })
//! .with_priority(5);
//!
//! let mut scheduler = Scheduler::new();
//! let id = scheduler.register_task(task).unwrap();
//! scheduler.activate_task(id).unwrap();
//! scheduler.execute_tasks().unwrap();
//! scheduler.execute_tasks().unwrap();
//! assert_eq!(scheduler.state(id), TaskState::Registered);
//! ```

use std::borrow::Cow;
use std::fmt;

use crate::core::Context;
use crate::error::TaskError;
use crate::tasks::state::Priority;
use crate::tasks::task::Task;

type HookFn = Box<dyn FnMut(&mut Context<'_>) -> Result<(), TaskError>>;

/// Function-backed task implementation.
pub struct TaskFn {
    name: Cow<'static, str>,
    priority: Priority,
    exec: HookFn,
    activate: Option<HookFn>,
    paused: Option<HookFn>,
    resumed: Option<HookFn>,
    terminate: Option<HookFn>,
}

impl TaskFn {
    /// Creates a task running `exec` once per cycle. An empty name is anonymous.
    pub fn new<F>(name: impl Into<Cow<'static, str>>, exec: F) -> Self
    where
        F: FnMut(&mut Context<'_>) -> Result<(), TaskError> + 'static,
    {
        Self {
            name: name.into(),
            priority: 0,
            exec: Box::new(exec),
            activate: None,
            paused: None,
            resumed: None,
            terminate: None,
        }
    }

    /// Creates an anonymous task.
    pub fn anonymous<F>(exec: F) -> Self
    where
        F: FnMut(&mut Context<'_>) -> Result<(), TaskError> + 'static,
    {
        Self::new("", exec)
    }

    /// Sets the priority used at registration.
    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn on_activate<F>(mut self, f: F) -> Self
    where
        F: FnMut(&mut Context<'_>) -> Result<(), TaskError> + 'static,
    {
        self.activate = Some(Box::new(f));
        self
    }

    pub fn on_paused<F>(mut self, f: F) -> Self
    where
        F: FnMut(&mut Context<'_>) -> Result<(), TaskError> + 'static,
    {
        self.paused = Some(Box::new(f));
        self
    }

    pub fn on_resumed<F>(mut self, f: F) -> Self
    where
        F: FnMut(&mut Context<'_>) -> Result<(), TaskError> + 'static,
    {
        self.resumed = Some(Box::new(f));
        self
    }

    pub fn on_terminate<F>(mut self, f: F) -> Self
    where
        F: FnMut(&mut Context<'_>) -> Result<(), TaskError> + 'static,
    {
        self.terminate = Some(Box::new(f));
        self
    }

    /// Boxes the task for [`Scheduler::register_boxed`](crate::Scheduler::register_boxed).
    pub fn boxed(self) -> Box<dyn Task> {
        Box::new(self)
    }
}

fn run(hook: &mut Option<HookFn>, ctx: &mut Context<'_>) -> Result<(), TaskError> {
    match hook {
        Some(f) => f(ctx),
        None => Ok(()),
    }
}

impl Task for TaskFn {
    fn name(&self) -> &str {
        &self.name
    }

    fn priority(&self) -> Priority {
        self.priority
    }

    fn on_activate(&mut self, ctx: &mut Context<'_>) -> Result<(), TaskError> {
        run(&mut self.activate, ctx)
    }

    fn on_paused(&mut self, ctx: &mut Context<'_>) -> Result<(), TaskError> {
        run(&mut self.paused, ctx)
    }

    fn on_resumed(&mut self, ctx: &mut Context<'_>) -> Result<(), TaskError> {
        run(&mut self.resumed, ctx)
    }

    fn on_terminate(&mut self, ctx: &mut Context<'_>) -> Result<(), TaskError> {
        run(&mut self.terminate, ctx)
    }

    fn execute(&mut self, ctx: &mut Context<'_>) -> Result<(), TaskError> {
        (self.exec)(ctx)
    }
}

impl fmt::Debug for TaskFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TaskFn")
            .field("name", &self.name)
            .field("priority", &self.priority)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::core::Scheduler;

    #[test]
    fn test_hooks_run_in_lifecycle_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let push = |tag: &'static str| {
            let log = Rc::clone(&log);
            move |_: &mut Context<'_>| {
                log.borrow_mut().push(tag);
                Ok(())
            }
        };

        let task = TaskFn::new("t", push("exec"))
            .on_activate(push("activate"))
            .on_paused(push("paused"))
            .on_resumed(push("resumed"))
            .on_terminate(push("terminate"));

        let mut scheduler = Scheduler::new();
        let id = scheduler.register_task(task).unwrap();
        scheduler.activate_task(id).unwrap();
        scheduler.execute_tasks().unwrap();
        scheduler.pause_task(id).unwrap();
        scheduler.execute_tasks().unwrap();
        scheduler.resume_task(id).unwrap();
        scheduler.terminate_task(id).unwrap();

        assert_eq!(
            *log.borrow(),
            vec!["activate", "exec", "paused", "resumed", "terminate"]
        );
    }

    #[test]
    fn test_anonymous_has_empty_name() {
        let task = TaskFn::anonymous(|_| Ok(())).with_priority(-3);
        assert_eq!(task.name(), "");
        assert_eq!(task.priority(), -3);
    }
}
