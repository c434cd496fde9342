//! # Subsystem adapter (`UpdateTask`)
//!
//! Many subsystems (input queues, clocks, timer managers) only need a periodic
//! "advance one step" call. [`UpdateTask`] runs such a subsystem as a task so its
//! place in the tick is decided by priority like everything else.

use std::cell::RefCell;
use std::rc::Rc;

use crate::core::Context;
use crate::error::TaskError;
use crate::tasks::state::Priority;
use crate::tasks::task::Task;

/// Something advanced once per tick.
pub trait Update {
    fn update(&mut self) -> Result<(), TaskError>;
}

impl<S: Update> Update for Rc<RefCell<S>> {
    fn update(&mut self) -> Result<(), TaskError> {
        self.try_borrow_mut()
            .map_err(|_| TaskError::fail("subsystem is already borrowed"))?
            .update()
    }
}

/// Task forwarding each cycle to [`Update::update`].
///
/// ```
/// use std::cell::RefCell;
/// use std::rc::Rc;
/// use tickvisor::{Scheduler, TaskError, Update, UpdateTask};
///
/// #[derive(Default)]
/// struct Clock { now: u64 }
///
/// impl Update for Clock {
///     fn update(&mut self) -> Result<(), TaskError> {
///         self.now += 16;
///         Ok(())
///     }
/// }
///
/// let clock = Rc::new(RefCell::new(Clock::default()));
/// let mut scheduler = Scheduler::new();
/// let id = scheduler
///     .register_task(UpdateTask::new("clock", Rc::clone(&clock)).with_priority(-100))
///     .unwrap();
/// scheduler.activate_task(id).unwrap();
/// scheduler.execute_tasks().unwrap();
/// assert_eq!(clock.borrow().now, 16);
/// ```
pub struct UpdateTask<S> {
    name: String,
    priority: Priority,
    subsystem: S,
}

impl<S: Update + 'static> UpdateTask<S> {
    pub fn new(name: impl Into<String>, subsystem: S) -> Self {
        Self {
            name: name.into(),
            priority: 0,
            subsystem,
        }
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn subsystem(&self) -> &S {
        &self.subsystem
    }
}

impl<S: Update + 'static> Task for UpdateTask<S> {
    fn name(&self) -> &str {
        &self.name
    }

    fn priority(&self) -> Priority {
        self.priority
    }

    fn on_activate(&mut self, _ctx: &mut Context<'_>) -> Result<(), TaskError> {
        Ok(())
    }

    fn on_terminate(&mut self, _ctx: &mut Context<'_>) -> Result<(), TaskError> {
        Ok(())
    }

    fn execute(&mut self, _ctx: &mut Context<'_>) -> Result<(), TaskError> {
        self.subsystem.update()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Scheduler;
    use crate::error::SchedulerError;

    struct Flaky {
        calls: u32,
    }

    impl Update for Flaky {
        fn update(&mut self) -> Result<(), TaskError> {
            self.calls += 1;
            if self.calls == 2 {
                return Err(TaskError::fail("queue overflow"));
            }
            Ok(())
        }
    }

    #[test]
    fn test_update_error_surfaces_as_hook_failure() {
        let sub = Rc::new(RefCell::new(Flaky { calls: 0 }));
        let mut scheduler = Scheduler::new();
        let id = scheduler
            .register_task(UpdateTask::new("input", Rc::clone(&sub)))
            .unwrap();
        scheduler.activate_task(id).unwrap();

        scheduler.execute_tasks().unwrap();
        let err = scheduler.execute_tasks().unwrap_err();
        assert!(matches!(err, SchedulerError::Hook { ref task, .. } if task == "input"));
        assert_eq!(sub.borrow().calls, 2);
    }
}
