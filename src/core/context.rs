//! # Hook context.
//!
//! [`Context`] is what a task sees of the scheduler while one of its hooks runs.
//! It exposes the lifecycle surface (register, activate, pause, resume, terminate,
//! unregister, reprioritize, lookup) but not the driving calls
//! (`execute_tasks`, `terminate_all_tasks`, `unregister_all_tasks`), which only
//! the owner of the [`Scheduler`] may make.
//!
//! Calls made through a context follow the same validation as direct calls and
//! apply immediately; a running execution pass only picks up the new order on the
//! next tick.

use crate::core::handle::{SchedulerId, TaskId};
use crate::core::scheduler::Scheduler;
use crate::error::SchedulerError;
use crate::tasks::{Priority, Task, TaskState};

/// Scheduler access handed to task hooks.
pub struct Context<'a> {
    scheduler: &'a mut Scheduler,
    this: TaskId,
}

impl<'a> Context<'a> {
    pub(crate) fn new(scheduler: &'a mut Scheduler, this: TaskId) -> Self {
        Self { scheduler, this }
    }

    /// Handle of the task whose hook is running.
    #[inline]
    pub fn this(&self) -> TaskId {
        self.this
    }

    #[inline]
    pub fn scheduler_id(&self) -> SchedulerId {
        self.scheduler.id()
    }

    pub fn register<T: Task>(&mut self, task: T) -> Result<TaskId, SchedulerError> {
        self.scheduler.register_task(task)
    }

    pub fn activate(&mut self, id: TaskId) -> Result<(), SchedulerError> {
        self.scheduler.activate_task(id)
    }

    pub fn pause(&mut self, id: TaskId) -> Result<(), SchedulerError> {
        self.scheduler.pause_task(id)
    }

    pub fn resume(&mut self, id: TaskId) -> Result<(), SchedulerError> {
        self.scheduler.resume_task(id)
    }

    pub fn terminate(&mut self, id: TaskId) -> Result<(), SchedulerError> {
        self.scheduler.terminate_task(id)
    }

    /// Unregisters another task. Fails with [`SchedulerError::TaskBusy`] for the
    /// calling task itself.
    pub fn unregister(&mut self, id: TaskId) -> Result<Box<dyn Task>, SchedulerError> {
        self.scheduler.unregister_task(id)
    }

    pub fn set_priority(&mut self, id: TaskId, priority: Priority) -> Result<(), SchedulerError> {
        self.scheduler.change_task_priority(id, priority)
    }

    pub fn lookup(&self, name: &str) -> Option<TaskId> {
        self.scheduler.lookup_task(name)
    }

    pub fn state(&self, id: TaskId) -> TaskState {
        self.scheduler.state(id)
    }

    pub fn priority(&self, id: TaskId) -> Option<Priority> {
        self.scheduler.priority(id)
    }

    pub fn name(&self, id: TaskId) -> Option<&str> {
        self.scheduler.name(id)
    }

    /// Pauses the calling task; `on_paused` runs once the current hook returns.
    pub fn pause_self(&mut self) -> Result<(), SchedulerError> {
        self.scheduler.pause_task(self.this)
    }

    /// Terminates the calling task; `on_terminate` runs once the current hook returns.
    pub fn terminate_self(&mut self) -> Result<(), SchedulerError> {
        self.scheduler.terminate_task(self.this)
    }

    pub fn set_own_priority(&mut self, priority: Priority) -> Result<(), SchedulerError> {
        self.scheduler.change_task_priority(self.this, priority)
    }

    /// Number of `execute_tasks` calls so far, the current one included.
    pub fn ticks(&self) -> u64 {
        self.scheduler.ticks()
    }
}
