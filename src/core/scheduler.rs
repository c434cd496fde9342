//! # Scheduler: owns registered tasks and runs them once per tick.
//!
//! The [`Scheduler`] keeps the task arena and lifecycle sets, validates every
//! transition, notifies tasks through their hooks and publishes [`Event`]s.
//!
//! ## Key responsibilities
//! - register / unregister tasks and keep the name index unique
//! - move tasks through `Registered → Active ⇄ Paused → Registered`
//! - walk the priority-ordered execution snapshot once per [`execute_tasks`](Scheduler::execute_tasks)
//! - stay consistent when hooks call back into it through their [`Context`]
//!
//! ## Execution pass
//! ```text
//! execute_tasks()
//!   ├─ active set empty?            → return (fast path)
//!   ├─ snapshot dirty?              → stable-sort active set, copy (id, epoch) slots
//!   └─ for slot in snapshot:
//!        ├─ task left Active since? → skip
//!        └─ dispatch(on_execute)
//!              └─ hooks may pause/terminate/activate anything:
//!                 registries change now, snapshot is only marked dirty
//! ```
//!
//! ## Hook dispatch
//! A task's behavior is taken out of the arena while one of its hooks runs. Hooks
//! addressed to a task that is currently out (e.g. a task terminating itself from
//! `execute`) are queued on its entry and delivered right after the running hook
//! returns, so every committed transition is still notified, in order.
//!
//! ## Example
//! ```rust
//! use std::cell::RefCell;
//! use std::rc::Rc;
//! use tickvisor::{Scheduler, TaskFn};
//!
//! let order = Rc::new(RefCell::new(Vec::new()));
//! let mut scheduler = Scheduler::new();
//!
//! for (name, priority) in [("a", 1), ("b", 2), ("c", 1)] {
//!     let order = Rc::clone(&order);
//!     let task = TaskFn::new(name, move |_ctx| {
//!         order.borrow_mut().push(name);
//!         Ok(())
//!     })
//!     .with_priority(priority);
//!     let id = scheduler.register_task(task).unwrap();
//!     scheduler.activate_task(id).unwrap();
//! }
//!
//! scheduler.execute_tasks().unwrap();
//! assert_eq!(*order.borrow(), vec!["a", "c", "b"]);
//! ```

use std::fmt;

use crate::core::builder::SchedulerBuilder;
use crate::core::config::SchedulerConfig;
use crate::core::context::Context;
use crate::core::handle::{SchedulerId, TaskId};
use crate::core::registry::Registry;
use crate::core::snapshot::Snapshot;
use crate::error::{SchedulerError, TaskError};
use crate::events::{Event, EventKind};
use crate::policies::FailurePolicy;
use crate::subscribers::SubscriberSet;
use crate::tasks::{Hook, Operation, Priority, Task, TaskState};

/// Cooperative, single-threaded task scheduler.
///
/// Not `Send`: tasks may hold `Rc`/`RefCell` state, and the whole model is one
/// thread calling [`execute_tasks`](Self::execute_tasks) once per tick.
pub struct Scheduler {
    id: SchedulerId,
    cfg: SchedulerConfig,
    registry: Registry,
    snapshot: Snapshot,
    subscribers: SubscriberSet,
    ticks: u64,
}

impl Scheduler {
    /// Creates a scheduler with the default configuration and no subscribers.
    pub fn new() -> Self {
        Self::with_config(SchedulerConfig::default())
    }

    /// Creates a scheduler with the given configuration and no subscribers.
    pub fn with_config(cfg: SchedulerConfig) -> Self {
        Self::from_parts(cfg, SubscriberSet::default())
    }

    /// Returns a builder for a scheduler with subscribers.
    pub fn builder(cfg: SchedulerConfig) -> SchedulerBuilder {
        SchedulerBuilder::new(cfg)
    }

    pub(crate) fn from_parts(cfg: SchedulerConfig, subscribers: SubscriberSet) -> Self {
        let id = SchedulerId::next();
        tracing::debug!(scheduler = %id, subscribers = subscribers.len(), "scheduler created");
        Self {
            id,
            registry: Registry::new(id, cfg.capacity),
            snapshot: Snapshot::default(),
            subscribers,
            ticks: 0,
            cfg,
        }
    }

    /// Identity of this scheduler.
    #[inline]
    pub fn id(&self) -> SchedulerId {
        self.id
    }

    #[inline]
    pub fn config(&self) -> &SchedulerConfig {
        &self.cfg
    }

    // ---------------------------
    // Driving surface
    // ---------------------------

    /// Moves a task into the scheduler. The task starts `Registered`.
    ///
    /// Fails with [`SchedulerError::NameConflict`] if a task with the same
    /// non-empty name is already registered; the scheduler is left unchanged.
    pub fn register_task<T: Task>(&mut self, task: T) -> Result<TaskId, SchedulerError> {
        self.register_boxed(Box::new(task))
    }

    /// Same as [`register_task`](Self::register_task) for an already boxed task.
    pub fn register_boxed(&mut self, task: Box<dyn Task>) -> Result<TaskId, SchedulerError> {
        let id = self.registry.insert(task).map_err(|err| self.reject(err))?;
        let (label, priority) = self.describe(id);
        tracing::debug!(scheduler = %self.id, task = %label, priority, "task registered");
        self.publish(|| {
            Event::new(EventKind::TaskRegistered)
                .with_task(label.as_str())
                .with_id(id)
                .with_priority(priority)
                .with_state(TaskState::Registered)
        });
        Ok(id)
    }

    /// `Registered → Active`, then `on_activate`.
    pub fn activate_task(&mut self, id: TaskId) -> Result<(), SchedulerError> {
        self.validate(id, Operation::Activate)?;
        self.registry.activate(id);
        self.snapshot.invalidate();
        self.transitioned(id, EventKind::TaskActivated);
        self.dispatch(id, Hook::Activate)
    }

    /// `Active → Paused`, then `on_paused`.
    pub fn pause_task(&mut self, id: TaskId) -> Result<(), SchedulerError> {
        self.validate(id, Operation::Pause)?;
        self.registry.pause(id);
        self.snapshot.invalidate();
        self.transitioned(id, EventKind::TaskPaused);
        self.dispatch(id, Hook::Paused)
    }

    /// `Paused → Active`, then `on_resumed`.
    pub fn resume_task(&mut self, id: TaskId) -> Result<(), SchedulerError> {
        self.validate(id, Operation::Resume)?;
        self.registry.resume(id);
        self.snapshot.invalidate();
        self.transitioned(id, EventKind::TaskResumed);
        self.dispatch(id, Hook::Resumed)
    }

    /// `Active | Paused → Registered`, then `on_terminate`.
    pub fn terminate_task(&mut self, id: TaskId) -> Result<(), SchedulerError> {
        self.validate(id, Operation::Terminate)?;
        if self.registry.terminate(id) == Some(TaskState::Active) {
            self.snapshot.invalidate();
        }
        self.transitioned(id, EventKind::TaskTerminated);
        self.dispatch(id, Hook::Terminate)
    }

    /// Removes a task from the scheduler and hands it back.
    ///
    /// An `Active` or `Paused` task is terminated first. If its `on_terminate`
    /// fails, the task stays `Registered` and the hook error is returned; calling
    /// `unregister_task` again then completes without running hooks.
    pub fn unregister_task(&mut self, id: TaskId) -> Result<Box<dyn Task>, SchedulerError> {
        self.validate(id, Operation::Unregister)?;
        self.ensure_idle(id)?;

        if self.registry.state(id).is_running() {
            self.wind_down(id)?;
            self.ensure_idle(id)?;
        }

        let Some(entry) = self.registry.remove(id) else {
            return Err(self.reject(SchedulerError::Ownership {
                task: id.to_string(),
                owner: None,
            }));
        };

        let label = entry.label(id);
        tracing::debug!(scheduler = %self.id, task = %label, "task unregistered");
        self.publish(|| {
            Event::new(EventKind::TaskUnregistered)
                .with_task(label.as_str())
                .with_id(id)
                .with_state(TaskState::Unregistered)
        });

        entry.task.ok_or(SchedulerError::TaskBusy { task: label })
    }

    /// Changes the priority of a registered task.
    ///
    /// No-op if unchanged. For an `Active` task the new order applies from the
    /// next execution pass; otherwise it is picked up on the next activation.
    pub fn change_task_priority(
        &mut self,
        id: TaskId,
        priority: Priority,
    ) -> Result<(), SchedulerError> {
        self.validate(id, Operation::ChangePriority)?;
        let Some(entry) = self.registry.get_mut(id) else {
            return Ok(());
        };
        if entry.priority == priority {
            return Ok(());
        }
        entry.priority = priority;
        let active = entry.state == TaskState::Active;
        let label = entry.label(id);
        if active {
            self.snapshot.invalidate();
        }

        tracing::debug!(scheduler = %self.id, task = %label, priority, "task priority changed");
        self.publish(|| {
            Event::new(EventKind::PriorityChanged)
                .with_task(label.as_str())
                .with_id(id)
                .with_priority(priority)
        });
        Ok(())
    }

    /// Registered task with the given non-empty name.
    pub fn lookup_task(&self, name: &str) -> Option<TaskId> {
        self.registry.lookup(name)
    }

    /// Runs one execution pass: every `Active` task's per-cycle hook, in
    /// ascending priority order.
    ///
    /// Changes made by hooks during the pass apply to the registries at once;
    /// tasks that leave `Active` are skipped for the rest of the pass, new order
    /// and newly activated tasks take effect on the next call.
    pub fn execute_tasks(&mut self) -> Result<(), SchedulerError> {
        self.ticks += 1;
        if self.registry.active().is_empty() {
            self.snapshot.clear();
            return Ok(());
        }

        if self.snapshot.refresh(&mut self.registry) {
            let slots = self.snapshot.len();
            tracing::trace!(scheduler = %self.id, slots, "execution snapshot rebuilt");
            self.publish(|| {
                Event::new(EventKind::SnapshotRebuilt).with_reason(format!("slots={slots}"))
            });
        }

        tracing::trace!(scheduler = %self.id, tick = self.ticks, "execution pass");
        let mut first_error = None;
        let mut cursor = 0;
        while let Some(slot) = self.snapshot.get(cursor) {
            cursor += 1;
            if !self.registry.is_live(slot.id, slot.epoch) {
                continue;
            }
            if let Err(err) = self.run_cycle(slot.id) {
                match self.cfg.failures {
                    FailurePolicy::Abort => return Err(err),
                    FailurePolicy::Continue => {
                        first_error.get_or_insert(err);
                    }
                }
            }
        }

        match first_error {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    /// Terminates every `Active` and `Paused` task.
    ///
    /// All states change first, then each task's `on_terminate` runs once.
    /// Registration and the name index are untouched. Every hook runs even if
    /// an earlier one fails; the first failure is returned.
    ///
    /// Tasks started again by those hooks are terminated too, so no task is
    /// `Active` or `Paused` on return.
    pub fn terminate_all_tasks(&mut self) -> Result<(), SchedulerError> {
        let batch = self.running_tasks();
        if batch.is_empty() {
            return Ok(());
        }

        for &id in &batch {
            if self.registry.terminate(id) == Some(TaskState::Active) {
                self.snapshot.invalidate();
            }
            self.transitioned(id, EventKind::TaskTerminated);
        }

        let mut first_error = None;
        for id in batch {
            // an earlier hook of this batch may have started it again
            let result = if self.registry.state(id).is_running() {
                self.wind_down(id)
            } else {
                self.dispatch(id, Hook::Terminate)
            };
            if let Err(err) = result {
                first_error.get_or_insert(err);
            }
        }
        for id in self.running_tasks() {
            if let Err(err) = self.wind_down(id) {
                first_error.get_or_insert(err);
            }
        }
        for id in self.running_tasks() {
            self.force_stop(id);
        }

        match first_error {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    /// Terminates everything, then unregisters every task.
    ///
    /// Returns the tasks in registration order. If an `on_terminate` hook fails
    /// the scheduler is still emptied, the tasks are dropped and the first hook
    /// error is returned.
    pub fn unregister_all_tasks(&mut self) -> Result<Vec<Box<dyn Task>>, SchedulerError> {
        let terminated = self.terminate_all_tasks();

        let ids = self.registry.registered().to_vec();
        let mut tasks = Vec::with_capacity(ids.len());
        for id in ids {
            let Some(entry) = self.registry.remove(id) else {
                continue;
            };
            let label = entry.label(id);
            tracing::debug!(scheduler = %self.id, task = %label, "task unregistered");
            self.publish(|| {
                Event::new(EventKind::TaskUnregistered)
                    .with_task(label.as_str())
                    .with_id(id)
                    .with_state(TaskState::Unregistered)
            });
            if let Some(task) = entry.task {
                tasks.push(task);
            }
        }
        self.snapshot.invalidate();

        terminated.map(|()| tasks)
    }

    // ---------------------------
    // Queries
    // ---------------------------

    /// Current state; handles from other schedulers or stale handles read as `Unregistered`.
    pub fn state(&self, id: TaskId) -> TaskState {
        self.registry.state(id)
    }

    /// True if `id` resolves to a task registered here.
    pub fn owns(&self, id: TaskId) -> bool {
        self.registry.get(id).is_some()
    }

    pub fn priority(&self, id: TaskId) -> Option<Priority> {
        self.registry.get(id).map(|e| e.priority)
    }

    /// Name of a registered task (empty for anonymous tasks).
    pub fn name(&self, id: TaskId) -> Option<&str> {
        self.registry.get(id).map(|e| &*e.name)
    }

    /// Number of times the task's per-cycle hook ran while registered here.
    pub fn executions(&self, id: TaskId) -> Option<u64> {
        self.registry.get(id).map(|e| e.executions)
    }

    /// Active tasks; in execution order as of the last rebuild, later
    /// activations appended.
    pub fn active_tasks(&self) -> &[TaskId] {
        self.registry.active()
    }

    pub fn paused_tasks(&self) -> &[TaskId] {
        self.registry.paused()
    }

    /// All registered tasks, in registration order.
    pub fn registered_tasks(&self) -> &[TaskId] {
        self.registry.registered()
    }

    pub fn active_count(&self) -> usize {
        self.registry.active().len()
    }

    pub fn paused_count(&self) -> usize {
        self.registry.paused().len()
    }

    pub fn registered_count(&self) -> usize {
        self.registry.registered().len()
    }

    /// Number of entries in the name index.
    pub fn named_count(&self) -> usize {
        self.registry.named_count()
    }

    /// True when the next pass will rebuild its execution order.
    pub fn is_snapshot_dirty(&self) -> bool {
        self.snapshot.is_dirty()
    }

    /// Task order of the most recent execution pass; empty once a pass found
    /// no active task.
    pub fn execution_order(&self) -> Vec<TaskId> {
        self.snapshot.ids().collect()
    }

    /// Number of `execute_tasks` calls so far.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    // ---------------------------
    // Helpers
    // ---------------------------

    /// Ownership + source-state check; nothing is mutated.
    fn check(&self, id: TaskId, op: Operation) -> Result<(), SchedulerError> {
        let entry = self.registry.resolve(id)?;
        if !op.permits(entry.state) {
            return Err(SchedulerError::InvalidState {
                task: entry.label(id),
                operation: op,
                expected: op.allowed_from(),
                actual: entry.state,
            });
        }
        Ok(())
    }

    fn validate(&self, id: TaskId, op: Operation) -> Result<(), SchedulerError> {
        self.check(id, op).map_err(|err| self.reject(err))
    }

    /// Fails if the task is in the middle of one of its own hooks.
    fn ensure_idle(&self, id: TaskId) -> Result<(), SchedulerError> {
        match self.registry.get(id) {
            Some(entry) if entry.is_checked_out() => Err(self.reject(SchedulerError::TaskBusy {
                task: entry.label(id),
            })),
            _ => Ok(()),
        }
    }

    fn running_tasks(&self) -> Vec<TaskId> {
        self.registry
            .active()
            .iter()
            .chain(self.registry.paused())
            .copied()
            .collect()
    }

    /// Terminates a running task so it can leave the scheduler. A task its own
    /// `on_terminate` started again is stopped without a second notification.
    fn wind_down(&mut self, id: TaskId) -> Result<(), SchedulerError> {
        let result = self.terminate_task(id);
        if self.registry.state(id).is_running() {
            self.force_stop(id);
        }
        result
    }

    /// `Active | Paused → Registered` without running `on_terminate`.
    fn force_stop(&mut self, id: TaskId) {
        let (label, _) = self.describe(id);
        tracing::warn!(scheduler = %self.id, task = %label, "task restarted during teardown; stopped without on_terminate");
        if self.registry.terminate(id) == Some(TaskState::Active) {
            self.snapshot.invalidate();
        }
        self.transitioned(id, EventKind::TaskTerminated);
    }

    /// Reports a contract violation according to [`ViolationPolicy`](crate::ViolationPolicy).
    fn reject(&self, err: SchedulerError) -> SchedulerError {
        tracing::warn!(scheduler = %self.id, label = err.as_label(), "{err}");
        self.publish(|| {
            let ev = Event::new(EventKind::ContractViolation).with_reason(err.to_string());
            match err.task() {
                Some(task) => ev.with_task(task),
                None => ev,
            }
        });
        if self.cfg.violations.halts() {
            panic!("tickvisor contract violation: {err}");
        }
        err
    }

    fn describe(&self, id: TaskId) -> (String, Priority) {
        self.registry
            .get(id)
            .map(|e| (e.label(id), e.priority))
            .unwrap_or_else(|| (id.to_string(), 0))
    }

    fn transitioned(&self, id: TaskId, kind: EventKind) {
        let (label, priority) = self.describe(id);
        let state = self.registry.state(id);
        tracing::debug!(scheduler = %self.id, task = %label, %state, "task transition");
        self.publish(|| {
            Event::new(kind)
                .with_task(label.as_str())
                .with_id(id)
                .with_priority(priority)
                .with_state(state)
        });
    }

    fn publish(&self, make: impl FnOnce() -> Event) {
        if !self.subscribers.is_empty() {
            self.subscribers.emit(&make());
        }
    }

    /// Per-cycle hook of one task.
    fn run_cycle(&mut self, id: TaskId) -> Result<(), SchedulerError> {
        if let Some(entry) = self.registry.get_mut(id) {
            entry.executions += 1;
        }
        let result = self.dispatch(id, Hook::Execute);

        if self.cfg.emit_execution_events {
            let (label, _) = self.describe(id);
            self.publish(|| {
                Event::new(EventKind::TaskExecuted)
                    .with_task(label.as_str())
                    .with_id(id)
            });
        }

        if let Err(SchedulerError::Hook { source, .. }) = &result {
            if source.is_fatal() && self.registry.state(id).is_running() {
                if let Err(err) = self.terminate_task(id) {
                    tracing::error!(scheduler = %self.id, error = %err, "terminating fatally failed task");
                }
            }
        }
        result
    }

    /// Runs `hook` on the task, or queues it if the task is busy in another hook.
    fn dispatch(&mut self, id: TaskId, hook: Hook) -> Result<(), SchedulerError> {
        let Some(entry) = self.registry.get_mut(id) else {
            return Ok(());
        };
        let Some(mut task) = entry.task.take() else {
            if hook != Hook::Execute {
                entry.pending.push_back(hook);
            }
            return Ok(());
        };

        let mut result = self.invoke(id, task.as_mut(), hook);
        while let Some(next) = self.registry.get_mut(id).and_then(|e| e.pending.pop_front()) {
            let queued = self.invoke(id, task.as_mut(), next);
            if result.is_ok() {
                result = queued;
            }
        }

        if let Some(entry) = self.registry.get_mut(id) {
            entry.task = Some(task);
        }
        result
    }

    fn invoke(&mut self, id: TaskId, task: &mut dyn Task, hook: Hook) -> Result<(), SchedulerError> {
        let outcome = {
            let mut ctx = Context::new(self, id);
            hook.call(task, &mut ctx)
        };
        outcome.map_err(|source| self.hook_failed(id, hook, source))
    }

    fn hook_failed(&self, id: TaskId, hook: Hook, source: TaskError) -> SchedulerError {
        let (label, _) = self.describe(id);
        tracing::error!(scheduler = %self.id, task = %label, %hook, error = %source, "hook failed");
        self.publish(|| {
            Event::new(EventKind::HookFailed)
                .with_task(label.as_str())
                .with_id(id)
                .with_reason(format!("{hook}: {}", source.as_message()))
        });
        SchedulerError::Hook {
            task: label,
            hook,
            source,
        }
    }
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Scheduler {
    fn drop(&mut self) {
        if self.registry.registered().is_empty() {
            return;
        }
        if let Err(err) = self.unregister_all_tasks() {
            tracing::error!(scheduler = %self.id, error = %err, "teardown hook failed");
        }
    }
}

impl fmt::Debug for Scheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scheduler")
            .field("id", &self.id)
            .field("registered", &self.registry.registered().len())
            .field("active", &self.registry.active().len())
            .field("paused", &self.registry.paused().len())
            .field("dirty", &self.snapshot.is_dirty())
            .field("ticks", &self.ticks)
            .finish()
    }
}
