//! # tickvisor
//!
//! **Tickvisor** is a cooperative, priority-ordered task scheduler for Rust.
//!
//! Tasks are long-lived units of repeating work (input, physics, AI, audio...)
//! that run one cycle each time the application calls
//! [`Scheduler::execute_tasks`], typically once per frame. Everything happens on
//! the caller's thread; there is no preemption and no hidden runtime.
//!
//! ## Architecture
//! ### Overview
//! ```text
//!     ┌──────────────┐   ┌──────────────┐   ┌──────────────┐
//!     │  impl Task   │   │    TaskFn    │   │  TimedTask   │
//!     │ (user task)  │   │  (closures)  │   │  (wrapper)   │
//!     └──────┬───────┘   └──────┬───────┘   └──────┬───────┘
//!            ▼ register_task    ▼                  ▼
//! ┌───────────────────────────────────────────────────────────────────┐
//! │  Scheduler                                                        │
//! │  - Registry  (task arena, name index, active / paused sets)       │
//! │  - Snapshot  (priority-ordered view of the active set)            │
//! │  - SubscriberSet (synchronous event fan-out)                      │
//! └──────┬──────────────────┬──────────────────┬───────────────┬──────┘
//!        ▼ on_execute       ▼                  ▼               │
//!     ┌──────────────┐   ┌──────────────┐   ┌──────────────┐   │
//!     │  task (p=-1) │ → │  task (p=0)  │ → │  task (p=5)  │   │
//!     └┬─────────────┘   └┬─────────────┘   └┬─────────────┘   │
//!      │ &mut Context     │                  │                 │
//!      │ pause / resume / terminate / register other tasks     │
//!      ▼                                                       ▼
//! ┌───────────────────────────────────────────────────────────────────┐
//! │            Events ──► LogWriter, EventJournal, custom             │
//! └───────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ### Lifecycle
//! ```text
//!                 register_task
//!   Unregistered ──────────────► Registered ◄──────────────┐
//!        ▲                          │    ▲                 │ terminate_task
//!        │ unregister_task          │    │ terminate_task  │ (on_terminate)
//!        └──────────────────────────┘    │ (on_terminate)  │
//!                        activate_task   │                 │
//!                        (on_activate)   │                 │
//!                             ▼          │                 │
//!                           Active ──────┘     pause_task  │
//!                             │  ▲ ───────────────────► Paused
//!                             │  └──────────────────────  │
//!                             │        resume_task        │
//!                             ▼ on_execute once per tick
//! ```
//!
//! ## Features
//! | Area              | Description                                                  | Key types / traits                        |
//! |-------------------|--------------------------------------------------------------|-------------------------------------------|
//! | **Scheduling**    | Register, drive and run tasks once per tick.                 | [`Scheduler`], [`Context`], [`TaskId`]    |
//! | **Tasks**         | Define tasks as trait impls, closures or wrappers.           | [`Task`], [`TaskFn`], [`TimedTask`]       |
//! | **Subscriber API**| Observe lifecycle and diagnostics events.                    | [`Subscribe`], [`EventJournal`]           |
//! | **Policies**      | React to contract violations and failing tasks.              | [`ViolationPolicy`], [`FailurePolicy`]    |
//! | **Errors**        | Typed errors for lifecycle calls and hooks.                  | [`SchedulerError`], [`TaskError`]         |
//! | **Configuration** | Centralize scheduler settings.                               | [`SchedulerConfig`]                       |
//!
//! ## Optional features
//! - `logging`: exports the built-in [`LogWriter`] subscriber.
//! - `control`: console-style task control ([`ControlCommand`], [`Scheduler::control`]).
//!
//! ## Example
//! ```rust
//! use std::sync::Arc;
//! use tickvisor::{EventJournal, EventKind, Scheduler, SchedulerConfig, TaskFn, TaskState};
//!
//! let journal = Arc::new(EventJournal::new());
//! let mut scheduler = Scheduler::builder(SchedulerConfig::default())
//!     .with_subscriber(journal.clone())
//!     .build();
//!
//! let input = scheduler
//!     .register_task(TaskFn::new("input", |_| Ok(())).with_priority(-10))
//!     .unwrap();
//! let physics = scheduler
//!     .register_task(TaskFn::new("physics", |ctx| {
//!         // stop after the third frame
//!         if ctx.ticks() == 3 {
//!             ctx.terminate_self().map_err(|e| tickvisor::TaskError::fail(e.to_string()))?;
//!         }
//!         Ok(())
//!     }))
//!     .unwrap();
//!
//! scheduler.activate_task(input).unwrap();
//! scheduler.activate_task(physics).unwrap();
//! for _ in 0..5 {
//!     scheduler.execute_tasks().unwrap();
//! }
//!
//! assert_eq!(scheduler.state(physics), TaskState::Registered);
//! assert_eq!(scheduler.executions(input), Some(5));
//! assert_eq!(journal.count(EventKind::TaskTerminated), 1);
//! ```
mod core;
mod error;
mod events;
mod policies;
mod subscribers;
mod tasks;

// ---- Public re-exports ----

pub use core::{Context, Scheduler, SchedulerBuilder, SchedulerConfig, SchedulerId, TaskId};
pub use error::{SchedulerError, TaskError};
pub use events::{Event, EventKind};
pub use policies::{FailurePolicy, ViolationPolicy};
pub use subscribers::{EventJournal, Subscribe, SubscriberSet};
pub use tasks::{
    ChronicTask, Expiry, Hook, Operation, Priority, Task, TaskFn, TaskState, TimedTask, Trigger,
    Update, UpdateTask,
};

// Optional: console-style control of named tasks.
// Enable with: `--features control`
#[cfg(feature = "control")]
mod control;
#[cfg(feature = "control")]
pub use control::{ControlCommand, ControlError, ControlOutcome, ControlParseError};

// Optional: built-in logger subscriber.
// Enable with: `--features logging`
#[cfg(feature = "logging")]
pub use subscribers::LogWriter;
