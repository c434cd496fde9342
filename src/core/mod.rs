//! Scheduler core: task arena, lifecycle and execution passes.
//!
//! The only public API from this module is [`Scheduler`] with its [`Context`],
//! handles, configuration and builder.
//!
//! Internal modules:
//! - [`registry`]: task arena, lifecycle sets and the name index;
//! - [`snapshot`]: priority-ordered view of the active set walked by one pass;
//! - [`scheduler`]: validation, hook dispatch and execution passes;
//! - [`context`]: scheduler access handed to running hooks;
//! - [`handle`]: generation-checked task handles.

mod builder;
mod config;
mod context;
mod handle;
mod registry;
mod scheduler;
mod snapshot;

pub use builder::SchedulerBuilder;
pub use config::SchedulerConfig;
pub use context::Context;
pub use handle::{SchedulerId, TaskId};
pub use scheduler::Scheduler;
