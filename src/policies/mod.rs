//! Scheduler policies.
//!
//! This module groups the knobs that control **how** the scheduler reacts when
//! something goes wrong.
//!
//! ## Contents
//! - [`ViolationPolicy`] what a rejected lifecycle call does (report / panic)
//! - [`FailurePolicy`]   what an execution pass does after a task failed (abort / continue)
//!
//! ## Quick wiring
//! ```text
//! SchedulerConfig { violations: ViolationPolicy, failures: FailurePolicy, .. }
//!      └─► core::Scheduler uses:
//!           - violations when validation rejects a call
//!           - failures while walking the execution snapshot
//! ```
//!
//! ## Defaults
//! - `ViolationPolicy::Report` (errors are returned, never build-profile dependent).
//! - `FailurePolicy::Abort` (the first failing task ends the pass).

mod failure;
mod violation;

pub use failure::FailurePolicy;
pub use violation::ViolationPolicy;
