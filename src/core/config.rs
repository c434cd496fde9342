//! # Scheduler configuration.
//!
//! Provides [`SchedulerConfig`] centralized settings for one [`Scheduler`](crate::Scheduler).
//!
//! Config is used in two ways:
//! 1. **Direct creation**: `Scheduler::with_config(config)`
//! 2. **Builder**: `Scheduler::builder(config).with_subscribers(subs).build()`

use crate::policies::{FailurePolicy, ViolationPolicy};

/// Configuration for a scheduler instance.
///
/// ## Field semantics
/// - `violations`: reaction to rejected lifecycle calls
/// - `failures`: reaction to a failing task during an execution pass
/// - `capacity`: expected number of tasks (pre-allocation only, not a limit)
/// - `emit_execution_events`: publish one `TaskExecuted` event per task per tick
#[derive(Clone, Debug)]
pub struct SchedulerConfig {
    /// Policy for contract violations.
    pub violations: ViolationPolicy,

    /// Policy for hook failures inside an execution pass.
    pub failures: FailurePolicy,

    /// Number of tasks to pre-allocate room for.
    pub capacity: usize,

    /// Publish `EventKind::TaskExecuted` for every per-cycle hook.
    ///
    /// Off by default: at one event per task per tick this is the noisiest
    /// stream the scheduler can produce.
    pub emit_execution_events: bool,
}

impl SchedulerConfig {
    /// Default configuration with violations turned into panics.
    pub fn strict() -> Self {
        Self {
            violations: ViolationPolicy::Panic,
            ..Self::default()
        }
    }
}

impl Default for SchedulerConfig {
    /// Default configuration:
    ///
    /// - `violations = ViolationPolicy::Report`
    /// - `failures = FailurePolicy::Abort`
    /// - `capacity = 16`
    /// - `emit_execution_events = false`
    fn default() -> Self {
        Self {
            violations: ViolationPolicy::default(),
            failures: FailurePolicy::default(),
            capacity: 16,
            emit_execution_events: false,
        }
    }
}
