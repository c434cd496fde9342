//! # Execution-pass failure policy.
//!
//! [`FailurePolicy`] decides what an execution pass does after a task's per-cycle
//! hook reports an error. Either way the error reaches the caller of
//! [`Scheduler::execute_tasks`](crate::Scheduler::execute_tasks); only the fate of
//! the remaining slots differs.
//!
//! ```text
//! pass: [A] [B: Err] [C] [D]
//!   Abort    → A, B            → Err(B)
//!   Continue → A, B, C, D      → Err(B)   (first error wins)
//! ```

/// Policy for the rest of a pass once a task failed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    /// Stop the pass at the failing task (default).
    #[default]
    Abort,
    /// Run the remaining tasks, then report the first failure.
    Continue,
}
