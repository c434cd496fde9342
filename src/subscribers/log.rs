//! # LogWriter: event printer on top of `tracing`
//!
//! A minimal subscriber that turns scheduler [`Event`]s into `tracing` records.
//! Install any `tracing` subscriber (e.g. `tracing_subscriber::fmt`) to see them.
//!
//! ## Example output
//! ```text
//! INFO tickvisor: [registered] task="physics" priority=10
//! INFO tickvisor: [activated] task="physics" priority=10
//! INFO tickvisor: [paused] task="physics"
//! WARN tickvisor: [violation] task="ghost" reason="task #3v1@1 is not owned by this scheduler (owner: none)"
//! ```

use crate::events::{Event, EventKind};
use crate::subscribers::Subscribe;

/// Event writer subscriber.
#[derive(Default)]
pub struct LogWriter;

impl LogWriter {
    /// Construct a new [`LogWriter`].
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Subscribe for LogWriter {
    fn on_event(&self, e: &Event) {
        let task = e.task.as_deref().unwrap_or("-");
        let reason = e.reason.as_deref().unwrap_or("-");
        match e.kind {
            EventKind::TaskRegistered => {
                tracing::info!(target: "tickvisor", "[registered] task={task:?} priority={:?}", e.priority);
            }
            EventKind::TaskActivated => {
                tracing::info!(target: "tickvisor", "[activated] task={task:?} priority={:?}", e.priority);
            }
            EventKind::TaskPaused => {
                tracing::info!(target: "tickvisor", "[paused] task={task:?}");
            }
            EventKind::TaskResumed => {
                tracing::info!(target: "tickvisor", "[resumed] task={task:?}");
            }
            EventKind::TaskTerminated => {
                tracing::info!(target: "tickvisor", "[terminated] task={task:?}");
            }
            EventKind::TaskUnregistered => {
                tracing::info!(target: "tickvisor", "[unregistered] task={task:?}");
            }
            EventKind::PriorityChanged => {
                tracing::info!(target: "tickvisor", "[priority] task={task:?} priority={:?}", e.priority);
            }
            EventKind::SnapshotRebuilt => {
                tracing::debug!(target: "tickvisor", "[snapshot] {reason}");
            }
            EventKind::TaskExecuted => {
                tracing::trace!(target: "tickvisor", "[executed] task={task:?}");
            }
            EventKind::HookFailed => {
                tracing::error!(target: "tickvisor", "[hook-failed] task={task:?} reason={reason:?}");
            }
            EventKind::ContractViolation => {
                tracing::warn!(target: "tickvisor", "[violation] task={task:?} reason={reason:?}");
            }
        }
    }

    fn name(&self) -> &'static str {
        "LogWriter"
    }
}
