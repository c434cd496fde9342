//! # Event subscriber trait.
//!
//! Provides [`Subscribe`] an extension point for plugging custom event handlers into
//! a scheduler.
//!
//! ## Rules
//! - Events are delivered synchronously, in publication order, from inside the
//!   scheduler call that produced them.
//! - A subscriber sees the scheduler *between* two steps of a transition: state has
//!   already changed, the task's hook may not have run yet.
//! - Panics are caught per subscriber, logged, and do not reach the scheduler.
//!
//! ## Example
//! ```rust
//! use std::sync::atomic::{AtomicUsize, Ordering};
//! use tickvisor::{Event, EventKind, Subscribe};
//!
//! #[derive(Default)]
//! struct Terminations(AtomicUsize);
//!
//! impl Subscribe for Terminations {
//!     fn on_event(&self, ev: &Event) {
//!         if matches!(ev.kind, EventKind::TaskTerminated) {
//!             self.0.fetch_add(1, Ordering::Relaxed);
//!         }
//!     }
//!
//!     fn name(&self) -> &'static str { "terminations" }
//! }
//! ```

use crate::events::Event;

/// Event subscriber for scheduler observability.
///
/// ### Implementation requirements
/// - Return quickly: the tick waits for every subscriber.
/// - Handle errors internally; do not panic.
/// - Do not call back into the scheduler (subscribers get no access to it).
pub trait Subscribe: Send + Sync + 'static {
    /// Processes a single event.
    fn on_event(&self, event: &Event);

    /// Returns the subscriber name used in logs.
    ///
    /// The default uses `type_name::<Self>()`, which can be verbose - override it when possible.
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}
