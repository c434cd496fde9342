//! # SubscriberSet: synchronous fan-out over multiple subscribers
//!
//! [`SubscriberSet`] distributes each [`Event`](crate::Event) to every subscriber in
//! registration order.
//!
//! ## What it guarantees
//! - Per-subscriber delivery in publication order.
//! - Panics inside subscribers are caught and logged (isolation); the remaining
//!   subscribers still receive the event.
//!
//! ## Diagram
//! ```text
//!    emit(&Event)
//!        ├──► S1.on_event()   (panic → tracing::error!, continue)
//!        ├──► S2.on_event()
//!        └──► SN.on_event()
//! ```

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;

use crate::events::Event;

use super::Subscribe;

/// Composite fan-out over a list of subscribers.
#[derive(Default, Clone)]
pub struct SubscriberSet {
    subscribers: Vec<Arc<dyn Subscribe>>,
}

impl SubscriberSet {
    /// Creates a new set.
    #[must_use]
    pub fn new(subs: Vec<Arc<dyn Subscribe>>) -> Self {
        Self { subscribers: subs }
    }

    /// Adds one more subscriber at the end of the fan-out order.
    pub fn push(&mut self, sub: Arc<dyn Subscribe>) {
        self.subscribers.push(sub);
    }

    /// Fan-out one event to all subscribers.
    pub fn emit(&self, event: &Event) {
        for sub in &self.subscribers {
            if let Err(panic_err) = catch_unwind(AssertUnwindSafe(|| sub.on_event(event))) {
                let info = if let Some(msg) = panic_err.downcast_ref::<&'static str>() {
                    (*msg).to_string()
                } else if let Some(msg) = panic_err.downcast_ref::<String>() {
                    msg.clone()
                } else {
                    "unknown panic".to_string()
                };
                tracing::error!(
                    subscriber = sub.name(),
                    seq = event.seq,
                    info = %info,
                    "subscriber panicked"
                );
            }
        }
    }

    /// True if there are no subscribers.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.subscribers.is_empty()
    }

    /// Number of subscribers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.subscribers.len()
    }
}

impl std::fmt::Debug for SubscriberSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.subscribers.iter().map(|s| s.name()))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::EventKind;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct Count(AtomicUsize);

    impl Subscribe for Count {
        fn on_event(&self, _: &Event) {
            self.0.fetch_add(1, Ordering::Relaxed);
        }
        fn name(&self) -> &'static str {
            "count"
        }
    }

    struct Boom;

    impl Subscribe for Boom {
        fn on_event(&self, _: &Event) {
            panic!("boom");
        }
        fn name(&self) -> &'static str {
            "boom"
        }
    }

    #[test]
    fn test_panicking_subscriber_is_isolated() {
        let before = Arc::new(Count(AtomicUsize::new(0)));
        let after = Arc::new(Count(AtomicUsize::new(0)));
        let set = SubscriberSet::new(vec![
            before.clone(),
            Arc::new(Boom),
            after.clone(),
        ]);

        set.emit(&Event::new(EventKind::TaskRegistered));
        set.emit(&Event::new(EventKind::TaskActivated));

        assert_eq!(before.0.load(Ordering::Relaxed), 2);
        assert_eq!(after.0.load(Ordering::Relaxed), 2);
        assert_eq!(set.len(), 3);
    }

    #[test]
    fn test_empty_set() {
        let set = SubscriberSet::default();
        assert!(set.is_empty());
        set.emit(&Event::new(EventKind::TaskRegistered));
    }
}
