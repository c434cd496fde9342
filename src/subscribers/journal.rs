//! # EventJournal: in-memory event recorder
//!
//! Keeps every event it receives, in order. Useful in tests and for post-mortem
//! inspection of what a tick did.

use std::sync::{Mutex, MutexGuard};

use crate::events::{Event, EventKind};
use crate::subscribers::Subscribe;

/// Subscriber that records events in memory.
#[derive(Default)]
pub struct EventJournal {
    events: Mutex<Vec<Event>>,
}

impl EventJournal {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of all recorded events.
    pub fn events(&self) -> Vec<Event> {
        self.lock().clone()
    }

    /// Recorded event kinds, in order.
    pub fn kinds(&self) -> Vec<EventKind> {
        self.lock().iter().map(|e| e.kind).collect()
    }

    /// Number of recorded events of `kind`.
    pub fn count(&self, kind: EventKind) -> usize {
        self.lock().iter().filter(|e| e.kind == kind).count()
    }

    /// Drops everything recorded so far.
    pub fn clear(&self) {
        self.lock().clear();
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Event>> {
        // A poisoned journal still holds valid events.
        self.events.lock().unwrap_or_else(|p| p.into_inner())
    }
}

impl Subscribe for EventJournal {
    fn on_event(&self, event: &Event) {
        self.lock().push(event.clone());
    }

    fn name(&self) -> &'static str {
        "journal"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_records_in_order() {
        let journal = EventJournal::new();
        journal.on_event(&Event::new(EventKind::TaskRegistered));
        journal.on_event(&Event::new(EventKind::TaskActivated));
        journal.on_event(&Event::new(EventKind::TaskActivated));

        assert_eq!(
            journal.kinds(),
            vec![
                EventKind::TaskRegistered,
                EventKind::TaskActivated,
                EventKind::TaskActivated
            ]
        );
        assert_eq!(journal.count(EventKind::TaskActivated), 2);

        journal.clear();
        assert!(journal.events().is_empty());
    }
}
