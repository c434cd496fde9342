use std::sync::Arc;

use crate::core::config::SchedulerConfig;
use crate::core::scheduler::Scheduler;
use crate::subscribers::{Subscribe, SubscriberSet};

/// Builder for constructing a [`Scheduler`] with event subscribers.
///
/// ```
/// use std::sync::Arc;
/// use tickvisor::{EventJournal, EventKind, Scheduler, SchedulerConfig, TaskFn};
///
/// let journal = Arc::new(EventJournal::new());
/// let mut scheduler = Scheduler::builder(SchedulerConfig::default())
///     .with_subscriber(journal.clone())
///     .build();
///
/// scheduler.register_task(TaskFn::new("noop", |_ctx| Ok(()))).unwrap();
/// assert_eq!(journal.count(EventKind::TaskRegistered), 1);
/// ```
pub struct SchedulerBuilder {
    cfg: SchedulerConfig,
    subscribers: Vec<Arc<dyn Subscribe>>,
}

impl SchedulerBuilder {
    /// Creates a new builder with the given configuration.
    pub fn new(cfg: SchedulerConfig) -> Self {
        Self {
            cfg,
            subscribers: Vec::new(),
        }
    }

    /// Replaces the subscriber list.
    ///
    /// Subscribers receive every event synchronously, in publication order.
    pub fn with_subscribers(mut self, subscribers: Vec<Arc<dyn Subscribe>>) -> Self {
        self.subscribers = subscribers;
        self
    }

    /// Adds one subscriber.
    pub fn with_subscriber(mut self, subscriber: Arc<dyn Subscribe>) -> Self {
        self.subscribers.push(subscriber);
        self
    }

    /// Builds the scheduler.
    pub fn build(self) -> Scheduler {
        Scheduler::from_parts(self.cfg, SubscriberSet::new(self.subscribers))
    }
}
