//! Scheduler events.
//!
//! This module holds the event **data model** published by the scheduler on every
//! lifecycle transition, snapshot rebuild and rejected call.
//!
//! ## Contents
//! - [`EventKind`], [`Event`] event classification and payload metadata
//!
//! ## Quick reference
//! - **Publisher**: `Scheduler` (synchronously, inside the call that caused the event).
//! - **Consumers**: [`SubscriberSet`](crate::SubscriberSet) fans events out to user
//!   [`Subscribe`](crate::Subscribe) implementations.

mod event;

pub use event::{Event, EventKind};
