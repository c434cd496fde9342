//! # Event subscribers for the tickvisor scheduler.
//!
//! This module provides the [`Subscribe`] trait, the [`SubscriberSet`] fan-out and
//! built-in implementations.
//!
//! ## Architecture
//! ```text
//! Event flow:
//!   Scheduler ── publish(Event) ──► SubscriberSet::emit(&Event)
//!                                        │
//!                                   ┌────┴────┬──────────┬───────┐
//!                                   ▼         ▼          ▼       ▼
//!                               LogWriter  Journal    Custom    ...
//! ```
//!
//! ## Subscriber types
//! - **Passive subscribers** - observe and react to events (logging, metrics, alerts)
//! - **Stateful subscribers** - keep what they saw ([`EventJournal`])

mod journal;
#[cfg(feature = "logging")]
mod log;
mod set;
mod subscriber;

pub use journal::EventJournal;
#[cfg(feature = "logging")]
pub use log::LogWriter;
pub use set::SubscriberSet;
pub use subscriber::Subscribe;
