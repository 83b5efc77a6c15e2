//! In-process publication of order domain events.
//!
//! # Responsibility
//! - Fan out `OrderEvent`s to subscribed observers after a use case commits.
//!
//! # Invariants
//! - Observers run synchronously in subscription order.
//! - Publishing never fails the use case that raised the event.

mod observers;
mod publisher;

pub use observers::{AnalyticsObserver, EmailNotificationObserver, LoggingObserver};
pub use publisher::{EventObserver, EventPublisher};
