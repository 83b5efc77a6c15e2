//! Domain models for the task, order and product services.
//!
//! # Responsibility
//! - Define entities, aggregates and value objects with their own rules.
//! - Stay free of storage and transport concerns.
//!
//! # Invariants
//! - Constructors and mutators validate before changing state.
//! - Timestamps carry millisecond precision so they survive SQLite round-trips.

use chrono::{DateTime, SubsecRound, Utc};

pub mod events;
pub mod money;
pub mod order;
pub mod product;
pub mod task;

/// Current UTC time truncated to the precision stored in the database.
pub(crate) fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(3)
}
