//! Use-case services orchestrating models and repositories.
//!
//! # Invariants
//! - Services stay storage-agnostic; they only see repository traits.
//! - Each service exposes its own error type with a `NotFound` variant.

pub mod order_service;
pub mod pricing_service;
pub mod product_service;
pub mod task_service;
