//! Payment strategies and the registry that resolves them by method id.
//!
//! # Responsibility
//! - Define the `PaymentStrategy` seam used by order payment use cases.
//! - Map wire-level method ids (`credit_card`, `paypal`, `crypto`) to strategies.
//!
//! # Invariants
//! - Method ids are unique within one factory.
//! - Strategies never charge a zero amount.

mod factory;
mod strategy;

pub use factory::PaymentFactory;
pub use strategy::{
    CreditCardPayment, CryptoPayment, PayPalPayment, PaymentReceipt, PaymentStrategy,
};

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PaymentError {
    #[error("unsupported payment method `{0}`")]
    UnsupportedMethod(String),
    #[error("payment method id is invalid: `{0}`")]
    InvalidMethodId(String),
    #[error("payment method already registered: `{0}`")]
    DuplicateMethod(String),
    #[error("payment amount must be positive")]
    InvalidAmount,
    #[error("payment declined: {0}")]
    Declined(String),
}
