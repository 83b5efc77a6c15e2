//! `Money` value object shared by orders and products.
//!
//! Amounts are held in minor units (cents) so totals add up exactly.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::fmt::{Display, Formatter};
use thiserror::Error;

pub const DEFAULT_CURRENCY: &str = "USD";
const MINOR_UNITS_PER_MAJOR: i64 = 100;

static CURRENCY_CODE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Z]{3}$").expect("valid currency code regex"));

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoneyError {
    #[error("amount cannot be negative")]
    NegativeAmount,
    #[error("amount must be a finite number")]
    NotFinite,
    #[error("invalid currency code `{0}`")]
    InvalidCurrency(String),
    #[error("currency mismatch: {left} vs {right}")]
    CurrencyMismatch { left: String, right: String },
    #[error("amount overflow")]
    Overflow,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Money {
    amount_minor: i64,
    currency: String,
}

impl Money {
    /// Builds a money value from minor units.
    ///
    /// An empty currency falls back to `DEFAULT_CURRENCY`.
    ///
    /// # Errors
    /// Negative amounts and malformed currency codes are rejected.
    pub fn new(amount_minor: i64, currency: &str) -> Result<Self, MoneyError> {
        if amount_minor < 0 {
            return Err(MoneyError::NegativeAmount);
        }
        let currency = normalize_currency(currency)?;
        Ok(Self {
            amount_minor,
            currency,
        })
    }

    /// Builds a money value from a decimal major-unit amount such as `19.99`.
    ///
    /// The amount is rounded to the nearest minor unit.
    ///
    /// # Errors
    /// Same rules as [`Money::new`], plus non-finite input.
    pub fn from_decimal(amount: f64, currency: &str) -> Result<Self, MoneyError> {
        if !amount.is_finite() {
            return Err(MoneyError::NotFinite);
        }
        if amount < 0.0 {
            return Err(MoneyError::NegativeAmount);
        }
        let minor = (amount * MINOR_UNITS_PER_MAJOR as f64).round();
        if minor >= i64::MAX as f64 {
            return Err(MoneyError::Overflow);
        }
        Self::new(minor as i64, currency)
    }

    pub fn zero(currency: &str) -> Result<Self, MoneyError> {
        Self::new(0, currency)
    }

    pub fn amount_minor(&self) -> i64 {
        self.amount_minor
    }

    pub fn currency(&self) -> &str {
        &self.currency
    }

    /// Decimal major-unit rendering for JSON payloads.
    pub fn as_decimal(&self) -> f64 {
        self.amount_minor as f64 / MINOR_UNITS_PER_MAJOR as f64
    }

    pub fn is_zero(&self) -> bool {
        self.amount_minor == 0
    }

    /// # Errors
    /// `CurrencyMismatch` when currencies differ, `Overflow` on i64 overflow.
    pub fn add(&self, other: &Money) -> Result<Money, MoneyError> {
        if self.currency != other.currency {
            return Err(MoneyError::CurrencyMismatch {
                left: self.currency.clone(),
                right: other.currency.clone(),
            });
        }
        let amount_minor = self
            .amount_minor
            .checked_add(other.amount_minor)
            .ok_or(MoneyError::Overflow)?;
        Ok(Money {
            amount_minor,
            currency: self.currency.clone(),
        })
    }

    /// # Errors
    /// `Overflow` on i64 overflow.
    pub fn times(&self, quantity: u32) -> Result<Money, MoneyError> {
        let amount_minor = self
            .amount_minor
            .checked_mul(i64::from(quantity))
            .ok_or(MoneyError::Overflow)?;
        Ok(Money {
            amount_minor,
            currency: self.currency.clone(),
        })
    }
}

impl Display for Money {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}.{:02} {}",
            self.amount_minor / MINOR_UNITS_PER_MAJOR,
            self.amount_minor % MINOR_UNITS_PER_MAJOR,
            self.currency
        )
    }
}

fn normalize_currency(currency: &str) -> Result<String, MoneyError> {
    let trimmed = currency.trim();
    if trimmed.is_empty() {
        return Ok(DEFAULT_CURRENCY.to_string());
    }
    let upper = trimmed.to_ascii_uppercase();
    if !CURRENCY_CODE_RE.is_match(&upper) {
        return Err(MoneyError::InvalidCurrency(trimmed.to_string()));
    }
    Ok(upper)
}
