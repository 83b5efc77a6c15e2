//! Pricing domain service.
//!
//! Holds pricing rules that act on a product but do not belong to it.

use crate::model::money::Money;
use crate::model::product::{Product, ProductError};

pub const MAX_DISCOUNT_PERCENT: f64 = 100.0;

#[derive(Debug, Default, Clone, Copy)]
pub struct PricingService;

impl PricingService {
    pub fn new() -> Self {
        Self
    }

    /// Reduces the product price by `percent` (0..=100), rounding to the minor unit.
    ///
    /// # Errors
    /// `InvalidDiscount` outside the range; `NonPositivePrice` when the result is zero.
    pub fn apply_discount(&self, product: &mut Product, percent: f64) -> Result<(), ProductError> {
        let new_price = discounted_price(product.price(), percent)?;
        product.change_price(new_price)
    }
}

/// # Errors
/// `InvalidDiscount` for non-finite or out-of-range percentages.
pub fn discounted_price(price: &Money, percent: f64) -> Result<Money, ProductError> {
    if !percent.is_finite() || !(0.0..=MAX_DISCOUNT_PERCENT).contains(&percent) {
        return Err(ProductError::InvalidDiscount);
    }
    let amount = price.amount_minor() as f64;
    let discounted = (amount - amount * percent / 100.0).round().max(0.0);
    Money::new(discounted as i64, price.currency()).map_err(|_| ProductError::InvalidDiscount)
}
