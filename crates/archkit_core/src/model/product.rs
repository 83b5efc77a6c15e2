//! Product aggregate root and its `Category` value object.
//!
//! # Invariants
//! - `name` and `category` are non-blank.
//! - A price set through `change_price` is strictly positive.

use super::money::Money;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(Uuid);

impl ProductId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(value: Uuid) -> Self {
        Self(value)
    }
}

impl Display for ProductId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ProductId {
    type Err = uuid::Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(value.trim()).map(Self)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProductError {
    #[error("product name cannot be empty")]
    EmptyName,
    #[error("category name cannot be empty")]
    EmptyCategory,
    #[error("price must be positive")]
    NonPositivePrice,
    #[error("discount must be between 0 and 100")]
    InvalidDiscount,
    #[error("cannot change price currency from {from} to {to}")]
    CurrencyChange { from: String, to: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Category(String);

impl Category {
    /// # Errors
    /// `EmptyCategory` for blank names.
    pub fn new(name: impl Into<String>) -> Result<Self, ProductError> {
        let name = name.into();
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(ProductError::EmptyCategory);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    id: ProductId,
    name: String,
    description: String,
    price: Money,
    category: Category,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Product {
    /// # Errors
    /// `EmptyName` for blank names, `NonPositivePrice` for a zero price.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        price: Money,
        category: Category,
    ) -> Result<Self, ProductError> {
        let name = validate_name(name.into())?;
        if price.is_zero() {
            return Err(ProductError::NonPositivePrice);
        }
        let now = super::now();
        Ok(Self {
            id: ProductId::generate(),
            name,
            description: description.into(),
            price,
            category,
            created_at: now,
            updated_at: now,
        })
    }

    pub(crate) fn restore(
        id: ProductId,
        name: String,
        description: String,
        price: Money,
        category: Category,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Result<Self, ProductError> {
        let name = validate_name(name)?;
        Ok(Self {
            id,
            name,
            description,
            price,
            category,
            created_at,
            updated_at,
        })
    }

    pub fn id(&self) -> ProductId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn price(&self) -> &Money {
        &self.price
    }

    pub fn category(&self) -> &Category {
        &self.category
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// # Errors
    /// `NonPositivePrice` for zero, `CurrencyChange` when the currency differs.
    pub fn change_price(&mut self, new_price: Money) -> Result<(), ProductError> {
        if new_price.is_zero() {
            return Err(ProductError::NonPositivePrice);
        }
        if new_price.currency() != self.price.currency() {
            return Err(ProductError::CurrencyChange {
                from: self.price.currency().to_string(),
                to: new_price.currency().to_string(),
            });
        }
        self.price = new_price;
        self.touch();
        Ok(())
    }

    /// # Errors
    /// `EmptyName` for blank names.
    pub fn update_info(
        &mut self,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Result<(), ProductError> {
        self.name = validate_name(name.into())?;
        self.description = description.into();
        self.touch();
        Ok(())
    }

    fn touch(&mut self) {
        self.updated_at = super::now().max(self.created_at);
    }
}

fn validate_name(name: String) -> Result<String, ProductError> {
    if name.trim().is_empty() {
        return Err(ProductError::EmptyName);
    }
    Ok(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn laptop() -> Product {
        Product::new(
            "Laptop",
            "14 inch",
            Money::new(99_999, "USD").unwrap(),
            Category::new("electronics").unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn blank_names_are_rejected() {
        assert_eq!(Category::new(" ").unwrap_err(), ProductError::EmptyCategory);
        let err = Product::new(
            "",
            "",
            Money::new(1, "USD").unwrap(),
            Category::new("misc").unwrap(),
        )
        .unwrap_err();
        assert_eq!(err, ProductError::EmptyName);
    }

    #[test]
    fn change_price_requires_positive_amount_in_same_currency() {
        let mut product = laptop();
        assert_eq!(
            product.change_price(Money::new(0, "USD").unwrap()),
            Err(ProductError::NonPositivePrice)
        );
        assert!(matches!(
            product.change_price(Money::new(10, "EUR").unwrap()),
            Err(ProductError::CurrencyChange { .. })
        ));
        product.change_price(Money::new(89_999, "USD").unwrap()).unwrap();
        assert_eq!(product.price().amount_minor(), 89_999);
    }

    #[test]
    fn update_info_keeps_old_values_on_error() {
        let mut product = laptop();
        assert_eq!(
            product.update_info("  ", "new"),
            Err(ProductError::EmptyName)
        );
        assert_eq!(product.name(), "Laptop");
        assert_eq!(product.description(), "14 inch");

        product.update_info("Laptop Pro", "16 inch").unwrap();
        assert_eq!(product.name(), "Laptop Pro");
    }
}
