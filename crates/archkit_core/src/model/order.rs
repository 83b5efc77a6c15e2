//! Order aggregate root.
//!
//! # Responsibility
//! - Own the items, total and lifecycle status of one customer order.
//! - Expose status changes only through transition methods.
//!
//! # Invariants
//! - An order has at least one item and every item quantity is positive.
//! - All items share one currency; `total_amount` is the exact sum of item totals.
//! - Status moves `PENDING -> PAID -> SHIPPED -> DELIVERED`; cancel is allowed
//!   until the order ships.
//! - `tracking_number` is set exactly when the order has shipped.

use super::money::{Money, MoneyError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(Uuid);

impl OrderId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(value: Uuid) -> Self {
        Self(value)
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Display for OrderId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for OrderId {
    type Err = uuid::Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(value.trim()).map(Self)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct CustomerId(String);

impl CustomerId {
    /// # Errors
    /// `OrderError::EmptyCustomerId` for blank input.
    pub fn new(value: impl Into<String>) -> Result<Self, OrderError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(OrderError::EmptyCustomerId);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for CustomerId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    Pending,
    Paid,
    Shipped,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Paid => "PAID",
            Self::Shipped => "SHIPPED",
            Self::Delivered => "DELIVERED",
            Self::Cancelled => "CANCELLED",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "PENDING" => Some(Self::Pending),
            "PAID" => Some(Self::Paid),
            "SHIPPED" => Some(Self::Shipped),
            "DELIVERED" => Some(Self::Delivered),
            "CANCELLED" => Some(Self::Cancelled),
            _ => None,
        }
    }
}

impl Display for OrderStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OrderError {
    #[error("order must have at least one item")]
    NoItems,
    #[error("customer id cannot be empty")]
    EmptyCustomerId,
    #[error("product id cannot be empty")]
    EmptyProductId,
    #[error("quantity must be positive")]
    InvalidQuantity,
    #[error("tracking number cannot be empty")]
    EmptyTrackingNumber,
    #[error(transparent)]
    Money(#[from] MoneyError),
    #[error("only pending orders can be marked as paid (status {0})")]
    NotPending(OrderStatus),
    #[error("only paid orders can be shipped (status {0})")]
    NotPaid(OrderStatus),
    #[error("only shipped orders can be delivered (status {0})")]
    NotShipped(OrderStatus),
    #[error("cannot cancel an order with status {0}")]
    NotCancellable(OrderStatus),
    #[error("tracking number does not match status {0}")]
    TrackingMismatch(OrderStatus),
    #[error("order updated_at must be >= created_at")]
    TimestampOrder,
}

/// Line item owned by the order aggregate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderItem {
    product_id: String,
    product_name: String,
    quantity: u32,
    price: Money,
}

impl OrderItem {
    /// # Errors
    /// Rejects blank product ids and non-positive quantities.
    pub fn new(
        product_id: impl Into<String>,
        product_name: impl Into<String>,
        quantity: i64,
        price: Money,
    ) -> Result<Self, OrderError> {
        let product_id = product_id.into();
        if product_id.trim().is_empty() {
            return Err(OrderError::EmptyProductId);
        }
        let quantity = u32::try_from(quantity)
            .ok()
            .filter(|quantity| *quantity > 0)
            .ok_or(OrderError::InvalidQuantity)?;
        Ok(Self {
            product_id,
            product_name: product_name.into(),
            quantity,
            price,
        })
    }

    pub fn product_id(&self) -> &str {
        &self.product_id
    }

    pub fn product_name(&self) -> &str {
        &self.product_name
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    pub fn price(&self) -> &Money {
        &self.price
    }

    /// # Errors
    /// `MoneyError::Overflow` for absurd quantities.
    pub fn total(&self) -> Result<Money, MoneyError> {
        self.price.times(self.quantity)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    id: OrderId,
    customer_id: CustomerId,
    items: Vec<OrderItem>,
    total_amount: Money,
    status: OrderStatus,
    tracking_number: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Order {
    /// Factory for new pending orders.
    ///
    /// The order currency is the currency of the first item.
    ///
    /// # Errors
    /// `NoItems` for an empty item list, `Money(CurrencyMismatch)` for mixed currencies.
    pub fn new(customer_id: CustomerId, items: Vec<OrderItem>) -> Result<Self, OrderError> {
        let total_amount = sum_items(&items)?;
        let now = super::now();
        Ok(Self {
            id: OrderId::generate(),
            customer_id,
            items,
            total_amount,
            status: OrderStatus::Pending,
            tracking_number: None,
            created_at: now,
            updated_at: now,
        })
    }

    /// Rebuilds an order from stored state.
    ///
    /// Recomputes the total and rejects rows that break aggregate invariants.
    pub(crate) fn restore(
        id: OrderId,
        customer_id: CustomerId,
        items: Vec<OrderItem>,
        status: OrderStatus,
        tracking_number: Option<String>,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Result<Self, OrderError> {
        let shipped = matches!(status, OrderStatus::Shipped | OrderStatus::Delivered);
        if shipped != tracking_number.is_some() {
            return Err(OrderError::TrackingMismatch(status));
        }
        if updated_at < created_at {
            return Err(OrderError::TimestampOrder);
        }
        let total_amount = sum_items(&items)?;
        Ok(Self {
            id,
            customer_id,
            items,
            total_amount,
            status,
            tracking_number,
            created_at,
            updated_at,
        })
    }

    pub fn id(&self) -> OrderId {
        self.id
    }

    pub fn customer_id(&self) -> &CustomerId {
        &self.customer_id
    }

    pub fn items(&self) -> &[OrderItem] {
        &self.items
    }

    pub fn total_amount(&self) -> &Money {
        &self.total_amount
    }

    pub fn status(&self) -> OrderStatus {
        self.status
    }

    pub fn tracking_number(&self) -> Option<&str> {
        self.tracking_number.as_deref()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// # Errors
    /// `NotPending` unless the order is pending.
    pub fn mark_paid(&mut self) -> Result<(), OrderError> {
        if self.status != OrderStatus::Pending {
            return Err(OrderError::NotPending(self.status));
        }
        self.transition(OrderStatus::Paid);
        Ok(())
    }

    /// # Errors
    /// `NotPaid` unless paid, `EmptyTrackingNumber` for blank input.
    pub fn ship(&mut self, tracking_number: impl Into<String>) -> Result<(), OrderError> {
        if self.status != OrderStatus::Paid {
            return Err(OrderError::NotPaid(self.status));
        }
        let tracking_number = tracking_number.into();
        let tracking_number = tracking_number.trim();
        if tracking_number.is_empty() {
            return Err(OrderError::EmptyTrackingNumber);
        }
        self.tracking_number = Some(tracking_number.to_string());
        self.transition(OrderStatus::Shipped);
        Ok(())
    }

    /// # Errors
    /// `NotShipped` unless shipped.
    pub fn deliver(&mut self) -> Result<(), OrderError> {
        if self.status != OrderStatus::Shipped {
            return Err(OrderError::NotShipped(self.status));
        }
        self.transition(OrderStatus::Delivered);
        Ok(())
    }

    /// # Errors
    /// `NotCancellable` once shipped, delivered or already cancelled.
    pub fn cancel(&mut self) -> Result<(), OrderError> {
        match self.status {
            OrderStatus::Pending | OrderStatus::Paid => {
                self.transition(OrderStatus::Cancelled);
                Ok(())
            }
            status => Err(OrderError::NotCancellable(status)),
        }
    }

    fn transition(&mut self, status: OrderStatus) {
        self.status = status;
        self.updated_at = super::now().max(self.created_at);
    }
}

fn sum_items(items: &[OrderItem]) -> Result<Money, OrderError> {
    let (first, rest) = items.split_first().ok_or(OrderError::NoItems)?;
    let mut total = first.total()?;
    for item in rest {
        total = total.add(&item.total()?)?;
    }
    Ok(total)
}
