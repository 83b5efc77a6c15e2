//! Domain events raised by the order aggregate's use cases.

use super::order::{Order, OrderId};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum OrderEvent {
    OrderCreated {
        order_id: OrderId,
        customer_id: String,
        total: f64,
        currency: String,
    },
    OrderPaid {
        order_id: OrderId,
        payment_method: String,
        amount: f64,
        currency: String,
    },
    OrderShipped {
        order_id: OrderId,
        tracking_number: String,
    },
    OrderCancelled {
        order_id: OrderId,
    },
}

impl OrderEvent {
    pub fn created(order: &Order) -> Self {
        Self::OrderCreated {
            order_id: order.id(),
            customer_id: order.customer_id().to_string(),
            total: order.total_amount().as_decimal(),
            currency: order.total_amount().currency().to_string(),
        }
    }

    pub fn paid(order: &Order, payment_method: &str) -> Self {
        Self::OrderPaid {
            order_id: order.id(),
            payment_method: payment_method.to_string(),
            amount: order.total_amount().as_decimal(),
            currency: order.total_amount().currency().to_string(),
        }
    }

    /// Returns `None` for orders that carry no tracking number yet.
    pub fn shipped(order: &Order) -> Option<Self> {
        order.tracking_number().map(|tracking| Self::OrderShipped {
            order_id: order.id(),
            tracking_number: tracking.to_string(),
        })
    }

    pub fn cancelled(order: &Order) -> Self {
        Self::OrderCancelled {
            order_id: order.id(),
        }
    }

    /// Stable event name used in logs and analytics counters.
    pub fn name(&self) -> &'static str {
        match self {
            Self::OrderCreated { .. } => "OrderCreated",
            Self::OrderPaid { .. } => "OrderPaid",
            Self::OrderShipped { .. } => "OrderShipped",
            Self::OrderCancelled { .. } => "OrderCancelled",
        }
    }

    pub fn order_id(&self) -> OrderId {
        match self {
            Self::OrderCreated { order_id, .. }
            | Self::OrderPaid { order_id, .. }
            | Self::OrderShipped { order_id, .. }
            | Self::OrderCancelled { order_id } => *order_id,
        }
    }
}
