//! Order use-case service.
//!
//! # Responsibility
//! - Orchestrate the order aggregate, its repository, payment strategies and
//!   event publication.
//!
//! # Invariants
//! - Events are published only after the state change is persisted.
//! - A payment is charged only for orders that can still be marked paid.

use crate::eventing::EventPublisher;
use crate::model::events::OrderEvent;
use crate::model::money::Money;
use crate::model::order::{CustomerId, Order, OrderError, OrderId, OrderItem, OrderStatus};
use crate::payment::{PaymentError, PaymentFactory, PaymentReceipt};
use crate::repo::order_repo::OrderRepository;
use crate::repo::RepoError;
use log::{info, warn};
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OrderServiceError {
    #[error(transparent)]
    Domain(#[from] OrderError),
    #[error(transparent)]
    Payment(#[from] PaymentError),
    #[error("order not found: {0}")]
    NotFound(OrderId),
    #[error(transparent)]
    Repo(RepoError),
}

impl From<RepoError> for OrderServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::Order(err) => Self::Domain(err),
            RepoError::Money(err) => Self::Domain(OrderError::Money(err)),
            other => Self::Repo(other),
        }
    }
}

pub type OrderServiceResult<T> = Result<T, OrderServiceError>;

#[derive(Debug, Clone, PartialEq)]
pub struct OrderItemInput {
    pub product_id: String,
    pub product_name: String,
    pub quantity: i64,
    /// Decimal major units, e.g. `19.99`.
    pub price: f64,
    /// Empty means the default currency.
    pub currency: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CreateOrderInput {
    pub customer_id: String,
    pub items: Vec<OrderItemInput>,
}

/// Result of a successful payment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentOutcome {
    pub order: Order,
    pub receipt: PaymentReceipt,
}

pub struct OrderService<R: OrderRepository> {
    repo: R,
    payments: Arc<PaymentFactory>,
    publisher: Arc<EventPublisher>,
}

impl<R: OrderRepository> OrderService<R> {
    pub fn new(repo: R, payments: Arc<PaymentFactory>, publisher: Arc<EventPublisher>) -> Self {
        Self {
            repo,
            payments,
            publisher,
        }
    }

    pub fn create_order(&self, input: CreateOrderInput) -> OrderServiceResult<Order> {
        let customer_id = CustomerId::new(input.customer_id)?;
        let items = input
            .items
            .into_iter()
            .map(|item| -> OrderServiceResult<OrderItem> {
                let price = Money::from_decimal(item.price, &item.currency)
                    .map_err(OrderError::from)?;
                Ok(OrderItem::new(
                    item.product_id,
                    item.product_name,
                    item.quantity,
                    price,
                )?)
            })
            .collect::<OrderServiceResult<Vec<_>>>()?;

        let order = Order::new(customer_id, items)?;
        self.repo.save(&order)?;
        info!(
            "event=order_create module=service status=ok order_id={} items={} total_minor={} currency={}",
            order.id(),
            order.items().len(),
            order.total_amount().amount_minor(),
            order.total_amount().currency()
        );

        self.publisher.publish(&OrderEvent::created(&order));
        Ok(order)
    }

    /// Charges the order through the strategy registered for `method` and marks it paid.
    pub fn process_payment(
        &self,
        order_id: OrderId,
        method: &str,
    ) -> OrderServiceResult<PaymentOutcome> {
        let mut order = self.get_order(order_id)?;
        let strategy = self.payments.create(method)?;

        if order.status() != OrderStatus::Pending {
            return Err(OrderError::NotPending(order.status()).into());
        }

        let receipt = strategy
            .process(order.total_amount(), order.id())
            .map_err(|err| {
                warn!(
                    "event=order_payment module=service status=error order_id={order_id} method={} error={err}",
                    strategy.method_id()
                );
                err
            })?;
        order.mark_paid()?;
        self.persist(&order)?;
        info!(
            "event=order_payment module=service status=ok order_id={order_id} method={} reference={}",
            strategy.method_id(),
            receipt.reference
        );

        self.publisher
            .publish(&OrderEvent::paid(&order, strategy.name()));
        Ok(PaymentOutcome { order, receipt })
    }

    pub fn ship_order(&self, order_id: OrderId, tracking_number: &str) -> OrderServiceResult<Order> {
        let mut order = self.get_order(order_id)?;
        order.ship(tracking_number)?;
        self.persist(&order)?;
        info!("event=order_ship module=service status=ok order_id={order_id}");

        if let Some(event) = OrderEvent::shipped(&order) {
            self.publisher.publish(&event);
        }
        Ok(order)
    }

    pub fn deliver_order(&self, order_id: OrderId) -> OrderServiceResult<Order> {
        let mut order = self.get_order(order_id)?;
        order.deliver()?;
        self.persist(&order)?;
        info!("event=order_deliver module=service status=ok order_id={order_id}");
        Ok(order)
    }

    pub fn cancel_order(&self, order_id: OrderId) -> OrderServiceResult<Order> {
        let mut order = self.get_order(order_id)?;
        order.cancel()?;
        self.persist(&order)?;
        info!("event=order_cancel module=service status=ok order_id={order_id}");

        self.publisher.publish(&OrderEvent::cancelled(&order));
        Ok(order)
    }

    pub fn get_order(&self, order_id: OrderId) -> OrderServiceResult<Order> {
        self.repo
            .find_by_id(order_id)?
            .ok_or(OrderServiceError::NotFound(order_id))
    }

    pub fn customer_orders(&self, customer_id: &str) -> OrderServiceResult<Vec<Order>> {
        let customer_id = CustomerId::new(customer_id)?;
        Ok(self.repo.find_by_customer(&customer_id)?)
    }

    fn persist(&self, order: &Order) -> OrderServiceResult<()> {
        self.repo.update(order).map_err(|err| match err {
            RepoError::NotFound { .. } => OrderServiceError::NotFound(order.id()),
            other => other.into(),
        })
    }
}
