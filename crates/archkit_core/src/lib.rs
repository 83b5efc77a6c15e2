//! Core domain logic for archkit: tasks, orders and products.
//!
//! Layering, innermost first: `model` (entities, aggregates, value objects),
//! `service` (use cases), `repo` (persistence contracts + SQLite adapters),
//! with `payment` and `eventing` plugged into the order use cases.

pub mod db;
pub mod eventing;
pub mod logging;
pub mod model;
pub mod payment;
pub mod repo;
pub mod service;

pub use eventing::{
    AnalyticsObserver, EmailNotificationObserver, EventObserver, EventPublisher, LoggingObserver,
};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::events::OrderEvent;
pub use model::money::{Money, MoneyError};
pub use model::order::{CustomerId, Order, OrderError, OrderId, OrderItem, OrderStatus};
pub use model::product::{Category, Product, ProductError, ProductId};
pub use model::task::{Task, TaskId, TaskValidationError};
pub use payment::{PaymentError, PaymentFactory, PaymentReceipt, PaymentStrategy};
pub use repo::order_repo::{OrderRepository, SqliteOrderRepository};
pub use repo::product_repo::{ProductRepository, SqliteProductRepository};
pub use repo::task_repo::{SqliteTaskRepository, TaskRepository};
pub use repo::{RepoError, RepoResult};
pub use service::order_service::{
    CreateOrderInput, OrderItemInput, OrderService, OrderServiceError, PaymentOutcome,
};
pub use service::pricing_service::PricingService;
pub use service::product_service::{CreateProductInput, ProductService, ProductServiceError};
pub use service::task_service::{CreateTaskInput, TaskService, TaskServiceError, UpdateTaskInput};

/// Minimal health-check API.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
