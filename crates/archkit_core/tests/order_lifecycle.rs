use archkit_core::db::open_db_in_memory;
use archkit_core::{
    AnalyticsObserver, CreateOrderInput, CustomerId, EventObserver, EventPublisher, MoneyError,
    OrderError, OrderEvent, OrderId, OrderItemInput, OrderRepository, OrderService,
    OrderServiceError, OrderStatus, PaymentError, PaymentFactory, PaymentReceipt, PaymentStrategy,
    SqliteOrderRepository,
};
use archkit_core::{Money, RepoError};
use rusqlite::Connection;
use std::sync::{Arc, Mutex};

#[derive(Default)]
struct RecordingObserver {
    events: Mutex<Vec<OrderEvent>>,
}

impl RecordingObserver {
    fn names(&self) -> Vec<&'static str> {
        self.events
            .lock()
            .unwrap()
            .iter()
            .map(OrderEvent::name)
            .collect()
    }

    fn last(&self) -> Option<OrderEvent> {
        self.events.lock().unwrap().last().cloned()
    }
}

impl EventObserver for RecordingObserver {
    fn observer_id(&self) -> &str {
        "recording"
    }

    fn on_event(&self, event: &OrderEvent) {
        self.events.lock().unwrap().push(event.clone());
    }
}

struct DecliningPayment;

impl PaymentStrategy for DecliningPayment {
    fn method_id(&self) -> &str {
        "declining"
    }

    fn name(&self) -> &str {
        "Declining"
    }

    fn process(&self, _: &Money, _: OrderId) -> Result<PaymentReceipt, PaymentError> {
        Err(PaymentError::Declined("card expired".to_string()))
    }
}

struct Harness {
    conn: Connection,
    payments: Arc<PaymentFactory>,
    publisher: Arc<EventPublisher>,
    recorder: Arc<RecordingObserver>,
}

impl Harness {
    fn new() -> Self {
        let mut payments = PaymentFactory::with_defaults();
        payments.register(Arc::new(DecliningPayment)).unwrap();

        let recorder = Arc::new(RecordingObserver::default());
        let publisher = Arc::new(EventPublisher::new());
        publisher.subscribe(recorder.clone());

        Self {
            conn: open_db_in_memory().unwrap(),
            payments: Arc::new(payments),
            publisher,
            recorder,
        }
    }

    fn service(&self) -> OrderService<SqliteOrderRepository<'_>> {
        OrderService::new(
            SqliteOrderRepository::new(&self.conn),
            Arc::clone(&self.payments),
            Arc::clone(&self.publisher),
        )
    }
}

fn item(product_id: &str, quantity: i64, price: f64) -> OrderItemInput {
    OrderItemInput {
        product_id: product_id.to_string(),
        product_name: format!("product {product_id}"),
        quantity,
        price,
        currency: String::new(),
    }
}

fn laptop_and_mice(customer_id: &str) -> CreateOrderInput {
    CreateOrderInput {
        customer_id: customer_id.to_string(),
        items: vec![item("laptop", 1, 999.99), item("mouse", 2, 29.99)],
    }
}

#[test]
fn create_order_persists_and_publishes_created_event() {
    let harness = Harness::new();
    let service = harness.service();

    let order = service.create_order(laptop_and_mice("customer-1")).unwrap();
    assert_eq!(order.status(), OrderStatus::Pending);
    assert_eq!(order.total_amount().amount_minor(), 99_999 + 2 * 2_999);
    assert_eq!(order.total_amount().currency(), "USD");

    let loaded = service.get_order(order.id()).unwrap();
    assert_eq!(loaded, order);

    assert_eq!(harness.recorder.names(), vec!["OrderCreated"]);
    match harness.recorder.last().unwrap() {
        OrderEvent::OrderCreated {
            order_id,
            customer_id,
            currency,
            ..
        } => {
            assert_eq!(order_id, order.id());
            assert_eq!(customer_id, "customer-1");
            assert_eq!(currency, "USD");
        }
        other => panic!("unexpected event: {other:?}"),
    }
}

#[test]
fn create_order_rejects_empty_items_and_bad_quantities() {
    let harness = Harness::new();
    let service = harness.service();

    let empty = CreateOrderInput {
        customer_id: "customer-1".to_string(),
        items: Vec::new(),
    };
    assert!(matches!(
        service.create_order(empty),
        Err(OrderServiceError::Domain(OrderError::NoItems))
    ));

    let zero_quantity = CreateOrderInput {
        customer_id: "customer-1".to_string(),
        items: vec![item("laptop", 0, 10.0)],
    };
    assert!(matches!(
        service.create_order(zero_quantity),
        Err(OrderServiceError::Domain(OrderError::InvalidQuantity))
    ));

    let negative_price = CreateOrderInput {
        customer_id: "customer-1".to_string(),
        items: vec![item("laptop", 1, -10.0)],
    };
    assert!(matches!(
        service.create_order(negative_price),
        Err(OrderServiceError::Domain(OrderError::Money(
            MoneyError::NegativeAmount
        )))
    ));

    assert!(harness.recorder.names().is_empty());
}

#[test]
fn payment_marks_order_paid_and_publishes_event() {
    let harness = Harness::new();
    let service = harness.service();
    let order = service.create_order(laptop_and_mice("customer-1")).unwrap();

    let outcome = service.process_payment(order.id(), "paypal").unwrap();
    assert_eq!(outcome.order.status(), OrderStatus::Paid);
    assert_eq!(outcome.receipt.method, "PayPal");
    assert_eq!(&outcome.receipt.amount, order.total_amount());

    assert_eq!(service.get_order(order.id()).unwrap().status(), OrderStatus::Paid);
    match harness.recorder.last().unwrap() {
        OrderEvent::OrderPaid {
            payment_method,
            order_id,
            ..
        } => {
            assert_eq!(payment_method, "PayPal");
            assert_eq!(order_id, order.id());
        }
        other => panic!("unexpected event: {other:?}"),
    }
}

#[test]
fn paying_a_non_pending_order_returns_error() {
    let harness = Harness::new();
    let service = harness.service();
    let order = service.create_order(laptop_and_mice("customer-1")).unwrap();
    service.process_payment(order.id(), "credit_card").unwrap();

    let err = service
        .process_payment(order.id(), "credit_card")
        .unwrap_err();
    assert!(matches!(
        err,
        OrderServiceError::Domain(OrderError::NotPending(OrderStatus::Paid))
    ));
    assert_eq!(
        harness.recorder.names(),
        vec!["OrderCreated", "OrderPaid"]
    );
}

#[test]
fn unsupported_or_declined_payment_leaves_order_pending() {
    let harness = Harness::new();
    let service = harness.service();
    let order = service.create_order(laptop_and_mice("customer-1")).unwrap();

    assert!(matches!(
        service.process_payment(order.id(), "cash"),
        Err(OrderServiceError::Payment(PaymentError::UnsupportedMethod(_)))
    ));
    assert!(matches!(
        service.process_payment(order.id(), "declining"),
        Err(OrderServiceError::Payment(PaymentError::Declined(_)))
    ));
    assert_eq!(
        service.get_order(order.id()).unwrap().status(),
        OrderStatus::Pending
    );
    assert_eq!(harness.recorder.names(), vec!["OrderCreated"]);
}

#[test]
fn ship_deliver_and_cancel_rules() {
    let harness = Harness::new();
    let service = harness.service();
    let order = service.create_order(laptop_and_mice("customer-1")).unwrap();

    assert!(matches!(
        service.ship_order(order.id(), "TRK-1"),
        Err(OrderServiceError::Domain(OrderError::NotPaid(OrderStatus::Pending)))
    ));

    service.process_payment(order.id(), "crypto").unwrap();
    let shipped = service.ship_order(order.id(), "TRK-1").unwrap();
    assert_eq!(shipped.tracking_number(), Some("TRK-1"));

    assert!(matches!(
        service.cancel_order(order.id()),
        Err(OrderServiceError::Domain(OrderError::NotCancellable(
            OrderStatus::Shipped
        )))
    ));

    let delivered = service.deliver_order(order.id()).unwrap();
    assert_eq!(delivered.status(), OrderStatus::Delivered);
    let stored = service.get_order(order.id()).unwrap();
    assert_eq!(stored.status(), OrderStatus::Delivered);
    assert_eq!(stored.tracking_number(), Some("TRK-1"));

    assert_eq!(
        harness.recorder.names(),
        vec!["OrderCreated", "OrderPaid", "OrderShipped"]
    );
}

#[test]
fn cancel_pending_order_publishes_cancelled_event() {
    let harness = Harness::new();
    let analytics = Arc::new(AnalyticsObserver::new());
    harness.publisher.subscribe(analytics.clone());
    let service = harness.service();
    let order = service.create_order(laptop_and_mice("customer-1")).unwrap();

    let cancelled = service.cancel_order(order.id()).unwrap();
    assert_eq!(cancelled.status(), OrderStatus::Cancelled);
    assert!(matches!(
        service.process_payment(order.id(), "paypal"),
        Err(OrderServiceError::Domain(OrderError::NotPending(
            OrderStatus::Cancelled
        )))
    ));
    assert_eq!(analytics.count("OrderCancelled"), 1);
}

#[test]
fn missing_order_returns_not_found() {
    let harness = Harness::new();
    let service = harness.service();
    let missing = OrderId::generate();

    assert!(matches!(
        service.get_order(missing),
        Err(OrderServiceError::NotFound(id)) if id == missing
    ));
    assert!(matches!(
        service.process_payment(missing, "paypal"),
        Err(OrderServiceError::NotFound(_))
    ));
    assert!(matches!(
        service.cancel_order(missing),
        Err(OrderServiceError::NotFound(_))
    ));
}

#[test]
fn customer_orders_are_scoped_and_newest_first() {
    let harness = Harness::new();
    let service = harness.service();
    let first = service.create_order(laptop_and_mice("customer-1")).unwrap();
    service.create_order(laptop_and_mice("customer-2")).unwrap();
    let second = service.create_order(laptop_and_mice("customer-1")).unwrap();

    let orders = service.customer_orders("customer-1").unwrap();
    assert_eq!(orders.len(), 2);
    let ids: Vec<OrderId> = orders.iter().map(|order| order.id()).collect();
    assert!(ids.contains(&first.id()));
    assert!(ids.contains(&second.id()));
    assert!(orders[0].created_at() >= orders[1].created_at());

    assert!(service.customer_orders("nobody").unwrap().is_empty());
    assert!(matches!(
        service.customer_orders(" "),
        Err(OrderServiceError::Domain(OrderError::EmptyCustomerId))
    ));
}

#[test]
fn repository_rejects_tampered_totals() {
    let harness = Harness::new();
    let service = harness.service();
    let order = service.create_order(laptop_and_mice("customer-1")).unwrap();
    harness
        .conn
        .execute(
            "UPDATE orders SET total_amount = 1 WHERE id = ?1;",
            [order.id().to_string()],
        )
        .unwrap();

    let repo = SqliteOrderRepository::new(&harness.conn);
    assert!(matches!(
        repo.find_by_id(order.id()),
        Err(RepoError::InvalidData(_))
    ));
    assert!(repo
        .find_by_customer(&CustomerId::new("customer-1").unwrap())
        .is_err());
}

#[test]
fn repository_rejects_rows_breaking_shipping_invariants() {
    let harness = Harness::new();
    let service = harness.service();
    let repo = SqliteOrderRepository::new(&harness.conn);

    let shipped_without_tracking = service.create_order(laptop_and_mice("customer-1")).unwrap();
    harness
        .conn
        .execute(
            "UPDATE orders SET status = 'SHIPPED', tracking_number = NULL WHERE id = ?1;",
            [shipped_without_tracking.id().to_string()],
        )
        .unwrap();
    assert!(matches!(
        repo.find_by_id(shipped_without_tracking.id()),
        Err(RepoError::InvalidData(_))
    ));

    let pending_with_tracking = service.create_order(laptop_and_mice("customer-2")).unwrap();
    harness
        .conn
        .execute(
            "UPDATE orders SET tracking_number = 'TRK-9' WHERE id = ?1;",
            [pending_with_tracking.id().to_string()],
        )
        .unwrap();
    assert!(matches!(
        repo.find_by_id(pending_with_tracking.id()),
        Err(RepoError::InvalidData(_))
    ));

    let rewound = service.create_order(laptop_and_mice("customer-3")).unwrap();
    harness
        .conn
        .execute(
            "UPDATE orders SET updated_at = created_at - 100000 WHERE id = ?1;",
            [rewound.id().to_string()],
        )
        .unwrap();
    assert!(matches!(
        repo.find_by_id(rewound.id()),
        Err(RepoError::InvalidData(_))
    ));
    assert!(matches!(
        service.get_order(rewound.id()),
        Err(OrderServiceError::Repo(RepoError::InvalidData(_)))
    ));
}
