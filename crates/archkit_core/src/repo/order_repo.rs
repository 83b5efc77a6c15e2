//! Order repository contract and SQLite implementation.
//!
//! Line items are stored as a JSON array in `orders.items`; the total is
//! stored for querying but recomputed from the items on read.

use super::{from_epoch_ms, to_epoch_ms, RepoError, RepoResult};
use crate::model::money::Money;
use crate::model::order::{CustomerId, Order, OrderId, OrderItem, OrderStatus};
use rusqlite::{params, Connection, OptionalExtension, Row};
use serde::{Deserialize, Serialize};

const ORDER_SELECT_SQL: &str = "SELECT
    id,
    customer_id,
    items,
    total_amount,
    currency,
    status,
    tracking_number,
    created_at,
    updated_at
FROM orders";

/// Persistence contract for the order aggregate.
pub trait OrderRepository {
    fn save(&self, order: &Order) -> RepoResult<()>;
    fn find_by_id(&self, id: OrderId) -> RepoResult<Option<Order>>;
    /// Orders of one customer, newest first.
    fn find_by_customer(&self, customer_id: &CustomerId) -> RepoResult<Vec<Order>>;
    /// Persists status, tracking number and `updated_at`.
    fn update(&self, order: &Order) -> RepoResult<()>;
}

pub struct SqliteOrderRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteOrderRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct StoredItem {
    product_id: String,
    product_name: String,
    quantity: u32,
    price_minor: i64,
    currency: String,
}

impl OrderRepository for SqliteOrderRepository<'_> {
    fn save(&self, order: &Order) -> RepoResult<()> {
        let items = encode_items(order.items())?;

        self.conn.execute(
            "INSERT INTO orders (
                id,
                customer_id,
                items,
                total_amount,
                currency,
                status,
                tracking_number,
                created_at,
                updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9);",
            params![
                order.id().to_string(),
                order.customer_id().as_str(),
                items,
                order.total_amount().amount_minor(),
                order.total_amount().currency(),
                order.status().as_str(),
                order.tracking_number(),
                to_epoch_ms(order.created_at()),
                to_epoch_ms(order.updated_at()),
            ],
        )?;

        Ok(())
    }

    fn find_by_id(&self, id: OrderId) -> RepoResult<Option<Order>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{ORDER_SELECT_SQL} WHERE id = ?1;"))?;
        let columns = stmt
            .query_row([id.to_string()], read_order_columns)
            .optional()?;

        columns.map(OrderColumns::into_order).transpose()
    }

    fn find_by_customer(&self, customer_id: &CustomerId) -> RepoResult<Vec<Order>> {
        let mut stmt = self.conn.prepare(&format!(
            "{ORDER_SELECT_SQL}
             WHERE customer_id = ?1
             ORDER BY created_at DESC, id ASC;"
        ))?;
        let mut rows = stmt.query([customer_id.as_str()])?;
        let mut orders = Vec::new();

        while let Some(row) = rows.next()? {
            orders.push(read_order_columns(row)?.into_order()?);
        }

        Ok(orders)
    }

    fn update(&self, order: &Order) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE orders
             SET
                status = ?1,
                tracking_number = ?2,
                updated_at = ?3
             WHERE id = ?4;",
            params![
                order.status().as_str(),
                order.tracking_number(),
                to_epoch_ms(order.updated_at()),
                order.id().to_string(),
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::not_found("order", order.id()));
        }

        Ok(())
    }
}

fn encode_items(items: &[OrderItem]) -> RepoResult<String> {
    let stored: Vec<StoredItem> = items
        .iter()
        .map(|item| StoredItem {
            product_id: item.product_id().to_string(),
            product_name: item.product_name().to_string(),
            quantity: item.quantity(),
            price_minor: item.price().amount_minor(),
            currency: item.price().currency().to_string(),
        })
        .collect();
    serde_json::to_string(&stored)
        .map_err(|err| RepoError::InvalidData(format!("failed to encode order items: {err}")))
}

fn decode_items(raw: &str) -> RepoResult<Vec<OrderItem>> {
    let stored: Vec<StoredItem> = serde_json::from_str(raw)
        .map_err(|err| RepoError::InvalidData(format!("invalid JSON in orders.items: {err}")))?;
    stored
        .into_iter()
        .map(|item| -> RepoResult<OrderItem> {
            let price = Money::new(item.price_minor, &item.currency)?;
            let item = OrderItem::new(
                item.product_id,
                item.product_name,
                i64::from(item.quantity),
                price,
            )?;
            Ok(item)
        })
        .collect()
}

struct OrderColumns {
    id: String,
    customer_id: String,
    items: String,
    total_amount: i64,
    currency: String,
    status: String,
    tracking_number: Option<String>,
    created_at: i64,
    updated_at: i64,
}

fn read_order_columns(row: &Row<'_>) -> rusqlite::Result<OrderColumns> {
    Ok(OrderColumns {
        id: row.get("id")?,
        customer_id: row.get("customer_id")?,
        items: row.get("items")?,
        total_amount: row.get("total_amount")?,
        currency: row.get("currency")?,
        status: row.get("status")?,
        tracking_number: row.get("tracking_number")?,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    })
}

impl OrderColumns {
    fn into_order(self) -> RepoResult<Order> {
        let id: OrderId = self.id.parse().map_err(|_| {
            RepoError::InvalidData(format!("invalid uuid value `{}` in orders.id", self.id))
        })?;
        let status = OrderStatus::parse(&self.status).ok_or_else(|| {
            RepoError::InvalidData(format!("invalid status `{}` in orders.status", self.status))
        })?;

        let order = Order::restore(
            id,
            CustomerId::new(self.customer_id)?,
            decode_items(&self.items)?,
            status,
            self.tracking_number,
            from_epoch_ms(self.created_at, "orders.created_at")?,
            from_epoch_ms(self.updated_at, "orders.updated_at")?,
        )
        .map_err(|err| RepoError::InvalidData(format!("invalid persisted order {id}: {err}")))?;

        let total = order.total_amount();
        if total.amount_minor() != self.total_amount || total.currency() != self.currency {
            return Err(RepoError::InvalidData(format!(
                "orders.total_amount `{} {}` does not match items total `{total}` for order {id}",
                self.total_amount, self.currency
            )));
        }

        Ok(order)
    }
}
