//! Wire types. Money travels as a decimal amount plus a currency code.

use archkit_core::{
    CreateOrderInput, CreateProductInput, CreateTaskInput, Order, OrderId, OrderItem,
    OrderItemInput, OrderStatus, PaymentOutcome, Product, ProductId, Task,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
pub struct PingResponse {
    pub status: &'static str,
    pub version: &'static str,
}

#[derive(Debug, Deserialize)]
pub struct CreateTaskRequest {
    pub title: String,
    #[serde(default)]
    pub description: String,
}

impl From<CreateTaskRequest> for CreateTaskInput {
    fn from(value: CreateTaskRequest) -> Self {
        Self {
            title: value.title,
            description: value.description,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdateTaskRequest {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub completed: bool,
}

#[derive(Debug, Serialize)]
pub struct TaskDto {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Task> for TaskDto {
    fn from(value: Task) -> Self {
        Self {
            id: value.id.0,
            title: value.title,
            description: value.description,
            completed: value.completed,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct OrderItemRequest {
    pub product_id: String,
    pub product_name: String,
    pub quantity: i64,
    pub price: f64,
    #[serde(default)]
    pub currency: String,
}

#[derive(Debug, Deserialize)]
pub struct CreateOrderRequest {
    pub customer_id: String,
    pub items: Vec<OrderItemRequest>,
}

impl From<CreateOrderRequest> for CreateOrderInput {
    fn from(value: CreateOrderRequest) -> Self {
        Self {
            customer_id: value.customer_id,
            items: value
                .items
                .into_iter()
                .map(|item| OrderItemInput {
                    product_id: item.product_id,
                    product_name: item.product_name,
                    quantity: item.quantity,
                    price: item.price,
                    currency: item.currency,
                })
                .collect(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct CustomerQuery {
    pub customer_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PaymentRequest {
    #[serde(alias = "method")]
    pub payment_method: String,
}

#[derive(Debug, Deserialize)]
pub struct ShipRequest {
    pub tracking_number: String,
}

#[derive(Debug, Serialize)]
pub struct OrderItemDto {
    pub product_id: String,
    pub product_name: String,
    pub quantity: u32,
    pub price: f64,
    pub currency: String,
}

impl From<&OrderItem> for OrderItemDto {
    fn from(value: &OrderItem) -> Self {
        Self {
            product_id: value.product_id().to_string(),
            product_name: value.product_name().to_string(),
            quantity: value.quantity(),
            price: value.price().as_decimal(),
            currency: value.price().currency().to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct OrderDto {
    pub id: OrderId,
    pub customer_id: String,
    pub items: Vec<OrderItemDto>,
    pub total: f64,
    pub currency: String,
    pub status: OrderStatus,
    pub tracking_number: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Order> for OrderDto {
    fn from(value: &Order) -> Self {
        Self {
            id: value.id(),
            customer_id: value.customer_id().to_string(),
            items: value.items().iter().map(OrderItemDto::from).collect(),
            total: value.total_amount().as_decimal(),
            currency: value.total_amount().currency().to_string(),
            status: value.status(),
            tracking_number: value.tracking_number().map(str::to_string),
            created_at: value.created_at(),
            updated_at: value.updated_at(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ReceiptDto {
    pub method: String,
    pub amount: f64,
    pub currency: String,
    pub reference: String,
}

#[derive(Debug, Serialize)]
pub struct PaymentDto {
    pub order: OrderDto,
    pub receipt: ReceiptDto,
}

impl From<PaymentOutcome> for PaymentDto {
    fn from(value: PaymentOutcome) -> Self {
        Self {
            order: OrderDto::from(&value.order),
            receipt: ReceiptDto {
                method: value.receipt.method,
                amount: value.receipt.amount.as_decimal(),
                currency: value.receipt.amount.currency().to_string(),
                reference: value.receipt.reference,
            },
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateProductRequest {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: f64,
    #[serde(default)]
    pub currency: String,
    pub category: String,
}

impl From<CreateProductRequest> for CreateProductInput {
    fn from(value: CreateProductRequest) -> Self {
        Self {
            name: value.name,
            description: value.description,
            price: value.price,
            currency: value.currency,
            category: value.category,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdateProductRequest {
    pub name: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Deserialize)]
pub struct DiscountRequest {
    pub percent: f64,
}

#[derive(Debug, Serialize)]
pub struct ProductDto {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub currency: String,
    pub category: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Product> for ProductDto {
    fn from(value: &Product) -> Self {
        Self {
            id: value.id(),
            name: value.name().to_string(),
            description: value.description().to_string(),
            price: value.price().as_decimal(),
            currency: value.price().currency().to_string(),
            category: value.category().name().to_string(),
            created_at: value.created_at(),
            updated_at: value.updated_at(),
        }
    }
}
