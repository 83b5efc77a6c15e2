use crate::dto::{
    CreateOrderRequest, CustomerQuery, OrderDto, PaymentDto, PaymentRequest, ShipRequest,
};
use crate::error::ApiError;
use crate::state::AppState;
use archkit_core::{OrderId, OrderService, OrderServiceError, SqliteOrderRepository};
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;

async fn run<T: Send + 'static>(
    state: &AppState,
    f: impl FnOnce(OrderService<SqliteOrderRepository<'_>>) -> Result<T, OrderServiceError>
        + Send
        + 'static,
) -> Result<T, ApiError> {
    let payments = state.payments();
    let publisher = state.publisher();
    state
        .with_conn(move |conn| {
            let service = OrderService::new(SqliteOrderRepository::new(conn), payments, publisher);
            Ok(f(service)?)
        })
        .await
}

fn order_id(raw: &str) -> Result<OrderId, ApiError> {
    super::parse_id(raw, "order")
}

pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<CreateOrderRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<OrderDto>), ApiError> {
    let Json(request) = payload?;
    let order = run(&state, move |service| service.create_order(request.into())).await?;
    Ok((StatusCode::CREATED, Json(OrderDto::from(&order))))
}

pub async fn list_by_customer(
    State(state): State<AppState>,
    Query(query): Query<CustomerQuery>,
) -> Result<Json<Vec<OrderDto>>, ApiError> {
    let customer_id = query
        .customer_id
        .ok_or_else(|| ApiError::BadRequest("customer_id is required".to_string()))?;
    let orders = run(&state, move |service| service.customer_orders(&customer_id)).await?;
    Ok(Json(orders.iter().map(OrderDto::from).collect()))
}

pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<OrderDto>, ApiError> {
    let id = order_id(&id)?;
    let order = run(&state, move |service| service.get_order(id)).await?;
    Ok(Json(OrderDto::from(&order)))
}

pub async fn pay(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<PaymentRequest>, JsonRejection>,
) -> Result<Json<PaymentDto>, ApiError> {
    let id = order_id(&id)?;
    let Json(request) = payload?;
    let outcome = run(&state, move |service| {
        service.process_payment(id, &request.payment_method)
    })
    .await?;
    Ok(Json(outcome.into()))
}

pub async fn ship(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<ShipRequest>, JsonRejection>,
) -> Result<Json<OrderDto>, ApiError> {
    let id = order_id(&id)?;
    let Json(request) = payload?;
    let order = run(&state, move |service| {
        service.ship_order(id, &request.tracking_number)
    })
    .await?;
    Ok(Json(OrderDto::from(&order)))
}

pub async fn deliver(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<OrderDto>, ApiError> {
    let id = order_id(&id)?;
    let order = run(&state, move |service| service.deliver_order(id)).await?;
    Ok(Json(OrderDto::from(&order)))
}

pub async fn cancel(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<OrderDto>, ApiError> {
    let id = order_id(&id)?;
    let order = run(&state, move |service| service.cancel_order(id)).await?;
    Ok(Json(OrderDto::from(&order)))
}
