use crate::dto::{CreateProductRequest, DiscountRequest, ProductDto, UpdateProductRequest};
use crate::error::ApiError;
use crate::state::AppState;
use archkit_core::{ProductId, ProductService, ProductServiceError, SqliteProductRepository};
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

async fn run<T: Send + 'static>(
    state: &AppState,
    f: impl FnOnce(ProductService<SqliteProductRepository<'_>>) -> Result<T, ProductServiceError>
        + Send
        + 'static,
) -> Result<T, ApiError> {
    state
        .with_conn(move |conn| Ok(f(ProductService::new(SqliteProductRepository::new(conn)))?))
        .await
}

fn product_id(raw: &str) -> Result<ProductId, ApiError> {
    super::parse_id(raw, "product")
}

pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<CreateProductRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ProductDto>), ApiError> {
    let Json(request) = payload?;
    let product = run(&state, move |service| service.create_product(request.into())).await?;
    Ok((StatusCode::CREATED, Json(ProductDto::from(&product))))
}

pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<ProductDto>>, ApiError> {
    let products = run(&state, |service| service.list_products()).await?;
    Ok(Json(products.iter().map(ProductDto::from).collect()))
}

pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ProductDto>, ApiError> {
    let id = product_id(&id)?;
    let product = run(&state, move |service| service.get_product(id)).await?;
    Ok(Json(ProductDto::from(&product)))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateProductRequest>, JsonRejection>,
) -> Result<Json<ProductDto>, ApiError> {
    let id = product_id(&id)?;
    let Json(request) = payload?;
    let product = run(&state, move |service| {
        service.update_product_info(id, request.name, request.description)
    })
    .await?;
    Ok(Json(ProductDto::from(&product)))
}

pub async fn discount(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<DiscountRequest>, JsonRejection>,
) -> Result<Json<ProductDto>, ApiError> {
    let id = product_id(&id)?;
    let Json(request) = payload?;
    let product = run(&state, move |service| service.apply_discount(id, request.percent)).await?;
    Ok(Json(ProductDto::from(&product)))
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = product_id(&id)?;
    run(&state, move |service| service.delete_product(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}
