pub mod orders;
pub mod products;
pub mod tasks;

use crate::dto::PingResponse;
use crate::error::ApiError;
use axum::Json;
use std::str::FromStr;

pub async fn ping() -> Json<PingResponse> {
    Json(PingResponse {
        status: archkit_core::ping(),
        version: archkit_core::core_version(),
    })
}

/// Parses a path id, mapping any failure to `invalid <entity> id`.
fn parse_id<T: FromStr>(raw: &str, entity: &str) -> Result<T, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::BadRequest(format!("invalid {entity} id")))
}
