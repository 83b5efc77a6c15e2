use archkit_core::{OrderServiceError, ProductServiceError, RepoError, TaskServiceError};
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use log::error;
use serde_json::json;
use thiserror::Error;

const INTERNAL_MESSAGE: &str = "internal server error";

/// Handler-level failure rendered as `{"error": "..."}`.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    NotFound(String),
    /// Detail is logged, never returned.
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn from_repo(err: RepoError) -> Self {
        match err {
            RepoError::NotFound { .. } => Self::NotFound(err.to_string()),
            other => Self::Internal(other.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match self {
            Self::Internal(detail) => {
                error!("event=http_error module=server status=error error={detail}");
                INTERNAL_MESSAGE.to_string()
            }
            Self::BadRequest(message) | Self::NotFound(message) => message,
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(_: JsonRejection) -> Self {
        Self::BadRequest("invalid request body".to_string())
    }
}

impl From<TaskServiceError> for ApiError {
    fn from(err: TaskServiceError) -> Self {
        match err {
            TaskServiceError::Validation(_) => Self::BadRequest(err.to_string()),
            TaskServiceError::NotFound(_) => Self::NotFound(err.to_string()),
            TaskServiceError::Repo(err) => Self::from_repo(err),
        }
    }
}

impl From<OrderServiceError> for ApiError {
    fn from(err: OrderServiceError) -> Self {
        match err {
            OrderServiceError::Domain(_) | OrderServiceError::Payment(_) => {
                Self::BadRequest(err.to_string())
            }
            OrderServiceError::NotFound(_) => Self::NotFound(err.to_string()),
            OrderServiceError::Repo(err) => Self::from_repo(err),
        }
    }
}

impl From<ProductServiceError> for ApiError {
    fn from(err: ProductServiceError) -> Self {
        match err {
            ProductServiceError::Domain(_) | ProductServiceError::Money(_) => {
                Self::BadRequest(err.to_string())
            }
            ProductServiceError::NotFound(_) => Self::NotFound(err.to_string()),
            ProductServiceError::Repo(err) => Self::from_repo(err),
        }
    }
}
