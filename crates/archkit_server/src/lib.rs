//! HTTP surface for archkit use cases.
//!
//! # Responsibility
//! - Map JSON requests onto `archkit_core` services.
//! - Own process-level server concerns: bind, shutdown, middleware.
//!
//! # Invariants
//! - Handlers never leak internal error details to clients.
//! - Every request is logged with method, path, status and duration.

mod config;
mod dto;
mod error;
mod handlers;
mod state;

pub use config::{ServerConfig, DEFAULT_BIND, DEFAULT_DB_PATH, DEFAULT_LOG_DIR_NAME};
pub use error::ApiError;
pub use state::AppState;

use archkit_core::db::DbError;
use axum::extract::Request;
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::Router;
use log::{info, warn};
use std::any::Any;
use std::net::SocketAddr;
use std::time::Instant;
use thiserror::Error;
use tokio::net::TcpListener;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error(transparent)]
    Db(#[from] DbError),
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },
    #[error("server error: {0}")]
    Serve(#[source] std::io::Error),
}

/// Builds the application router over `state`.
pub fn router(state: AppState) -> Router {
    let routes = Router::new()
        .route("/ping", get(handlers::ping))
        .route(
            "/tasks",
            post(handlers::tasks::create).get(handlers::tasks::list),
        )
        .route(
            "/tasks/{id}",
            get(handlers::tasks::get)
                .put(handlers::tasks::update)
                .delete(handlers::tasks::delete),
        )
        .route("/tasks/{id}/complete", post(handlers::tasks::complete))
        .route("/tasks/{id}/reopen", post(handlers::tasks::reopen))
        .route(
            "/orders",
            post(handlers::orders::create).get(handlers::orders::list_by_customer),
        )
        .route("/orders/{id}", get(handlers::orders::get))
        .route("/orders/{id}/payment", post(handlers::orders::pay))
        .route("/orders/{id}/ship", post(handlers::orders::ship))
        .route("/orders/{id}/deliver", post(handlers::orders::deliver))
        .route("/orders/{id}/cancel", post(handlers::orders::cancel))
        .route(
            "/products",
            post(handlers::products::create).get(handlers::products::list),
        )
        .route(
            "/products/{id}",
            get(handlers::products::get)
                .put(handlers::products::update)
                .delete(handlers::products::delete),
        )
        .route("/products/{id}/discount", post(handlers::products::discount))
        .with_state(state);

    with_middleware(routes)
}

/// Panics are turned into 500s inside the request logger so they get logged.
fn with_middleware(routes: Router) -> Router {
    routes
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(middleware::from_fn(log_requests))
        .layer(CorsLayer::permissive())
}

/// Opens the database, binds `config.bind` and serves until Ctrl-C.
///
/// # Errors
/// Database bootstrap, bind or accept-loop failures.
pub async fn serve(config: ServerConfig) -> Result<(), ServerError> {
    let state = AppState::open(&config.db_path)?;
    let listener = TcpListener::bind(config.bind)
        .await
        .map_err(|source| ServerError::Bind {
            addr: config.bind,
            source,
        })?;

    info!(
        "event=server_start module=server status=ok bind={} db={}",
        config.bind,
        config.db_path.display()
    );

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(ServerError::Serve)?;

    info!("event=server_stop module=server status=ok");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!("event=server_signal module=server status=error error={err}");
        std::future::pending::<()>().await;
    }
}

async fn log_requests(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_owned();
    let started = Instant::now();

    let response = next.run(request).await;
    let status = response.status();
    let elapsed_ms = started.elapsed().as_millis();

    if status.is_server_error() {
        warn!(
            "event=http_request module=server status=error method={method} path={path} code={} duration_ms={elapsed_ms}",
            status.as_u16()
        );
    } else {
        info!(
            "event=http_request module=server status=ok method={method} path={path} code={} duration_ms={elapsed_ms}",
            status.as_u16()
        );
    }

    response
}

fn panic_response(_payload: Box<dyn Any + Send + 'static>) -> Response {
    ApiError::Internal("handler panicked".to_string()).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    async fn explode() -> &'static str {
        panic!("boom");
    }

    #[tokio::test]
    async fn handler_panic_becomes_json_500() {
        let app = with_middleware(Router::new().route("/explode", get(explode)));
        let response = app
            .oneshot(Request::builder().uri("/explode").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body, json!({ "error": "internal server error" }));
    }
}
