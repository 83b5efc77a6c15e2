use crate::error::ApiError;
use archkit_core::db::{open_db, open_db_in_memory, DbResult};
use archkit_core::{
    AnalyticsObserver, EmailNotificationObserver, EventPublisher, LoggingObserver, PaymentFactory,
};
use rusqlite::Connection;
use std::path::Path;
use std::sync::{Arc, Mutex, PoisonError};
use tokio::task;

/// Shared per-process state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    db: Arc<Mutex<Connection>>,
    payments: Arc<PaymentFactory>,
    publisher: Arc<EventPublisher>,
    analytics: Arc<AnalyticsObserver>,
}

impl AppState {
    /// Wraps an already bootstrapped connection with the default payment
    /// methods and observers.
    pub fn new(conn: Connection) -> Self {
        let analytics = Arc::new(AnalyticsObserver::new());
        let publisher = EventPublisher::new();
        publisher.subscribe(Arc::new(LoggingObserver));
        publisher.subscribe(Arc::new(EmailNotificationObserver));
        publisher.subscribe(analytics.clone());

        Self {
            db: Arc::new(Mutex::new(conn)),
            payments: Arc::new(PaymentFactory::with_defaults()),
            publisher: Arc::new(publisher),
            analytics,
        }
    }

    pub fn open(path: impl AsRef<Path>) -> DbResult<Self> {
        open_db(path).map(Self::new)
    }

    pub fn in_memory() -> DbResult<Self> {
        open_db_in_memory().map(Self::new)
    }

    pub fn payments(&self) -> Arc<PaymentFactory> {
        Arc::clone(&self.payments)
    }

    pub fn publisher(&self) -> Arc<EventPublisher> {
        Arc::clone(&self.publisher)
    }

    pub fn analytics(&self) -> &AnalyticsObserver {
        &self.analytics
    }

    /// Runs `f` on the blocking pool with exclusive access to the connection.
    ///
    /// A lock poisoned by a panicking closure is recovered.
    pub(crate) async fn with_conn<T, F>(&self, f: F) -> Result<T, ApiError>
    where
        F: FnOnce(&Connection) -> Result<T, ApiError> + Send + 'static,
        T: Send + 'static,
    {
        let db = Arc::clone(&self.db);
        task::spawn_blocking(move || {
            let conn = db.lock().unwrap_or_else(PoisonError::into_inner);
            f(&conn)
        })
        .await
        .map_err(|err| ApiError::Internal(format!("database task failed: {err}")))?
    }
}
