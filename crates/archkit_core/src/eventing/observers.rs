use super::publisher::EventObserver;
use crate::model::events::OrderEvent;
use log::{info, warn};
use std::collections::BTreeMap;
use std::sync::Mutex;

/// Writes every event as one structured log line.
#[derive(Debug, Default)]
pub struct LoggingObserver;

impl EventObserver for LoggingObserver {
    fn observer_id(&self) -> &str {
        "logging"
    }

    fn on_event(&self, event: &OrderEvent) {
        match serde_json::to_string(event) {
            Ok(payload) => info!(
                "event=domain_event module=eventing status=ok type={} payload={payload}",
                event.name()
            ),
            Err(err) => warn!(
                "event=domain_event module=eventing status=error type={} error={err}",
                event.name()
            ),
        }
    }
}

/// Customer notification hook.
///
/// Only records intent in the log; no mail transport is wired in.
#[derive(Debug, Default)]
pub struct EmailNotificationObserver;

impl EventObserver for EmailNotificationObserver {
    fn observer_id(&self) -> &str {
        "email"
    }

    fn on_event(&self, event: &OrderEvent) {
        let template = match event {
            OrderEvent::OrderCreated { .. } => "order_confirmation",
            OrderEvent::OrderPaid { .. } => "payment_receipt",
            OrderEvent::OrderShipped { .. } => "shipping_notice",
            OrderEvent::OrderCancelled { .. } => "cancellation_notice",
        };
        info!(
            "event=notification_queued module=eventing status=ok channel=email template={template} order_id={}",
            event.order_id()
        );
    }
}

/// Counts published events per type.
#[derive(Debug, Default)]
pub struct AnalyticsObserver {
    counts: Mutex<BTreeMap<&'static str, u64>>,
}

impl AnalyticsObserver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current per-type counters, sorted by event name.
    pub fn snapshot(&self) -> BTreeMap<&'static str, u64> {
        match self.counts.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn count(&self, event_name: &str) -> u64 {
        self.snapshot().get(event_name).copied().unwrap_or(0)
    }
}

impl EventObserver for AnalyticsObserver {
    fn observer_id(&self) -> &str {
        "analytics"
    }

    fn on_event(&self, event: &OrderEvent) {
        let mut counts = match self.counts.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        *counts.entry(event.name()).or_insert(0) += 1;
    }
}
