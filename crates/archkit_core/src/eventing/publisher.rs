use crate::model::events::OrderEvent;
use log::debug;
use std::sync::{Arc, RwLock};

/// Receiver of published order events.
pub trait EventObserver: Send + Sync {
    /// Short id used in diagnostics.
    fn observer_id(&self) -> &str;

    fn on_event(&self, event: &OrderEvent);
}

/// Ordered observer list shared by all order use cases.
#[derive(Default)]
pub struct EventPublisher {
    observers: RwLock<Vec<Arc<dyn EventObserver>>>,
}

impl EventPublisher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self, observer: Arc<dyn EventObserver>) {
        let mut observers = match self.observers.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        observers.push(observer);
    }

    pub fn observer_count(&self) -> usize {
        self.snapshot().len()
    }

    /// Delivers `event` to every observer in subscription order.
    pub fn publish(&self, event: &OrderEvent) {
        let observers = self.snapshot();
        debug!(
            "event=domain_event_publish module=eventing status=start type={} order_id={} observers={}",
            event.name(),
            event.order_id(),
            observers.len()
        );
        for observer in &observers {
            observer.on_event(event);
            debug!(
                "event=domain_event_deliver module=eventing status=ok type={} observer={}",
                event.name(),
                observer.observer_id()
            );
        }
    }

    // Observers are cloned out so one of them may subscribe others without deadlocking.
    fn snapshot(&self) -> Vec<Arc<dyn EventObserver>> {
        match self.observers.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::order::OrderId;
    use std::sync::Mutex;

    struct Recorder {
        id: &'static str,
        log: Arc<Mutex<Vec<String>>>,
    }

    impl EventObserver for Recorder {
        fn observer_id(&self) -> &str {
            self.id
        }

        fn on_event(&self, event: &OrderEvent) {
            self.log
                .lock()
                .unwrap()
                .push(format!("{}:{}", self.id, event.name()));
        }
    }

    #[test]
    fn publish_reaches_observers_in_subscription_order() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let publisher = EventPublisher::new();
        publisher.subscribe(Arc::new(Recorder {
            id: "first",
            log: Arc::clone(&log),
        }));
        publisher.subscribe(Arc::new(Recorder {
            id: "second",
            log: Arc::clone(&log),
        }));
        assert_eq!(publisher.observer_count(), 2);

        publisher.publish(&OrderEvent::OrderCancelled {
            order_id: OrderId::generate(),
        });

        assert_eq!(
            *log.lock().unwrap(),
            vec!["first:OrderCancelled", "second:OrderCancelled"]
        );
    }

    #[test]
    fn publish_without_observers_is_a_no_op() {
        let publisher = EventPublisher::new();
        publisher.publish(&OrderEvent::OrderCancelled {
            order_id: OrderId::generate(),
        });
        assert_eq!(publisher.observer_count(), 0);
    }
}
