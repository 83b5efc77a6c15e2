use super::strategy::{CreditCardPayment, CryptoPayment, PayPalPayment, PaymentStrategy};
use super::PaymentError;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Registry of payment strategies keyed by method id.
#[derive(Default, Clone)]
pub struct PaymentFactory {
    strategies: BTreeMap<String, Arc<dyn PaymentStrategy>>,
}

impl PaymentFactory {
    /// Empty factory; every lookup fails until strategies are registered.
    pub fn new() -> Self {
        Self::default()
    }

    /// Factory with the credit card, PayPal and crypto strategies.
    pub fn with_defaults() -> Self {
        let mut factory = Self::new();
        let defaults: [Arc<dyn PaymentStrategy>; 3] = [
            Arc::new(CreditCardPayment),
            Arc::new(PayPalPayment),
            Arc::new(CryptoPayment),
        ];
        for strategy in defaults {
            factory
                .strategies
                .insert(strategy.method_id().to_string(), strategy);
        }
        factory
    }

    /// Registers one strategy under its method id.
    ///
    /// # Errors
    /// `InvalidMethodId` for blank ids, `DuplicateMethod` for ids already present.
    pub fn register(&mut self, strategy: Arc<dyn PaymentStrategy>) -> Result<(), PaymentError> {
        let method_id = strategy.method_id().trim().to_string();
        if method_id.is_empty() || method_id.contains(char::is_whitespace) {
            return Err(PaymentError::InvalidMethodId(method_id));
        }
        if self.strategies.contains_key(&method_id) {
            return Err(PaymentError::DuplicateMethod(method_id));
        }
        self.strategies.insert(method_id, strategy);
        Ok(())
    }

    /// Resolves the strategy for a wire-level method id.
    ///
    /// # Errors
    /// `UnsupportedMethod` for unknown ids.
    pub fn create(&self, method_id: &str) -> Result<Arc<dyn PaymentStrategy>, PaymentError> {
        let normalized = method_id.trim();
        self.strategies
            .get(normalized)
            .cloned()
            .ok_or_else(|| PaymentError::UnsupportedMethod(normalized.to_string()))
    }

    /// Sorted method ids.
    pub fn method_ids(&self) -> Vec<String> {
        self.strategies.keys().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::money::Money;
    use crate::model::order::OrderId;
    use crate::payment::PaymentReceipt;

    struct DecliningPayment;

    impl PaymentStrategy for DecliningPayment {
        fn method_id(&self) -> &str {
            "declining"
        }

        fn name(&self) -> &str {
            "Always Declines"
        }

        fn process(&self, _: &Money, _: OrderId) -> Result<PaymentReceipt, PaymentError> {
            Err(PaymentError::Declined("test double".to_string()))
        }
    }

    #[test]
    fn defaults_resolve_known_methods() {
        let factory = PaymentFactory::with_defaults();
        assert_eq!(factory.method_ids(), vec!["credit_card", "crypto", "paypal"]);
        assert_eq!(factory.create("credit_card").unwrap().name(), "Credit Card");
        assert_eq!(factory.create(" paypal ").unwrap().name(), "PayPal");
        assert_eq!(factory.create("crypto").unwrap().name(), "Cryptocurrency");
    }

    #[test]
    fn unknown_method_is_unsupported() {
        let factory = PaymentFactory::with_defaults();
        assert!(matches!(
            factory.create("cash"),
            Err(PaymentError::UnsupportedMethod(method)) if method == "cash"
        ));
    }

    #[test]
    fn register_rejects_duplicates_and_accepts_new_methods() {
        let mut factory = PaymentFactory::with_defaults();
        assert_eq!(
            factory.register(Arc::new(CreditCardPayment)),
            Err(PaymentError::DuplicateMethod("credit_card".to_string()))
        );
        factory.register(Arc::new(DecliningPayment)).unwrap();
        assert_eq!(factory.create("declining").unwrap().name(), "Always Declines");
    }
}
