use super::PaymentError;
use crate::model::money::Money;
use crate::model::order::OrderId;
use log::info;

/// Outcome of one successful charge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentReceipt {
    /// Display name of the strategy that charged.
    pub method: String,
    pub amount: Money,
    /// Provider reference, unique per order and method.
    pub reference: String,
}

/// One interchangeable way of charging an order.
pub trait PaymentStrategy: Send + Sync {
    /// Wire-level id, e.g. `credit_card`.
    fn method_id(&self) -> &str;

    /// Human-readable name carried in receipts and events.
    fn name(&self) -> &str;

    /// Charges `amount` for `order_id`.
    ///
    /// # Errors
    /// `InvalidAmount` for zero amounts, `Declined` when the provider refuses.
    fn process(&self, amount: &Money, order_id: OrderId) -> Result<PaymentReceipt, PaymentError>;
}

fn charge(
    method_id: &str,
    name: &str,
    reference_prefix: &str,
    amount: &Money,
    order_id: OrderId,
) -> Result<PaymentReceipt, PaymentError> {
    if amount.is_zero() {
        return Err(PaymentError::InvalidAmount);
    }
    info!(
        "event=payment_charge module=payment status=ok method={method_id} order_id={order_id} amount_minor={} currency={}",
        amount.amount_minor(),
        amount.currency()
    );
    Ok(PaymentReceipt {
        method: name.to_string(),
        amount: amount.clone(),
        reference: format!("{reference_prefix}-{}", order_id.as_uuid().simple()),
    })
}

#[derive(Debug, Default, Clone, Copy)]
pub struct CreditCardPayment;

impl PaymentStrategy for CreditCardPayment {
    fn method_id(&self) -> &str {
        "credit_card"
    }

    fn name(&self) -> &str {
        "Credit Card"
    }

    fn process(&self, amount: &Money, order_id: OrderId) -> Result<PaymentReceipt, PaymentError> {
        charge(self.method_id(), self.name(), "cc", amount, order_id)
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct PayPalPayment;

impl PaymentStrategy for PayPalPayment {
    fn method_id(&self) -> &str {
        "paypal"
    }

    fn name(&self) -> &str {
        "PayPal"
    }

    fn process(&self, amount: &Money, order_id: OrderId) -> Result<PaymentReceipt, PaymentError> {
        charge(self.method_id(), self.name(), "pp", amount, order_id)
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct CryptoPayment;

impl PaymentStrategy for CryptoPayment {
    fn method_id(&self) -> &str {
        "crypto"
    }

    fn name(&self) -> &str {
        "Cryptocurrency"
    }

    fn process(&self, amount: &Money, order_id: OrderId) -> Result<PaymentReceipt, PaymentError> {
        charge(self.method_id(), self.name(), "cx", amount, order_id)
    }
}
