//! Write intents processed by the command handler.

use crate::payments::model::PaymentMetadata;

/// Sealed command set. Dispatch is an exhaustive match; an unhandled variant
/// is a compile error, not a runtime condition.
#[derive(Debug, Clone)]
pub enum PaymentCommand {
    Create(CreatePayment),
    Refund(RefundPayment),
}

#[derive(Debug, Clone)]
pub struct CreatePayment {
    pub id: String,
    pub amount: f64,
    pub currency: String,
    pub merchant_id: String,
    /// Catalog name of the provider to route through.
    pub provider: String,
    pub metadata: PaymentMetadata,
}

#[derive(Debug, Clone)]
pub struct RefundPayment {
    pub payment_id: String,
    pub transaction_id: String,
    pub amount: f64,
    pub reason: Option<String>,
}
