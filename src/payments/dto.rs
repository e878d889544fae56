//! Request/response shapes for the payment API surface.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::payments::events::{PaymentEvent, EVENT_CREATED, EVENT_CREATE_FAILED, EVENT_REFUNDED};
use crate::payments::model::Payment;

#[derive(Debug, Clone, Deserialize)]
pub struct PaymentRequest {
    pub merchant_id: String,
    pub amount: f64,
    pub currency: String,
    pub card_number: String,
    pub expiry_date: String,
    pub cvv: String,
    /// Provider catalog name to route this payment through.
    #[serde(rename = "type")]
    pub provider: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct PaymentResponse {
    pub transaction_id: String,
    pub payment_id: String,
    pub payment_status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RefundRequest {
    pub payment_id: String,
    pub transaction_id: String,
    pub amount: f64,
    #[serde(default)]
    pub reason: Option<String>,
}

/// One projected row of a payment's history (or one materialized record on
/// the list path).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaymentDetails {
    pub id: String,
    pub merchant_id: String,
    pub amount: f64,
    pub currency: String,
    pub payment_status: String,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refunded_amount: Option<f64>,
}

impl PaymentDetails {
    /// Project a single event into a history row. The status label comes
    /// from the event variant; a refund row carries its own refund time and
    /// the refunded amount.
    pub fn from_event(event: PaymentEvent) -> Self {
        match event {
            PaymentEvent::Created {
                id,
                amount,
                currency,
                merchant_id,
                created_at,
                ..
            } => Self {
                id,
                merchant_id,
                amount,
                currency,
                payment_status: EVENT_CREATED.to_string(),
                created_at,
                refunded_amount: None,
            },
            PaymentEvent::CreatedFailed {
                id,
                amount,
                currency,
                merchant_id,
                created_at,
                ..
            } => Self {
                id,
                merchant_id,
                amount,
                currency,
                payment_status: EVENT_CREATE_FAILED.to_string(),
                created_at,
                refunded_amount: None,
            },
            PaymentEvent::Refunded {
                id,
                amount,
                currency,
                merchant_id,
                refunded_at,
                ..
            } => Self {
                id,
                merchant_id,
                amount,
                currency,
                payment_status: EVENT_REFUNDED.to_string(),
                created_at: refunded_at,
                refunded_amount: Some(amount),
            },
            PaymentEvent::StatusUpdated {
                id,
                status,
                amount,
                currency,
                merchant_id,
                updated_at,
            } => Self {
                id,
                merchant_id,
                amount,
                currency,
                payment_status: status.to_string(),
                created_at: updated_at,
                refunded_amount: None,
            },
        }
    }

    pub fn from_payment(payment: Payment) -> Self {
        Self {
            id: payment.id,
            merchant_id: payment.merchant_id,
            amount: payment.amount,
            currency: payment.currency,
            payment_status: payment.status.to_string(),
            created_at: payment.created_at,
            refunded_amount: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn refunded_event_projects_refund_row() {
        let refunded_at = Utc::now();
        let row = PaymentDetails::from_event(PaymentEvent::Refunded {
            id: "p-1".to_string(),
            amount: 7.5,
            currency: "EUR".to_string(),
            transaction_id: "tx-1".to_string(),
            merchant_id: "m-1".to_string(),
            refunded_at,
        });

        assert_eq!(row.payment_status, "Refunded");
        assert_eq!(row.refunded_amount, Some(7.5));
        assert_eq!(row.created_at, refunded_at);
    }

    #[test]
    fn status_updated_event_carries_its_status() {
        let row = PaymentDetails::from_event(PaymentEvent::StatusUpdated {
            id: "p-1".to_string(),
            status: crate::payments::model::PaymentStatus::Completed,
            amount: 3.0,
            currency: "USD".to_string(),
            merchant_id: "m-1".to_string(),
            updated_at: Utc::now(),
        });
        assert_eq!(row.payment_status, "Completed");
        assert_eq!(row.refunded_amount, None);
    }
}
