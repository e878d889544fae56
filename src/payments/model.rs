//! Payment aggregate and its status machine.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{AppResult, Error};

/// Lifecycle status of a payment. Forward-only: Pending moves to Completed or
/// Failed, Completed moves to Refunded. A refund against an already refunded
/// payment is accepted (see `can_transition_to`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentStatus {
    Pending,
    Completed,
    Failed,
    Refunded,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Completed => "Completed",
            Self::Failed => "Failed",
            Self::Refunded => "Refunded",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "Pending" => Some(Self::Pending),
            "Completed" => Some(Self::Completed),
            "Failed" => Some(Self::Failed),
            "Refunded" => Some(Self::Refunded),
            _ => None,
        }
    }

    /// Repeating Refunded -> Refunded is allowed: a second refund for the
    /// same transaction runs the full pipeline again and appends a second
    /// event. There is no idempotency guard at this layer.
    pub fn can_transition_to(self, next: PaymentStatus) -> bool {
        matches!(
            (self, next),
            (Self::Pending, Self::Completed)
                | (Self::Pending, Self::Failed)
                | (Self::Completed, Self::Refunded)
                | (Self::Refunded, Self::Refunded)
        )
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Card details carried alongside a payment and forwarded to the provider as
/// template parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentMetadata {
    pub card_number: String,
    pub expiry_date: String,
    pub cvv: String,
}

/// Materialized payment record. Holds current state only; history lives in
/// the event stream.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Payment {
    pub id: String,
    pub merchant_id: String,
    pub amount: f64,
    pub currency: String,
    pub status: PaymentStatus,
    /// Name of the provider this payment is routed through.
    pub integration: String,
    pub transaction_id: String,
    pub metadata: PaymentMetadata,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Payment {
    pub fn new(
        id: String,
        merchant_id: String,
        amount: f64,
        currency: String,
        integration: String,
        metadata: PaymentMetadata,
    ) -> Self {
        let now = Utc::now();
        Self {
            id,
            merchant_id,
            amount,
            currency,
            status: PaymentStatus::Pending,
            integration,
            transaction_id: String::new(),
            metadata,
            created_at: now,
            updated_at: now,
        }
    }

    /// Move the payment to `next`, enforcing the forward-only status machine.
    pub fn transition(&mut self, next: PaymentStatus) -> AppResult<()> {
        if !self.status.can_transition_to(next) {
            return Err(Error::InvalidStatusTransition {
                from: self.status.to_string(),
                to: next.to_string(),
            });
        }
        self.status = next;
        self.updated_at = Utc::now();
        Ok(())
    }
}

/// Point-in-time capture of a payment's scalar fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentSnapshot {
    pub id: String,
    pub amount: f64,
    pub currency: String,
    pub status: PaymentStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Payment> for PaymentSnapshot {
    fn from(payment: &Payment) -> Self {
        Self {
            id: payment.id.clone(),
            amount: payment.amount,
            currency: payment.currency.clone(),
            status: payment.status,
            created_at: payment.created_at,
            updated_at: payment.updated_at,
        }
    }
}
