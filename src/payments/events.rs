//! Immutable payment lifecycle events.
//!
//! Events are appended to a per-payment stream and replayed by the query
//! side. Every variant carries an explicit discriminant (`event_type`) used
//! both for store serialization and for replay dispatch.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::payments::model::PaymentStatus;

pub const EVENT_CREATED: &str = "Created";
pub const EVENT_CREATE_FAILED: &str = "Failed";
pub const EVENT_REFUNDED: &str = "Refunded";
pub const EVENT_STATUS_UPDATED: &str = "StatusUpdated";

/// Stream key for a payment's event history. All events of one payment land
/// on this one stream, whichever flow produced them.
pub fn stream_key(payment_id: &str) -> String {
    format!("payment-{payment_id}")
}

/// Sealed set of payment events. Matching is exhaustive; a new variant will
/// not compile until every projection handles it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event_type")]
pub enum PaymentEvent {
    Created {
        id: String,
        amount: f64,
        currency: String,
        transaction_id: String,
        merchant_id: String,
        created_at: DateTime<Utc>,
    },
    #[serde(rename = "Failed")]
    CreatedFailed {
        id: String,
        amount: f64,
        currency: String,
        transaction_id: String,
        error: String,
        merchant_id: String,
        created_at: DateTime<Utc>,
    },
    Refunded {
        id: String,
        amount: f64,
        currency: String,
        transaction_id: String,
        merchant_id: String,
        refunded_at: DateTime<Utc>,
    },
    StatusUpdated {
        id: String,
        status: PaymentStatus,
        amount: f64,
        currency: String,
        merchant_id: String,
        updated_at: DateTime<Utc>,
    },
}

impl PaymentEvent {
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::Created { .. } => EVENT_CREATED,
            Self::CreatedFailed { .. } => EVENT_CREATE_FAILED,
            Self::Refunded { .. } => EVENT_REFUNDED,
            Self::StatusUpdated { .. } => EVENT_STATUS_UPDATED,
        }
    }

    pub fn payment_id(&self) -> &str {
        match self {
            Self::Created { id, .. }
            | Self::CreatedFailed { id, .. }
            | Self::Refunded { id, .. }
            | Self::StatusUpdated { id, .. } => id,
        }
    }
}
