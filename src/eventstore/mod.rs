//! Append-only payment event streams.
//!
//! Streams are ordered by append sequence and are the source of truth for
//! payment history. The materialized `payments` table is maintained
//! separately and holds current state only.

pub mod postgres;

use crate::error::{AppResult, Error};
use crate::payments::events::{
    PaymentEvent, EVENT_CREATED, EVENT_CREATE_FAILED, EVENT_REFUNDED, EVENT_STATUS_UPDATED,
};
use async_trait::async_trait;

pub use postgres::PgPaymentEventStore;

/// Upper bound on a single stream read.
pub const MAX_STREAM_READ: i64 = 1000;

/// Append-only event store contract.
#[async_trait]
pub trait PaymentEventStore: Send + Sync {
    /// Append one event, serialized as JSON and tagged with its variant
    /// discriminant, to the given stream.
    async fn append(&self, stream_key: &str, event: &PaymentEvent) -> AppResult<()>;

    /// Read back up to [`MAX_STREAM_READ`] events in append order. A stream
    /// that was never written to is an empty result, not an error.
    async fn read_stream(&self, stream_key: &str) -> AppResult<Vec<PaymentEvent>>;
}

/// Rebuild a typed event from its persisted discriminant and payload.
///
/// The discriminant column drives dispatch; a tag this build does not know
/// is an `UnknownEventType` error rather than a silently skipped row.
pub(crate) fn decode_event(event_type: &str, payload: serde_json::Value) -> AppResult<PaymentEvent> {
    match event_type {
        EVENT_CREATED | EVENT_CREATE_FAILED | EVENT_REFUNDED | EVENT_STATUS_UPDATED => {
            serde_json::from_value(payload).map_err(|e| {
                Error::Persistence(crate::database::error::DatabaseError::query(format!(
                    "corrupt event payload for {event_type}: {e}"
                )))
            })
        }
        other => Err(Error::UnknownEventType {
            event_type: other.to_string(),
        }),
    }
}
