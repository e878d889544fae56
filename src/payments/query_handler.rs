//! Read side of the payment pipeline.
//!
//! Two independent read paths: payment history replayed from the event
//! stream, and current-state listings served from the materialized table.

use crate::database::repository::PaymentRepository;
use crate::error::{AppResult, Error};
use crate::eventstore::PaymentEventStore;
use crate::payments::dto::PaymentDetails;
use crate::payments::events::stream_key;
use crate::payments::model::PaymentStatus;
use std::sync::Arc;

#[derive(Debug, Clone, Default)]
pub struct ListPaymentsQuery {
    pub merchant_id: Option<String>,
    pub status: Option<PaymentStatus>,
    pub limit: i64,
    pub offset: i64,
}

pub struct QueryHandler {
    repo: Arc<dyn PaymentRepository>,
    event_store: Arc<dyn PaymentEventStore>,
}

impl QueryHandler {
    pub fn new(repo: Arc<dyn PaymentRepository>, event_store: Arc<dyn PaymentEventStore>) -> Self {
        Self { repo, event_store }
    }

    /// Replay the payment's full event stream into an ordered list of
    /// history rows. Callers receive history, not a merged snapshot.
    pub async fn get_payment_details(&self, payment_id: &str) -> AppResult<Vec<PaymentDetails>> {
        let events = self.event_store.read_stream(&stream_key(payment_id)).await?;
        if events.is_empty() {
            return Err(Error::not_found(payment_id));
        }

        Ok(events.into_iter().map(PaymentDetails::from_event).collect())
    }

    /// Current-state rows from the materialized table; no event replay.
    pub async fn list_payments(&self, query: ListPaymentsQuery) -> AppResult<Vec<PaymentDetails>> {
        let payments = self
            .repo
            .list_payments(
                query.merchant_id.as_deref(),
                query.status,
                query.limit,
                query.offset,
            )
            .await?;

        Ok(payments
            .into_iter()
            .map(PaymentDetails::from_payment)
            .collect())
    }
}
