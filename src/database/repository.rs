use crate::database::error::DbResult;
use crate::payments::model::{Payment, PaymentSnapshot, PaymentStatus};
use async_trait::async_trait;

/// Storage contract for the materialized payment records.
///
/// The command pipeline writes current state through this trait; the list
/// read path goes through it as well, independently of the event stream.
#[async_trait]
pub trait PaymentRepository: Send + Sync {
    /// Insert a new payment record.
    async fn save(&self, payment: &Payment) -> DbResult<()>;

    /// Find a payment by its id.
    async fn find_by_id(&self, id: &str) -> DbResult<Option<Payment>>;

    /// Find the payment that produced the given provider transaction id.
    async fn get_by_transaction_id(&self, transaction_id: &str) -> DbResult<Payment>;

    /// Update the status of the payment matching the transaction id.
    async fn update_status_by_transaction_id(
        &self,
        transaction_id: &str,
        status: PaymentStatus,
    ) -> DbResult<()>;

    /// List current-state payment rows, optionally filtered by merchant and
    /// status, paginated by limit/offset.
    async fn list_payments(
        &self,
        merchant_id: Option<&str>,
        status: Option<PaymentStatus>,
        limit: i64,
        offset: i64,
    ) -> DbResult<Vec<Payment>>;

    /// Persist a point-in-time snapshot of a payment's scalar fields.
    async fn save_snapshot(&self, snapshot: &PaymentSnapshot) -> DbResult<()>;

    /// Most recent snapshot for a payment, if any.
    async fn latest_snapshot(&self, payment_id: &str) -> DbResult<Option<PaymentSnapshot>>;
}
