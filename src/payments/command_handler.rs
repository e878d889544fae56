//! Write side of the payment pipeline.
//!
//! Each command runs to completion within a single invocation. When any step
//! fails, a `CreatedFailed` event is appended on a detached task while the
//! error returns to the caller; the append races the return and its own
//! errors are logged and swallowed.

use crate::database::repository::PaymentRepository;
use crate::error::{AppResult, Error};
use crate::eventstore::PaymentEventStore;
use crate::integrations::ProcessorRegistry;
use crate::payments::commands::{CreatePayment, PaymentCommand, RefundPayment};
use crate::payments::events::{stream_key, PaymentEvent};
use crate::payments::model::{Payment, PaymentStatus};
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{error, info, warn};

pub struct CommandHandler {
    repo: Arc<dyn PaymentRepository>,
    event_store: Arc<dyn PaymentEventStore>,
    processors: Arc<ProcessorRegistry>,
}

impl CommandHandler {
    pub fn new(
        repo: Arc<dyn PaymentRepository>,
        event_store: Arc<dyn PaymentEventStore>,
        processors: Arc<ProcessorRegistry>,
    ) -> Self {
        Self {
            repo,
            event_store,
            processors,
        }
    }

    /// Dispatch a command to its flow. The command set is sealed; every
    /// variant is matched here.
    pub async fn handle(&self, command: PaymentCommand) -> AppResult<String> {
        match command {
            PaymentCommand::Create(cmd) => self.handle_create(cmd).await,
            PaymentCommand::Refund(cmd) => self.handle_refund(cmd).await,
        }
    }

    async fn handle_create(&self, cmd: CreatePayment) -> AppResult<String> {
        let mut payment = Payment::new(
            cmd.id,
            cmd.merchant_id,
            cmd.amount,
            cmd.currency,
            cmd.provider,
            cmd.metadata,
        );

        let transaction_id = match self.integrate(&payment, "authorize").await {
            Ok(id) => id,
            Err(err) => {
                error!(payment_id = %payment.id, %err, "authorization failed");
                self.record_failure(&payment, &err);
                return Err(err);
            }
        };

        payment.transaction_id = transaction_id.clone();
        payment.transition(PaymentStatus::Completed)?;

        if let Err(err) = self.repo.save(&payment).await {
            let err = Error::from(err);
            self.record_failure(&payment, &err);
            return Err(err);
        }

        let event = PaymentEvent::Created {
            id: payment.id.clone(),
            amount: payment.amount,
            currency: payment.currency.clone(),
            transaction_id: transaction_id.clone(),
            merchant_id: payment.merchant_id.clone(),
            created_at: Utc::now(),
        };

        if let Err(err) = self.event_store.append(&stream_key(&payment.id), &event).await {
            self.record_failure(&payment, &err);
            return Err(err);
        }

        info!(payment_id = %payment.id, %transaction_id, "payment created");
        Ok(transaction_id)
    }

    async fn handle_refund(&self, cmd: RefundPayment) -> AppResult<String> {
        let mut payment = self
            .repo
            .get_by_transaction_id(&cmd.transaction_id)
            .await
            .map_err(Error::from)?;

        payment.transition(PaymentStatus::Refunded)?;
        payment.amount = cmd.amount;

        if let Err(err) = self.integrate(&payment, "refund").await {
            error!(payment_id = %payment.id, %err, "refund failed");
            self.record_failure(&payment, &err);
            return Err(err);
        }

        if let Err(err) = self
            .repo
            .update_status_by_transaction_id(&cmd.transaction_id, PaymentStatus::Refunded)
            .await
        {
            let err = Error::from(err);
            self.record_failure(&payment, &err);
            return Err(err);
        }

        let event = PaymentEvent::Refunded {
            id: payment.id.clone(),
            amount: payment.amount,
            currency: payment.currency.clone(),
            transaction_id: payment.transaction_id.clone(),
            merchant_id: payment.merchant_id.clone(),
            refunded_at: Utc::now(),
        };

        if let Err(err) = self.event_store.append(&stream_key(&payment.id), &event).await {
            self.record_failure(&payment, &err);
            return Err(err);
        }

        info!(
            payment_id = %payment.id,
            transaction_id = %cmd.transaction_id,
            reason = cmd.reason.as_deref().unwrap_or(""),
            "payment refunded"
        );
        Ok(cmd.transaction_id)
    }

    /// Build the flat template-parameter map and delegate to the registry.
    /// Amounts are formatted with two decimals; callers of the adapter own
    /// URL-safety of the values.
    async fn integrate(&self, payment: &Payment, action: &str) -> AppResult<String> {
        let mut params = HashMap::from([
            ("merchant_id".to_string(), payment.merchant_id.clone()),
            ("amount".to_string(), format!("{:.2}", payment.amount)),
            ("currency".to_string(), payment.currency.clone()),
        ]);

        match action {
            "authorize" | "capture" => {
                params.insert(
                    "card_number".to_string(),
                    payment.metadata.card_number.clone(),
                );
                params.insert(
                    "expiry_date".to_string(),
                    payment.metadata.expiry_date.clone(),
                );
                params.insert("cvv".to_string(), payment.metadata.cvv.clone());
            }
            "refund" => {
                params.insert(
                    "transaction_id".to_string(),
                    payment.transaction_id.clone(),
                );
                params.insert(
                    "refund_amount".to_string(),
                    format!("{:.2}", payment.amount),
                );
            }
            "status" => {
                params.insert("payment_id".to_string(), payment.id.clone());
            }
            _ => {}
        }

        self.processors
            .process(&payment.integration, action, &params)
            .await
    }

    /// Best-effort failure record: append a `CreatedFailed` event on a
    /// detached task. The caller's error return and this append race each
    /// other; append errors are logged and dropped.
    fn record_failure(&self, payment: &Payment, err: &Error) {
        let event = PaymentEvent::CreatedFailed {
            id: payment.id.clone(),
            amount: payment.amount,
            currency: payment.currency.clone(),
            transaction_id: payment.transaction_id.clone(),
            error: err.to_string(),
            merchant_id: payment.merchant_id.clone(),
            created_at: Utc::now(),
        };

        let store = Arc::clone(&self.event_store);
        let key = stream_key(&payment.id);
        tokio::spawn(async move {
            if let Err(e) = store.append(&key, &event).await {
                warn!(stream_key = %key, %e, "failed to record payment failure event");
            }
        });
    }
}
