//! Application facade over the command and query handlers.

use crate::error::AppResult;
use crate::payments::command_handler::CommandHandler;
use crate::payments::commands::{CreatePayment, PaymentCommand, RefundPayment};
use crate::payments::dto::{PaymentDetails, PaymentRequest, PaymentResponse, RefundRequest};
use crate::payments::model::{PaymentMetadata, PaymentStatus};
use crate::payments::query_handler::{ListPaymentsQuery, QueryHandler};
use uuid::Uuid;

pub struct PaymentService {
    commands: CommandHandler,
    queries: QueryHandler,
}

impl PaymentService {
    pub fn new(commands: CommandHandler, queries: QueryHandler) -> Self {
        Self { commands, queries }
    }

    /// Assign a fresh payment id and run the create flow.
    pub async fn process_payment(&self, input: PaymentRequest) -> AppResult<PaymentResponse> {
        let payment_id = Uuid::new_v4().to_string();

        let command = PaymentCommand::Create(CreatePayment {
            id: payment_id.clone(),
            amount: input.amount,
            currency: input.currency.clone(),
            merchant_id: input.merchant_id,
            provider: input.provider,
            metadata: PaymentMetadata {
                card_number: input.card_number,
                expiry_date: input.expiry_date,
                cvv: input.cvv,
            },
        });

        let transaction_id = self.commands.handle(command).await?;

        Ok(PaymentResponse {
            transaction_id,
            payment_id,
            payment_status: PaymentStatus::Completed.to_string(),
            amount: Some(input.amount),
            currency: Some(input.currency),
        })
    }

    pub async fn process_refund(&self, input: RefundRequest) -> AppResult<PaymentResponse> {
        let command = PaymentCommand::Refund(RefundPayment {
            payment_id: input.payment_id.clone(),
            transaction_id: input.transaction_id,
            amount: input.amount,
            reason: input.reason,
        });

        let transaction_id = self.commands.handle(command).await?;

        Ok(PaymentResponse {
            transaction_id,
            payment_id: input.payment_id,
            payment_status: PaymentStatus::Refunded.to_string(),
            amount: Some(input.amount),
            currency: None,
        })
    }

    pub async fn get_payment_details(&self, payment_id: &str) -> AppResult<Vec<PaymentDetails>> {
        self.queries.get_payment_details(payment_id).await
    }

    pub async fn list_payments(&self, query: ListPaymentsQuery) -> AppResult<Vec<PaymentDetails>> {
        self.queries.list_payments(query).await
    }
}
