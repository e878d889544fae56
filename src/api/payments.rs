//! Payment routes: create, refund, history, listing.

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;
use tracing::error;

use crate::api::{ApiError, AppState};
use crate::payments::dto::{PaymentDetails, PaymentRequest, PaymentResponse, RefundRequest};
use crate::payments::model::PaymentStatus;
use crate::payments::ListPaymentsQuery;

const DEFAULT_PAGE_SIZE: i64 = 50;

pub async fn process_payment(
    State(state): State<AppState>,
    Json(input): Json<PaymentRequest>,
) -> Result<Json<PaymentResponse>, ApiError> {
    let response = state.service.process_payment(input).await.map_err(|e| {
        error!(%e, "unable to process payment");
        ApiError::from(e)
    })?;

    Ok(Json(response))
}

pub async fn refund_payment(
    State(state): State<AppState>,
    Json(input): Json<RefundRequest>,
) -> Result<Json<PaymentResponse>, ApiError> {
    let response = state.service.process_refund(input).await.map_err(|e| {
        error!(%e, "unable to process refund");
        ApiError::from(e)
    })?;

    Ok(Json(response))
}

pub async fn payment_details(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Vec<PaymentDetails>>, ApiError> {
    let details = state.service.get_payment_details(&id).await?;
    Ok(Json(details))
}

#[derive(Debug, Deserialize)]
pub struct ListPaymentsParams {
    pub merchant_id: Option<String>,
    pub status: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

pub async fn list_payments(
    State(state): State<AppState>,
    Query(params): Query<ListPaymentsParams>,
) -> Result<Json<Vec<PaymentDetails>>, ApiError> {
    let status = match params.status.as_deref() {
        Some(raw) => Some(
            PaymentStatus::parse(raw).ok_or_else(|| ApiError::bad_request("invalid status filter"))?,
        ),
        None => None,
    };

    let query = ListPaymentsQuery {
        merchant_id: params.merchant_id,
        status,
        limit: params.limit.unwrap_or(DEFAULT_PAGE_SIZE),
        offset: params.offset.unwrap_or(0),
    };

    let payments = state.service.list_payments(query).await?;
    Ok(Json(payments))
}
