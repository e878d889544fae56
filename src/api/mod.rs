//! HTTP surface: request binding and error mapping around the payment
//! service. Business behavior lives below this layer.

pub mod health;
pub mod payments;

use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use http::StatusCode;
use serde_json::json;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::error::Error;
use crate::payments::PaymentService;

#[derive(Clone)]
pub struct AppState {
    pub service: Arc<PaymentService>,
    pub config: Config,
}

pub fn router(service: Arc<PaymentService>, config: Config) -> Router {
    let state = AppState { service, config };

    Router::new()
        .route("/health", get(health::health_check))
        .route(
            "/payments",
            post(payments::process_payment).get(payments::list_payments),
        )
        .route("/payments/refund", post(payments::refund_payment))
        .route("/payments/:id", get(payments::payment_details))
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                .layer(TraceLayer::new_for_http())
                .layer(PropagateRequestIdLayer::x_request_id()),
        )
        .with_state(state)
}

/// Error envelope for the HTTP layer.
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        let status = match &err {
            Error::NotFound { .. } => StatusCode::NOT_FOUND,
            Error::ProcessorNotFound { .. }
            | Error::ActionNotSupported { .. }
            | Error::InvalidStatusTransition { .. } => StatusCode::BAD_REQUEST,
            Error::Persistence(e) if e.is_not_found() => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        Self {
            status,
            message: err.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}
