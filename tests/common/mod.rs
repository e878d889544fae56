//! Shared test doubles: in-memory repository and event store, a scriptable
//! processor, and a stub provider HTTP server.
#![allow(dead_code)]

use agnostic_payment_platform::database::error::{DatabaseError, DbResult};
use agnostic_payment_platform::database::repository::PaymentRepository;
use agnostic_payment_platform::error::{AppResult, Error};
use agnostic_payment_platform::eventstore::PaymentEventStore;
use agnostic_payment_platform::integrations::Processor;
use agnostic_payment_platform::payments::events::PaymentEvent;
use agnostic_payment_platform::payments::model::{
    Payment, PaymentMetadata, PaymentSnapshot, PaymentStatus,
};
use async_trait::async_trait;
use axum::body::to_bytes;
use axum::extract::{Request, State};
use axum::response::IntoResponse;
use axum::Router;
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Mutex;
use std::sync::Arc;

pub struct InMemoryPaymentRepository {
    payments: Mutex<Vec<Payment>>,
    pub status_updates: Mutex<Vec<(String, PaymentStatus)>>,
    snapshots: Mutex<Vec<PaymentSnapshot>>,
}

impl InMemoryPaymentRepository {
    pub fn new() -> Self {
        Self {
            payments: Mutex::new(Vec::new()),
            status_updates: Mutex::new(Vec::new()),
            snapshots: Mutex::new(Vec::new()),
        }
    }

    pub fn seed(&self, payment: Payment) {
        self.payments.lock().unwrap().push(payment);
    }

    pub fn stored(&self) -> Vec<Payment> {
        self.payments.lock().unwrap().clone()
    }

    pub fn status_update_count(&self) -> usize {
        self.status_updates.lock().unwrap().len()
    }
}

#[async_trait]
impl PaymentRepository for InMemoryPaymentRepository {
    async fn save(&self, payment: &Payment) -> DbResult<()> {
        self.payments.lock().unwrap().push(payment.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> DbResult<Option<Payment>> {
        Ok(self
            .payments
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.id == id)
            .cloned())
    }

    async fn get_by_transaction_id(&self, transaction_id: &str) -> DbResult<Payment> {
        self.payments
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.transaction_id == transaction_id)
            .cloned()
            .ok_or_else(|| DatabaseError::not_found("payment", transaction_id))
    }

    async fn update_status_by_transaction_id(
        &self,
        transaction_id: &str,
        status: PaymentStatus,
    ) -> DbResult<()> {
        let mut payments = self.payments.lock().unwrap();
        for payment in payments.iter_mut() {
            if payment.transaction_id == transaction_id {
                payment.status = status;
            }
        }
        self.status_updates
            .lock()
            .unwrap()
            .push((transaction_id.to_string(), status));
        Ok(())
    }

    async fn list_payments(
        &self,
        merchant_id: Option<&str>,
        status: Option<PaymentStatus>,
        limit: i64,
        offset: i64,
    ) -> DbResult<Vec<Payment>> {
        let payments = self.payments.lock().unwrap();
        Ok(payments
            .iter()
            .filter(|p| merchant_id.map_or(true, |m| p.merchant_id == m))
            .filter(|p| status.map_or(true, |s| p.status == s))
            .skip(offset as usize)
            .take(limit as usize)
            .cloned()
            .collect())
    }

    async fn save_snapshot(&self, snapshot: &PaymentSnapshot) -> DbResult<()> {
        self.snapshots.lock().unwrap().push(snapshot.clone());
        Ok(())
    }

    async fn latest_snapshot(&self, payment_id: &str) -> DbResult<Option<PaymentSnapshot>> {
        Ok(self
            .snapshots
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find(|s| s.id == payment_id)
            .cloned())
    }
}

pub struct InMemoryEventStore {
    streams: Mutex<HashMap<String, Vec<PaymentEvent>>>,
}

impl InMemoryEventStore {
    pub fn new() -> Self {
        Self {
            streams: Mutex::new(HashMap::new()),
        }
    }

    pub fn seed(&self, stream_key: &str, events: Vec<PaymentEvent>) {
        self.streams
            .lock()
            .unwrap()
            .insert(stream_key.to_string(), events);
    }

    pub fn events(&self, stream_key: &str) -> Vec<PaymentEvent> {
        self.streams
            .lock()
            .unwrap()
            .get(stream_key)
            .cloned()
            .unwrap_or_default()
    }
}

#[async_trait]
impl PaymentEventStore for InMemoryEventStore {
    async fn append(&self, stream_key: &str, event: &PaymentEvent) -> AppResult<()> {
        self.streams
            .lock()
            .unwrap()
            .entry(stream_key.to_string())
            .or_default()
            .push(event.clone());
        Ok(())
    }

    async fn read_stream(&self, stream_key: &str) -> AppResult<Vec<PaymentEvent>> {
        Ok(self.events(stream_key))
    }
}

/// Processor double returning a scripted outcome and counting invocations.
pub struct StubProcessor {
    outcome: Result<String, String>,
    pub calls: Mutex<Vec<(String, HashMap<String, String>)>>,
}

impl StubProcessor {
    pub fn succeeding(transaction_id: &str) -> Self {
        Self {
            outcome: Ok(transaction_id.to_string()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            outcome: Err(message.to_string()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl Processor for StubProcessor {
    async fn process(&self, action: &str, params: &HashMap<String, String>) -> AppResult<String> {
        self.calls
            .lock()
            .unwrap()
            .push((action.to_string(), params.clone()));
        match &self.outcome {
            Ok(id) => Ok(id.clone()),
            Err(message) => Err(Error::adapter("stub", message.clone())),
        }
    }
}

pub fn test_payment(id: &str, transaction_id: &str, status: PaymentStatus) -> Payment {
    let mut payment = Payment::new(
        id.to_string(),
        "m-1".to_string(),
        25.0,
        "USD".to_string(),
        "acme".to_string(),
        PaymentMetadata {
            card_number: "4111111111111111".to_string(),
            expiry_date: "12/30".to_string(),
            cvv: "123".to_string(),
        },
    );
    payment.transaction_id = transaction_id.to_string();
    payment.status = status;
    payment
}

/// One request observed by the stub provider server.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub headers: HashMap<String, String>,
    pub body: serde_json::Value,
}

struct ProviderInner {
    status: u16,
    body: String,
    requests: Mutex<Vec<RecordedRequest>>,
}

#[derive(Clone)]
pub struct StubProvider {
    inner: Arc<ProviderInner>,
}

impl StubProvider {
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.inner.requests.lock().unwrap().clone()
    }
}

async fn record(State(provider): State<StubProvider>, request: Request) -> impl IntoResponse {
    let (parts, body) = request.into_parts();
    let bytes = to_bytes(body, usize::MAX).await.unwrap_or_default();

    let headers = parts
        .headers
        .iter()
        .map(|(name, value)| {
            (
                name.as_str().to_lowercase(),
                value.to_str().unwrap_or_default().to_string(),
            )
        })
        .collect();

    provider.inner.requests.lock().unwrap().push(RecordedRequest {
        method: parts.method.to_string(),
        path: parts.uri.path().to_string(),
        headers,
        body: serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null),
    });

    (
        http::StatusCode::from_u16(provider.inner.status).unwrap(),
        [(http::header::CONTENT_TYPE, "application/json")],
        provider.inner.body.clone(),
    )
}

/// Spin up a provider stub answering every route with a fixed status/body.
pub async fn spawn_provider(status: u16, body: &str) -> (SocketAddr, StubProvider) {
    let provider = StubProvider {
        inner: Arc::new(ProviderInner {
            status,
            body: body.to_string(),
            requests: Mutex::new(Vec::new()),
        }),
    };

    let app = Router::new()
        .fallback(record)
        .with_state(provider.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (addr, provider)
}
