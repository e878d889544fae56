use crate::database::error::DatabaseError;
use thiserror::Error;

pub type AppResult<T> = Result<T, Error>;

/// Top-level error taxonomy for the payment pipeline.
///
/// Command handlers surface the first error they hit synchronously; the
/// best-effort failure-event append never feeds back into this type.
#[derive(Debug, Error)]
pub enum Error {
    #[error("processor {provider} not found")]
    ProcessorNotFound { provider: String },

    #[error("action {action} not supported by provider {provider}")]
    ActionNotSupported { provider: String, action: String },

    /// Request build, marshal, transport or decode failure against a provider.
    #[error("provider {provider}: {message}")]
    Adapter { provider: String, message: String },

    #[error(transparent)]
    Persistence(#[from] DatabaseError),

    #[error("no payment found with id {payment_id}")]
    NotFound { payment_id: String },

    #[error("unknown event type: {event_type}")]
    UnknownEventType { event_type: String },

    #[error("invalid payment status transition: {from} -> {to}")]
    InvalidStatusTransition { from: String, to: String },
}

impl Error {
    pub fn processor_not_found(provider: impl Into<String>) -> Self {
        Self::ProcessorNotFound {
            provider: provider.into(),
        }
    }

    pub fn action_not_supported(provider: impl Into<String>, action: impl Into<String>) -> Self {
        Self::ActionNotSupported {
            provider: provider.into(),
            action: action.into(),
        }
    }

    pub fn adapter(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Adapter {
            provider: provider.into(),
            message: message.into(),
        }
    }

    pub fn not_found(payment_id: impl Into<String>) -> Self {
        Self::NotFound {
            payment_id: payment_id.into(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
            || matches!(self, Self::Persistence(e) if e.is_not_found())
    }
}
