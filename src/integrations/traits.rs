//! Processor contract shared by every provider adapter.

use crate::error::AppResult;
use async_trait::async_trait;
use std::collections::HashMap;

/// Executes one logical action against one payment provider.
///
/// Implementations make exactly one outbound call per invocation; there are
/// no retries and no caching at this layer.
#[async_trait]
pub trait Processor: Send + Sync {
    /// Run `action` with the given template parameters and return the
    /// provider's transaction id. An empty string means the provider's
    /// response carried no usable `transaction_id`; that is not an error.
    async fn process(&self, action: &str, params: &HashMap<String, String>) -> AppResult<String>;
}
