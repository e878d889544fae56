//! Generic, configuration-driven provider adapter.
//!
//! One adapter per catalog entry. A logical `(action, params)` call becomes a
//! single HTTP request built from the provider's endpoint templates; there is
//! no provider-specific code anywhere in this module.

use crate::config::{EndpointConfig, PaymentProvider};
use crate::error::{AppResult, Error};
use crate::integrations::traits::Processor;
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Method};
use std::collections::HashMap;
use std::time::Duration;
use tracing::debug;

const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Replace every `{{key}}` occurrence in `template` with the matching value
/// from `params`. Keys absent from the template are ignored; placeholders
/// with no matching key are left untouched. No URL-escaping is applied;
/// callers own the safety of their values.
fn render(template: &str, params: &HashMap<String, String>) -> String {
    let mut rendered = template.to_string();
    for (key, value) in params {
        rendered = rendered.replace(&format!("{{{{{key}}}}}"), value);
    }
    rendered
}

fn extract_transaction_id(response: &serde_json::Value) -> String {
    response
        .get("transaction_id")
        .and_then(|id| id.as_str())
        .unwrap_or_default()
        .to_string()
}

pub struct IntegrationAdapter {
    provider: PaymentProvider,
    client: Client,
}

impl IntegrationAdapter {
    pub fn new(provider: PaymentProvider) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .expect("Failed to create HTTP client");

        Self { provider, client }
    }

    pub fn provider_name(&self) -> &str {
        &self.provider.name
    }

    fn build_url(&self, endpoint: &EndpointConfig, params: &HashMap<String, String>) -> String {
        render(
            &format!("{}{}", self.provider.base_url, endpoint.path),
            params,
        )
    }

    fn build_body(
        &self,
        endpoint: &EndpointConfig,
        params: &HashMap<String, String>,
    ) -> serde_json::Value {
        let mut body = serde_json::Map::new();
        for (name, template) in &endpoint.params {
            body.insert(
                name.clone(),
                serde_json::Value::String(render(template, params)),
            );
        }
        serde_json::Value::Object(body)
    }
}

#[async_trait]
impl Processor for IntegrationAdapter {
    async fn process(&self, action: &str, params: &HashMap<String, String>) -> AppResult<String> {
        let endpoint = self
            .provider
            .find_endpoint(action)
            .ok_or_else(|| Error::action_not_supported(&self.provider.name, action))?;

        let url = self.build_url(endpoint, params);
        let body = self.build_body(endpoint, params);

        let method = Method::from_bytes(endpoint.method.as_bytes()).map_err(|e| {
            Error::adapter(
                &self.provider.name,
                format!("invalid method {}: {}", endpoint.method, e),
            )
        })?;

        debug!(provider = %self.provider.name, %action, %url, "dispatching provider request");

        let response = self
            .client
            .request(method, &url)
            .header(&self.provider.auth_header, &self.provider.auth_token)
            .header(CONTENT_TYPE, "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| Error::adapter(&self.provider.name, format!("request failed: {e}")))?;

        // The HTTP status is deliberately not inspected: any response whose
        // body decodes as JSON counts as a provider answer, 4xx/5xx included.
        let payload: serde_json::Value = response.json().await.map_err(|e| {
            Error::adapter(
                &self.provider.name,
                format!("failed to decode response: {e}"),
            )
        })?;

        Ok(extract_transaction_id(&payload))
    }
}
