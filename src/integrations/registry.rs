//! Provider-name dispatch over the configured adapters.

use crate::config::IntegrationConfig;
use crate::error::{AppResult, Error};
use crate::integrations::adapter::IntegrationAdapter;
use crate::integrations::traits::Processor;
use std::collections::HashMap;
use std::sync::Arc;

/// Immutable map of provider name to adapter, built once at startup. Pure
/// dispatch; safe for concurrent reads.
pub struct ProcessorRegistry {
    processors: HashMap<String, Arc<dyn Processor>>,
}

impl ProcessorRegistry {
    pub fn new(processors: HashMap<String, Arc<dyn Processor>>) -> Self {
        Self { processors }
    }

    /// Build one `IntegrationAdapter` per catalog entry.
    pub fn from_config(catalog: &IntegrationConfig) -> Self {
        let processors = catalog
            .payment_providers
            .iter()
            .map(|provider| {
                (
                    provider.name.clone(),
                    Arc::new(IntegrationAdapter::new(provider.clone())) as Arc<dyn Processor>,
                )
            })
            .collect();

        Self { processors }
    }

    pub async fn process(
        &self,
        provider: &str,
        action: &str,
        params: &HashMap<String, String>,
    ) -> AppResult<String> {
        let processor = self
            .processors
            .get(provider)
            .ok_or_else(|| Error::processor_not_found(provider))?;
        processor.process(action, params).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingProcessor {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl Processor for CountingProcessor {
        async fn process(
            &self,
            _action: &str,
            _params: &HashMap<String, String>,
        ) -> AppResult<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok("tx-stub".to_string())
        }
    }

    #[tokio::test]
    async fn dispatches_to_the_named_processor() {
        let stub = Arc::new(CountingProcessor {
            calls: AtomicUsize::new(0),
        });
        let registry = ProcessorRegistry::new(HashMap::from([(
            "acme".to_string(),
            stub.clone() as Arc<dyn Processor>,
        )]));

        let tx = registry
            .process("acme", "authorize", &HashMap::new())
            .await
            .unwrap();
        assert_eq!(tx, "tx-stub");
        assert_eq!(stub.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn unknown_provider_invokes_no_adapter() {
        let stub = Arc::new(CountingProcessor {
            calls: AtomicUsize::new(0),
        });
        let registry = ProcessorRegistry::new(HashMap::from([(
            "acme".to_string(),
            stub.clone() as Arc<dyn Processor>,
        )]));

        let err = registry
            .process("globex", "authorize", &HashMap::new())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::ProcessorNotFound { ref provider } if provider == "globex"));
        assert_eq!(stub.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn builds_registry_from_catalog() {
        let catalog = crate::config::IntegrationConfig::from_toml(
            r#"
            [[payment_providers]]
            name = "acme"
            base_url = "http://acme.test"
            auth_header = "X-Api-Key"
            auth_token = "secret"
            currency = "USD"
            "#,
        )
        .unwrap();

        let registry = ProcessorRegistry::from_config(&catalog);
        // Provider exists but has no endpoints configured.
        let err = registry
            .process("acme", "authorize", &HashMap::new())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::ActionNotSupported { .. }));
    }
}
