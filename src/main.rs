use std::net::SocketAddr;
use std::sync::Arc;

use agnostic_payment_platform::api;
use agnostic_payment_platform::config::{Config, IntegrationConfig};
use agnostic_payment_platform::database::{self, PgPaymentRepository};
use agnostic_payment_platform::eventstore::PgPaymentEventStore;
use agnostic_payment_platform::integrations::ProcessorRegistry;
use agnostic_payment_platform::payments::{CommandHandler, PaymentService, QueryHandler};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env()?;
    let catalog = IntegrationConfig::from_file(&config.integrations.path)?;

    tracing::info!("Starting payment platform");
    tracing::info!("Environment: {}", config.server.environment);
    tracing::info!("Providers configured: {}", catalog.payment_providers.len());

    let pool = database::init_pool(&config.database.url, None).await?;

    // Explicit composition root: catalog -> adapters -> registry -> handlers.
    let registry = Arc::new(ProcessorRegistry::from_config(&catalog));
    let repo = Arc::new(PgPaymentRepository::new(pool.clone()));
    let event_store = Arc::new(PgPaymentEventStore::new(pool));

    let command_handler = CommandHandler::new(repo.clone(), event_store.clone(), registry);
    let query_handler = QueryHandler::new(repo, event_store);
    let service = Arc::new(PaymentService::new(command_handler, query_handler));

    let app = api::router(service, config.clone());

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    tracing::info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
