use anyhow::{anyhow, Context, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::env;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub integrations: IntegrationsConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub environment: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct IntegrationsConfig {
    /// Path to the TOML file holding the payment provider catalog.
    pub path: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let server = ServerConfig {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .context("PORT must be a valid number")?,
            environment: env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
        };

        let database = DatabaseConfig {
            url: env::var("DATABASE_URL").context("DATABASE_URL not set")?,
            max_connections: env::var("DATABASE_MAX_CONNECTIONS")
                .unwrap_or_else(|_| "20".to_string())
                .parse()
                .context("DATABASE_MAX_CONNECTIONS must be a valid number")?,
        };

        let integrations = IntegrationsConfig {
            path: env::var("INTEGRATIONS_CONFIG_PATH")
                .unwrap_or_else(|_| "config/integrations.toml".to_string()),
        };

        let config = Config {
            server,
            database,
            integrations,
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.server.port < 1024 {
            return Err(anyhow!(
                "Port must be at least 1024, got {}",
                self.server.port
            ));
        }

        let valid_environments = ["development", "staging", "production"];
        if !valid_environments.contains(&self.server.environment.as_str()) {
            return Err(anyhow!(
                "Environment must be one of: {:?}, got {}",
                valid_environments,
                self.server.environment
            ));
        }

        if self.database.url.trim().is_empty() {
            return Err(anyhow!("DATABASE_URL cannot be empty"));
        }

        if self.database.max_connections == 0 {
            return Err(anyhow!("DATABASE_MAX_CONNECTIONS must be greater than 0"));
        }

        if self.integrations.path.trim().is_empty() {
            return Err(anyhow!("INTEGRATIONS_CONFIG_PATH cannot be empty"));
        }

        Ok(())
    }
}

/// Declarative catalog of payment providers. Immutable after load; provider
/// names are unique.
#[derive(Debug, Clone, Deserialize)]
pub struct IntegrationConfig {
    #[serde(default)]
    pub payment_providers: Vec<PaymentProvider>,
}

/// A single payment provider described by its base URL, auth header and a set
/// of named action endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct PaymentProvider {
    pub name: String,
    #[serde(rename = "type", default)]
    pub provider_type: String,
    pub base_url: String,
    pub auth_header: String,
    pub auth_token: String,
    pub currency: String,
    #[serde(default)]
    pub endpoints: Vec<EndpointConfig>,
}

/// One logical action exposed by a provider: HTTP method, path template and
/// body-parameter templates, all substituted from the same flat params map.
#[derive(Debug, Clone, Deserialize)]
pub struct EndpointConfig {
    pub action: String,
    pub method: String,
    pub path: String,
    #[serde(default)]
    pub params: HashMap<String, String>,
}

impl IntegrationConfig {
    pub fn from_file(path: &str) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::new(path, config::FileFormat::Toml))
            .build()
            .with_context(|| format!("failed to read integration config from {}", path))?;

        let catalog: IntegrationConfig = settings
            .try_deserialize()
            .context("invalid integration configuration")?;

        catalog.validate()?;
        Ok(catalog)
    }

    pub fn from_toml(raw: &str) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::from_str(raw, config::FileFormat::Toml))
            .build()
            .context("failed to parse integration config")?;

        let catalog: IntegrationConfig = settings
            .try_deserialize()
            .context("invalid integration configuration")?;

        catalog.validate()?;
        Ok(catalog)
    }

    pub fn validate(&self) -> Result<()> {
        let mut seen = std::collections::HashSet::new();
        for provider in &self.payment_providers {
            if provider.name.trim().is_empty() {
                return Err(anyhow!("provider name cannot be empty"));
            }
            if !seen.insert(provider.name.as_str()) {
                return Err(anyhow!("duplicate provider name: {}", provider.name));
            }
            if provider.base_url.trim().is_empty() {
                return Err(anyhow!("provider {} has no base_url", provider.name));
            }
        }
        Ok(())
    }
}

impl PaymentProvider {
    /// Linear scan over the endpoint list; first match wins.
    pub fn find_endpoint(&self, action: &str) -> Option<&EndpointConfig> {
        self.endpoints.iter().find(|e| e.action == action)
    }
}
