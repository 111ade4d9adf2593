//! Configuration loader with layered sources.

use crate::AppConfig;
use config::{Config, ConfigError, Environment, File, Map};
use eshop_core::EshopError;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

const ENV_PREFIX: &str = "ESHOP";

/// Configuration loader with runtime refresh support.
#[derive(Clone)]
pub struct ConfigLoader {
    config: Arc<RwLock<AppConfig>>,
    config_dir: String,
}

impl ConfigLoader {
    /// Creates a new configuration loader.
    ///
    /// Configuration is loaded from multiple sources in order:
    /// 1. `config/default.toml` - Default values
    /// 2. `config/{environment}.toml` - Environment-specific overrides
    /// 3. `config/local.toml` - Local overrides
    /// 4. Environment variables with `ESHOP_` prefix, e.g. `ESHOP_REDIS__ENABLED=false`
    pub fn new(config_dir: impl Into<String>) -> Result<Self, EshopError> {
        let config_dir = config_dir.into();

        // Load .env file if present
        if let Err(e) = dotenvy::dotenv() {
            debug!("No .env file found or error loading it: {}", e);
        }

        let environment =
            std::env::var("ESHOP_ENVIRONMENT").unwrap_or_else(|_| "development".to_string());
        let config = Self::load_config(&config_dir, &environment, None)?;

        Ok(Self {
            config: Arc::new(RwLock::new(config)),
            config_dir,
        })
    }

    /// Loads configuration from the default location (`./config`).
    pub fn from_default_location() -> Result<Self, EshopError> {
        Self::new("./config")
    }

    /// Returns the current configuration.
    pub async fn get(&self) -> AppConfig {
        self.config.read().await.clone()
    }

    /// Reloads the configuration from disk.
    pub async fn reload(&self) -> Result<(), EshopError> {
        let environment = self.config.read().await.app.environment.clone();
        let new_config = Self::load_config(&self.config_dir, &environment, None)?;
        *self.config.write().await = new_config;
        info!("Configuration reloaded successfully");
        Ok(())
    }

    /// Builds the layered configuration. `env_overrides` replaces the process
    /// environment as the variable source when given.
    fn load_config(
        config_dir: &str,
        environment: &str,
        env_overrides: Option<Map<String, String>>,
    ) -> Result<AppConfig, EshopError> {
        info!("Loading configuration for environment: {}", environment);

        let mut builder = Config::builder();

        for name in ["default", environment, "local"] {
            let path = format!("{config_dir}/{name}.toml");
            if Path::new(&path).exists() {
                debug!("Loading config from: {}", path);
                builder = builder.add_source(File::with_name(&path).required(false));
            }
        }

        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true)
                .source(env_overrides),
        );

        let mut app_config = builder
            .build()
            .and_then(Config::try_deserialize::<AppConfig>)
            .map_err(config_error_to_eshop_error)?;
        app_config.app.environment = environment.to_string();

        Self::validate_config(&app_config)?;

        Ok(app_config)
    }

    /// Validates the configuration.
    fn validate_config(config: &AppConfig) -> Result<(), EshopError> {
        if config.database.url.trim().is_empty() {
            return Err(EshopError::Configuration("Database URL is required".to_string()));
        }

        if config.database.max_connections < config.database.min_connections {
            return Err(EshopError::Configuration(
                "database.max_connections must not be below database.min_connections".to_string(),
            ));
        }

        if config.redis.enabled {
            if config.redis.url.trim().is_empty() {
                return Err(EshopError::Configuration(
                    "Redis URL is required when the cache is enabled".to_string(),
                ));
            }
            if config.redis.entry_ttl_secs == Some(0) {
                return Err(EshopError::Configuration(
                    "redis.entry_ttl_secs must be positive; omit it for no expiry".to_string(),
                ));
            }
        } else {
            warn!("Basket cache disabled; every read goes to the document store");
        }

        Ok(())
    }
}

fn config_error_to_eshop_error(err: ConfigError) -> EshopError {
    EshopError::Configuration(err.to_string())
}
