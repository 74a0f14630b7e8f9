//! Configuration management for the Stockroom inventory server
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (development.toml, production.toml)
//! 3. Environment variable overrides with STOCKROOM_ prefix

use config::{ConfigError, Environment, File};
use serde::Deserialize;

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Server configuration
    pub server: ServerConfig,

    /// Database configuration
    pub database: DatabaseConfig,

    /// Shop and inventory settings
    pub inventory: InventoryConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Server port
    pub port: u16,

    /// Server host
    pub host: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    /// SQLite connection URL
    pub url: String,

    /// Maximum number of connections in the pool
    pub max_connections: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct InventoryConfig {
    /// Shop name shown on the dashboard
    pub shop_name: String,

    /// Currency label for money display
    pub currency: String,

    /// Unit used when an item is created without one
    pub default_unit: String,

    /// Maximum rows in the recent-transactions listing
    pub recent_limit: u32,
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let environment =
            std::env::var("STOCKROOM_ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let config = config::Config::builder()
            // Start with default values
            .set_default("environment", environment.clone())?
            .set_default("server.port", 8080)?
            .set_default("server.host", "127.0.0.1")?
            .set_default("database.url", "sqlite://inventory.db")?
            .set_default("database.max_connections", 5)?
            .set_default("inventory.shop_name", "Stockroom")?
            .set_default("inventory.currency", "PKR")?
            .set_default("inventory.default_unit", shared::DEFAULT_UNIT)?
            .set_default("inventory.recent_limit", 200)?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (STOCKROOM_ prefix)
            .add_source(
                Environment::with_prefix("STOCKROOM")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            host: "127.0.0.1".to_string(),
        }
    }
}

impl Default for InventoryConfig {
    fn default() -> Self {
        Self {
            shop_name: "Stockroom".to_string(),
            currency: "PKR".to_string(),
            default_unit: shared::DEFAULT_UNIT.to_string(),
            recent_limit: 200,
        }
    }
}

impl Config {
    /// Configuration for tests and embedded use, backed by the given database URL
    pub fn for_database(url: impl Into<String>) -> Self {
        Self {
            environment: "test".to_string(),
            server: ServerConfig::default(),
            database: DatabaseConfig {
                url: url.into(),
                max_connections: 1,
            },
            inventory: InventoryConfig::default(),
        }
    }
}
