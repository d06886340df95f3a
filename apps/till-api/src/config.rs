//! Till API configuration module.
//!
//! Configuration is loaded from environment variables with fallback to defaults.
//! `main` loads an optional `.env` file first, so anything in it behaves
//! exactly like a real environment variable.

use serde::{Deserialize, Serialize};
use std::env;
use till_core::StockPolicy;

/// Till API configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// HTTP listen port
    pub port: u16,

    /// SQLite connection string or file path (required)
    pub db_conn: String,

    /// Connection pool size
    pub db_max_connections: u32,

    /// Let checkouts take stock below zero
    pub allow_negative_stock: bool,
}

impl ApiConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let db_conn = lookup("DB_CONN").unwrap_or_default().trim().to_string();
        if db_conn.is_empty() {
            return Err(ConfigError::MissingRequired("DB_CONN".to_string()));
        }

        let config = ApiConfig {
            port: lookup("PORT")
                .unwrap_or_else(|| "8080".to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("PORT".to_string()))?,

            db_conn,

            db_max_connections: lookup("DB_MAX_CONNECTIONS")
                .unwrap_or_else(|| "5".to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("DB_MAX_CONNECTIONS".to_string()))?,

            allow_negative_stock: lookup("ALLOW_NEGATIVE_STOCK")
                .unwrap_or_else(|| "false".to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("ALLOW_NEGATIVE_STOCK".to_string()))?,
        };

        if config.db_max_connections == 0 {
            return Err(ConfigError::InvalidValue("DB_MAX_CONNECTIONS".to_string()));
        }

        Ok(config)
    }

    /// Stock policy applied to every checkout.
    pub fn stock_policy(&self) -> StockPolicy {
        if self.allow_negative_stock {
            StockPolicy::AllowNegative
        } else {
            StockPolicy::Enforce
        }
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),

    #[error("Missing required configuration: {0}")]
    MissingRequired(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<ApiConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ApiConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[("DB_CONN", "./till.db")]).unwrap();

        assert_eq!(config.port, 8080);
        assert_eq!(config.db_conn, "./till.db");
        assert_eq!(config.db_max_connections, 5);
        assert!(!config.allow_negative_stock);
        assert_eq!(config.stock_policy(), StockPolicy::Enforce);
    }

    #[test]
    fn test_db_conn_required() {
        assert!(matches!(load(&[]), Err(ConfigError::MissingRequired(_))));
        assert!(matches!(
            load(&[("DB_CONN", "   ")]),
            Err(ConfigError::MissingRequired(_))
        ));
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            ("DB_CONN", "sqlite::memory:"),
            ("PORT", "3000"),
            ("DB_MAX_CONNECTIONS", "2"),
            ("ALLOW_NEGATIVE_STOCK", "true"),
        ])
        .unwrap();

        assert_eq!(config.port, 3000);
        assert_eq!(config.db_max_connections, 2);
        assert_eq!(config.stock_policy(), StockPolicy::AllowNegative);
    }

    #[test]
    fn test_invalid_values() {
        assert!(matches!(
            load(&[("DB_CONN", "x.db"), ("PORT", "eighty")]),
            Err(ConfigError::InvalidValue(v)) if v == "PORT"
        ));
        assert!(matches!(
            load(&[("DB_CONN", "x.db"), ("DB_MAX_CONNECTIONS", "0")]),
            Err(ConfigError::InvalidValue(v)) if v == "DB_MAX_CONNECTIONS"
        ));
        assert!(matches!(
            load(&[("DB_CONN", "x.db"), ("ALLOW_NEGATIVE_STOCK", "maybe")]),
            Err(ConfigError::InvalidValue(_))
        ));
    }
}
