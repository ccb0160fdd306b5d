//! Application configuration management
//!
//! This module handles loading and validating configuration from environment variables.
//! All configuration is loaded at startup and validated before the application runs.

use std::env;
use std::sync::LazyLock;
use std::time::Duration;

use crate::constants::{
    backends, DEFAULT_DATABASE_ACQUIRE_TIMEOUT_SECS, DEFAULT_DATABASE_MAX_CONNECTIONS,
    DEFAULT_REQUEST_TIMEOUT_SECS, DEFAULT_SERVER_HOST, DEFAULT_SERVER_PORT,
};

/// Global application configuration (lazily initialized)
pub static CONFIG: LazyLock<Config> = LazyLock::new(|| {
    Config::from_env().expect("Failed to load configuration from environment")
});

/// Main application configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub scoring: ScoringConfig,
    pub admin: AdminConfig,
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub rust_log: String,
    /// `pretty` or `json`
    pub log_format: String,
    pub request_timeout: Duration,
}

/// Storage configuration
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// `postgres` or `memory`
    pub backend: String,
    /// Required for the postgres backend
    pub url: Option<String>,
    pub max_connections: u32,
    pub acquire_timeout: Duration,
}

/// Scoring engine configuration
#[derive(Debug, Clone)]
pub struct ScoringConfig {
    /// Honour the `timestamp` field of submission requests
    pub trust_client_timestamps: bool,
}

/// Administrative endpoint configuration
#[derive(Debug, Clone, Default)]
pub struct AdminConfig {
    /// Bearer token for `/admin`; admin routes reject everything when unset
    pub token: Option<String>,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        Ok(Self {
            server: ServerConfig::from_env()?,
            database: DatabaseConfig::from_env()?,
            scoring: ScoringConfig::from_env()?,
            admin: AdminConfig::from_env(),
        })
    }

    /// In-memory configuration used by tests and demos
    pub fn in_memory() -> Self {
        Self {
            server: ServerConfig {
                host: DEFAULT_SERVER_HOST.to_string(),
                port: DEFAULT_SERVER_PORT,
                rust_log: "info".to_string(),
                log_format: "pretty".to_string(),
                request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            },
            database: DatabaseConfig {
                backend: backends::MEMORY.to_string(),
                url: None,
                max_connections: DEFAULT_DATABASE_MAX_CONNECTIONS,
                acquire_timeout: Duration::from_secs(DEFAULT_DATABASE_ACQUIRE_TIMEOUT_SECS),
            },
            scoring: ScoringConfig {
                trust_client_timestamps: true,
            },
            admin: AdminConfig::default(),
        }
    }
}

impl ServerConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let log_format = env::var("LOG_FORMAT").unwrap_or_else(|_| "pretty".to_string());
        if log_format != "pretty" && log_format != "json" {
            return Err(ConfigError::InvalidValue("LOG_FORMAT".to_string()));
        }

        Ok(Self {
            host: env::var("SERVER_HOST").unwrap_or_else(|_| DEFAULT_SERVER_HOST.to_string()),
            port: env::var("SERVER_PORT")
                .unwrap_or_else(|_| DEFAULT_SERVER_PORT.to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("SERVER_PORT".to_string()))?,
            rust_log: env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            log_format,
            request_timeout: Duration::from_secs(
                env::var("REQUEST_TIMEOUT_SECS")
                    .unwrap_or_else(|_| DEFAULT_REQUEST_TIMEOUT_SECS.to_string())
                    .parse()
                    .map_err(|_| ConfigError::InvalidValue("REQUEST_TIMEOUT_SECS".to_string()))?,
            ),
        })
    }
}

impl DatabaseConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let backend = env::var("STORE_BACKEND").unwrap_or_else(|_| backends::POSTGRES.to_string());
        if !backends::ALL.contains(&backend.as_str()) {
            return Err(ConfigError::InvalidValue("STORE_BACKEND".to_string()));
        }

        let url = env::var("DATABASE_URL").ok();
        if backend == backends::POSTGRES && url.is_none() {
            return Err(ConfigError::Missing("DATABASE_URL".to_string()));
        }

        Ok(Self {
            backend,
            url,
            max_connections: env::var("DATABASE_MAX_CONNECTIONS")
                .unwrap_or_else(|_| DEFAULT_DATABASE_MAX_CONNECTIONS.to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("DATABASE_MAX_CONNECTIONS".to_string()))?,
            acquire_timeout: Duration::from_secs(
                env::var("DATABASE_ACQUIRE_TIMEOUT_SECS")
                    .unwrap_or_else(|_| DEFAULT_DATABASE_ACQUIRE_TIMEOUT_SECS.to_string())
                    .parse()
                    .map_err(|_| {
                        ConfigError::InvalidValue("DATABASE_ACQUIRE_TIMEOUT_SECS".to_string())
                    })?,
            ),
        })
    }
}

impl ScoringConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            trust_client_timestamps: parse_bool(
                "TRUST_CLIENT_TIMESTAMPS",
                env::var("TRUST_CLIENT_TIMESTAMPS").ok().as_deref(),
                true,
            )?,
        })
    }
}

impl AdminConfig {
    fn from_env() -> Self {
        Self {
            token: env::var("ADMIN_TOKEN").ok().filter(|t| !t.is_empty()),
        }
    }
}

fn parse_bool(name: &str, value: Option<&str>, default: bool) -> Result<bool, ConfigError> {
    match value.map(|v| v.trim().to_ascii_lowercase()) {
        None => Ok(default),
        Some(v) => match v.as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" => Ok(false),
            _ => Err(ConfigError::InvalidValue(name.to_string())),
        },
    }
}

/// Configuration loading errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(String),

    #[error("Invalid value for environment variable: {0}")]
    InvalidValue(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        let config = Config::in_memory();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8081);
        assert_eq!(config.database.backend, "memory");
        assert!(config.scoring.trust_client_timestamps);
        assert!(config.admin.token.is_none());
    }

    #[test]
    fn test_parse_bool() {
        assert!(parse_bool("X", None, true).unwrap());
        assert!(!parse_bool("X", Some("false"), true).unwrap());
        assert!(parse_bool("X", Some(" YES "), false).unwrap());
        assert!(parse_bool("X", Some("maybe"), false).is_err());
    }
}
