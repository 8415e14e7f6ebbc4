//! Application configuration loaded from environment variables.
//!
//! Fail-fast loading with validation: required variables must be present
//! and valid or the application exits with a clear error message.

use std::env;
use thiserror::Error;

/// Configuration errors that can occur during environment loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(String),

    #[error("Invalid value for {var}: {message}")]
    InvalidValue { var: String, message: String },

    #[error("Failed to parse port: {0}")]
    InvalidPort(#[from] std::num::ParseIntError),
}

/// Which identity provider adapter to run with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderMode {
    /// HTTP adapter against the real provider.
    Http {
        /// Base URL of the provider's admin API.
        base_url: String,
        /// Service credential for the admin API.
        api_key: String,
    },
    /// In-memory mock, for local development only.
    Mock,
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// PostgreSQL connection string.
    pub database_url: String,

    /// Identity provider adapter selection.
    pub provider: ProviderMode,

    /// Tracing filter directive (e.g., "info,fundi=debug").
    pub rust_log: String,

    /// Allowed CORS origins (comma-separated URLs, or "*" for development).
    pub cors_origins: Vec<String>,

    /// Server bind address.
    pub host: String,

    /// Server listen port.
    pub port: u16,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Required Variables
    ///
    /// - `DATABASE_URL` - PostgreSQL connection string
    /// - `IDENTITY_PROVIDER_URL` + `IDENTITY_PROVIDER_API_KEY` - unless
    ///   `IDENTITY_PROVIDER=mock` is set for local development
    ///
    /// # Optional Variables
    ///
    /// - `RUST_LOG` - Log level filter (default: "info")
    /// - `CORS_ORIGINS` - Comma-separated allowed origins (default: "*")
    /// - `HOST` - Bind address (default: "0.0.0.0")
    /// - `PORT` - Listen port (default: 8080)
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (development only)
        let _ = dotenvy::dotenv();

        let database_url = env::var("DATABASE_URL")
            .map_err(|_| ConfigError::MissingVar("DATABASE_URL".to_string()))?;

        let provider = match env::var("IDENTITY_PROVIDER").as_deref() {
            Ok("mock") => ProviderMode::Mock,
            _ => {
                let base_url = env::var("IDENTITY_PROVIDER_URL")
                    .map_err(|_| ConfigError::MissingVar("IDENTITY_PROVIDER_URL".to_string()))?;
                if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
                    return Err(ConfigError::InvalidValue {
                        var: "IDENTITY_PROVIDER_URL".to_string(),
                        message: "Must be an http:// or https:// URL".to_string(),
                    });
                }
                let api_key = env::var("IDENTITY_PROVIDER_API_KEY").map_err(|_| {
                    ConfigError::MissingVar("IDENTITY_PROVIDER_API_KEY".to_string())
                })?;
                ProviderMode::Http { base_url, api_key }
            }
        };

        let rust_log = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());

        let cors_origins = env::var("CORS_ORIGINS")
            .map(|s| s.split(',').map(|o| o.trim().to_string()).collect())
            .unwrap_or_else(|_| vec!["*".to_string()]);

        let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());

        let port: u16 = env::var("PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse()?;

        if port == 0 {
            return Err(ConfigError::InvalidValue {
                var: "PORT".to_string(),
                message: "Port must be between 1 and 65535".to_string(),
            });
        }

        Ok(Config {
            database_url,
            provider,
            rust_log,
            cors_origins,
            host,
            port,
        })
    }

    /// Get the server bind address as a socket address string.
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::MissingVar("DATABASE_URL".to_string());
        assert_eq!(
            err.to_string(),
            "Missing required environment variable: DATABASE_URL"
        );

        let err = ConfigError::InvalidValue {
            var: "PORT".to_string(),
            message: "Must be a number".to_string(),
        };
        assert_eq!(err.to_string(), "Invalid value for PORT: Must be a number");
    }

    #[test]
    fn test_bind_addr() {
        let config = Config {
            database_url: "postgres://localhost/fundi".to_string(),
            provider: ProviderMode::Mock,
            rust_log: "info".to_string(),
            cors_origins: vec!["*".to_string()],
            host: "127.0.0.1".to_string(),
            port: 3000,
        };
        assert_eq!(config.bind_addr(), "127.0.0.1:3000");
    }
}
