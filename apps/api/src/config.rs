//! API server configuration module.
//!
//! Configuration is loaded from environment variables with fallback to
//! defaults, so a bare `comanda-api` starts a working local server.

use std::env;

/// API server configuration.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// HTTP listen port
    pub port: u16,

    /// Path to the SQLite database file
    pub database_path: String,
}

/// Configuration loading errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),
}

impl ApiConfig {
    /// Load configuration from environment variables.
    ///
    /// | Variable                | Default        |
    /// |-------------------------|----------------|
    /// | `COMANDA_PORT`          | `8080`         |
    /// | `COMANDA_DATABASE_PATH` | `./comanda.db` |
    pub fn load() -> Result<Self, ConfigError> {
        let config = ApiConfig {
            port: env::var("COMANDA_PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("COMANDA_PORT".to_string()))?,

            database_path: env::var("COMANDA_DATABASE_PATH")
                .unwrap_or_else(|_| "./comanda.db".to_string()),
        };

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_apply_without_env() {
        // Env vars are unset in the test runner unless a test sets them
        let config = ApiConfig::load().unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.database_path, "./comanda.db");
    }
}
