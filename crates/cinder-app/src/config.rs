//! Environment-backed configuration.

use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The `.env` file could not be located or read.
    #[error("environment file not found: {0}")]
    EnvFile(String),

    /// A required environment variable is missing.
    #[error("missing environment variable: {0}")]
    MissingVar(&'static str),
}

/// Result type alias for configuration loading.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Application configuration read from the environment at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Database host.
    pub db_host: String,
    /// Database name.
    pub db_name: String,
    /// Database user.
    pub db_user: String,
    /// Database password.
    pub db_pass: String,
}

impl Config {
    /// Loads the `.env` file, then reads the configuration from the
    /// environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EnvFile`] if no `.env` file is found, or
    /// [`ConfigError::MissingVar`] if a required variable is unset.
    pub fn load() -> Result<Self> {
        dotenvy::dotenv().map_err(|e| ConfigError::EnvFile(e.to_string()))?;
        Self::from_env()
    }

    /// Reads the configuration from already-set environment variables.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingVar`] if a required variable is unset.
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            db_host: require_var("DB_HOST")?,
            db_name: require_var("DB_NAME")?,
            db_user: require_var("DB_USER")?,
            db_pass: require_var("DB_PASS")?,
        })
    }
}

fn require_var(name: &'static str) -> Result<String> {
    std::env::var(name).map_err(|_| ConfigError::MissingVar(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_env() {
        std::env::set_var("DB_HOST", "localhost");
        std::env::set_var("DB_NAME", "app");
        std::env::set_var("DB_USER", "app");
        std::env::set_var("DB_PASS", "secret");

        let config = Config::from_env().unwrap();
        assert_eq!(config.db_host, "localhost");
        assert_eq!(config.db_name, "app");

        std::env::remove_var("DB_PASS");
        let err = Config::from_env().unwrap_err();
        assert!(matches!(err, ConfigError::MissingVar("DB_PASS")));
    }
}
