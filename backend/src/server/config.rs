//! Application configuration loaded from the environment.
//!
//! All knobs are read exactly once at startup; nothing re-reads the
//! environment afterwards, so the backend selection cannot change during a
//! session.

use std::net::SocketAddr;

use url::Url;

use crate::domain::ReadFallback;

/// Which repository pair serves the data-access layer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BackendMode {
    /// Diesel repositories against the PostgreSQL store.
    #[default]
    Direct,
    /// Reqwest repositories against the HTTP façade.
    Rest,
}

/// Configuration loading failures; all fatal at startup.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// An environment variable held a value that does not parse.
    #[error("invalid value for {name}: {message}")]
    Invalid {
        /// The offending variable.
        name: &'static str,
        /// Why the value was rejected.
        message: String,
    },
}

impl ConfigError {
    fn invalid(name: &'static str, message: impl Into<String>) -> Self {
        Self::Invalid {
            name,
            message: message.into(),
        }
    }
}

/// Startup configuration for the façade server and the data-access layer.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Address the façade binds to. `BIND_ADDR`, default `0.0.0.0:8080`.
    pub bind_addr: SocketAddr,
    /// PostgreSQL connection string. `DATABASE_URL`.
    pub database_url: Option<String>,
    /// Maximum connections in the shared pool. `DB_POOL_SIZE`, default 10.
    pub pool_size: u32,
    /// Repository pair selection. `MRO_BACKEND`, `direct` or `rest`.
    pub backend: BackendMode,
    /// Façade base URL for the REST adapters. `MRO_API_BASE_URL`.
    pub api_base_url: Option<Url>,
    /// Read-failure policy. `MRO_READ_FALLBACK`, `empty` or `propagate`.
    pub read_fallback: ReadFallback,
}

impl AppConfig {
    /// Default bind address when `BIND_ADDR` is unset.
    pub const DEFAULT_BIND_ADDR: &'static str = "0.0.0.0:8080";

    /// Load configuration from process environment variables.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a variable is present but unparseable.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a variable is present but unparseable.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let bind_addr = lookup("BIND_ADDR")
            .unwrap_or_else(|| Self::DEFAULT_BIND_ADDR.to_owned())
            .parse::<SocketAddr>()
            .map_err(|err| ConfigError::invalid("BIND_ADDR", err.to_string()))?;

        let pool_size = match lookup("DB_POOL_SIZE") {
            Some(raw) => raw
                .parse::<u32>()
                .map_err(|err| ConfigError::invalid("DB_POOL_SIZE", err.to_string()))?,
            None => 10,
        };

        let backend = match lookup("MRO_BACKEND").as_deref() {
            None => BackendMode::default(),
            Some(raw) => match raw.to_ascii_lowercase().as_str() {
                "direct" => BackendMode::Direct,
                "rest" => BackendMode::Rest,
                other => {
                    return Err(ConfigError::invalid(
                        "MRO_BACKEND",
                        format!("expected direct or rest, got {other}"),
                    ));
                }
            },
        };

        let api_base_url = match lookup("MRO_API_BASE_URL") {
            None => None,
            Some(raw) => Some(
                Url::parse(&raw)
                    .map_err(|err| ConfigError::invalid("MRO_API_BASE_URL", err.to_string()))?,
            ),
        };

        let read_fallback = match lookup("MRO_READ_FALLBACK").as_deref() {
            None => ReadFallback::default(),
            Some(raw) => match raw.to_ascii_lowercase().as_str() {
                "empty" => ReadFallback::DegradeToEmpty,
                "propagate" => ReadFallback::Propagate,
                other => {
                    return Err(ConfigError::invalid(
                        "MRO_READ_FALLBACK",
                        format!("expected empty or propagate, got {other}"),
                    ));
                }
            },
        };

        Ok(Self {
            bind_addr,
            database_url: lookup("DATABASE_URL"),
            pool_size,
            backend,
            api_base_url,
            read_fallback,
        })
    }
}
