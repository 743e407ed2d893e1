//! Runtime configuration
//!
//! Both binaries read a `.env` file (if present) and then the process
//! environment. Catalog client credentials are only ever read by the backend.

use crate::constants::*;
use crate::utils::errors::ConfigError;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,
    pub database_path: PathBuf,
    pub client_id: String,
    pub client_secret: String,
    pub token_url: String,
    pub api_url: String,
    pub session_ttl: Duration,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        if let Err(e) = dotenvy::dotenv() {
            log::debug!("[Config] No .env file loaded: {}", e);
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup (the environment in production, a map in tests)
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let port = match get("PORT") {
            Some(v) => v.trim().parse().map_err(|_| ConfigError::Invalid {
                key: "PORT",
                value: v.clone(),
            })?,
            None => DEFAULT_PORT,
        };

        let database_path = match get("DATABASE_PATH") {
            Some(v) => PathBuf::from(v),
            None => default_database_path()?,
        };

        let session_ttl = match get("SESSION_TTL_SECS") {
            Some(v) => Duration::from_secs(v.trim().parse().map_err(|_| ConfigError::Invalid {
                key: "SESSION_TTL_SECS",
                value: v.clone(),
            })?),
            None => Duration::from_secs(DEFAULT_SESSION_TTL_SECS),
        };

        Ok(Self {
            port,
            database_path,
            client_id: get("SPOTIFY_CLIENT_ID").ok_or(ConfigError::Missing("SPOTIFY_CLIENT_ID"))?,
            client_secret: get("SPOTIFY_CLIENT_SECRET")
                .ok_or(ConfigError::Missing("SPOTIFY_CLIENT_SECRET"))?,
            token_url: get("SPOTIFY_TOKEN_URL").unwrap_or_else(|| SPOTIFY_TOKEN_URL.to_string()),
            api_url: get("SPOTIFY_API_URL").unwrap_or_else(|| SPOTIFY_API_ENDPOINT.to_string()),
            session_ttl,
        })
    }

    pub fn listen_addr(&self) -> String {
        format!("0.0.0.0:{}", self.port)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    pub backend_url: String,
}

impl ClientConfig {
    pub fn from_env() -> Self {
        if let Err(e) = dotenvy::dotenv() {
            log::debug!("[Config] No .env file loaded: {}", e);
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            backend_url: lookup("BACKEND_URL")
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_BACKEND_URL.to_string()),
        }
    }
}

/// `<data dir>/tuneseek/credentials.db`
fn default_database_path() -> Result<PathBuf, ConfigError> {
    dirs::data_dir()
        .map(|dir| dir.join(DATA_FOLDER).join(DATABASE_FILE))
        .ok_or(ConfigError::NoDataDir)
}
