use crate::constants::{NETWORK_ERROR_MESSAGE, SEARCH_ERROR_MESSAGE, TOKEN_ERROR_MESSAGE};
use thiserror::Error;

/// Failures of the signup/signin flow
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("User already exists")]
    DuplicateUser,

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("Password hashing failed: {0}")]
    Hashing(String),
}

impl AuthError {
    /// HTTP status the backend answers with
    pub fn status_code(&self) -> u16 {
        match self {
            AuthError::Validation(_) => 400,
            AuthError::DuplicateUser => 409,
            AuthError::InvalidCredentials => 401,
            AuthError::Storage(_) | AuthError::Hashing(_) => 500,
        }
    }

    /// Text safe to show to the caller (storage and hashing details stay in the log)
    pub fn user_message(&self) -> String {
        match self {
            AuthError::Storage(_) | AuthError::Hashing(_) => "Internal server error".to_string(),
            other => other.to_string(),
        }
    }
}

/// Failures talking to the external music catalog
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Failed to fetch token: {0}")]
    TokenFetch(String),

    #[error("No token available")]
    NoToken,

    #[error("Failed to fetch music data: {0}")]
    SearchFetch(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl CatalogError {
    pub fn status_code(&self) -> u16 {
        match self {
            CatalogError::NoToken => 503,
            _ => 502,
        }
    }

    pub fn user_message(&self) -> &'static str {
        match self {
            CatalogError::TokenFetch(_) | CatalogError::NoToken => TOKEN_ERROR_MESSAGE,
            CatalogError::SearchFetch(_) => SEARCH_ERROR_MESSAGE,
            CatalogError::Network(_) => NETWORK_ERROR_MESSAGE,
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("Missing required setting {0}")]
    Missing(&'static str),

    #[error("Invalid value for {key}: {value}")]
    Invalid { key: &'static str, value: String },

    #[error("Cannot determine a data directory for the credential store")]
    NoDataDir,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auth_errors_map_to_statuses() {
        assert_eq!(AuthError::Validation("x".into()).status_code(), 400);
        assert_eq!(AuthError::DuplicateUser.status_code(), 409);
        assert_eq!(AuthError::InvalidCredentials.status_code(), 401);
    }

    #[test]
    fn storage_details_are_not_leaked() {
        let err = AuthError::Storage(rusqlite::Error::InvalidQuery);
        assert_eq!(err.status_code(), 500);
        assert_eq!(err.user_message(), "Internal server error");

        let err = AuthError::Hashing("salt too short".into());
        assert_eq!(err.status_code(), 500);
        assert_eq!(err.user_message(), "Internal server error");
    }

    #[test]
    fn missing_token_reads_as_token_failure() {
        assert_eq!(CatalogError::NoToken.status_code(), 503);
        assert_eq!(CatalogError::NoToken.user_message(), TOKEN_ERROR_MESSAGE);
        assert_eq!(
            CatalogError::SearchFetch("500".into()).user_message(),
            SEARCH_ERROR_MESSAGE
        );
    }
}
