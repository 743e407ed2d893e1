// Catalog token broker (client-credentials grant)
use crate::models::TokenResponse;
use crate::utils::error_handling::safe_lock;
use crate::utils::errors::CatalogError;
use std::sync::Mutex;

/// Holds the catalog bearer token for the life of the process
///
/// The client id/secret stay inside the backend; callers only learn whether a
/// token is available.
pub struct TokenBroker {
    http: reqwest::Client,
    token_url: String,
    client_id: String,
    client_secret: String,
    token: Mutex<Option<String>>,
}

impl TokenBroker {
    pub fn new(
        http: reqwest::Client,
        token_url: impl Into<String>,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
    ) -> Self {
        Self {
            http,
            token_url: token_url.into(),
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            token: Mutex::new(None),
        }
    }

    /// Request a fresh token; a failure keeps whatever token was held before
    pub async fn fetch_token(&self) -> Result<(), CatalogError> {
        log::debug!("[TokenBroker] Requesting token from {}", self.token_url);

        let response = self
            .http
            .post(&self.token_url)
            .form(&[
                ("grant_type", "client_credentials"),
                ("client_id", self.client_id.as_str()),
                ("client_secret", self.client_secret.as_str()),
            ])
            .send()
            .await
            .map_err(|e| {
                log::error!("[TokenBroker] Token request failed: {}", e);
                CatalogError::TokenFetch(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            log::error!("[TokenBroker] Failed to fetch token: {}", status);
            return Err(CatalogError::TokenFetch(status.to_string()));
        }

        let body: TokenResponse = response.json().await.map_err(|e| {
            log::error!("[TokenBroker] Unreadable token response: {}", e);
            CatalogError::TokenFetch(e.to_string())
        })?;

        match body.expires_in {
            Some(secs) => log::info!("[TokenBroker] Token acquired (expires in {}s)", secs),
            None => log::info!("[TokenBroker] Token acquired"),
        }
        *safe_lock(&self.token, "TokenBroker") = Some(body.access_token);
        Ok(())
    }

    /// Current bearer token, if one was ever fetched
    pub fn token(&self) -> Option<String> {
        safe_lock(&self.token, "TokenBroker").clone()
    }

    #[cfg(test)]
    pub fn has_token(&self) -> bool {
        safe_lock(&self.token, "TokenBroker").is_some()
    }
}
