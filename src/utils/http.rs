use crate::constants::HTTP_TIMEOUT_SECS;
use once_cell::sync::Lazy;
use std::time::Duration;

static HTTP_CLIENT: Lazy<reqwest::Client> = Lazy::new(|| {
    // Requests run on short-lived per-thread runtimes; idle pooled connections
    // would outlive the runtime that drives them.
    reqwest::Client::builder()
        .timeout(Duration::from_secs(HTTP_TIMEOUT_SECS))
        .pool_max_idle_per_host(0)
        .user_agent(concat!("tuneseek/", env!("CARGO_PKG_VERSION")))
        .build()
        .unwrap_or_else(|e| {
            log::warn!("[Http] Falling back to default client: {}", e);
            reqwest::Client::new()
        })
});

/// Shared async HTTP client (connection pool reused across requests)
pub fn client() -> reqwest::Client {
    HTTP_CLIENT.clone()
}

/// Extracts `{"message": ...}` from an error body, if present
pub fn message_from_body(body: &str) -> Option<String> {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()?
        .get("message")?
        .as_str()
        .filter(|m| !m.is_empty())
        .map(str::to_string)
}
