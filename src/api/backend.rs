// Desktop client's view of the TuneSeek backend
use crate::constants::{
    NETWORK_ERROR_MESSAGE, SEARCH_ERROR_MESSAGE, SIGNIN_FAILED_MESSAGE, SIGNUP_FAILED_MESSAGE,
    TOKEN_ERROR_MESSAGE,
};
use crate::models::{AuthRequest, ItemsResponse, SigninResponse, SessionRequest, Track};
use crate::utils::async_helper::AsyncTask;
use crate::utils::http::message_from_body;

/// Operations the client session needs from the backend
///
/// Every call returns a boxed future whose error is already the text to show
/// the user.
pub trait Backend: Send + Sync {
    /// Ask the backend to obtain a catalog token (once per application load)
    fn prepare_token(&self) -> AsyncTask<()>;
    fn search(&self, keyword: String, offset: u32) -> AsyncTask<Vec<Track>>;
    fn signup(&self, email: String, password: String) -> AsyncTask<()>;
    /// Returns the session token on success
    fn signin(&self, email: String, password: String) -> AsyncTask<String>;
    fn signout(&self, session: String) -> AsyncTask<()>;
}

/// HTTP implementation talking to `tuneseek-server`
#[derive(Clone)]
pub struct BackendClient {
    http: reqwest::Client,
    base_url: String,
}

impl BackendClient {
    pub fn new(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl Backend for BackendClient {
    fn prepare_token(&self) -> AsyncTask<()> {
        let request = self.http.post(self.url("/token"));
        Box::pin(async move {
            let response = request.send().await.map_err(|e| {
                log::error!("[Backend] Error fetching token: {}", e);
                TOKEN_ERROR_MESSAGE.to_string()
            })?;
            if !response.status().is_success() {
                log::error!("[Backend] Failed to fetch token: {}", response.status());
                return Err(TOKEN_ERROR_MESSAGE.to_string());
            }
            Ok(())
        })
    }

    fn search(&self, keyword: String, offset: u32) -> AsyncTask<Vec<Track>> {
        let request = self.http.get(self.url("/search")).query(&[
            ("q", keyword.as_str()),
            ("offset", offset.to_string().as_str()),
        ]);
        Box::pin(async move {
            let response = request.send().await.map_err(|e| {
                log::error!("[Backend] Error fetching music data: {}", e);
                SEARCH_ERROR_MESSAGE.to_string()
            })?;
            let status = response.status();
            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                log::error!("[Backend] Failed to fetch music data: {}", status);
                return Err(message_from_body(&body).unwrap_or_else(|| SEARCH_ERROR_MESSAGE.to_string()));
            }
            let body: ItemsResponse = response.json().await.map_err(|e| {
                log::error!("[Backend] Unreadable search reply: {}", e);
                SEARCH_ERROR_MESSAGE.to_string()
            })?;
            Ok(body.items)
        })
    }

    fn signup(&self, email: String, password: String) -> AsyncTask<()> {
        let request = self
            .http
            .post(self.url("/signup"))
            .json(&AuthRequest { email, password });
        Box::pin(async move {
            let response = request
                .send()
                .await
                .map_err(|_| NETWORK_ERROR_MESSAGE.to_string())?;
            if response.status().is_success() {
                return Ok(());
            }
            let body = response.text().await.unwrap_or_default();
            Err(message_from_body(&body).unwrap_or_else(|| SIGNUP_FAILED_MESSAGE.to_string()))
        })
    }

    fn signin(&self, email: String, password: String) -> AsyncTask<String> {
        let request = self
            .http
            .post(self.url("/signin"))
            .json(&AuthRequest { email, password });
        Box::pin(async move {
            let response = request
                .send()
                .await
                .map_err(|_| NETWORK_ERROR_MESSAGE.to_string())?;
            if !response.status().is_success() {
                let body = response.text().await.unwrap_or_default();
                return Err(
                    message_from_body(&body).unwrap_or_else(|| SIGNIN_FAILED_MESSAGE.to_string())
                );
            }
            let body: SigninResponse = response
                .json()
                .await
                .map_err(|_| SIGNIN_FAILED_MESSAGE.to_string())?;
            Ok(body.session)
        })
    }

    fn signout(&self, session: String) -> AsyncTask<()> {
        let request = self
            .http
            .post(self.url("/signout"))
            .json(&SessionRequest { session });
        Box::pin(async move {
            let response = request
                .send()
                .await
                .map_err(|_| NETWORK_ERROR_MESSAGE.to_string())?;
            if !response.status().is_success() {
                return Err(format!("Sign-out rejected: {}", response.status()));
            }
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::http::test_server::FakeServer;

    #[tokio::test]
    async fn search_passes_keyword_and_offset() {
        let server = FakeServer::start(vec![(
            200,
            r#"{"items":[{"id":"1","name":"Around the World","artists":[{"name":"Daft Punk"}],"preview_url":null}]}"#
                .to_string(),
        )]);
        let backend = BackendClient::new(reqwest::Client::new(), format!("{}/", server.base_url));

        let tracks = backend.search("daft punk".into(), 40).await.unwrap();
        assert_eq!(tracks.len(), 1);
        assert_eq!(tracks[0].name, "Around the World");
        assert_eq!(
            server.requests.recv().unwrap().url,
            "/search?q=daft+punk&offset=40"
        );
        server.join();
    }

    #[tokio::test]
    async fn signup_failure_shows_backend_message() {
        let server = FakeServer::start(vec![
            (409, r#"{"message":"User already exists"}"#.to_string()),
            (500, "".to_string()),
        ]);
        let backend = BackendClient::new(reqwest::Client::new(), server.base_url.clone());

        let err = backend
            .signup("a@example.com".into(), "pw".into())
            .await
            .unwrap_err();
        assert_eq!(err, "User already exists");

        let err = backend
            .signup("a@example.com".into(), "pw".into())
            .await
            .unwrap_err();
        assert_eq!(err, SIGNUP_FAILED_MESSAGE);

        let first = server.requests.recv().unwrap();
        assert_eq!(first.body, r#"{"email":"a@example.com","password":"pw"}"#);
        server.join();
    }

    #[tokio::test]
    async fn signin_returns_session() {
        let server = FakeServer::start(vec![(
            200,
            r#"{"message":"Signed in","session":"abc123"}"#.to_string(),
        )]);
        let backend = BackendClient::new(reqwest::Client::new(), server.base_url.clone());

        let session = backend
            .signin("a@example.com".into(), "pw".into())
            .await
            .unwrap();
        assert_eq!(session, "abc123");
        server.join();
    }

    #[tokio::test]
    async fn unreachable_backend_is_a_network_error() {
        let backend = BackendClient::new(reqwest::Client::new(), "http://127.0.0.1:9");
        let err = backend
            .signup("a@example.com".into(), "pw".into())
            .await
            .unwrap_err();
        assert_eq!(err, NETWORK_ERROR_MESSAGE);

        let err = backend.prepare_token().await.unwrap_err();
        assert_eq!(err, TOKEN_ERROR_MESSAGE);
    }
}
