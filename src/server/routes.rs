// Request routing for the backend
use crate::api::{search_tracks, TokenBroker};
use crate::models::{
    AuthRequest, ItemsResponse, MessageResponse, SessionRequest, SessionResponse, SigninResponse,
};
use crate::services::AuthService;
use crate::utils::error_handling::create_runtime;
use crate::utils::errors::AuthError;
use serde::Serialize;
use std::collections::HashMap;
use tiny_http::Method;
use tokio::runtime::Runtime;

/// Status + JSON body produced by a route
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    fn json<T: Serialize>(status: u16, value: &T) -> Self {
        match serde_json::to_string(value) {
            Ok(body) => Self { status, body },
            Err(e) => {
                log::error!("[Server] Failed to encode response: {}", e);
                Self::message(500, "Internal server error")
            }
        }
    }

    fn message(status: u16, message: &str) -> Self {
        Self {
            status,
            body: format!(
                "{{\"message\":{}}}",
                serde_json::Value::String(message.to_string())
            ),
        }
    }

    fn empty(status: u16) -> Self {
        Self {
            status,
            body: String::new(),
        }
    }
}

/// Everything the routes need, owned by the accept loop
pub struct ServerContext {
    auth: AuthService,
    broker: TokenBroker,
    http: reqwest::Client,
    api_url: String,
    runtime: Runtime,
}

impl ServerContext {
    pub fn new(
        auth: AuthService,
        broker: TokenBroker,
        http: reqwest::Client,
        api_url: impl Into<String>,
    ) -> Result<Self, String> {
        Ok(Self {
            auth,
            broker,
            http,
            api_url: api_url.into(),
            runtime: create_runtime()?,
        })
    }

    /// Fetch the catalog token; used at startup and by `POST /token`
    pub fn refresh_token(&self) -> bool {
        match self.runtime.block_on(self.broker.fetch_token()) {
            Ok(()) => true,
            Err(e) => {
                log::error!("[Server] Error fetching token: {}", e);
                false
            }
        }
    }

    pub fn handle(&self, method: &Method, url: &str, body: &str) -> ApiResponse {
        let (path, query) = url.split_once('?').unwrap_or((url, ""));

        match (method, path) {
            (Method::Options, _) => ApiResponse::empty(204),
            (Method::Post, "/signup") => self.signup(body),
            (Method::Post, "/signin") => self.signin(body),
            (Method::Post, "/signout") => self.signout(body),
            (Method::Post, "/session") => self.session(body),
            (Method::Post, "/token") => self.token(),
            (Method::Get, "/search") => self.search(&parse_query(query)),
            _ => ApiResponse::message(404, "Not found"),
        }
    }

    fn signup(&self, body: &str) -> ApiResponse {
        let Ok(request) = serde_json::from_str::<AuthRequest>(body) else {
            return ApiResponse::message(400, "Malformed request body");
        };
        match self.auth.signup(&request.email, &request.password) {
            Ok(()) => ApiResponse::message(200, "User created"),
            Err(e) => auth_failure(e),
        }
    }

    fn signin(&self, body: &str) -> ApiResponse {
        let Ok(request) = serde_json::from_str::<AuthRequest>(body) else {
            return ApiResponse::message(400, "Malformed request body");
        };
        match self.auth.signin(&request.email, &request.password) {
            Ok(session) => ApiResponse::json(
                200,
                &SigninResponse {
                    message: "Signed in".to_string(),
                    session,
                },
            ),
            Err(e) => auth_failure(e),
        }
    }

    fn signout(&self, body: &str) -> ApiResponse {
        let Ok(request) = serde_json::from_str::<SessionRequest>(body) else {
            return ApiResponse::message(400, "Malformed request body");
        };
        match self.auth.signout(&request.session) {
            Ok(()) => ApiResponse::message(200, "Signed out"),
            Err(e) => auth_failure(e),
        }
    }

    /// Who a session token belongs to; 401 once it is revoked or expired
    fn session(&self, body: &str) -> ApiResponse {
        let Ok(request) = serde_json::from_str::<SessionRequest>(body) else {
            return ApiResponse::message(400, "Malformed request body");
        };
        match self.auth.resolve(&request.session) {
            Some(email) => ApiResponse::json(200, &SessionResponse { email }),
            None => auth_failure(AuthError::InvalidCredentials),
        }
    }

    fn token(&self) -> ApiResponse {
        if self.refresh_token() {
            ApiResponse::json(
                200,
                &MessageResponse {
                    message: "Token ready".to_string(),
                },
            )
        } else {
            ApiResponse::message(502, crate::constants::TOKEN_ERROR_MESSAGE)
        }
    }

    fn search(&self, query: &HashMap<String, String>) -> ApiResponse {
        let keyword = query.get("q").map(|q| q.trim()).unwrap_or_default();
        if keyword.is_empty() {
            return ApiResponse::message(400, "A search keyword is required");
        }
        let offset = match query.get("offset").map(|o| o.parse::<u32>()) {
            None => 0,
            Some(Ok(offset)) => offset,
            Some(Err(_)) => return ApiResponse::message(400, "Offset must be a non-negative integer"),
        };

        let token = self.broker.token();
        let result = self.runtime.block_on(search_tracks(
            &self.http,
            &self.api_url,
            token.as_deref(),
            keyword,
            offset,
        ));
        match result {
            Ok(items) => ApiResponse::json(200, &ItemsResponse { items }),
            Err(e) => ApiResponse::message(e.status_code(), e.user_message()),
        }
    }
}

fn auth_failure(e: AuthError) -> ApiResponse {
    if e.status_code() == 500 {
        log::error!("[Server] Auth backend failure: {}", e);
    }
    ApiResponse::message(e.status_code(), &e.user_message())
}

/// Decode `a=1&b=two+words` into a map (last value wins)
pub fn parse_query(query: &str) -> HashMap<String, String> {
    query
        .split('&')
        .filter(|pair| !pair.is_empty())
        .filter_map(|pair| {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            let decode = |s: &str| urlencoding::decode(&s.replace('+', " ")).ok().map(|v| v.into_owned());
            Some((decode(key)?, decode(value)?))
        })
        .collect()
}
