use serde::{Deserialize, Serialize};

/// Stored credential record, owned by the credential store
#[derive(Debug, Clone, PartialEq)]
pub struct Credential {
    pub email: String,
    pub password_hash: String,
}

/// Body of `POST /signup` and `POST /signin`
///
/// Missing fields deserialize as empty strings so they surface as validation
/// errors rather than parse failures.
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct AuthRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Body of `POST /signout` and `POST /session`
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct SessionRequest {
    #[serde(default)]
    pub session: String,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct SigninResponse {
    pub message: String,
    pub session: String,
}

/// Reply of `POST /session` for a live session
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct SessionResponse {
    pub email: String,
}
