use super::Track;
use serde::{Deserialize, Serialize};

/// Catalog token endpoint reply (client-credentials grant)
#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub expires_in: Option<u64>,
}

/// Catalog search reply: `{"tracks": {"items": [...]}}`
#[derive(Debug, Deserialize)]
pub struct SearchTracksResponse {
    pub tracks: TrackPage,
}

#[derive(Debug, Deserialize)]
pub struct TrackPage {
    #[serde(default)]
    pub items: Vec<Track>,
    #[serde(default)]
    pub total: Option<u64>,
}

/// Backend `/search` reply
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ItemsResponse {
    pub items: Vec<Track>,
}
