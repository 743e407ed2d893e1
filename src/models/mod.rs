// Data models for catalog entities and auth payloads

pub mod responses;
pub mod track;
pub mod user;

// Re-export commonly used types
pub use responses::{ItemsResponse, SearchTracksResponse, TokenResponse, TrackPage};
pub use track::{Artist, Track};
pub use user::{AuthRequest, Credential, MessageResponse, SessionRequest, SessionResponse, SigninResponse};
