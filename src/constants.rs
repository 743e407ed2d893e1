//! Application constants and configuration values

// === Window ===
pub const APP_NAME: &str = "TuneSeek";
pub const APP_DESCRIPTION: &str = "Music Search";
pub const APP_WIDTH: f32 = 960.0;
pub const APP_HEIGHT: f32 = 780.0;
pub const REPAINT_INTERVAL_ACTIVE_MILLIS: u64 = 33; // ~30 FPS while requests are in flight
pub const REPAINT_INTERVAL_IDLE_MILLIS: u64 = 250;

// === Search & Pagination ===
pub const PAGE_STEP: u32 = 20;
pub const MAX_RESULTS: usize = 10;

// === Catalog API ===
pub const SPOTIFY_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
pub const SPOTIFY_API_ENDPOINT: &str = "https://api.spotify.com/v1";

// === Backend ===
pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:5000";
pub const DEFAULT_SESSION_TTL_SECS: u64 = 24 * 60 * 60;
pub const DATA_FOLDER: &str = "tuneseek";
pub const DATABASE_FILE: &str = "credentials.db";
pub const HTTP_TIMEOUT_SECS: u64 = 15;

// === Password Hashing ===
pub const SALT_LEN: usize = 16;
pub const SESSION_TOKEN_LEN: usize = 32;

// === User-facing messages ===
pub const TOKEN_ERROR_MESSAGE: &str = "We couldn’t retrieve the token. Please try again.";
pub const SEARCH_ERROR_MESSAGE: &str = "We couldn’t retrieve the music data. Please try again.";
pub const NETWORK_ERROR_MESSAGE: &str = "Network error. Please try again.";
pub const SIGNUP_FAILED_MESSAGE: &str = "Sign-up failed";
pub const SIGNIN_FAILED_MESSAGE: &str = "Sign-in failed";
pub const SEARCH_PROMPT: &str = "Please search for your favorite song";
