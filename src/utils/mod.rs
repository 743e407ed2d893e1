pub mod async_helper;
pub mod audio_controller;
pub mod error_handling;
pub mod errors;
pub mod http;
pub mod password;

// Re-export commonly used types
pub use audio_controller::AudioController;
pub use errors::{AuthError, CatalogError, ConfigError};
