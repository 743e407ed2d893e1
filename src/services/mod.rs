//! Services module - business logic layer
//!
//! Backend-side logic called from the HTTP routes: credential checks and the
//! signed-in session registry.

pub mod auth;
pub mod sessions;

// Re-export commonly used types
pub use auth::AuthService;
pub use sessions::SessionRegistry;
