// Catalog and backend API clients

pub mod backend;
pub mod search;
pub mod token;

// Re-export commonly used items
pub use backend::{Backend, BackendClient};
pub use search::search_tracks;
pub use token::TokenBroker;
