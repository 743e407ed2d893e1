pub mod player_app;
pub mod session;

pub use player_app::MusicSearchApp;
pub use session::{AuthAction, ClientSession};
