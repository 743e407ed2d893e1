pub mod auth_state;
pub mod playback_state;
pub mod search_state;
pub mod ui_state;

pub use auth_state::{AuthForm, AuthState};
pub use playback_state::{AudioOutput, PlaybackController};
pub use search_state::{SearchState, SearchTicket};
pub use ui_state::{AppScreen, TokenStatus};
