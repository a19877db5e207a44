pub mod actions;
pub mod app_state;
pub mod events;
pub mod keymap;

pub use actions::ActionsService;
pub use app_state::{AppState, AppStateProps};
pub use events::EventsService;
pub use keymap::Command;
