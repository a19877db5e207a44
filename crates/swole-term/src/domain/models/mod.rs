mod action;
mod author;
mod browser;
mod event;
mod message;
mod tab;

pub use action::Action;
pub use author::Author;
pub use browser::{BrowserEntry, FileBrowser};
pub use event::Event;
pub use message::{Message, MessageType};
pub use tab::{Focus, Tab};
