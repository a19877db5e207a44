//! Terminal user interface for the swole chat client.
//!
//! This crate provides the interactive two-tab interface: a chat transcript
//! with an input box, and a context tab for browsing the working directory,
//! staging files, and adjusting the model and personality settings. The
//! domain layer is deliberately free of terminal concerns so the tab state
//! machine and keybinding dispatch are testable without a real terminal.

pub mod application;
pub mod domain;

pub use application::ui::{destruct_terminal_for_panic, start_loop, StartProps};
pub use domain::models::{Action, Author, Event, Message};
