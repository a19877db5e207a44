//! Application layer orchestrating the terminal interface.
//!
//! Owns terminal setup and teardown, the main event loop, and rendering of
//! the two tabs. All state transitions are delegated to the domain layer.

pub mod ui;
