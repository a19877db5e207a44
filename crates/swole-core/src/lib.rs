//! Core library for the swole terminal chat client.
//!
//! This crate holds everything the user interfaces build on: configuration
//! resolution, the staging area of context files, the conversation session,
//! and the completion client that talks to the hosted API. The design keeps
//! state explicit and single-owner: configuration is resolved once at startup
//! and passed down, the session and staging area are plain values mutated by
//! exactly one task, and every failure mode is a typed error.

pub mod config;
pub mod core_types;
pub mod errors;
pub mod llm;
pub mod session;
pub mod staging;

pub use config::{Config, ConfigOverrides};
pub use core_types::{Role, Turn};
pub use errors::ChatError;
pub use llm::{Completion, CompletionBox, OpenAiClient};
pub use session::Session;
pub use staging::{StagedFile, StagingArea};
