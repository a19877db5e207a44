//! Completion provider abstraction and the OpenAI-compatible client.
//!
//! Defines the [`Completion`] trait the user interfaces program against and
//! the HTTP implementation for OpenAI-compatible chat-completion endpoints.
//! The trait boundary is what keeps the terminal layers testable: tests swap
//! in a scripted implementation instead of a live endpoint.

use async_trait::async_trait;

use crate::core_types::Turn;
use crate::errors::ChatError;

pub mod openai;

pub use openai::OpenAiClient;

#[async_trait]
pub trait Completion: Send + Sync {
    /// Performs one completion call with the given payload against the given
    /// model. No automatic retry: callers surface the failure and let the
    /// user resend.
    async fn complete(&self, turns: Vec<Turn>, model: &str) -> Result<String, ChatError>;
}

pub type CompletionBox = Box<dyn Completion>;
