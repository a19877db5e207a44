//! Type definitions shared between the session and the completion client.
//!
//! A conversation is a linear sequence of turns. These types are the contract
//! between payload construction in the session and wire formatting in the
//! completion client; they carry no provider-specific detail.

use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    System,
    User,
    Assistant,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Turn {
    pub role: Role,
    pub text: String,
}

impl Turn {
    pub fn system(text: impl Into<String>) -> Self {
        Turn {
            role: Role::System,
            text: text.into(),
        }
    }

    pub fn user(text: impl Into<String>) -> Self {
        Turn {
            role: Role::User,
            text: text.into(),
        }
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Turn {
            role: Role::Assistant,
            text: text.into(),
        }
    }
}
