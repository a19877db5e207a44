//! Core domain logic for the terminal interface.
//!
//! This module contains the state and data models that drive the terminal UI,
//! independent of rendering or any specific terminal backend.

pub mod models;
pub mod services;
