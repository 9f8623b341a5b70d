//! Core library components.
//!
//! Everything that decides what gets sent to the repository: key
//! retrieval, sealing, variable create-or-update, and the ordered updater.
//! Nothing here reads flags, prompts, or touches the terminal.

pub mod api;
pub mod cipher;
pub mod config;
pub mod constants;
pub mod keys;
pub mod secrets;
pub mod state;
pub mod types;
pub mod updater;
pub mod validation;
pub mod variables;
