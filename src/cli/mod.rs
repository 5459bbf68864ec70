//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the reception session.

pub mod draft;
pub mod save;

pub use draft::{handle_draft_command, DraftCommands, EditCommands};
pub use save::{handle_history_command, handle_save_command};
