//! Configuration module for acceptance-cli
//!
//! This module provides configuration management including:
//! - XDG-compliant path resolution
//! - User settings persistence

pub mod paths;
pub mod settings;

pub use paths::AcceptancePaths;
pub use settings::Settings;
