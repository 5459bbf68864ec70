//! Path management for acceptance-cli
//!
//! Provides XDG-compliant path resolution for configuration and data.
//!
//! ## Path Resolution Order
//!
//! 1. `ACCEPTANCE_CLI_DATA_DIR` environment variable (if set)
//! 2. Unix (Linux/macOS): `$XDG_CONFIG_HOME/acceptance-cli` or `~/.config/acceptance-cli`
//! 3. Windows: `%APPDATA%\acceptance-cli`

use std::path::PathBuf;

use crate::error::AcceptanceError;

/// Environment variable overriding the base directory
pub const DATA_DIR_ENV: &str = "ACCEPTANCE_CLI_DATA_DIR";

/// Manages all paths used by acceptance-cli
#[derive(Debug, Clone)]
pub struct AcceptancePaths {
    base_dir: PathBuf,
}

impl AcceptancePaths {
    /// Resolve paths from the environment
    ///
    /// # Errors
    ///
    /// Returns an error if no home or config directory can be determined.
    pub fn new() -> Result<Self, AcceptanceError> {
        let base_dir = match std::env::var(DATA_DIR_ENV) {
            Ok(custom) if !custom.is_empty() => PathBuf::from(custom),
            _ => resolve_default_path()?,
        };

        Ok(Self { base_dir })
    }

    /// Create paths under a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the data directory (~/.config/acceptance-cli/data/)
    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    pub fn audit_log(&self) -> PathBuf {
        self.base_dir.join("audit.log")
    }

    /// The working draft between invocations
    pub fn draft_file(&self) -> PathBuf {
        self.data_dir().join("draft.json")
    }

    /// Accepted reception batches
    pub fn receptions_file(&self) -> PathBuf {
        self.data_dir().join("receptions.json")
    }

    /// Ensure the base and data directories exist
    pub fn ensure_directories(&self) -> Result<(), AcceptanceError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| AcceptanceError::Io(format!("Failed to create base directory: {}", e)))?;

        std::fs::create_dir_all(self.data_dir())
            .map_err(|e| AcceptanceError::Io(format!("Failed to create data directory: {}", e)))?;

        Ok(())
    }

    pub fn is_initialized(&self) -> bool {
        self.settings_file().exists()
    }
}

#[cfg(not(windows))]
fn resolve_default_path() -> Result<PathBuf, AcceptanceError> {
    let config_base = match std::env::var("XDG_CONFIG_HOME") {
        Ok(xdg) if !xdg.is_empty() => PathBuf::from(xdg),
        _ => {
            let home = std::env::var("HOME").map_err(|_| {
                AcceptanceError::Config("HOME environment variable not set".into())
            })?;
            PathBuf::from(home).join(".config")
        }
    };
    Ok(config_base.join("acceptance-cli"))
}

#[cfg(windows)]
fn resolve_default_path() -> Result<PathBuf, AcceptanceError> {
    let appdata = std::env::var("APPDATA")
        .map_err(|_| AcceptanceError::Config("Could not determine APPDATA directory".into()))?;
    Ok(PathBuf::from(appdata).join("acceptance-cli"))
}
