//! User settings for acceptance-cli
//!
//! Display preferences and workflow defaults, stored as `config.json`.

use chrono::format::{Item, StrftimeItems};
use serde::{Deserialize, Serialize};

use super::paths::AcceptancePaths;
use crate::error::AcceptanceError;
use crate::models::TransactionKind;

/// User settings for acceptance-cli
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Currency symbol shown next to prices
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Date format used in the preview (strftime format)
    #[serde(default = "default_date_format")]
    pub date_format: String,

    /// Transaction kind used when a service is added without one
    #[serde(default)]
    pub default_transaction_kind: TransactionKind,

    /// Ask before deleting a position
    #[serde(default = "default_confirm_deletes")]
    pub confirm_deletes: bool,
}

fn default_schema_version() -> u32 {
    1
}

fn default_currency() -> String {
    "₽".to_string()
}

fn default_date_format() -> String {
    "%d.%m.%Y".to_string()
}

fn default_confirm_deletes() -> bool {
    true
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            currency_symbol: default_currency(),
            date_format: default_date_format(),
            default_transaction_kind: TransactionKind::default(),
            confirm_deletes: default_confirm_deletes(),
        }
    }
}

fn is_valid_date_format(format: &str) -> bool {
    StrftimeItems::new(format).all(|item| !matches!(item, Item::Error))
}

impl Settings {
    /// Load settings from disk, or return defaults if the file doesn't exist
    pub fn load_or_create(paths: &AcceptancePaths) -> Result<Self, AcceptanceError> {
        let settings_path = paths.settings_file();

        if !settings_path.exists() {
            // Don't save yet - let caller decide when to persist
            return Ok(Settings::default());
        }

        let contents = std::fs::read_to_string(&settings_path)
            .map_err(|e| AcceptanceError::Io(format!("Failed to read settings file: {}", e)))?;

        let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
            AcceptanceError::Config(format!("Failed to parse settings file: {}", e))
        })?;
        settings.validate()?;
        Ok(settings)
    }

    /// Check that the settings can be used for display
    pub fn validate(&self) -> Result<(), AcceptanceError> {
        if !is_valid_date_format(&self.date_format) {
            return Err(AcceptanceError::Config(format!(
                "Invalid date_format '{}'",
                self.date_format
            )));
        }
        Ok(())
    }

    /// The configured date format, or the default when it cannot be used
    pub fn date_format_or_default(&self) -> String {
        if is_valid_date_format(&self.date_format) {
            self.date_format.clone()
        } else {
            default_date_format()
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &AcceptancePaths) -> Result<(), AcceptanceError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self).map_err(|e| {
            AcceptanceError::Config(format!("Failed to serialize settings: {}", e))
        })?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| AcceptanceError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }
}
