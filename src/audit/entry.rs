//! Audit entry data structures
//!
//! One entry records one user action on the draft or one accepted batch,
//! with optional before/after snapshots.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Types of audited actions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    /// Draft seeded from an export
    Upload,
    /// Line item added manually
    Create,
    /// Row or position edited inline
    Update,
    /// Position copied under a new number
    Duplicate,
    /// Position removed
    Delete,
    /// Draft discarded
    Cancel,
    /// Draft accepted by storage
    Save,
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Operation::Upload => "UPLOAD",
            Operation::Create => "CREATE",
            Operation::Update => "UPDATE",
            Operation::Duplicate => "DUPLICATE",
            Operation::Delete => "DELETE",
            Operation::Cancel => "CANCEL",
            Operation::Save => "SAVE",
        };
        f.write_str(label)
    }
}

/// Types of audited entities
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityType {
    LineItem,
    Position,
    Draft,
    Batch,
}

impl std::fmt::Display for EntityType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EntityType::LineItem => write!(f, "LineItem"),
            EntityType::Position => write!(f, "Position"),
            EntityType::Draft => write!(f, "Draft"),
            EntityType::Batch => write!(f, "Batch"),
        }
    }
}

/// A single audit log entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEntry {
    /// When the action occurred (UTC)
    pub timestamp: DateTime<Utc>,

    pub operation: Operation,

    pub entity_type: EntityType,

    /// Line item id, position number or batch size, depending on entity type
    pub entity_id: String,

    /// Human-readable description (notice shown to the user)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub before: Option<serde_json::Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub after: Option<serde_json::Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub diff_summary: Option<String>,
}

impl AuditEntry {
    /// Create an entry without snapshots
    pub fn new(
        operation: Operation,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
    ) -> Self {
        Self {
            timestamp: Utc::now(),
            operation,
            entity_type,
            entity_id: entity_id.into(),
            entity_name,
            before: None,
            after: None,
            diff_summary: None,
        }
    }

    /// Attach the state before the action
    pub fn with_before<T: Serialize>(mut self, before: &T) -> Self {
        self.before = serde_json::to_value(before).ok();
        self
    }

    /// Attach the state after the action
    pub fn with_after<T: Serialize>(mut self, after: &T) -> Self {
        self.after = serde_json::to_value(after).ok();
        self
    }

    pub fn with_diff(mut self, diff_summary: Option<String>) -> Self {
        self.diff_summary = diff_summary;
        self
    }

    /// Format the entry for human-readable output
    pub fn format_human_readable(&self) -> String {
        let mut output = format!(
            "[{}] {} {} {}",
            self.timestamp.format("%Y-%m-%d %H:%M:%S UTC"),
            self.operation,
            self.entity_type,
            self.entity_id
        );

        if let Some(name) = &self.entity_name {
            output.push_str(&format!(" ({})", name));
        }

        if let Some(diff) = &self.diff_summary {
            output.push_str(&format!("\n  Changes: {}", diff));
        }

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_operation_display() {
        assert_eq!(Operation::Duplicate.to_string(), "DUPLICATE");
        assert_eq!(Operation::Save.to_string(), "SAVE");
    }

    #[test]
    fn test_entry_with_snapshots() {
        let entry = AuditEntry::new(Operation::Update, EntityType::LineItem, "rcp-1234abcd", None)
            .with_before(&json!({"price": 1000}))
            .with_after(&json!({"price": 1500}))
            .with_diff(Some("price: 1000 -> 1500".into()));

        assert!(entry.before.is_some());
        assert!(entry.after.is_some());
        assert_eq!(entry.diff_summary.as_deref(), Some("price: 1000 -> 1500"));
    }

    #[test]
    fn test_serialization_skips_empty_fields() {
        let entry = AuditEntry::new(Operation::Delete, EntityType::Position, "3", None);
        let json = serde_json::to_string(&entry).unwrap();

        assert!(json.contains("\"entity_type\":\"position\""));
        assert!(!json.contains("before"));

        let back: AuditEntry = serde_json::from_str(&json).unwrap();
        assert_eq!(back.operation, Operation::Delete);
    }

    #[test]
    fn test_human_readable_format() {
        let entry = AuditEntry::new(
            Operation::Duplicate,
            EntityType::Position,
            "1",
            Some("Position 1 duplicated as position 2".into()),
        );

        let formatted = entry.format_human_readable();
        assert!(formatted.contains("DUPLICATE Position 1"));
        assert!(formatted.contains("duplicated as position 2"));
    }
}
