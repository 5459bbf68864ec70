//! Storage layer for acceptance-cli
//!
//! JSON file storage with atomic writes for the working draft and the
//! accepted receptions.

pub mod draft;
pub mod file_io;
pub mod receptions;

pub use draft::DraftRepository;
pub use file_io::{read_json, write_json_atomic};
pub use receptions::{AcceptedBatch, ReceptionRepository};

use serde::Serialize;

use crate::audit::{generate_diff, AuditEntry, AuditLogger, EntityType, Operation};
use crate::config::paths::AcceptancePaths;
use crate::error::{AcceptanceError, AcceptanceResult};

/// Storage coordinator giving access to all repositories
pub struct Storage {
    paths: AcceptancePaths,
    pub draft: DraftRepository,
    pub receptions: ReceptionRepository,
    audit: AuditLogger,
}

impl Storage {
    /// Create a new Storage instance
    pub fn new(paths: AcceptancePaths) -> Result<Self, AcceptanceError> {
        paths.ensure_directories()?;

        Ok(Self {
            draft: DraftRepository::new(paths.draft_file()),
            receptions: ReceptionRepository::new(paths.receptions_file()),
            audit: AuditLogger::new(paths.audit_log()),
            paths,
        })
    }

    pub fn paths(&self) -> &AcceptancePaths {
        &self.paths
    }

    pub fn audit(&self) -> &AuditLogger {
        &self.audit
    }

    /// Check if storage has been initialized (has settings on disk)
    pub fn is_initialized(&self) -> bool {
        self.paths.is_initialized()
    }

    /// Record an action that produced a new entity
    pub fn log_create<T: Serialize>(
        &self,
        operation: Operation,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        after: &T,
    ) -> AcceptanceResult<()> {
        let entry = AuditEntry::new(operation, entity_type, entity_id, entity_name).with_after(after);
        self.audit.log(&entry)
    }

    /// Record a change, with a diff of the two snapshots
    pub fn log_update<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        before: &T,
        after: &T,
    ) -> AcceptanceResult<()> {
        let entry = AuditEntry::new(Operation::Update, entity_type, entity_id, entity_name)
            .with_before(before)
            .with_after(after);
        let diff = match (&entry.before, &entry.after) {
            (Some(before), Some(after)) => generate_diff(before, after),
            _ => None,
        };
        self.audit.log(&entry.with_diff(diff))
    }

    /// Record an action that removed an entity
    pub fn log_delete<T: Serialize>(
        &self,
        operation: Operation,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        before: &T,
    ) -> AcceptanceResult<()> {
        let entry =
            AuditEntry::new(operation, entity_type, entity_id, entity_name).with_before(before);
        self.audit.log(&entry)
    }
}
