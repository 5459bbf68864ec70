//! Audit logging for acceptance-cli
//!
//! Every user action on the draft and every accepted batch is appended to
//! `audit.log` as one JSON line.
//!
//! - `AuditEntry`: timestamp, operation, entity and optional snapshots.
//! - `AuditLogger`: appends entries to the log and reads them back.
//! - `generate_diff`: one-line summary of field changes for inline edits.

mod diff;
mod entry;
mod logger;

pub use diff::generate_diff;
pub use entry::{AuditEntry, EntityType, Operation};
pub use logger::AuditLogger;
