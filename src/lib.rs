//! acceptance-cli - reconciliation of vehicle service acceptance data
//!
//! An acceptance export is loaded into a draft of line items. Rows that
//! share a position number form one position; the user duplicates or
//! deletes whole positions, adds services to work groups and edits rows,
//! then saves the draft as one batch.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Line items, the draft, money and quantities
//! - `services`: Position reconciliation, line-item composition, save
//!   coordination and the editing session
//! - `storage`: JSON file storage for the draft and accepted receptions
//! - `audit`: Audit logging system
//! - `display`: Terminal tables
//! - `cli`: Command handlers
//!
//! # Example
//!
//! ```rust,ignore
//! use acceptance::services::{ReceptionSession, SaveCoordinator};
//!
//! let mut session = ReceptionSession::new();
//! session.upload(items)?;
//! session.duplicate_position(1)?;
//! session.save(&SaveCoordinator::new(&storage.receptions))?;
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod models;
pub mod services;
pub mod storage;

pub use error::AcceptanceError;
