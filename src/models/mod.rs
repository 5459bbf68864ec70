//! Core data models for acceptance-cli
//!
//! This module contains the data structures of the acceptance domain: line
//! items, the draft they are staged in, ids and amounts.

pub mod draft;
pub mod ids;
pub mod line_item;
pub mod money;
pub mod quantity;

pub use draft::Draft;
pub use ids::{BatchId, ReceptionId};
pub use line_item::{LineItem, LineItemValidationError, PositionFields, TransactionKind};
pub use money::Money;
pub use quantity::Quantity;
