//! Service layer for acceptance-cli
//!
//! The service layer holds the acceptance workflow: position reconciliation,
//! line item composition, save coordination and the editing session that
//! ties them together, plus the CSV upload that seeds a draft.

pub mod composer;
pub mod position;
pub mod save;
pub mod session;
pub mod upload;

pub use composer::{compose, ServiceInput};
pub use position::{
    delete, duplicate, group_by_position, next_position_number, position_items, representative,
};
pub use save::{ReceptionSink, SaveCoordinator, SaveReceipt, SaveTicket};
pub use session::{
    Confirm, DeleteOutcome, LineItemEdit, Notice, PositionEdit, ReceptionSession,
};
pub use upload::{parse_csv, parse_draft};
