//! Display formatting for terminal output

pub mod draft;

pub use draft::{format_batch_list, format_draft_table, format_position_summary, totals};
