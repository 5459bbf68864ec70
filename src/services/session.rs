//! Acceptance editing session
//!
//! `ReceptionSession` is the application state of one editing session: it
//! owns the draft and applies user actions through the position reconciler,
//! the composer and the save coordinator. Every action either succeeds with
//! a `Notice` for the user or fails leaving the draft exactly as it was.

use chrono::NaiveDate;

use crate::error::{AcceptanceError, AcceptanceResult};
use crate::models::{
    Draft, LineItem, Money, PositionFields, Quantity, ReceptionId, TransactionKind,
};

use super::composer::{compose, ServiceInput};
use super::position::{try_delete, try_duplicate};
use super::save::{ReceptionSink, SaveCoordinator, SaveReceipt};

/// Capability used to confirm destructive actions
pub trait Confirm {
    /// Return true to proceed
    fn confirm(&self, prompt: &str) -> bool;
}

impl<F> Confirm for F
where
    F: Fn(&str) -> bool,
{
    fn confirm(&self, prompt: &str) -> bool {
        self(prompt)
    }
}

/// Message shown to the user after a successful action
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice(pub String);

impl std::fmt::Display for Notice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Result of a delete request
#[derive(Debug, Clone)]
pub enum DeleteOutcome {
    Deleted {
        position: u32,
        removed: Vec<LineItem>,
        notice: Notice,
    },
    /// The user declined; nothing changed
    Cancelled,
}

/// Inline edit of a single row's per-item fields
#[derive(Debug, Clone, Default)]
pub struct LineItemEdit {
    pub item_name: Option<String>,
    pub work_group: Option<String>,
    pub price: Option<Money>,
    pub quantity: Option<Quantity>,
    pub transaction_kind: Option<TransactionKind>,
}

impl LineItemEdit {
    pub fn is_empty(&self) -> bool {
        self.item_name.is_none()
            && self.work_group.is_none()
            && self.price.is_none()
            && self.quantity.is_none()
            && self.transaction_kind.is_none()
    }

    fn apply(&self, item: &mut LineItem) {
        if let Some(name) = &self.item_name {
            item.item_name = name.trim().to_string();
        }
        if let Some(group) = &self.work_group {
            item.work_group = group.trim().to_string();
        }
        if let Some(price) = self.price {
            item.price = price;
        }
        if let Some(quantity) = self.quantity {
            item.quantity = quantity;
        }
        if let Some(kind) = self.transaction_kind {
            item.transaction_kind = kind;
        }
    }
}

/// Edit of the fields shared by every row of a position
#[derive(Debug, Clone, Default)]
pub struct PositionEdit {
    pub reception_date: Option<NaiveDate>,
    pub reception_number: Option<String>,
    pub counterparty_name: Option<String>,
    pub subdivision_name: Option<String>,
    pub service_name: Option<String>,
    /// `Some(None)` clears the equipment reference
    pub equipment_ref: Option<Option<String>>,
}

impl PositionEdit {
    fn apply(&self, mut fields: PositionFields) -> PositionFields {
        if let Some(date) = self.reception_date {
            fields.reception_date = date;
        }
        if let Some(number) = &self.reception_number {
            fields.reception_number = number.clone();
        }
        if let Some(counterparty) = &self.counterparty_name {
            fields.counterparty_name = counterparty.clone();
        }
        if let Some(subdivision) = &self.subdivision_name {
            fields.subdivision_name = subdivision.clone();
        }
        if let Some(service) = &self.service_name {
            fields.service_name = service.clone();
        }
        if let Some(equipment) = &self.equipment_ref {
            fields.equipment_ref = equipment.clone();
        }
        fields
    }
}

/// One user's editing session over an acceptance draft
#[derive(Debug, Clone, Default)]
pub struct ReceptionSession {
    draft: Draft,
}

impl ReceptionSession {
    /// Create a session with an empty draft
    pub fn new() -> Self {
        Self::default()
    }

    /// Resume a session over an existing draft
    pub fn with_draft(draft: Draft) -> Self {
        Self { draft }
    }

    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    /// Replace the draft with freshly uploaded rows
    pub fn upload(&mut self, items: Vec<LineItem>) -> AcceptanceResult<Notice> {
        let draft = Draft::from_items(items)?;
        let notice = Notice(format!(
            "Loaded {} rows in {} positions",
            draft.len(),
            draft.position_numbers().len()
        ));
        self.draft = draft;
        Ok(notice)
    }

    /// Replace the draft wholesale (inline table edits)
    pub fn replace_draft(&mut self, draft: Draft) {
        self.draft = draft;
    }

    /// Discard every row
    pub fn cancel(&mut self) -> Notice {
        let rows = self.draft.len();
        self.draft.clear();
        Notice(format!("Discarded {} rows", rows))
    }

    /// Add a service to a new work group in the first position
    pub fn add_group(
        &mut self,
        group_name: &str,
        service: &ServiceInput,
    ) -> AcceptanceResult<(LineItem, Notice)> {
        self.append_composed(None, group_name, service)
    }

    /// Add a service to an existing work group of a position
    pub fn add_item_to_group(
        &mut self,
        position: u32,
        group_name: &str,
        service: &ServiceInput,
    ) -> AcceptanceResult<(LineItem, Notice)> {
        self.append_composed(Some(position), group_name, service)
    }

    fn append_composed(
        &mut self,
        target: Option<u32>,
        group_name: &str,
        service: &ServiceInput,
    ) -> AcceptanceResult<(LineItem, Notice)> {
        let group_name = group_name.trim();
        if group_name.is_empty() {
            return Err(AcceptanceError::Validation(
                "Work group name cannot be empty".into(),
            ));
        }

        let line = compose(&self.draft, target, group_name, service)?;
        self.draft.push(line.clone())?;

        let notice = Notice(format!(
            "Added \"{}\" to work group \"{}\" of position {}",
            line.item_name, group_name, line.position_number
        ));
        Ok((line, notice))
    }

    /// Copy a position under the next free position number
    pub fn duplicate_position(&mut self, position: u32) -> AcceptanceResult<(u32, Notice)> {
        let duplication = try_duplicate(&self.draft, position)?;
        self.draft = duplication.draft;

        let notice = Notice(format!(
            "Position {} duplicated as position {}",
            position, duplication.new_position
        ));
        Ok((duplication.new_position, notice))
    }

    /// Delete a position after asking for confirmation
    pub fn delete_position(
        &mut self,
        position: u32,
        confirm: &dyn Confirm,
    ) -> AcceptanceResult<DeleteOutcome> {
        if !self.draft.contains_position(position) {
            return Err(AcceptanceError::position_not_found(position));
        }

        let prompt = format!(
            "Delete position {}? This action cannot be undone.",
            position
        );
        if !confirm.confirm(&prompt) {
            return Ok(DeleteOutcome::Cancelled);
        }

        let deletion = try_delete(&self.draft, position)?;
        self.draft = deletion.draft;

        Ok(DeleteOutcome::Deleted {
            position,
            notice: Notice(format!(
                "Position {} deleted ({} rows)",
                position,
                deletion.removed.len()
            )),
            removed: deletion.removed,
        })
    }

    /// Edit the per-item fields of one row
    pub fn edit_item(
        &mut self,
        id: ReceptionId,
        edit: &LineItemEdit,
    ) -> AcceptanceResult<(LineItem, LineItem)> {
        let before = self
            .draft
            .get(id)
            .cloned()
            .ok_or_else(|| AcceptanceError::line_item_not_found(id.to_string()))?;

        let mut candidate = before.clone();
        edit.apply(&mut candidate);
        candidate
            .validate()
            .map_err(|e| AcceptanceError::Validation(e.to_string()))?;

        let after = self
            .draft
            .update_item(id, |item| *item = candidate)?
            .clone();
        Ok((before, after))
    }

    /// Edit the shared fields of every row in a position
    pub fn edit_position(
        &mut self,
        position: u32,
        edit: &PositionEdit,
    ) -> AcceptanceResult<Notice> {
        let template = self
            .draft
            .iter()
            .find(|item| item.position_number == position)
            .map(LineItem::position_fields)
            .ok_or_else(|| AcceptanceError::position_not_found(position))?;

        let fields = edit.apply(template);
        let mut rows = 0;
        for item in self.draft.position_mut(position) {
            item.set_position_fields(fields.clone());
            rows += 1;
        }

        Ok(Notice(format!("Updated {} rows of position {}", rows, position)))
    }

    /// Save the draft and clear it once the batch has been accepted
    pub fn save<S: ReceptionSink>(
        &mut self,
        coordinator: &SaveCoordinator<S>,
    ) -> AcceptanceResult<(SaveReceipt, Notice)> {
        let receipt = coordinator.save(&self.draft)?;
        self.draft.clear();

        let notice = Notice(format!(
            "Saved {} rows in {} positions",
            receipt.rows, receipt.positions
        ));
        Ok((receipt, notice))
    }
}
