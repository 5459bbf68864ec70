//! Line item composition
//!
//! Builds a manually entered service line from a position's shared fields.
//! Composition is pure: the new row is returned, and appending it to the
//! draft is left to the caller.

use crate::error::{AcceptanceError, AcceptanceResult};
use crate::models::{Draft, LineItem, Money, Quantity, ReceptionId, TransactionKind};

use super::position::{position_items, representative};

/// Service attributes entered by the user
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceInput {
    pub name: String,
    pub price_per_unit: Money,
    pub quantity: Quantity,
    pub transaction_kind: TransactionKind,
}

impl ServiceInput {
    pub fn new(
        name: impl Into<String>,
        price_per_unit: Money,
        quantity: Quantity,
        transaction_kind: TransactionKind,
    ) -> Self {
        Self {
            name: name.into(),
            price_per_unit,
            quantity,
            transaction_kind,
        }
    }

    /// Validate the service attributes
    pub fn validate(&self) -> AcceptanceResult<()> {
        if self.name.trim().is_empty() {
            return Err(AcceptanceError::Validation(
                "Service name cannot be empty".into(),
            ));
        }
        if self.price_per_unit.is_negative() {
            return Err(AcceptanceError::Validation(format!(
                "Price cannot be negative: {}",
                self.price_per_unit
            )));
        }
        if !self.quantity.is_valid() {
            return Err(AcceptanceError::Validation(format!(
                "Quantity must be greater than zero: {}",
                self.quantity
            )));
        }
        Ok(())
    }
}

/// Resolve the position a new line goes into
///
/// Without an explicit target the first row's position is used.
pub fn resolve_target(draft: &Draft, target: Option<u32>) -> AcceptanceResult<u32> {
    let first = draft
        .first_position_number()
        .ok_or(AcceptanceError::EmptyDraft)?;
    Ok(target.unwrap_or(first))
}

/// Compose a new line item for `target` (or the first position) in `group_name`
pub fn compose(
    draft: &Draft,
    target: Option<u32>,
    group_name: &str,
    service: &ServiceInput,
) -> AcceptanceResult<LineItem> {
    let position = resolve_target(draft, target)?;
    service.validate()?;

    let items = position_items(draft, position);
    let source = representative(&items)
        .ok_or_else(|| AcceptanceError::position_not_found(position))?;

    Ok(LineItem {
        id: ReceptionId::new(),
        position_number: position,
        item_name: service.name.clone(),
        work_group: group_name.to_string(),
        transaction_kind: service.transaction_kind,
        price: service.price_per_unit,
        quantity: service.quantity,
        ..source.clone()
    })
}
