//! The acceptance draft
//!
//! A draft is the staging table the user edits before saving. Row order is
//! kept for display; grouping is by position number, never by row order.

use std::collections::{BTreeSet, HashSet};

use serde::{Deserialize, Serialize};

use super::ids::ReceptionId;
use super::line_item::LineItem;
use crate::error::{AcceptanceError, AcceptanceResult};

/// Ordered collection of line items owned by one editing session
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Draft {
    items: Vec<LineItem>,
}

impl Draft {
    /// Create an empty draft
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a draft from uploaded rows, rejecting repeated identities
    pub fn from_items(items: Vec<LineItem>) -> AcceptanceResult<Self> {
        ensure_unique_ids(&items)?;
        Ok(Self { items })
    }

    /// Replace the whole row set
    pub fn replace(&mut self, items: Vec<LineItem>) -> AcceptanceResult<()> {
        ensure_unique_ids(&items)?;
        self.items = items;
        Ok(())
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    pub fn into_items(self) -> Vec<LineItem> {
        self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &LineItem> + '_ {
        self.items.iter()
    }

    /// Append a single row
    pub fn push(&mut self, item: LineItem) -> AcceptanceResult<()> {
        if self.get(item.id).is_some() {
            return Err(duplicate_id(item.id));
        }
        self.items.push(item);
        Ok(())
    }

    /// Append several rows at the end, keeping their order
    pub fn extend(&mut self, items: Vec<LineItem>) -> AcceptanceResult<()> {
        let mut seen: HashSet<ReceptionId> = self.items.iter().map(|i| i.id).collect();
        for item in &items {
            if !seen.insert(item.id) {
                return Err(duplicate_id(item.id));
            }
        }
        self.items.extend(items);
        Ok(())
    }

    pub fn get(&self, id: ReceptionId) -> Option<&LineItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Apply an in-place edit to a single row
    ///
    /// The identity token cannot be changed through this path; an edit that
    /// tries to is rolled back and rejected.
    pub fn update_item<F>(&mut self, id: ReceptionId, edit: F) -> AcceptanceResult<&LineItem>
    where
        F: FnOnce(&mut LineItem),
    {
        let index = self
            .items
            .iter()
            .position(|item| item.id == id)
            .ok_or_else(|| AcceptanceError::line_item_not_found(id.to_string()))?;

        let before = self.items[index].clone();
        edit(&mut self.items[index]);

        if self.items[index].id != id {
            self.items[index] = before;
            return Err(AcceptanceError::Validation(
                "Line item identity cannot be edited".into(),
            ));
        }

        Ok(&self.items[index])
    }

    /// Keep only the rows matching the predicate
    pub(crate) fn retain<F>(&mut self, keep: F)
    where
        F: FnMut(&LineItem) -> bool,
    {
        self.items.retain(keep);
    }

    /// Mutable access to every row of one position
    pub(crate) fn position_mut(
        &mut self,
        position: u32,
    ) -> impl Iterator<Item = &mut LineItem> + '_ {
        self.items
            .iter_mut()
            .filter(move |item| item.position_number == position)
    }

    /// Distinct position numbers, ascending
    pub fn position_numbers(&self) -> BTreeSet<u32> {
        self.items.iter().map(|item| item.position_number).collect()
    }

    pub fn max_position_number(&self) -> Option<u32> {
        self.items.iter().map(|item| item.position_number).max()
    }

    /// Position number of the first row in draft order
    pub fn first_position_number(&self) -> Option<u32> {
        self.items.first().map(|item| item.position_number)
    }

    pub fn contains_position(&self, position: u32) -> bool {
        self.items.iter().any(|item| item.position_number == position)
    }
}

impl From<Draft> for Vec<LineItem> {
    fn from(draft: Draft) -> Self {
        draft.items
    }
}

fn ensure_unique_ids(items: &[LineItem]) -> AcceptanceResult<()> {
    let mut seen = HashSet::with_capacity(items.len());
    for item in items {
        if !seen.insert(item.id) {
            return Err(duplicate_id(item.id));
        }
    }
    Ok(())
}

fn duplicate_id(id: ReceptionId) -> AcceptanceError {
    AcceptanceError::Validation(format!("Duplicate line item id: {}", id))
}
