//! Position reconciliation
//!
//! Pure functions over a `Draft`: grouping rows into positions, picking the
//! row that supplies a position's shared fields, duplicating and deleting
//! whole positions. None of these functions hold state; the caller owns the
//! draft and decides what to do with the result.

use std::collections::BTreeMap;

use crate::error::{AcceptanceError, AcceptanceResult};
use crate::models::{Draft, LineItem, ReceptionId};

/// Result of duplicating a position
#[derive(Debug, Clone)]
pub struct Duplication {
    /// The draft with the copied rows appended
    pub draft: Draft,
    /// Position number assigned to the copy
    pub new_position: u32,
    /// Number of rows copied
    pub rows: usize,
}

/// Result of deleting a position
#[derive(Debug, Clone)]
pub struct Deletion {
    /// The draft without the position's rows
    pub draft: Draft,
    /// Rows that were removed, in draft order
    pub removed: Vec<LineItem>,
}

/// Partition the draft by position number
///
/// Each position's rows keep their draft order, so the first row of every
/// group is that position's representative.
pub fn group_by_position(draft: &Draft) -> BTreeMap<u32, Vec<&LineItem>> {
    let mut groups: BTreeMap<u32, Vec<&LineItem>> = BTreeMap::new();
    for item in draft.iter() {
        groups.entry(item.position_number).or_default().push(item);
    }
    groups
}

/// All rows of one position, in draft order
pub fn position_items(draft: &Draft, position: u32) -> Vec<&LineItem> {
    draft
        .iter()
        .filter(|item| item.position_number == position)
        .collect()
}

/// The row that supplies a position's shared fields
pub fn representative<'a>(position_items: &[&'a LineItem]) -> Option<&'a LineItem> {
    position_items.first().copied()
}

/// Position number for a newly created position
///
/// Always one past the current maximum, so it cannot collide with any
/// existing position even when numbering has gaps. Fails once the maximum
/// is `u32::MAX`.
pub fn next_position_number(draft: &Draft) -> AcceptanceResult<u32> {
    match draft.max_position_number() {
        None => Ok(1),
        Some(max) => max.checked_add(1).ok_or_else(|| {
            AcceptanceError::Validation(format!(
                "No position number left after {}",
                max
            ))
        }),
    }
}

/// Copy every row of `position` into a new position
///
/// Leaves the draft unchanged when the position does not exist.
pub fn duplicate(draft: &Draft, position: u32) -> Draft {
    match try_duplicate(draft, position) {
        Ok(duplication) => duplication.draft,
        Err(_) => draft.clone(),
    }
}

/// Copy every row of `position` into a new position, reporting the new number
pub fn try_duplicate(draft: &Draft, position: u32) -> AcceptanceResult<Duplication> {
    let source = position_items(draft, position);
    if source.is_empty() {
        return Err(AcceptanceError::position_not_found(position));
    }

    let new_position = next_position_number(draft)?;
    let copies: Vec<LineItem> = source
        .into_iter()
        .map(|item| LineItem {
            id: ReceptionId::new(),
            position_number: new_position,
            ..item.clone()
        })
        .collect();
    let rows = copies.len();

    let mut result = draft.clone();
    result.extend(copies)?;

    Ok(Duplication {
        draft: result,
        new_position,
        rows,
    })
}

/// Remove every row of `position`
///
/// Unconditional once called; confirmation belongs to the caller.
pub fn delete(draft: &Draft, position: u32) -> Draft {
    let mut result = draft.clone();
    result.retain(|item| item.position_number != position);
    result
}

/// Remove every row of `position`, failing when no row matches
pub fn try_delete(draft: &Draft, position: u32) -> AcceptanceResult<Deletion> {
    let removed: Vec<LineItem> = position_items(draft, position)
        .into_iter()
        .cloned()
        .collect();

    if removed.is_empty() {
        return Err(AcceptanceError::position_not_found(position));
    }

    Ok(Deletion {
        draft: delete(draft, position),
        removed,
    })
}
