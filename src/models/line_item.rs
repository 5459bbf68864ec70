//! Reception line item model
//!
//! A line item is one row of an acceptance. Rows sharing a position number
//! form a position; the position-level attributes are duplicated on every row
//! so the draft can be stored flat.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::ReceptionId;
use super::money::Money;
use super::quantity::Quantity;

/// Direction of a line item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    #[serde(alias = "Доходы")]
    Income,
    #[default]
    #[serde(alias = "Расходы")]
    Expense,
}

impl TransactionKind {
    /// Parse a transaction kind from user or spreadsheet input
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "income" | "in" | "доходы" | "доход" => Some(Self::Income),
            "expense" | "out" | "расходы" | "расход" => Some(Self::Expense),
            _ => None,
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Income => write!(f, "Income"),
            Self::Expense => write!(f, "Expense"),
        }
    }
}

/// The attributes every row of one position shares
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PositionFields {
    pub reception_date: NaiveDate,
    pub reception_number: String,
    pub counterparty_name: String,
    pub subdivision_name: String,
    pub service_name: String,
    pub equipment_ref: Option<String>,
}

/// A single reception line item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    /// Identity token, minted on creation or duplication
    pub id: ReceptionId,

    pub reception_date: NaiveDate,

    pub reception_number: String,

    pub counterparty_name: String,

    pub subdivision_name: String,

    /// Grouping key; unique selector of one position within a draft
    pub position_number: u32,

    pub service_name: String,

    pub item_name: String,

    /// Work group label (empty until assigned)
    #[serde(default)]
    pub work_group: String,

    pub transaction_kind: TransactionKind,

    /// Unit price
    pub price: Money,

    pub quantity: Quantity,

    /// Equipment / motor inventory number
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub equipment_ref: Option<String>,
}

impl LineItem {
    /// Create a line item for the given position with a fresh identity
    pub fn new(position_number: u32, fields: PositionFields) -> Self {
        Self {
            id: ReceptionId::new(),
            reception_date: fields.reception_date,
            reception_number: fields.reception_number,
            counterparty_name: fields.counterparty_name,
            subdivision_name: fields.subdivision_name,
            position_number,
            service_name: fields.service_name,
            item_name: String::new(),
            work_group: String::new(),
            transaction_kind: TransactionKind::default(),
            price: Money::zero(),
            quantity: Quantity::default(),
            equipment_ref: fields.equipment_ref,
        }
    }

    /// Project the position-level attributes of this row
    pub fn position_fields(&self) -> PositionFields {
        PositionFields {
            reception_date: self.reception_date,
            reception_number: self.reception_number.clone(),
            counterparty_name: self.counterparty_name.clone(),
            subdivision_name: self.subdivision_name.clone(),
            service_name: self.service_name.clone(),
            equipment_ref: self.equipment_ref.clone(),
        }
    }

    /// Overwrite the position-level attributes of this row
    pub fn set_position_fields(&mut self, fields: PositionFields) {
        self.reception_date = fields.reception_date;
        self.reception_number = fields.reception_number;
        self.counterparty_name = fields.counterparty_name;
        self.subdivision_name = fields.subdivision_name;
        self.service_name = fields.service_name;
        self.equipment_ref = fields.equipment_ref;
    }

    /// Price times quantity
    pub fn line_total(&self) -> Money {
        self.price.times(self.quantity)
    }

    pub fn is_income(&self) -> bool {
        self.transaction_kind == TransactionKind::Income
    }

    /// Validate the per-item attributes
    pub fn validate(&self) -> Result<(), LineItemValidationError> {
        if self.price.is_negative() {
            return Err(LineItemValidationError::NegativePrice(self.price));
        }
        if !self.quantity.is_valid() {
            return Err(LineItemValidationError::InvalidQuantity(self.quantity));
        }
        Ok(())
    }
}

impl fmt::Display for LineItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "#{} {} / {} x{} @ {}",
            self.position_number, self.work_group, self.item_name, self.quantity, self.price
        )
    }
}

/// Validation errors for line items
#[derive(Debug, Clone, PartialEq)]
pub enum LineItemValidationError {
    NegativePrice(Money),
    InvalidQuantity(Quantity),
}

impl fmt::Display for LineItemValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NegativePrice(price) => write!(f, "Price cannot be negative: {}", price),
            Self::InvalidQuantity(quantity) => {
                write!(f, "Quantity must be greater than zero: {}", quantity)
            }
        }
    }
}

impl std::error::Error for LineItemValidationError {}
