//! Acceptance upload
//!
//! Reads an acceptance export (CSV with a header row) into line items ready
//! to seed a draft. Rows without an identity get a fresh one.

use std::io::Read;

use chrono::NaiveDate;
use csv::{ReaderBuilder, Trim};
use serde::Deserialize;

use crate::error::{AcceptanceError, AcceptanceResult};
use crate::models::{Draft, LineItem, Money, Quantity, ReceptionId, TransactionKind};

/// Date formats seen in acceptance exports
const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%d.%m.%Y", "%d/%m/%Y"];

/// One CSV record as exported
#[derive(Debug, Deserialize)]
struct UploadRow {
    #[serde(default)]
    reception_id: String,
    reception_date: String,
    reception_number: String,
    counterparty: String,
    subdivision: String,
    position: u32,
    service: String,
    item: String,
    #[serde(default)]
    work_group: String,
    transaction_type: String,
    price: String,
    quantity: String,
    #[serde(default)]
    equipment: String,
}

impl UploadRow {
    fn into_line_item(self) -> Result<LineItem, String> {
        let id = if self.reception_id.is_empty() {
            ReceptionId::new()
        } else {
            self.reception_id
                .parse()
                .map_err(|_| format!("invalid reception_id '{}'", self.reception_id))?
        };

        let reception_date = parse_date(&self.reception_date)?;
        let transaction_kind = TransactionKind::parse(&self.transaction_type)
            .ok_or_else(|| format!("unknown transaction type '{}'", self.transaction_type))?;
        let price = Money::parse(&self.price).map_err(|e| e.to_string())?;
        let quantity = Quantity::parse(&self.quantity).map_err(|e| e.to_string())?;

        let item = LineItem {
            id,
            reception_date,
            reception_number: self.reception_number,
            counterparty_name: self.counterparty,
            subdivision_name: self.subdivision,
            position_number: self.position,
            service_name: self.service,
            item_name: self.item,
            work_group: self.work_group,
            transaction_kind,
            price,
            quantity,
            equipment_ref: Some(self.equipment).filter(|e| !e.is_empty()),
        };
        item.validate().map_err(|e| e.to_string())?;
        Ok(item)
    }
}

pub(crate) fn parse_date(s: &str) -> Result<NaiveDate, String> {
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(s, format).ok())
        .ok_or_else(|| format!("could not parse date '{}'", s))
}

/// Parse an acceptance export into line items, in file order
pub fn parse_csv<R: Read>(reader: R) -> AcceptanceResult<Vec<LineItem>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .from_reader(reader);

    let mut items = Vec::new();
    for (index, record) in reader.deserialize::<UploadRow>().enumerate() {
        // Header is line 1
        let line = index + 2;
        let row = record.map_err(|e| AcceptanceError::Import(format!("row {}: {}", line, e)))?;
        let item = row
            .into_line_item()
            .map_err(|e| AcceptanceError::Import(format!("row {}: {}", line, e)))?;
        items.push(item);
    }

    Ok(items)
}

/// Parse an acceptance export straight into a draft
pub fn parse_draft<R: Read>(reader: R) -> AcceptanceResult<Draft> {
    let items = parse_csv(reader)?;
    Draft::from_items(items).map_err(|e| AcceptanceError::Import(e.to_string()))
}
