//! Draft display formatting
//!
//! Renders the draft as a table grouped by position, together with a
//! per-position summary of income and expense totals.

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::config::Settings;
use crate::models::{Draft, LineItem, Money, TransactionKind};
use crate::services::group_by_position;
use crate::storage::AcceptedBatch;

#[derive(Tabled)]
struct DraftRow {
    #[tabled(rename = "Pos")]
    position: u32,
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Number")]
    number: String,
    #[tabled(rename = "Counterparty")]
    counterparty: String,
    #[tabled(rename = "Service")]
    service: String,
    #[tabled(rename = "Group")]
    group: String,
    #[tabled(rename = "Item")]
    item: String,
    #[tabled(rename = "Kind")]
    kind: String,
    #[tabled(rename = "Price")]
    price: String,
    #[tabled(rename = "Qty")]
    quantity: String,
    #[tabled(rename = "Total")]
    total: String,
}

impl DraftRow {
    fn new(item: &LineItem, settings: &Settings, date_format: &str) -> Self {
        Self {
            position: item.position_number,
            id: item.id.to_string(),
            date: item.reception_date.format(date_format).to_string(),
            number: item.reception_number.clone(),
            counterparty: item.counterparty_name.clone(),
            service: item.service_name.clone(),
            group: if item.work_group.is_empty() {
                "-".to_string()
            } else {
                item.work_group.clone()
            },
            item: item.item_name.clone(),
            kind: item.transaction_kind.to_string(),
            price: item.price.to_string(),
            quantity: item.quantity.to_string(),
            total: item.line_total().format_with_symbol(&settings.currency_symbol),
        }
    }
}

#[derive(Tabled)]
struct PositionRow {
    #[tabled(rename = "Pos")]
    position: u32,
    #[tabled(rename = "Rows")]
    rows: usize,
    #[tabled(rename = "Income")]
    income: String,
    #[tabled(rename = "Expense")]
    expense: String,
}

/// Income and expense totals of a set of rows
pub fn totals<'a>(items: impl IntoIterator<Item = &'a LineItem>) -> (Money, Money) {
    items
        .into_iter()
        .fold((Money::zero(), Money::zero()), |(income, expense), item| {
            match item.transaction_kind {
                TransactionKind::Income => (income + item.line_total(), expense),
                TransactionKind::Expense => (income, expense + item.line_total()),
            }
        })
}

/// Format the draft as a table, rows grouped by position
pub fn format_draft_table(draft: &Draft, settings: &Settings) -> String {
    if draft.is_empty() {
        return "Draft is empty. Upload acceptance data to start.\n".to_string();
    }

    let date_format = settings.date_format_or_default();
    let rows: Vec<DraftRow> = group_by_position(draft)
        .into_values()
        .flatten()
        .map(|item| DraftRow::new(item, settings, &date_format))
        .collect();

    let mut output = Table::new(rows).with(Style::modern()).to_string();
    output.push('\n');
    output
}

/// Format per-position totals plus a grand total line
pub fn format_position_summary(draft: &Draft, settings: &Settings) -> String {
    let symbol = &settings.currency_symbol;
    let rows: Vec<PositionRow> = group_by_position(draft)
        .into_iter()
        .map(|(position, items)| {
            let (income, expense) = totals(items.iter().copied());
            PositionRow {
                position,
                rows: items.len(),
                income: income.format_with_symbol(symbol),
                expense: expense.format_with_symbol(symbol),
            }
        })
        .collect();

    let (income, expense) = totals(draft.iter());
    let mut output = Table::new(rows).with(Style::modern()).to_string();
    output.push_str(&format!(
        "\n{} rows, {} positions. Income: {}  Expense: {}\n",
        draft.len(),
        draft.position_numbers().len(),
        income.format_with_symbol(symbol),
        expense.format_with_symbol(symbol)
    ));
    output
}

/// Format the list of accepted batches
pub fn format_batch_list(batches: &[AcceptedBatch]) -> String {
    if batches.is_empty() {
        return "No receptions saved yet.\n".to_string();
    }

    let mut output = String::new();
    for batch in batches {
        let positions: std::collections::BTreeSet<u32> =
            batch.items.iter().map(|item| item.position_number).collect();
        output.push_str(&format!(
            "{}  {}  {} rows, {} positions\n",
            batch.id,
            batch.saved_at.format("%Y-%m-%d %H:%M UTC"),
            batch.items.len(),
            positions.len()
        ));
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::line_item::fixtures::item;
    use crate::models::Quantity;

    fn draft() -> Draft {
        let mut income = item(2, "Body", "Refund");
        income.transaction_kind = TransactionKind::Income;
        let mut oil = item(1, "Engine", "Oil");
        oil.price = Money::from_cents(1000);
        oil.quantity = Quantity::new(2.0);
        Draft::from_items(vec![income, oil, item(1, "", "Inspection")]).unwrap()
    }

    #[test]
    fn test_totals() {
        let (income, expense) = totals(draft().iter());
        assert_eq!(income, Money::from_cents(10_000));
        assert_eq!(expense, Money::from_cents(12_000));
    }

    #[test]
    fn test_empty_draft_message() {
        let output = format_draft_table(&Draft::new(), &Settings::default());
        assert!(output.contains("Draft is empty"));
    }

    #[test]
    fn test_table_lists_positions_in_order() {
        let output = format_draft_table(&draft(), &Settings::default());
        let oil = output.find("Oil").unwrap();
        let refund = output.find("Refund").unwrap();
        assert!(oil < refund);
        assert!(output.contains("14.03.2025"));
        assert!(output.contains("20.00 ₽"));
    }

    #[test]
    fn test_table_with_unusable_date_format() {
        let settings = Settings {
            date_format: "%Q".into(),
            ..Settings::default()
        };
        let output = format_draft_table(&draft(), &settings);
        assert!(output.contains("14.03.2025"));
    }

    #[test]
    fn test_position_summary() {
        let output = format_position_summary(&draft(), &Settings::default());
        assert!(output.contains("3 rows, 2 positions"));
        assert!(output.contains("Income: 100.00 ₽"));
        assert!(output.contains("Expense: 120.00 ₽"));
    }

    #[test]
    fn test_empty_batch_list() {
        assert_eq!(format_batch_list(&[]), "No receptions saved yet.\n");
    }
}
