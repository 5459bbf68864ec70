//! Draft CLI commands
//!
//! Every command loads the persisted draft into a `ReceptionSession`,
//! applies one action, writes the draft back and records the action in the
//! audit log.

use std::io::Write;
use std::path::PathBuf;

use clap::Subcommand;

use crate::audit::{EntityType, Operation};
use crate::config::Settings;
use crate::display::{format_draft_table, format_position_summary};
use crate::error::{AcceptanceError, AcceptanceResult};
use crate::models::{Draft, LineItem, Money, Quantity, ReceptionId, TransactionKind};
use crate::services::upload::parse_date;
use crate::services::{
    parse_draft, position_items, DeleteOutcome, LineItemEdit, PositionEdit, ReceptionSession,
    ServiceInput,
};
use crate::storage::Storage;

/// Draft subcommands
#[derive(Subcommand)]
pub enum DraftCommands {
    /// Load an acceptance export (CSV) into a new draft
    Upload {
        /// Path to the CSV file
        file: PathBuf,
        /// Replace a draft that still has rows
        #[arg(short, long)]
        force: bool,
    },

    /// Show the draft grouped by position
    Show {
        /// Show per-position totals instead of rows
        #[arg(short, long)]
        summary: bool,
    },

    /// Add a service to a new work group of the first position
    #[command(name = "add-group")]
    AddGroup {
        /// Work group name
        group: String,
        /// Service name
        service: String,
        #[command(flatten)]
        details: ServiceDetails,
    },

    /// Add a service to a work group of a position
    #[command(name = "add-item")]
    AddItem {
        /// Position number
        position: u32,
        /// Work group name
        group: String,
        /// Service name
        service: String,
        #[command(flatten)]
        details: ServiceDetails,
    },

    /// Copy a position under the next free position number
    Duplicate {
        /// Position number
        position: u32,
    },

    /// Delete every row of a position
    Delete {
        /// Position number
        position: u32,
        /// Skip confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Edit a row or a whole position
    #[command(subcommand)]
    Edit(EditCommands),

    /// Discard the draft
    Cancel,
}

/// Price, quantity and kind of a manually entered service
#[derive(clap::Args)]
pub struct ServiceDetails {
    /// Price per unit (e.g. "1200.50" or "1 200,50")
    #[arg(short, long)]
    price: String,
    /// Quantity
    #[arg(short, long, default_value = "1")]
    quantity: String,
    /// Transaction kind: income or expense
    #[arg(short, long)]
    kind: Option<String>,
}

/// Edit subcommands
#[derive(Subcommand)]
pub enum EditCommands {
    /// Edit the per-item fields of one row
    Item {
        /// Line item ID (full or as shown in the preview)
        id: String,
        /// New item name
        #[arg(short, long)]
        name: Option<String>,
        /// New work group
        #[arg(short, long)]
        group: Option<String>,
        /// New price per unit
        #[arg(short, long)]
        price: Option<String>,
        /// New quantity
        #[arg(short, long)]
        quantity: Option<String>,
        /// New transaction kind
        #[arg(short, long)]
        kind: Option<String>,
    },

    /// Edit the fields shared by every row of a position
    Position {
        /// Position number
        position: u32,
        /// Reception date
        #[arg(long)]
        date: Option<String>,
        /// Reception number
        #[arg(long)]
        number: Option<String>,
        /// Counterparty name
        #[arg(long)]
        counterparty: Option<String>,
        /// Subdivision name
        #[arg(long)]
        subdivision: Option<String>,
        /// Service (order) name
        #[arg(long)]
        service: Option<String>,
        /// Equipment reference
        #[arg(long, conflicts_with = "clear_equipment")]
        equipment: Option<String>,
        /// Remove the equipment reference
        #[arg(long)]
        clear_equipment: bool,
    },
}

/// Handle a draft command
pub fn handle_draft_command(
    storage: &Storage,
    settings: &Settings,
    cmd: DraftCommands,
) -> AcceptanceResult<()> {
    let mut session = ReceptionSession::with_draft(storage.draft.load()?);

    match cmd {
        DraftCommands::Upload { file, force } => {
            if !session.draft().is_empty() && !force {
                return Err(AcceptanceError::Validation(format!(
                    "Draft already has {} rows. Save or cancel it first, or use --force.",
                    session.draft().len()
                )));
            }

            let reader = std::fs::File::open(&file).map_err(|e| {
                AcceptanceError::Import(format!("Failed to read {}: {}", file.display(), e))
            })?;
            let notice = session.upload(parse_draft(reader)?.into_items())?;
            storage.draft.save(session.draft())?;

            storage.log_create(
                Operation::Upload,
                EntityType::Draft,
                file.display().to_string(),
                Some(notice.to_string()),
                &draft_summary(session.draft()),
            )?;
            println!("{}", notice);
        }

        DraftCommands::Show { summary } => {
            if summary && !session.draft().is_empty() {
                print!("{}", format_position_summary(session.draft(), settings));
            } else {
                print!("{}", format_draft_table(session.draft(), settings));
            }
        }

        DraftCommands::AddGroup {
            group,
            service,
            details,
        } => {
            let input = details.into_input(service, settings)?;
            let (line, notice) = session.add_group(&group, &input)?;
            finish_add(storage, &session, &line, &notice)?;
        }

        DraftCommands::AddItem {
            position,
            group,
            service,
            details,
        } => {
            let input = details.into_input(service, settings)?;
            let (line, notice) = session.add_item_to_group(position, &group, &input)?;
            finish_add(storage, &session, &line, &notice)?;
        }

        DraftCommands::Duplicate { position } => {
            let (new_position, notice) = session.duplicate_position(position)?;
            storage.draft.save(session.draft())?;

            let copies: Vec<&LineItem> = position_items(session.draft(), new_position);
            storage.log_create(
                Operation::Duplicate,
                EntityType::Position,
                new_position.to_string(),
                Some(notice.to_string()),
                &copies,
            )?;
            println!("{}", notice);
        }

        DraftCommands::Delete { position, yes } => {
            let skip_prompt = yes || !settings.confirm_deletes;
            let outcome = if skip_prompt {
                session.delete_position(position, &|_: &str| true)?
            } else {
                session.delete_position(position, &prompt_yes_no)?
            };

            match outcome {
                DeleteOutcome::Deleted {
                    position,
                    removed,
                    notice,
                } => {
                    storage.draft.save(session.draft())?;
                    storage.log_delete(
                        Operation::Delete,
                        EntityType::Position,
                        position.to_string(),
                        Some(notice.to_string()),
                        &removed,
                    )?;
                    println!("{}", notice);
                }
                DeleteOutcome::Cancelled => println!("Aborted."),
            }
        }

        DraftCommands::Edit(edit) => handle_edit(storage, &mut session, edit)?,

        DraftCommands::Cancel => {
            if session.draft().is_empty() {
                println!("Draft is already empty.");
                return Ok(());
            }

            let discarded = draft_summary(session.draft());
            let notice = session.cancel();
            storage.draft.save(session.draft())?;
            storage.log_delete(
                Operation::Cancel,
                EntityType::Draft,
                "draft",
                Some(notice.to_string()),
                &discarded,
            )?;
            println!("{}", notice);
        }
    }

    Ok(())
}

fn handle_edit(
    storage: &Storage,
    session: &mut ReceptionSession,
    cmd: EditCommands,
) -> AcceptanceResult<()> {
    match cmd {
        EditCommands::Item {
            id,
            name,
            group,
            price,
            quantity,
            kind,
        } => {
            let id = resolve_item_id(session.draft(), &id)?;
            let edit = LineItemEdit {
                item_name: name,
                work_group: group,
                price: price.as_deref().map(parse_price).transpose()?,
                quantity: quantity.as_deref().map(parse_quantity).transpose()?,
                transaction_kind: kind.as_deref().map(parse_kind).transpose()?,
            };
            if edit.is_empty() {
                println!("No changes specified. Use --name, --group, --price, --quantity or --kind.");
                return Ok(());
            }

            let (before, after) = session.edit_item(id, &edit)?;
            storage.draft.save(session.draft())?;
            storage.log_update(
                EntityType::LineItem,
                after.id.to_string(),
                Some(after.item_name.clone()),
                &before,
                &after,
            )?;
            println!("Updated line item {}: {}", after.id, after);
        }

        EditCommands::Position {
            position,
            date,
            number,
            counterparty,
            subdivision,
            service,
            equipment,
            clear_equipment,
        } => {
            let equipment_ref = if clear_equipment {
                Some(None)
            } else {
                equipment.map(Some)
            };
            let edit = PositionEdit {
                reception_date: date
                    .as_deref()
                    .map(|d| parse_date(d).map_err(AcceptanceError::Validation))
                    .transpose()?,
                reception_number: number,
                counterparty_name: counterparty,
                subdivision_name: subdivision,
                service_name: service,
                equipment_ref,
            };

            let before = position_fields(session.draft(), position)?;
            let notice = session.edit_position(position, &edit)?;
            let after = position_fields(session.draft(), position)?;
            storage.draft.save(session.draft())?;
            storage.log_update(
                EntityType::Position,
                position.to_string(),
                Some(notice.to_string()),
                &before,
                &after,
            )?;
            println!("{}", notice);
        }
    }

    Ok(())
}

fn finish_add(
    storage: &Storage,
    session: &ReceptionSession,
    line: &LineItem,
    notice: &crate::services::Notice,
) -> AcceptanceResult<()> {
    storage.draft.save(session.draft())?;
    storage.log_create(
        Operation::Create,
        EntityType::LineItem,
        line.id.to_string(),
        Some(notice.to_string()),
        line,
    )?;
    println!("{}", notice);
    println!("  ID: {}", line.id);
    Ok(())
}

impl ServiceDetails {
    fn into_input(self, name: String, settings: &Settings) -> AcceptanceResult<ServiceInput> {
        let kind = match self.kind.as_deref() {
            Some(kind) => parse_kind(kind)?,
            None => settings.default_transaction_kind,
        };
        Ok(ServiceInput::new(
            name.trim(),
            parse_price(&self.price)?,
            parse_quantity(&self.quantity)?,
            kind,
        ))
    }
}

fn parse_price(s: &str) -> AcceptanceResult<Money> {
    Money::parse(s).map_err(|e| AcceptanceError::Validation(format!("Invalid price: {}", e)))
}

fn parse_quantity(s: &str) -> AcceptanceResult<Quantity> {
    Quantity::parse(s).map_err(|e| AcceptanceError::Validation(format!("Invalid quantity: {}", e)))
}

fn parse_kind(s: &str) -> AcceptanceResult<TransactionKind> {
    TransactionKind::parse(s).ok_or_else(|| {
        AcceptanceError::Validation(format!(
            "Unknown transaction kind '{}'. Use income or expense.",
            s
        ))
    })
}

/// Find a row by full UUID or by the short form shown in the preview
fn resolve_item_id(draft: &Draft, input: &str) -> AcceptanceResult<ReceptionId> {
    if let Ok(id) = input.parse::<ReceptionId>() {
        if draft.get(id).is_some() {
            return Ok(id);
        }
    }

    let needle = input.trim().to_lowercase();
    let needle = needle.strip_prefix("rcp-").unwrap_or(&needle);
    if needle.is_empty() {
        return Err(AcceptanceError::line_item_not_found(input));
    }

    let mut matches = draft
        .iter()
        .filter(|item| item.id.as_uuid().to_string().starts_with(needle));
    match (matches.next(), matches.next()) {
        (Some(item), None) => Ok(item.id),
        (Some(_), Some(_)) => Err(AcceptanceError::Validation(format!(
            "ID '{}' matches more than one line item",
            input
        ))),
        (None, _) => Err(AcceptanceError::line_item_not_found(input)),
    }
}

fn position_fields(draft: &Draft, position: u32) -> AcceptanceResult<crate::models::PositionFields> {
    draft
        .iter()
        .find(|item| item.position_number == position)
        .map(LineItem::position_fields)
        .ok_or_else(|| AcceptanceError::position_not_found(position))
}

fn draft_summary(draft: &Draft) -> serde_json::Value {
    serde_json::json!({
        "rows": draft.len(),
        "positions": draft.position_numbers().len(),
    })
}

fn prompt_yes_no(prompt: &str) -> bool {
    print!("{} (y/N): ", prompt);
    if std::io::stdout().flush().is_err() {
        return false;
    }

    let mut answer = String::new();
    if std::io::stdin().read_line(&mut answer).is_err() {
        return false;
    }
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}
