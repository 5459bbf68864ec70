//! Save and history CLI commands

use crate::audit::{EntityType, Operation};
use crate::display::format_batch_list;
use crate::error::AcceptanceResult;
use crate::services::{ReceptionSession, SaveCoordinator};
use crate::storage::Storage;

/// Flush the draft into the reception store as one batch
pub fn handle_save_command(storage: &Storage) -> AcceptanceResult<()> {
    let mut session = ReceptionSession::with_draft(storage.draft.load()?);
    let coordinator = SaveCoordinator::new(&storage.receptions);

    let saved = session.draft().clone();
    let (receipt, notice) = session.save(&coordinator)?;
    storage.draft.save(session.draft())?;

    let batch_id = storage
        .receptions
        .batches()?
        .last()
        .map(|batch| batch.id.to_string())
        .unwrap_or_default();
    storage.log_create(
        Operation::Save,
        EntityType::Batch,
        batch_id,
        Some(notice.to_string()),
        &saved,
    )?;

    println!("{}", notice);
    println!("  Saved at: {}", receipt.saved_at.format("%Y-%m-%d %H:%M:%S UTC"));
    Ok(())
}

/// Show accepted batches, or the audit trail with `audit`
pub fn handle_history_command(storage: &Storage, limit: usize, audit: bool) -> AcceptanceResult<()> {
    if audit {
        let entries = storage.audit().read_recent(limit)?;
        if entries.is_empty() {
            println!("No audit entries yet.");
        }
        for entry in entries {
            println!("{}", entry.format_human_readable());
        }
        return Ok(());
    }

    let batches = storage.receptions.batches()?;
    let skip = batches.len().saturating_sub(limit);
    print!("{}", format_batch_list(&batches[skip..]));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AcceptancePaths;
    use crate::error::AcceptanceError;
    use crate::models::line_item::fixtures::item;
    use crate::models::Draft;
    use tempfile::TempDir;

    fn storage() -> (Storage, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let paths = AcceptancePaths::with_base_dir(temp_dir.path().to_path_buf());
        (Storage::new(paths).unwrap(), temp_dir)
    }

    #[test]
    fn test_save_moves_draft_into_receptions() {
        let (storage, _temp) = storage();
        let draft = Draft::from_items(vec![item(1, "", "Inspection"), item(2, "", "Washing")]).unwrap();
        storage.draft.save(&draft).unwrap();

        handle_save_command(&storage).unwrap();

        assert!(storage.draft.load().unwrap().is_empty());
        let batches = storage.receptions.batches().unwrap();
        assert_eq!(batches.len(), 1);
        assert_eq!(batches[0].items, draft.items());

        let entries = storage.audit().read_all().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].operation, Operation::Save);
        assert_eq!(entries[0].entity_id, batches[0].id.to_string());
    }

    #[test]
    fn test_save_empty_draft() {
        let (storage, _temp) = storage();
        let err = handle_save_command(&storage).unwrap_err();
        assert!(matches!(err, AcceptanceError::NothingToSave));
        assert!(storage.receptions.batches().unwrap().is_empty());
    }

    #[test]
    fn test_failed_save_keeps_draft() {
        let (storage, _temp) = storage();
        let draft = Draft::from_items(vec![item(1, "", "Inspection")]).unwrap();
        storage.draft.save(&draft).unwrap();
        handle_save_command(&storage).unwrap();

        // Same rows again: the store rejects ids it has already accepted
        storage.draft.save(&draft).unwrap();
        let err = handle_save_command(&storage).unwrap_err();

        assert!(matches!(err, AcceptanceError::PersistenceFailure(_)));
        assert_eq!(storage.draft.load().unwrap(), draft);
        assert_eq!(storage.receptions.batches().unwrap().len(), 1);
    }
}
