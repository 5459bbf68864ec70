//! Accepted reception storage
//!
//! Saved batches are appended to `receptions.json`. Every write replaces the
//! file atomically, so a batch is stored whole or not at all.

use std::collections::HashSet;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{AcceptanceError, AcceptanceResult};
use crate::models::{BatchId, LineItem, ReceptionId};
use crate::services::save::ReceptionSink;

use super::file_io::{read_json, write_json_atomic};

/// One accepted batch of line items
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AcceptedBatch {
    pub id: BatchId,
    pub saved_at: DateTime<Utc>,
    pub items: Vec<LineItem>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct ReceptionData {
    batches: Vec<AcceptedBatch>,
}

/// Repository of accepted receptions
pub struct ReceptionRepository {
    path: PathBuf,
}

impl ReceptionRepository {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// All accepted batches, oldest first
    pub fn batches(&self) -> Result<Vec<AcceptedBatch>, AcceptanceError> {
        let data: ReceptionData = read_json(&self.path)?;
        Ok(data.batches)
    }

    /// Store a batch, rejecting it whole if any row was accepted before
    pub fn append(&self, items: &[LineItem]) -> AcceptanceResult<AcceptedBatch> {
        let mut data: ReceptionData = read_json(&self.path)?;

        let stored: HashSet<ReceptionId> = data
            .batches
            .iter()
            .flat_map(|batch| batch.items.iter().map(|item| item.id))
            .collect();
        if let Some(existing) = items.iter().find(|item| stored.contains(&item.id)) {
            return Err(AcceptanceError::PersistenceFailure(format!(
                "line item {} has already been accepted",
                existing.id
            )));
        }

        let batch = AcceptedBatch {
            id: BatchId::new(),
            saved_at: Utc::now(),
            items: items.to_vec(),
        };
        data.batches.push(batch.clone());
        write_json_atomic(&self.path, &data)?;

        Ok(batch)
    }
}

impl ReceptionSink for ReceptionRepository {
    fn save_batch(&self, items: &[LineItem]) -> AcceptanceResult<()> {
        self.append(items).map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::line_item::fixtures::item;
    use tempfile::TempDir;

    fn repo() -> (ReceptionRepository, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let repo = ReceptionRepository::new(temp_dir.path().join("receptions.json"));
        (repo, temp_dir)
    }

    #[test]
    fn test_empty_repository() {
        let (repo, _temp) = repo();
        assert!(repo.batches().unwrap().is_empty());
    }

    #[test]
    fn test_append_batches() {
        let (repo, _temp) = repo();

        repo.save_batch(&[item(1, "", "Inspection"), item(1, "Engine", "Oil")])
            .unwrap();
        repo.save_batch(&[item(1, "", "Washing")]).unwrap();

        let batches = repo.batches().unwrap();
        assert_eq!(batches.len(), 2);
        assert_eq!(batches[0].items.len(), 2);
        assert_ne!(batches[0].id, batches[1].id);
    }

    #[test]
    fn test_resaving_rows_rejects_whole_batch() {
        let (repo, _temp) = repo();
        let accepted = item(1, "", "Inspection");
        repo.save_batch(&[accepted.clone()]).unwrap();

        let err = repo
            .save_batch(&[item(2, "", "Washing"), accepted])
            .unwrap_err();

        assert!(matches!(err, AcceptanceError::PersistenceFailure(_)));
        assert_eq!(repo.batches().unwrap().len(), 1);
    }
}
