//! Draft repository
//!
//! Keeps the working draft in `draft.json` so an editing session can span
//! several CLI invocations.

use std::path::PathBuf;

use crate::error::AcceptanceError;
use crate::models::Draft;

use super::file_io::{read_json, remove_if_exists, write_json_atomic};

/// Repository for the working draft
pub struct DraftRepository {
    path: PathBuf,
}

impl DraftRepository {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Load the draft, empty if none has been stored
    pub fn load(&self) -> Result<Draft, AcceptanceError> {
        read_json(&self.path)
    }

    /// Store the draft; an empty draft removes the file
    pub fn save(&self, draft: &Draft) -> Result<(), AcceptanceError> {
        if draft.is_empty() {
            return remove_if_exists(&self.path);
        }
        write_json_atomic(&self.path, draft)
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::line_item::fixtures::item;
    use tempfile::TempDir;

    #[test]
    fn test_load_missing_draft_is_empty() {
        let temp_dir = TempDir::new().unwrap();
        let repo = DraftRepository::new(temp_dir.path().join("draft.json"));
        assert!(repo.load().unwrap().is_empty());
    }

    #[test]
    fn test_save_and_reload() {
        let temp_dir = TempDir::new().unwrap();
        let repo = DraftRepository::new(temp_dir.path().join("draft.json"));
        let draft = Draft::from_items(vec![item(1, "", "Inspection"), item(2, "Body", "Paint")])
            .unwrap();

        repo.save(&draft).unwrap();

        assert_eq!(repo.load().unwrap(), draft);
    }

    #[test]
    fn test_saving_empty_draft_removes_file() {
        let temp_dir = TempDir::new().unwrap();
        let repo = DraftRepository::new(temp_dir.path().join("draft.json"));

        repo.save(&Draft::from_items(vec![item(1, "", "Inspection")]).unwrap())
            .unwrap();
        assert!(repo.exists());

        repo.save(&Draft::new()).unwrap();
        assert!(!repo.exists());
    }
}
