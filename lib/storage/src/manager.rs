use crate::content::Content;
use crate::saved_stacks::SavedStackStore;
use crate::submissions::SubmissionQueue;
use peptalk_core::Result;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;

pub const SAVED_STACKS_FILE: &str = "saved_stacks.json";
pub const SUBMISSIONS_FILE: &str = "submissions.json";

/// Owns the data directory and the stores persisted in it
pub struct StorageManager {
    data_dir: PathBuf,
    stacks: Arc<SavedStackStore>,
    submissions: Arc<SubmissionQueue>,
}

impl StorageManager {
    pub fn new<P: AsRef<Path>>(data_dir: P) -> Result<Self> {
        let data_dir = data_dir.as_ref().to_path_buf();
        std::fs::create_dir_all(&data_dir)?;

        let stacks = Arc::new(SavedStackStore::open(data_dir.join(SAVED_STACKS_FILE))?);
        let submissions = Arc::new(SubmissionQueue::open(data_dir.join(SUBMISSIONS_FILE))?);
        info!("Storage ready at {:?}", data_dir);

        Ok(Self {
            data_dir,
            stacks,
            submissions,
        })
    }

    /// Load content from `path`, or start with an empty catalog when none is given
    pub fn load_content(path: Option<&Path>) -> Result<Content> {
        match path {
            Some(path) => Content::from_path(path)
                .map_err(|e| peptalk_core::Error::InvalidCatalog(format!("{:#}", e))),
            None => Ok(Content::default()),
        }
    }

    #[inline]
    pub fn stacks(&self) -> &Arc<SavedStackStore> {
        &self.stacks
    }

    #[inline]
    pub fn submissions(&self) -> &Arc<SubmissionQueue> {
        &self.submissions
    }

    #[inline]
    #[must_use]
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::saved_stacks::{peptide_ref, StackInput};
    use tempfile::tempdir;

    #[test]
    fn test_files_live_in_data_dir() {
        let dir = tempdir().unwrap();
        let data_dir = dir.path().join("data");
        let storage = StorageManager::new(&data_dir).unwrap();

        storage
            .stacks()
            .upsert(StackInput {
                name: "Mine".into(),
                items: vec![peptide_ref("bpc-157")],
                ..StackInput::default()
            })
            .unwrap();

        assert!(data_dir.join(SAVED_STACKS_FILE).exists());
        assert_eq!(storage.data_dir(), data_dir.as_path());
    }

    #[test]
    fn test_missing_content_path_is_error() {
        let dir = tempdir().unwrap();
        assert!(StorageManager::load_content(Some(&dir.path().join("nope.json"))).is_err());
        assert!(StorageManager::load_content(None).unwrap().compounds.is_empty());
    }
}
