//! Test environment for slot-backed storage.
//!
//! The temporary directory lives as long as the environment and is removed
//! on drop, even if the test panics.

use anyhow::Result;
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::TempDir;

use super::{FileSlotStore, SubmissionRepository, DEFAULT_SLOT_NAME};

pub struct TestEnvironment {
    _temp_dir: TempDir,
    pub base_path: PathBuf,
    pub store: FileSlotStore,
    pub repository: SubmissionRepository,
}

impl TestEnvironment {
    pub async fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let base_path = temp_dir.path().to_path_buf();
        let store = FileSlotStore::new(&base_path)?;
        let repository = SubmissionRepository::new(Arc::new(store.clone()), DEFAULT_SLOT_NAME);

        Ok(Self {
            _temp_dir: temp_dir,
            base_path,
            store,
            repository,
        })
    }

    /// A fresh repository over the same directory, as after a process restart
    pub fn reopen(&self) -> Result<SubmissionRepository> {
        let store = FileSlotStore::new(&self.base_path)?;
        Ok(SubmissionRepository::new(Arc::new(store), DEFAULT_SLOT_NAME))
    }
}
