//! # File Slot Store
//!
//! Keeps each named slot in its own JSON file inside the data directory.
//!
//! ## File Structure
//!
//! ```text
//! data/
//! └── middlo_submissions.json    ← one file per slot
//! ```
//!
//! Writes go to a hidden temp file first and are then renamed over the slot
//! file, so a crash mid-write leaves the previous payload intact.

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::storage::traits::SlotStore;

#[derive(Debug, Clone)]
pub struct FileSlotStore {
    base_directory: PathBuf,
}

impl FileSlotStore {
    /// Create a store rooted at `base_directory`, creating the directory if needed
    pub fn new<P: AsRef<Path>>(base_directory: P) -> Result<Self> {
        let base_path = base_directory.as_ref().to_path_buf();

        if !base_path.exists() {
            std::fs::create_dir_all(&base_path)
                .with_context(|| {
                    format!("Failed to create data directory {}", base_path.display())
                })?;
        }

        Ok(Self {
            base_directory: base_path,
        })
    }

    pub fn base_directory(&self) -> &Path {
        &self.base_directory
    }

    /// Path of the file backing `slot`
    pub fn slot_path(&self, slot: &str) -> Result<PathBuf> {
        Self::check_slot_name(slot)?;
        Ok(self.base_directory.join(format!("{}.json", slot)))
    }

    fn temp_path(&self, slot: &str) -> PathBuf {
        self.base_directory.join(format!(".{}.json.tmp", slot))
    }

    /// Slot names become file names, so they must stay inside the data directory
    fn check_slot_name(slot: &str) -> Result<()> {
        let valid = !slot.is_empty()
            && slot
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            bail!("Invalid slot name: {:?}", slot);
        }
        Ok(())
    }
}

#[async_trait]
impl SlotStore for FileSlotStore {
    async fn get(&self, slot: &str) -> Result<Option<String>> {
        let path = self.slot_path(slot)?;

        match tokio::fs::read_to_string(&path).await {
            Ok(payload) => Ok(Some(payload)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => {
                Err(e).with_context(|| format!("Failed to read slot file {}", path.display()))
            }
        }
    }

    async fn set(&self, slot: &str, payload: &str) -> Result<()> {
        let path = self.slot_path(slot)?;
        let temp_path = self.temp_path(slot);

        tokio::fs::write(&temp_path, payload)
            .await
            .with_context(|| format!("Failed to write temp file {}", temp_path.display()))?;
        tokio::fs::rename(&temp_path, &path)
            .await
            .with_context(|| format!("Failed to replace slot file {}", path.display()))?;

        debug!("Wrote {} bytes to slot '{}' at {:?}", payload.len(), slot, path);
        Ok(())
    }
}
