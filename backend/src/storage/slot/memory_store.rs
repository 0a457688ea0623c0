use anyhow::{bail, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::storage::traits::SlotStore;

/// In-memory slot store, used by tests and throwaway demo instances.
///
/// An optional byte quota makes `set` fail the way a full browser storage
/// area would.
#[derive(Debug, Clone, Default)]
pub struct MemorySlotStore {
    slots: Arc<Mutex<HashMap<String, String>>>,
    quota_bytes: Option<usize>,
}

impl MemorySlotStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that rejects payloads larger than `quota_bytes`
    pub fn with_quota(quota_bytes: usize) -> Self {
        Self {
            slots: Arc::default(),
            quota_bytes: Some(quota_bytes),
        }
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, String>>> {
        self.slots
            .lock()
            .map_err(|_| anyhow::anyhow!("Memory slot store lock poisoned"))
    }
}

#[async_trait]
impl SlotStore for MemorySlotStore {
    async fn get(&self, slot: &str) -> Result<Option<String>> {
        Ok(self.lock()?.get(slot).cloned())
    }

    async fn set(&self, slot: &str, payload: &str) -> Result<()> {
        if let Some(quota) = self.quota_bytes {
            if payload.len() > quota {
                bail!(
                    "Storage quota exceeded: slot '{}' needs {} bytes, quota is {}",
                    slot,
                    payload.len(),
                    quota
                );
            }
        }
        self.lock()?.insert(slot.to_string(), payload.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_set_and_get() {
        let store = MemorySlotStore::new();
        assert_eq!(store.get("a").await.unwrap(), None);

        store.set("a", "one").await.unwrap();
        store.set("b", "two").await.unwrap();

        assert_eq!(store.get("a").await.unwrap().as_deref(), Some("one"));
        assert_eq!(store.get("b").await.unwrap().as_deref(), Some("two"));
    }

    #[tokio::test]
    async fn test_clones_share_slots() {
        let store = MemorySlotStore::new();
        let other = store.clone();

        store.set("a", "shared").await.unwrap();
        assert_eq!(other.get("a").await.unwrap().as_deref(), Some("shared"));
    }

    #[tokio::test]
    async fn test_quota_rejects_large_payloads() {
        let store = MemorySlotStore::with_quota(4);

        store.set("a", "1234").await.unwrap();
        let err = store.set("a", "12345").await.unwrap_err();

        assert!(err.to_string().contains("quota exceeded"));
        assert_eq!(store.get("a").await.unwrap().as_deref(), Some("1234"));
    }
}
