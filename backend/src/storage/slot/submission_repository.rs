//! # Slot Submission Repository
//!
//! Persists the whole lead sequence as one JSON array in a single named slot.
//!
//! ## Payload Format
//!
//! ```json
//! [
//!   {"kind":"player","name":"Ravi Kumar", ... ,"submittedAt":"2025-06-01T12:00:00.000Z"},
//!   {"kind":"facility","academyName":"Sunrise", ... }
//! ]
//! ```
//!
//! Appending is a read-modify-write of the entire array. An unreadable
//! payload reads as empty but makes `append` fail, so it is never replaced.
//! Appends from this
//! process are serialised; a second process writing the same slot wins or
//! loses by timing alone.

use anyhow::{Context, Result};
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::domain::models::lead::DomainLead;
use crate::storage::traits::{SlotStore, SubmissionStorage};

pub const DEFAULT_SLOT_NAME: &str = "middlo_submissions";

#[derive(Clone)]
pub struct SubmissionRepository {
    store: Arc<dyn SlotStore>,
    slot_name: String,
    write_lock: Arc<Mutex<()>>,
}

impl SubmissionRepository {
    pub fn new(store: Arc<dyn SlotStore>, slot_name: impl Into<String>) -> Self {
        Self {
            store,
            slot_name: slot_name.into(),
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    pub fn slot_name(&self) -> &str {
        &self.slot_name
    }

    /// Stored payload, or `None` when the slot is absent or blank
    async fn payload(&self) -> Result<Option<String>> {
        let payload = self.store.get(&self.slot_name).await?;
        Ok(payload.filter(|payload| !payload.trim().is_empty()))
    }

    fn parse(&self, payload: &str) -> Result<Vec<DomainLead>> {
        serde_json::from_str(payload).with_context(|| {
            format!(
                "Slot '{}' holds an unreadable payload ({} bytes)",
                self.slot_name,
                payload.len()
            )
        })
    }
}

#[async_trait]
impl SubmissionStorage for SubmissionRepository {
    async fn append(&self, lead: &DomainLead) -> Result<()> {
        let _guard = self.write_lock.lock().await;

        // An unreadable payload is never overwritten
        let mut leads = match self.payload().await? {
            Some(payload) => self.parse(&payload).context("Refusing to append")?,
            None => Vec::new(),
        };
        leads.push(lead.clone());

        let payload = serde_json::to_string(&leads).context("Failed to serialize submissions")?;
        self.store
            .set(&self.slot_name, &payload)
            .await
            .with_context(|| {
                format!("Failed to persist submissions to slot '{}'", self.slot_name)
            })?;

        info!(
            "Stored {} lead in slot '{}' ({} total)",
            lead.kind(),
            self.slot_name,
            leads.len()
        );
        Ok(())
    }

    async fn read_all(&self) -> Result<Vec<DomainLead>> {
        let leads = match self.payload().await? {
            Some(payload) => match self.parse(&payload) {
                Ok(leads) => leads,
                Err(e) => {
                    warn!("⚠️ {:#}, treating it as empty", e);
                    Vec::new()
                }
            },
            None => Vec::new(),
        };
        debug!("Read {} leads from slot '{}'", leads.len(), self.slot_name);
        Ok(leads)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::lead::{DomainFacilityLead, DomainPlayerLead, DomainSupplyLead};
    use crate::storage::slot::test_utils::TestEnvironment;
    use crate::storage::slot::MemorySlotStore;
    use chrono::{TimeZone, Utc};

    fn player(name: &str) -> DomainLead {
        DomainLead::Player(DomainPlayerLead {
            name: name.to_string(),
            city: "delhi".to_string(),
            playing_level: "club".to_string(),
            current_booking_method: "whatsapp".to_string(),
            biggest_problem: "Cant find good bowlers nearby".to_string(),
            willingness_to_pay: "400-600".to_string(),
            whatsapp: "9811122233".to_string(),
            submitted_at: Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap(),
        })
    }

    fn supply() -> DomainLead {
        DomainLead::Supply(DomainSupplyLead {
            name: "Arjun Singh".to_string(),
            role: "spin-leg".to_string(),
            experience: "10+".to_string(),
            city: "gurgaon".to_string(),
            hourly_rate: "700".to_string(),
            availability: "evenings".to_string(),
            whatsapp: "9876543210".to_string(),
            submitted_at: Utc.with_ymd_and_hms(2025, 6, 2, 8, 30, 0).unwrap(),
        })
    }

    fn facility() -> DomainLead {
        DomainLead::Facility(DomainFacilityLead {
            academy_name: "Sunrise Cricket Academy".to_string(),
            location: "noida".to_string(),
            number_of_nets: "6-10".to_string(),
            free_hours: "6+".to_string(),
            price_per_hour: "1200".to_string(),
            contact_name: "Meera Shah".to_string(),
            contact_phone: "7012345678".to_string(),
            submitted_at: Utc.with_ymd_and_hms(2025, 6, 3, 17, 45, 0).unwrap(),
        })
    }

    #[tokio::test]
    async fn test_read_all_on_empty_store() {
        let env = TestEnvironment::new().await.unwrap();
        assert!(env.repository.read_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_append_then_read_all() {
        let env = TestEnvironment::new().await.unwrap();
        let repo = &env.repository;

        repo.append(&player("Ravi Kumar")).await.unwrap();
        let before = repo.read_all().await.unwrap().len();

        let lead = supply();
        repo.append(&lead).await.unwrap();
        let after = repo.read_all().await.unwrap();

        assert_eq!(after.len(), before + 1);
        assert_eq!(after.last(), Some(&lead));
    }

    #[tokio::test]
    async fn test_insertion_order_is_preserved() {
        let env = TestEnvironment::new().await.unwrap();
        let repo = &env.repository;

        let leads = vec![facility(), player("First"), supply(), player("Second")];
        for lead in &leads {
            repo.append(lead).await.unwrap();
        }

        assert_eq!(repo.read_all().await.unwrap(), leads);
    }

    #[tokio::test]
    async fn test_read_all_is_idempotent() {
        let env = TestEnvironment::new().await.unwrap();
        env.repository.append(&player("Ravi Kumar")).await.unwrap();
        env.repository.append(&facility()).await.unwrap();

        let first = env.repository.read_all().await.unwrap();
        let second = env.repository.read_all().await.unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_leads_survive_a_new_repository_instance() {
        let env = TestEnvironment::new().await.unwrap();
        env.repository.append(&player("Ravi Kumar")).await.unwrap();

        let reopened = env.reopen().unwrap();
        let leads = reopened.read_all().await.unwrap();
        assert_eq!(leads, vec![player("Ravi Kumar")]);
    }

    #[tokio::test]
    async fn test_corrupt_payload_reads_as_empty() {
        let store = MemorySlotStore::new();
        store.set(DEFAULT_SLOT_NAME, "{not json").await.unwrap();
        let repo = SubmissionRepository::new(Arc::new(store), DEFAULT_SLOT_NAME);

        assert!(repo.read_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_append_keeps_unreadable_payload_intact() {
        let existing = serde_json::to_value(player("Ravi Kumar")).unwrap();
        let payload = serde_json::json!([existing, {"kind": "batsman", "name": "Old"}]).to_string();
        let store = Arc::new(MemorySlotStore::new());
        store.set(DEFAULT_SLOT_NAME, &payload).await.unwrap();
        let repo = SubmissionRepository::new(store.clone(), DEFAULT_SLOT_NAME);

        assert!(repo.read_all().await.unwrap().is_empty());

        let err = repo.append(&supply()).await.unwrap_err();
        assert!(format!("{:#}", err).contains("unreadable payload"));
        assert_eq!(store.get(DEFAULT_SLOT_NAME).await.unwrap(), Some(payload));
    }

    #[tokio::test]
    async fn test_append_keeps_truncated_file_intact() {
        let env = TestEnvironment::new().await.unwrap();
        env.repository.append(&player("Ravi Kumar")).await.unwrap();
        let full = env.store.get(DEFAULT_SLOT_NAME).await.unwrap().unwrap();
        let truncated = &full[..full.len() / 2];
        env.store.set(DEFAULT_SLOT_NAME, truncated).await.unwrap();

        assert!(env.repository.append(&facility()).await.is_err());
        assert_eq!(
            env.store.get(DEFAULT_SLOT_NAME).await.unwrap().as_deref(),
            Some(truncated)
        );
    }

    #[tokio::test]
    async fn test_blank_payload_reads_as_empty() {
        let store = MemorySlotStore::new();
        store.set(DEFAULT_SLOT_NAME, "   ").await.unwrap();
        let repo = SubmissionRepository::new(Arc::new(store), DEFAULT_SLOT_NAME);

        assert!(repo.read_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_write_failure_propagates() {
        let repo =
            SubmissionRepository::new(Arc::new(MemorySlotStore::with_quota(16)), DEFAULT_SLOT_NAME);

        let err = repo.append(&player("Ravi Kumar")).await.unwrap_err();
        assert!(format!("{:#}", err).contains("quota exceeded"));
        assert!(repo.read_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_slots_are_independent() {
        let store: Arc<dyn SlotStore> = Arc::new(MemorySlotStore::new());
        let live = SubmissionRepository::new(store.clone(), DEFAULT_SLOT_NAME);
        let staging = SubmissionRepository::new(store, "staging_submissions");

        live.append(&player("Ravi Kumar")).await.unwrap();

        assert_eq!(live.read_all().await.unwrap().len(), 1);
        assert!(staging.read_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_concurrent_appends_are_not_lost() {
        let env = TestEnvironment::new().await.unwrap();
        let mut handles = Vec::new();

        for i in 0..10 {
            let repo = env.repository.clone();
            handles.push(tokio::spawn(async move {
                repo.append(&player(&format!("Player {}", i))).await
            }));
        }
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        assert_eq!(env.repository.read_all().await.unwrap().len(), 10);
    }
}
