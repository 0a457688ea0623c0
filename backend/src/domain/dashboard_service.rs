//! Admin dashboard read model: per-kind counts and kind filtering over the
//! stored lead sequence. Purely a projection; nothing here writes.

use anyhow::Result;
use std::sync::Arc;
use tracing::info;

use crate::domain::commands::leads::LeadListQuery;
use crate::domain::models::lead::DomainLead;
use crate::storage::SubmissionStorage;
use shared::LeadKind;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LeadCounts {
    pub total: usize,
    pub players: usize,
    pub supply: usize,
    pub facilities: usize,
}

impl LeadCounts {
    pub fn from_leads(leads: &[DomainLead]) -> Self {
        let mut counts = LeadCounts {
            total: leads.len(),
            ..Default::default()
        };
        for lead in leads {
            match lead.kind() {
                LeadKind::Player => counts.players += 1,
                LeadKind::Supply => counts.supply += 1,
                LeadKind::Facility => counts.facilities += 1,
            }
        }
        counts
    }

    pub fn for_kind(&self, kind: LeadKind) -> usize {
        match kind {
            LeadKind::Player => self.players,
            LeadKind::Supply => self.supply,
            LeadKind::Facility => self.facilities,
        }
    }
}

#[derive(Clone)]
pub struct DashboardService {
    storage: Arc<dyn SubmissionStorage>,
}

impl DashboardService {
    pub fn new(storage: Arc<dyn SubmissionStorage>) -> Self {
        Self { storage }
    }

    pub async fn counts(&self) -> Result<LeadCounts> {
        let leads = self.storage.read_all().await?;
        let counts = LeadCounts::from_leads(&leads);
        info!("Dashboard counts: {:?}", counts);
        Ok(counts)
    }

    /// Leads in insertion order, optionally narrowed to one kind
    pub async fn list_leads(&self, query: LeadListQuery) -> Result<Vec<DomainLead>> {
        let leads = self.storage.read_all().await?;
        let filtered: Vec<DomainLead> = match query.kind {
            Some(kind) => leads.into_iter().filter(|lead| lead.kind() == kind).collect(),
            None => leads,
        };
        info!("Listing {} leads (kind filter: {:?})", filtered.len(), query.kind);
        Ok(filtered)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::commands::leads::LeadForm;
    use crate::domain::validation::tests::{
        valid_facility_form, valid_player_form, valid_supply_form,
    };
    use crate::domain::validation::LeadValidator;
    use crate::storage::{MemorySlotStore, SubmissionRepository, DEFAULT_SLOT_NAME};
    use chrono::Utc;

    async fn setup(forms: Vec<LeadForm>) -> DashboardService {
        let store = Arc::new(MemorySlotStore::new());
        let repo = Arc::new(SubmissionRepository::new(store, DEFAULT_SLOT_NAME));
        let validator = LeadValidator::new();
        for form in forms {
            let lead = validator.validate(&form, Utc::now()).unwrap();
            repo.append(&lead).await.unwrap();
        }
        DashboardService::new(repo)
    }

    #[tokio::test]
    async fn test_counts_on_empty_store() {
        let service = setup(vec![]).await;
        assert_eq!(service.counts().await.unwrap(), LeadCounts::default());
    }

    #[tokio::test]
    async fn test_counts_per_kind() {
        let service = setup(vec![
            LeadForm::Player(valid_player_form()),
            LeadForm::Player(valid_player_form()),
            LeadForm::Supply(valid_supply_form()),
            LeadForm::Facility(valid_facility_form()),
        ])
        .await;

        let counts = service.counts().await.unwrap();
        assert_eq!(
            counts,
            LeadCounts {
                total: 4,
                players: 2,
                supply: 1,
                facilities: 1
            }
        );
        assert_eq!(counts.for_kind(LeadKind::Player), 2);
    }

    #[tokio::test]
    async fn test_filter_by_kind_keeps_insertion_order() {
        let mut second_player = valid_player_form();
        second_player.name = "Sanjay Verma".to_string();
        let service = setup(vec![
            LeadForm::Player(valid_player_form()),
            LeadForm::Facility(valid_facility_form()),
            LeadForm::Player(second_player),
        ])
        .await;

        let players = service
            .list_leads(LeadListQuery {
                kind: Some(LeadKind::Player),
            })
            .await
            .unwrap();
        let names: Vec<&str> = players.iter().map(|lead| lead.summary().display_name).collect();
        assert_eq!(names, vec!["Ravi Kumar", "Sanjay Verma"]);

        let all = service.list_leads(LeadListQuery::default()).await.unwrap();
        assert_eq!(all.len(), 3);
        assert_eq!(all[1].kind(), LeadKind::Facility);

        let supply = service
            .list_leads(LeadListQuery {
                kind: Some(LeadKind::Supply),
            })
            .await
            .unwrap();
        assert!(supply.is_empty());
    }
}
