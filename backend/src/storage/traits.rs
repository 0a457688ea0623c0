//! # Storage Traits
//!
//! This module defines the storage abstraction traits that allow different
//! storage backends to be used interchangeably in the domain layer.

use anyhow::Result;
use async_trait::async_trait;

use crate::domain::models::lead::DomainLead;

/// A client-local key-value medium holding named string slots.
///
/// Implementations decide where the slot lives (memory, a file per slot, ...).
/// There is a single logical writer; no locking across processes is provided.
#[async_trait]
pub trait SlotStore: Send + Sync {
    /// Read the raw payload stored under `slot`, or `None` if nothing was stored yet
    async fn get(&self, slot: &str) -> Result<Option<String>>;

    /// Replace the payload stored under `slot`
    async fn set(&self, slot: &str, payload: &str) -> Result<()>;
}

/// Trait defining the interface for lead submission storage
///
/// The sequence is append-only: there is no update, delete or query-by-field
/// operation. Insertion order is preserved on read.
#[async_trait]
pub trait SubmissionStorage: Send + Sync {
    /// Add one validated lead to the end of the persisted sequence
    async fn append(&self, lead: &DomainLead) -> Result<()>;

    /// Return the full sequence in insertion order.
    /// An absent, empty or unreadable payload yields an empty sequence.
    async fn read_all(&self) -> Result<Vec<DomainLead>>;
}
