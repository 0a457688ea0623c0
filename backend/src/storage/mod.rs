//! # Storage Module
//!
//! Handles persistence of submitted leads.
//!
//! The domain layer only sees [`SubmissionStorage`]. Behind it, the
//! [`SubmissionRepository`] keeps the entire sequence in one named slot of a
//! [`SlotStore`], which is either a directory of JSON files
//! ([`FileSlotStore`]) or process memory ([`MemorySlotStore`]).

pub mod slot;
pub mod traits;

pub use slot::{FileSlotStore, MemorySlotStore, SubmissionRepository, DEFAULT_SLOT_NAME};
pub use traits::{SlotStore, SubmissionStorage};
