//! Slot-backed storage: a named-slot key-value medium plus the submission
//! repository that keeps the lead sequence in one slot.

pub mod file_store;
pub mod memory_store;
pub mod submission_repository;

#[cfg(test)]
pub mod test_utils;

pub use file_store::FileSlotStore;
pub use memory_store::MemorySlotStore;
pub use submission_repository::{SubmissionRepository, DEFAULT_SLOT_NAME};
