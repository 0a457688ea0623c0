//! # Domain Module
//!
//! Business logic for the MIDDLO waitlist: what a lead is, when it is
//! accepted, and how the collected leads are projected and exported. It works
//! against the storage traits only and knows nothing about HTTP.
//!
//! ## Module Organization
//!
//! - **models**: the lead sum type persisted in the submissions slot
//! - **validation**: field rules for the three intake forms
//! - **intake_flow**: landing -> form -> confirmation state machine
//! - **submission_service**: validate, timestamp, store, confirm
//! - **dashboard_service**: per-kind counts and filtering
//! - **export_service**: sectioned CSV export
//! - **form_options**: dropdown values for the enumerated fields

pub mod commands;
pub mod dashboard_service;
pub mod export_service;
pub mod form_options;
pub mod intake_flow;
pub mod models;
pub mod submission_service;
pub mod validation;

pub use dashboard_service::*;
pub use export_service::*;
pub use intake_flow::*;
pub use submission_service::*;
pub use validation::{FieldErrors, LeadValidator};
