//! # IO Module
//!
//! Adapter layer between HTTP clients and the domain services. Handlers
//! translate JSON requests into domain commands and map domain results and
//! errors back into DTOs from the `shared` crate with the right status codes.
//! No business rules live here.

pub mod rest;
