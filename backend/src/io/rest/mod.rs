//! # REST API Interface Layer
//!
//! HTTP endpoints for lead intake, the admin dashboard and CSV export.
//! Handlers log the request, build a domain command, and translate the
//! outcome into a status code plus a `shared` DTO.

pub mod dashboard_apis;
pub mod export_apis;
pub mod lead_apis;
pub mod mappers;

use axum::{response::Json, routing::get, Router};
use serde_json::{json, Value};

use crate::AppState;

/// Every API route, mounted under `/api` by `create_router`
pub fn api_router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .merge(lead_apis::router())
        .merge(dashboard_apis::router())
        .merge(export_apis::router())
}

pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
