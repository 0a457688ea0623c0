//! # MIDDLO Backend
//!
//! Waitlist lead intake for the MIDDLO cricket marketplace. Three kinds of
//! leads (players, bowlers offering their services, and net facilities) are
//! validated, stored in a single persisted slot and exported as sectioned CSV.
//!
//! ## Architecture
//!
//! ```text
//! IO Layer (REST API, handlers, mappers)
//!     ↓
//! Domain Layer (validation, intake flow, services)
//!     ↓
//! Storage Layer (submission repository over a slot store)
//! ```

pub mod config;
pub mod domain;
pub mod io;
pub mod storage;

use anyhow::{Context, Result};
use axum::{
    http::{HeaderValue, Method},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

use crate::config::AppConfig;
use crate::domain::{DashboardService, ExportService, SimulatedLatency, SubmissionService};
use crate::storage::{FileSlotStore, SubmissionRepository, SubmissionStorage};

/// Main application state that holds all services
#[derive(Clone)]
pub struct AppState {
    pub submission_service: SubmissionService,
    pub dashboard_service: DashboardService,
    pub export_service: ExportService,
}

impl AppState {
    /// Wire every service to one submission store
    pub fn new(storage: Arc<dyn SubmissionStorage>, config: &AppConfig) -> Self {
        let latency = SimulatedLatency::from_millis(config.simulated_latency_ms);
        Self {
            submission_service: SubmissionService::new(storage.clone(), latency),
            dashboard_service: DashboardService::new(storage.clone()),
            export_service: ExportService::new(storage, config.csv_quoting)
                .with_default_directory(config.export_directory.clone()),
        }
    }
}

/// Initialize the backend with all required services
pub async fn initialize_backend(config: &AppConfig) -> Result<AppState> {
    info!("Setting up storage in {:?}", config.data_directory);
    let store = FileSlotStore::new(&config.data_directory)?;
    let repository = SubmissionRepository::new(Arc::new(store), &config.slot_name);

    info!("Setting up application state");
    Ok(AppState::new(Arc::new(repository), config))
}

/// Create the Axum router with all routes configured
pub fn create_router(app_state: AppState, cors_origin: &str) -> Result<Router> {
    let origin = cors_origin
        .parse::<HeaderValue>()
        .with_context(|| format!("Invalid CORS origin '{}'", cors_origin))?;

    // CORS setup to allow the intake frontend to make requests
    let cors = CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any);

    Ok(Router::new()
        .nest("/api", io::rest::api_router())
        .layer(cors)
        .with_state(app_state))
}
