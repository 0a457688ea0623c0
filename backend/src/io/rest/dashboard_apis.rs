use axum::{extract::State, http::StatusCode, response::Json, routing::get, Router};
use serde_json::Value;
use tracing::{error, info};

use crate::io::rest::mappers::dashboard_mapper::DashboardMapper;
use crate::AppState;
use shared::DashboardStats;

/// Create the dashboard API router
pub fn router() -> Router<AppState> {
    Router::new().route("/dashboard/stats", get(get_dashboard_stats))
}

/// Total and per-kind submission counts
pub async fn get_dashboard_stats(
    State(app_state): State<AppState>,
) -> Result<Json<DashboardStats>, (StatusCode, Json<Value>)> {
    info!("GET /api/dashboard/stats");

    match app_state.dashboard_service.counts().await {
        Ok(counts) => Ok(Json(DashboardMapper::to_stats_dto(counts))),
        Err(e) => {
            error!("Failed to count submissions: {:#}", e);
            let error_response = serde_json::json!({
                "error": "Error retrieving dashboard stats"
            });
            Err((StatusCode::INTERNAL_SERVER_ERROR, Json(error_response)))
        }
    }
}
