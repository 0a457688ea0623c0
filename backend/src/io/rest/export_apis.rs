//! # REST API for Data Export
//!
//! Endpoints for exporting every stored submission as a sectioned CSV file,
//! either as a download or written straight to a directory.

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use tracing::{error, info};

use crate::domain::commands::export::{ExportToPathCommand, ExportToPathResult};
use crate::domain::export_service::CSV_MIME_TYPE;
use crate::AppState;
use shared::{ErrorResponse, ExportToPathRequest, ExportToPathResponse};

const NOTHING_TO_EXPORT: &str = "No submissions to export";

/// Create a router for export related APIs
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/export/csv", get(download_csv))
        .route("/export/to-path", post(export_to_path))
}

/// Download all submissions as a CSV attachment
pub async fn download_csv(State(state): State<AppState>) -> Response {
    info!("GET /api/export/csv");

    match state.export_service.export_csv().await {
        Ok(Some(export)) => {
            info!("✅ Export CSV operation completed successfully");
            let disposition = format!("attachment; filename=\"{}\"", export.filename);
            (
                StatusCode::OK,
                [
                    (header::CONTENT_TYPE, format!("{}; charset=utf-8", CSV_MIME_TYPE)),
                    (header::CONTENT_DISPOSITION, disposition),
                ],
                export.content,
            )
                .into_response()
        }
        Ok(None) => {
            let response = ErrorResponse {
                error: NOTHING_TO_EXPORT.to_string(),
            };
            (StatusCode::NOT_FOUND, Json(response)).into_response()
        }
        Err(e) => {
            error!("❌ Failed to export submissions: {:#}", e);
            let response = ErrorResponse {
                error: "Failed to export submissions".to_string(),
            };
            (StatusCode::INTERNAL_SERVER_ERROR, Json(response)).into_response()
        }
    }
}

/// Export data directly to a specified path (or default location)
pub async fn export_to_path(
    State(state): State<AppState>,
    Json(request): Json<ExportToPathRequest>,
) -> Response {
    info!("POST /api/export/to-path - custom_path: {:?}", request.custom_path);

    let command = ExportToPathCommand {
        custom_path: request.custom_path,
    };
    match state.export_service.export_to_path(command).await {
        Ok(ExportToPathResult::Written { file_path, lead_count }) => {
            info!("✅ Export to path operation completed successfully");
            let response = ExportToPathResponse {
                success: true,
                message: format!("Exported {} submissions to {}", lead_count, file_path.display()),
                file_path: file_path.to_string_lossy().to_string(),
                lead_count,
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Ok(ExportToPathResult::NothingToExport) => {
            let response = ExportToPathResponse {
                success: false,
                message: NOTHING_TO_EXPORT.to_string(),
                file_path: String::new(),
                lead_count: 0,
            };
            (StatusCode::NOT_FOUND, Json(response)).into_response()
        }
        Ok(ExportToPathResult::PathNotAllowed { requested }) => {
            let response = ExportToPathResponse {
                success: false,
                message: format!("Export path '{}' is outside the export directory", requested),
                file_path: String::new(),
                lead_count: 0,
            };
            (StatusCode::BAD_REQUEST, Json(response)).into_response()
        }
        Err(e) => {
            error!("❌ Failed to export to path: {:#}", e);
            let response = ExportToPathResponse {
                success: false,
                message: format!("Failed to export to path: {}", e),
                file_path: String::new(),
                lead_count: 0,
            };
            (StatusCode::INTERNAL_SERVER_ERROR, Json(response)).into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::domain::commands::leads::{LeadForm, SubmitLeadCommand};
    use crate::domain::validation::tests::{valid_player_form, valid_supply_form};
    use crate::io::rest::test_support::{test_app_state, test_app_state_with};
    use axum::{
        body::Body,
        http::{Method, Request},
    };
    use chrono::Utc;
    use tempfile::tempdir;
    use tower::util::ServiceExt; // for `oneshot`

    async fn submit(state: &AppState, form: LeadForm) {
        state
            .submission_service
            .submit_lead(SubmitLeadCommand { form })
            .await
            .unwrap();
    }

    fn csv_request() -> Request<Body> {
        Request::builder().uri("/export/csv").body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn test_download_empty_store() {
        let app = router().with_state(test_app_state());

        let response = app.oneshot(csv_request()).await.unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let response: ErrorResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(response.error, "No submissions to export");
    }

    #[tokio::test]
    async fn test_download_ravi_kumar_lead() {
        let state = test_app_state();
        submit(&state, LeadForm::Player(valid_player_form())).await;
        let app = router().with_state(state);

        let response = app.oneshot(csv_request()).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let content_type = response.headers()[header::CONTENT_TYPE].to_str().unwrap().to_string();
        assert!(content_type.starts_with("text/csv"));
        let disposition = response.headers()[header::CONTENT_DISPOSITION]
            .to_str()
            .unwrap()
            .to_string();
        let expected_name = format!(
            "middlo_submissions_{}.csv",
            Utc::now().date_naive().format("%Y-%m-%d")
        );
        assert!(disposition.contains(&expected_name));

        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let csv = String::from_utf8(body.to_vec()).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "PLAYER SUBMISSIONS");
        assert_eq!(
            lines[1],
            "Type,Name,City,Playing Level,Current Booking Method,Biggest Problem,\
             Willingness to Pay,WhatsApp,Submitted At"
        );
        assert!(lines[2].starts_with(
            "\"player\",\"Ravi Kumar\",\"delhi\",\"club\",\"whatsapp\",\
             \"Cant find good bowlers nearby\",\"400-600\",\"9811122233\",\""
        ));
        assert!(lines[2].ends_with("Z\""));
    }

    #[tokio::test]
    async fn test_export_to_configured_directory() {
        let export_dir = tempdir().unwrap();
        let state = test_app_state_with(AppConfig {
            simulated_latency_ms: 0,
            export_directory: Some(export_dir.path().to_path_buf()),
            ..Default::default()
        });
        submit(&state, LeadForm::Player(valid_player_form())).await;
        submit(&state, LeadForm::Supply(valid_supply_form())).await;
        let app = router().with_state(state);

        let request = Request::builder()
            .method(Method::POST)
            .uri("/export/to-path")
            .header("content-type", "application/json")
            .body(Body::from("{}"))
            .unwrap();
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let response: ExportToPathResponse = serde_json::from_slice(&body).unwrap();
        assert!(response.success);
        assert_eq!(response.lead_count, 2);

        let written = std::fs::read_to_string(&response.file_path).unwrap();
        assert!(written.starts_with("PLAYER SUBMISSIONS\n"));
        assert!(written.contains("\nSUPPLY SUBMISSIONS\n"));
    }

    #[tokio::test]
    async fn test_export_outside_configured_directory_is_rejected() {
        let export_dir = tempdir().unwrap();
        let elsewhere = tempdir().unwrap();
        let state = test_app_state_with(AppConfig {
            simulated_latency_ms: 0,
            export_directory: Some(export_dir.path().to_path_buf()),
            ..Default::default()
        });
        submit(&state, LeadForm::Player(valid_player_form())).await;
        let app = router().with_state(state);

        let body = serde_json::json!({ "custom_path": elsewhere.path().to_string_lossy() });
        let request = Request::builder()
            .method(Method::POST)
            .uri("/export/to-path")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let response: ExportToPathResponse = serde_json::from_slice(&body).unwrap();
        assert!(!response.success);
        assert!(response.message.contains("outside the export directory"));
        assert_eq!(std::fs::read_dir(elsewhere.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn test_export_to_custom_path_when_empty() {
        let export_dir = tempdir().unwrap();
        let app = router().with_state(test_app_state());

        let body = serde_json::json!({ "custom_path": export_dir.path().to_string_lossy() });
        let request = Request::builder()
            .method(Method::POST)
            .uri("/export/to-path")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let response: ExportToPathResponse = serde_json::from_slice(&body).unwrap();
        assert!(!response.success);
        assert_eq!(response.message, "No submissions to export");
        assert_eq!(std::fs::read_dir(export_dir.path()).unwrap().count(), 0);
    }
}
