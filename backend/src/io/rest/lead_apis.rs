//! # REST API for Lead Intake
//!
//! Submission endpoints for the three intake forms, a validation-only
//! endpoint used for inline form feedback, the dropdown catalog, and the
//! dashboard lead listing.

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, error, info, warn};

use crate::domain::commands::leads::{LeadForm, LeadListQuery, SubmitLeadCommand};
use crate::domain::form_options::FORM_CHOICES;
use crate::domain::SubmitLeadError;
use crate::io::rest::mappers::lead_mapper::LeadMapper;
use crate::AppState;
use shared::{ErrorResponse, LeadFilter, LeadKind, ValidateLeadResponse, ValidationErrorResponse};

/// Create a router for lead related APIs
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/leads", get(list_leads))
        .route("/leads/options", get(get_form_options))
        .route("/leads/player", post(submit_player_lead))
        .route("/leads/supply", post(submit_supply_lead))
        .route("/leads/facility", post(submit_facility_lead))
        .route("/leads/validate/:kind", post(validate_lead))
}

#[derive(Debug, Default, Deserialize)]
pub struct LeadListParams {
    #[serde(default)]
    pub kind: LeadFilter,
}

/// Dropdown values for every enumerated field
pub async fn get_form_options() -> impl IntoResponse {
    info!("GET /api/leads/options");
    Json(LeadMapper::to_form_options_response(FORM_CHOICES))
}

pub async fn submit_player_lead(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Response {
    info!("POST /api/leads/player");
    submit(&state, LeadKind::Player, body).await
}

pub async fn submit_supply_lead(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Response {
    info!("POST /api/leads/supply");
    submit(&state, LeadKind::Supply, body).await
}

pub async fn submit_facility_lead(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Response {
    info!("POST /api/leads/facility");
    submit(&state, LeadKind::Facility, body).await
}

async fn submit(
    state: &AppState,
    kind: LeadKind,
    body: Result<Json<Value>, JsonRejection>,
) -> Response {
    let form = match read_form(kind, body) {
        Ok(form) => form,
        Err(response) => return response,
    };

    match state.submission_service.submit_lead(SubmitLeadCommand { form }).await {
        Ok(result) => {
            let response = LeadMapper::to_submit_response(result);
            (StatusCode::CREATED, Json(response)).into_response()
        }
        Err(SubmitLeadError::Validation(errors)) => {
            let response = ValidationErrorResponse {
                errors: errors.into_map(),
            };
            (StatusCode::UNPROCESSABLE_ENTITY, Json(response)).into_response()
        }
        Err(e) => {
            error!("❌ Failed to submit {} lead: {:#}", kind, e);
            let response = ErrorResponse {
                error: "Failed to save submission".to_string(),
            };
            (StatusCode::INTERNAL_SERVER_ERROR, Json(response)).into_response()
        }
    }
}

/// Validate a form without storing it
pub async fn validate_lead(
    State(state): State<AppState>,
    Path(kind): Path<LeadKind>,
    body: Result<Json<Value>, JsonRejection>,
) -> Response {
    info!("POST /api/leads/validate/{}", kind);

    let form = match read_form(kind, body) {
        Ok(form) => form,
        Err(response) => return response,
    };

    let response = match state.submission_service.validate(&form) {
        Ok(()) => ValidateLeadResponse {
            valid: true,
            errors: Default::default(),
        },
        Err(errors) => ValidateLeadResponse {
            valid: false,
            errors: errors.into_map(),
        },
    };
    (StatusCode::OK, Json(response)).into_response()
}

/// Decode a request body into a form of `kind`.
///
/// Bodies that are not JSON, or whose fields have the wrong JSON type, are
/// answered with 400 and an `ErrorResponse`.
fn read_form(
    kind: LeadKind,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<LeadForm, Response> {
    let parsed = match body {
        Ok(Json(body)) => {
            debug!("{} form body: {}", kind, body);
            parse_form(kind, body).map_err(|e| e.to_string())
        }
        Err(rejection) => Err(rejection.body_text()),
    };

    parsed.map_err(|reason| {
        warn!("Malformed {} form: {}", kind, reason);
        let response = ErrorResponse {
            error: format!("Malformed {} form: {}", kind, reason),
        };
        (StatusCode::BAD_REQUEST, Json(response)).into_response()
    })
}

fn parse_form(kind: LeadKind, body: Value) -> Result<LeadForm, serde_json::Error> {
    Ok(match kind {
        LeadKind::Player => LeadForm::Player(serde_json::from_value(body)?),
        LeadKind::Supply => LeadForm::Supply(serde_json::from_value(body)?),
        LeadKind::Facility => LeadForm::Facility(serde_json::from_value(body)?),
    })
}

/// Stored leads in insertion order, optionally filtered by kind
pub async fn list_leads(
    State(state): State<AppState>,
    Query(params): Query<LeadListParams>,
) -> Response {
    info!("GET /api/leads - query: {:?}", params);

    let query = LeadListQuery {
        kind: params.kind.kind(),
    };
    match state.dashboard_service.list_leads(query).await {
        Ok(leads) => {
            let response = LeadMapper::to_list_response(params.kind, leads);
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => {
            error!("Failed to list leads: {:#}", e);
            let response = ErrorResponse {
                error: "Error retrieving submissions".to_string(),
            };
            (StatusCode::INTERNAL_SERVER_ERROR, Json(response)).into_response()
        }
    }
}
