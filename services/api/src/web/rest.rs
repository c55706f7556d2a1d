//! services/api/src/web/rest.rs
//!
//! Contains the Axum handlers for the complaint REST endpoints and the master
//! definition for the OpenAPI specification.

use crate::web::{
    protocol::{
        ComplaintListResponse, ComplaintLookupResponse, ComplaintPayload, ComplaintQuery,
        ComplaintResponse,
        ErrorBody, GenerateComplaintRequest, GenerateComplaintResponse, HealthResponse,
        SpeechToTextResponse, SubmitComplaintRequest, SubmitComplaintResponse, SuccessResponse,
        TextToSpeechRequest, TextToSpeechResponse, UpdateStatusRequest,
    },
    speech,
    state::AppState,
};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use chrono::Utc;
use complaint_intake_core::{
    domain::{ComplaintStatus, Language, NewComplaint},
    generator::new_complaint_id,
    ports::PortError,
};
use std::sync::Arc;
use tracing::{error, info, warn};
use utoipa::OpenApi;

//=========================================================================================
// OpenAPI Master Definition
//=========================================================================================

#[derive(OpenApi)]
#[openapi(
    paths(
        generate_complaint_handler,
        submit_complaint_handler,
        list_complaints_handler,
        get_complaint_handler,
        update_status_handler,
        health_handler,
        speech::text_to_speech_handler,
        speech::speech_to_text_handler,
    ),
    components(
        schemas(
            ErrorBody,
            GenerateComplaintRequest,
            GenerateComplaintResponse,
            SubmitComplaintRequest,
            SubmitComplaintResponse,
            ComplaintPayload,
            ComplaintResponse,
            ComplaintListResponse,
            ComplaintLookupResponse,
            UpdateStatusRequest,
            SuccessResponse,
            TextToSpeechRequest,
            TextToSpeechResponse,
            SpeechToTextResponse,
            HealthResponse,
        )
    ),
    tags(
        (name = "Complaint Intake API", description = "Turn spoken or typed complaints into formal letters and file them.")
    )
)]
pub struct ApiDoc;

//=========================================================================================
// Shared Helpers
//=========================================================================================

/// Stored when a submission carries no category, whatever its language.
const DEFAULT_SUBMITTED_CATEGORY: &str = "Other";

/// The error half of every handler result.
pub type HandlerError = (StatusCode, Json<ErrorBody>);

pub fn reject(status: StatusCode, message: impl Into<String>) -> HandlerError {
    (
        status,
        Json(ErrorBody {
            error: message.into(),
        }),
    )
}

/// Returns the trimmed value if it has any content.
pub(crate) fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// A missing or blank language means English.
pub(crate) fn parse_language(raw: Option<&str>) -> Result<Language, HandlerError> {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        None => Ok(Language::En),
        Some(tag) => tag
            .parse()
            .map_err(|e| reject(StatusCode::BAD_REQUEST, format!("{}", e))),
    }
}

//=========================================================================================
// Complaint Handlers
//=========================================================================================

/// Generate a formal complaint letter from the user's text.
///
/// Never fails because of the AI backend: if it is unavailable the letter is
/// built from the fixed template instead.
#[utoipa::path(
    post,
    path = "/api/generate-complaint",
    request_body = GenerateComplaintRequest,
    responses(
        (status = 200, description = "Letter generated", body = GenerateComplaintResponse),
        (status = 400, description = "No text provided or unknown language", body = ErrorBody)
    )
)]
pub async fn generate_complaint_handler(
    State(app_state): State<Arc<AppState>>,
    Json(payload): Json<GenerateComplaintRequest>,
) -> Result<Json<GenerateComplaintResponse>, HandlerError> {
    let text = non_blank(payload.text)
        .or_else(|| non_blank(payload.transcribed_text))
        .ok_or_else(|| reject(StatusCode::BAD_REQUEST, "No text provided"))?;
    let language = parse_language(payload.language.as_deref())?;

    let result = app_state.generator.generate(&text, language).await;
    info!(%language, category = %result.category, "Complaint letter generated");

    Ok(Json(result.into()))
}

/// File a reviewed complaint letter.
#[utoipa::path(
    post,
    path = "/api/complaints",
    request_body = SubmitComplaintRequest,
    responses(
        (status = 200, description = "Complaint stored", body = SubmitComplaintResponse),
        (status = 400, description = "Missing required fields or unknown language", body = ErrorBody),
        (status = 500, description = "Storage failure", body = ErrorBody)
    )
)]
pub async fn submit_complaint_handler(
    State(app_state): State<Arc<AppState>>,
    Json(payload): Json<SubmitComplaintRequest>,
) -> Result<Json<SubmitComplaintResponse>, HandlerError> {
    let (Some(complaint_text), Some(transcribed_text)) = (
        non_blank(payload.complaint),
        non_blank(payload.transcribed_text),
    ) else {
        return Err(reject(StatusCode::BAD_REQUEST, "Missing required fields"));
    };
    let language = parse_language(payload.language.as_deref())?;
    let category =
        non_blank(payload.category).unwrap_or_else(|| DEFAULT_SUBMITTED_CATEGORY.to_string());

    let mut new = NewComplaint {
        id: new_complaint_id(),
        complaint_text,
        transcribed_text,
        audio_path: non_blank(payload.audio_path),
        language,
        category,
        status: ComplaintStatus::Submitted,
    };

    let saved = match app_state.store.save(new.clone()).await {
        Err(PortError::Conflict(id)) => {
            warn!(%id, "Complaint ID already taken, retrying with a fresh one");
            new.id = new_complaint_id();
            app_state.store.save(new).await
        }
        other => other,
    };

    match saved {
        Ok(record) => {
            info!(id = %record.id, category = %record.category, "Complaint submitted");
            Ok(Json(SubmitComplaintResponse {
                success: true,
                complaint_id: record.id.clone(),
                message: "Complaint submitted successfully".to_string(),
                complaint: record.into(),
            }))
        }
        Err(e) => {
            error!("Failed to submit complaint: {:?}", e);
            Err(reject(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to submit complaint",
            ))
        }
    }
}

/// List all complaints, newest first, or fetch one with `?id=`.
#[utoipa::path(
    get,
    path = "/api/complaints",
    params(ComplaintQuery),
    responses(
        (status = 200, description = "All complaints, or the one requested with `?id=`", body = ComplaintLookupResponse),
        (status = 404, description = "Complaint not found", body = ErrorBody),
        (status = 500, description = "Storage failure", body = ErrorBody)
    )
)]
pub async fn list_complaints_handler(
    State(app_state): State<Arc<AppState>>,
    Query(query): Query<ComplaintQuery>,
) -> Result<Json<ComplaintLookupResponse>, HandlerError> {
    let response = match non_blank(query.id) {
        Some(id) => ComplaintLookupResponse::One(find_complaint(&app_state, &id).await?.0),
        None => ComplaintLookupResponse::All(all_complaints(&app_state).await?.0),
    };
    Ok(Json(response))
}

/// Fetch a single complaint by ID.
#[utoipa::path(
    get,
    path = "/api/complaints/{id}",
    params(("id" = String, Path, description = "The complaint ID returned on submission.")),
    responses(
        (status = 200, description = "The complaint", body = ComplaintResponse),
        (status = 404, description = "Complaint not found", body = ErrorBody),
        (status = 500, description = "Storage failure", body = ErrorBody)
    )
)]
pub async fn get_complaint_handler(
    State(app_state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<ComplaintResponse>, HandlerError> {
    find_complaint(&app_state, &id).await
}

pub async fn find_complaint(
    app_state: &AppState,
    id: &str,
) -> Result<Json<ComplaintResponse>, HandlerError> {
    match app_state.store.get_by_id(id).await {
        Ok(Some(record)) => Ok(Json(ComplaintResponse {
            success: true,
            complaint: record.into(),
        })),
        Ok(None) => Err(reject(StatusCode::NOT_FOUND, "Complaint not found")),
        Err(e) => {
            error!("Failed to fetch complaint {}: {:?}", id, e);
            Err(reject(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to fetch complaints",
            ))
        }
    }
}

pub async fn all_complaints(
    app_state: &AppState,
) -> Result<Json<ComplaintListResponse>, HandlerError> {
    match app_state.store.get_all().await {
        Ok(records) => Ok(Json(ComplaintListResponse {
            success: true,
            complaints: records.into_iter().map(ComplaintPayload::from).collect(),
        })),
        Err(e) => {
            error!("Failed to list complaints: {:?}", e);
            Err(reject(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to fetch complaints",
            ))
        }
    }
}

/// Move a complaint to another lifecycle status.
///
/// Unknown IDs are ignored and still answered with success.
#[utoipa::path(
    patch,
    path = "/api/complaints/{id}/status",
    params(("id" = String, Path, description = "The complaint ID.")),
    request_body = UpdateStatusRequest,
    responses(
        (status = 200, description = "Status updated (or ID unknown)", body = SuccessResponse),
        (status = 400, description = "Unknown status", body = ErrorBody),
        (status = 500, description = "Storage failure", body = ErrorBody)
    )
)]
pub async fn update_status_handler(
    State(app_state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateStatusRequest>,
) -> Result<Json<SuccessResponse>, HandlerError> {
    let status: ComplaintStatus = payload
        .status
        .parse()
        .map_err(|e| reject(StatusCode::BAD_REQUEST, format!("{}", e)))?;

    app_state
        .store
        .update_status(&id, status)
        .await
        .map_err(|e| {
            error!("Failed to update status of {}: {:?}", id, e);
            reject(StatusCode::INTERNAL_SERVER_ERROR, "Failed to update complaint")
        })?;

    info!(%id, %status, "Complaint status updated");
    Ok(Json(SuccessResponse { success: true }))
}

//=========================================================================================
// Health
//=========================================================================================

/// Report liveness and which letter generator is active.
#[utoipa::path(
    get,
    path = "/api/health",
    responses((status = 200, description = "Service is running", body = HealthResponse))
)]
pub async fn health_handler(State(app_state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let features = [
        "Audio Recording",
        "Speech-to-Text (Tamil & English)",
        "AI-Powered Complaint Generation",
        "Text-to-Speech Verification",
        "Database Storage",
    ];
    Json(HealthResponse {
        status: "healthy".to_string(),
        service: "Speech-to-Text Complaint System".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        features: features.iter().map(|f| f.to_string()).collect(),
        ai_provider: app_state.ai_provider(),
        timestamp: Utc::now(),
        message: "Backend is running correctly".to_string(),
    })
}
