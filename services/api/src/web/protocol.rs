//! services/api/src/web/protocol.rs
//!
//! Defines the JSON message protocol between the browser client and the API server.
//! The core domain types never leave the process directly; they are converted to
//! these payloads at the edge.

use chrono::{DateTime, Utc};
use complaint_intake_core::domain::{ComplaintDetails, ComplaintRecord, GenerationResult};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

//=========================================================================================
// Payloads Sent FROM the Client (Browser) TO the Server
//=========================================================================================

/// Text to turn into a complaint letter. `transcribed_text` is accepted as an alias of `text`.
#[derive(Deserialize, Debug, Default, ToSchema)]
pub struct GenerateComplaintRequest {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub transcribed_text: Option<String>,
    /// `en` (default) or `ta`.
    #[serde(default)]
    pub language: Option<String>,
}

/// A reviewed letter the user wants to file.
#[derive(Deserialize, Debug, Default, ToSchema)]
pub struct SubmitComplaintRequest {
    #[serde(default)]
    pub complaint: Option<String>,
    #[serde(default)]
    pub transcribed_text: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub audio_path: Option<String>,
}

#[derive(Deserialize, Debug, Default, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ComplaintQuery {
    /// Return only this complaint instead of the full list.
    pub id: Option<String>,
}

#[derive(Deserialize, Debug, ToSchema)]
pub struct UpdateStatusRequest {
    /// One of `submitted`, `reviewed`, `resolved`.
    pub status: String,
}

#[derive(Deserialize, Debug, Default, ToSchema)]
pub struct TextToSpeechRequest {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
}

//=========================================================================================
// Payloads Sent FROM the Server TO the Client (Browser)
//=========================================================================================

/// Body of every non-2xx response.
#[derive(Serialize, Debug, ToSchema)]
pub struct ErrorBody {
    pub error: String,
}

#[derive(Serialize, Debug, ToSchema)]
pub struct ComplaintDetailsPayload {
    pub category: String,
    pub description: String,
    pub timestamp: DateTime<Utc>,
    pub language: String,
}

impl From<ComplaintDetails> for ComplaintDetailsPayload {
    fn from(details: ComplaintDetails) -> Self {
        Self {
            category: details.category,
            description: details.description,
            timestamp: details.timestamp,
            language: details.language.as_str().to_string(),
        }
    }
}

#[derive(Serialize, Debug, ToSchema)]
pub struct GenerateComplaintResponse {
    pub success: bool,
    /// The full letter, envelope included.
    pub complaint: String,
    pub category: String,
    pub details: ComplaintDetailsPayload,
}

impl From<GenerationResult> for GenerateComplaintResponse {
    fn from(result: GenerationResult) -> Self {
        Self {
            success: true,
            complaint: result.complaint_text,
            category: result.category,
            details: result.details.into(),
        }
    }
}

#[derive(Serialize, Debug, ToSchema)]
pub struct ComplaintPayload {
    pub id: String,
    pub complaint_text: String,
    pub transcribed_text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio_path: Option<String>,
    pub language: String,
    pub category: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ComplaintRecord> for ComplaintPayload {
    fn from(record: ComplaintRecord) -> Self {
        Self {
            id: record.id,
            complaint_text: record.complaint_text,
            transcribed_text: record.transcribed_text,
            audio_path: record.audio_path,
            language: record.language.as_str().to_string(),
            category: record.category,
            status: record.status.as_str().to_string(),
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}

#[derive(Serialize, Debug, ToSchema)]
pub struct SubmitComplaintResponse {
    pub success: bool,
    pub complaint_id: String,
    pub message: String,
    pub complaint: ComplaintPayload,
}

#[derive(Serialize, Debug, ToSchema)]
pub struct ComplaintResponse {
    pub success: bool,
    pub complaint: ComplaintPayload,
}

#[derive(Serialize, Debug, ToSchema)]
pub struct ComplaintListResponse {
    pub success: bool,
    pub complaints: Vec<ComplaintPayload>,
}

/// `GET /api/complaints` answers with one complaint when `?id=` is given.
#[derive(Serialize, Debug, ToSchema)]
#[serde(untagged)]
pub enum ComplaintLookupResponse {
    One(ComplaintResponse),
    All(ComplaintListResponse),
}

#[derive(Serialize, Debug, ToSchema)]
pub struct SuccessResponse {
    pub success: bool,
}

/// Text and locale for the browser's speech synthesis.
#[derive(Serialize, Debug, ToSchema)]
pub struct TextToSpeechResponse {
    pub success: bool,
    pub text: String,
    /// `en-US` or `ta-IN`.
    pub language: String,
    pub message: String,
}

#[derive(Serialize, Debug, ToSchema)]
pub struct SpeechToTextResponse {
    pub success: bool,
    pub text: String,
    pub language: String,
    pub note: String,
}

#[derive(Serialize, Debug, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
    pub features: Vec<String>,
    pub ai_provider: String,
    pub timestamp: DateTime<Utc>,
    pub message: String,
}
