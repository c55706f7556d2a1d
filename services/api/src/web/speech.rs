//! services/api/src/web/speech.rs
//!
//! Speech endpoints. Recognition and synthesis both run in the browser; the
//! server only stages uploads and hands back locale information.

use crate::web::{
    protocol::{SpeechToTextResponse, TextToSpeechRequest, TextToSpeechResponse},
    rest::{non_blank, parse_language, reject, HandlerError},
    state::AppState,
};
use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    response::Json,
};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info, warn};
use uuid::Uuid;

/// How long an uploaded recording is kept before it is deleted.
pub const UPLOAD_RETENTION: Duration = Duration::from_secs(60);

/// Prepare text for the browser's speech synthesis.
#[utoipa::path(
    post,
    path = "/api/text-to-speech",
    request_body = TextToSpeechRequest,
    responses(
        (status = 200, description = "Text and locale to speak", body = TextToSpeechResponse),
        (status = 400, description = "No text provided or unknown language", body = crate::web::protocol::ErrorBody)
    )
)]
pub async fn text_to_speech_handler(
    Json(payload): Json<TextToSpeechRequest>,
) -> Result<Json<TextToSpeechResponse>, HandlerError> {
    let text = non_blank(payload.text)
        .ok_or_else(|| reject(StatusCode::BAD_REQUEST, "No text provided"))?;
    let language = parse_language(payload.language.as_deref())?;

    Ok(Json(TextToSpeechResponse {
        success: true,
        text,
        language: language.speech_locale().to_string(),
        message: "Text ready for speech synthesis".to_string(),
    }))
}

/// Accept a recorded complaint.
///
/// Accepts a multipart/form-data request with an `audio` part. The recording
/// is staged briefly and then deleted; transcription happens in the browser.
#[utoipa::path(
    post,
    path = "/api/speech-to-text",
    request_body(content_type = "multipart/form-data", description = "The recorded audio in an `audio` part."),
    responses(
        (status = 200, description = "Upload accepted", body = SpeechToTextResponse),
        (status = 400, description = "No audio file provided", body = crate::web::protocol::ErrorBody),
        (status = 500, description = "Internal server error", body = crate::web::protocol::ErrorBody)
    )
)]
pub async fn speech_to_text_handler(
    State(app_state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<Json<SpeechToTextResponse>, HandlerError> {
    let mut audio = None;
    while let Some(field) = multipart.next_field().await.map_err(|e| {
        reject(
            StatusCode::BAD_REQUEST,
            format!("Failed to read multipart data: {}", e),
        )
    })? {
        if field.name() == Some("audio") {
            let data = field.bytes().await.map_err(|e| {
                reject(
                    StatusCode::BAD_REQUEST,
                    format!("Failed to read audio bytes: {}", e),
                )
            })?;
            audio = Some(data);
            break;
        }
    }
    let audio = audio
        .filter(|data| !data.is_empty())
        .ok_or_else(|| reject(StatusCode::BAD_REQUEST, "No audio file provided"))?;

    let path = save_temporary_audio(&app_state.config.uploads_dir, &audio)
        .await
        .map_err(|e| {
            error!("Failed to stage audio upload: {:?}", e);
            reject(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
        })?;
    info!(path = %path.display(), bytes = audio.len(), "Audio file saved");
    schedule_removal(path, UPLOAD_RETENTION);

    Ok(Json(SpeechToTextResponse {
        success: true,
        text: "Please use the browser's built-in speech recognition for better accuracy. \
               Click the microphone button and speak your complaint."
            .to_string(),
        language: "en".to_string(),
        note: "Speech recognition runs in the browser; the server does not transcribe audio."
            .to_string(),
    }))
}

/// Writes `data` to a fresh `<uuid>.webm` file under `dir`, creating `dir` if needed.
pub async fn save_temporary_audio(dir: &Path, data: &[u8]) -> std::io::Result<PathBuf> {
    tokio::fs::create_dir_all(dir).await?;
    let path = dir.join(format!("{}.webm", Uuid::new_v4()));
    tokio::fs::write(&path, data).await?;
    Ok(path)
}

/// Deletes `path` after `delay` on a background task.
pub fn schedule_removal(path: PathBuf, delay: Duration) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        tokio::time::sleep(delay).await;
        if let Err(e) = tokio::fs::remove_file(&path).await {
            warn!(path = %path.display(), "Error cleaning up audio file: {}", e);
        }
    })
}
