//! `POST /api/tts` — the Speech Gateway's entry point (spec §4.6).

use std::sync::Arc;

use axum::{
    Json,
    extract::State,
    http::header,
    response::{IntoResponse, Response},
};

use jlpt_tutor_domain::{DomainError, TtsRequest};

use crate::AppState;
use crate::services::speech_gateway::{self, SpeechGatewayError};

pub async fn synthesize(
    State(state): State<Arc<AppState>>,
    Json(req): Json<TtsRequest>,
) -> Result<Response, DomainError> {
    let text = req.validate()?;

    let wav = speech_gateway::synthesize(
        &state.config.piper_binary_path,
        &state.config.piper_model_path,
        &state.config.piper_model_config_path,
        text,
    )
    .await
    .map_err(|e| {
        tracing::error!("speech gateway failure: {}", e);
        match e {
            SpeechGatewayError::Timeout(_) => {
                DomainError::Unavailable("synthesizer timed out".to_string())
            }
            other => DomainError::Unavailable(format!("synthesizer: {other}")),
        }
    })?;

    Ok(([(header::CONTENT_TYPE, "audio/wav")], wav).into_response())
}
