//! `POST /api/tutor/chat` — the Tutor Gateway's streaming entry point
//! (spec §4.5).

use std::sync::Arc;

use axum::{
    Json,
    extract::State,
    http::header,
    response::{IntoResponse, Response, sse::KeepAlive},
};
use tokio_stream::StreamExt as _;

use jlpt_tutor_domain::{ChatRequest, DomainError, JlptLevel};

use crate::AppState;
use crate::services::tutor_gateway;

pub async fn chat(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ChatRequest>,
) -> Result<Response, DomainError> {
    let mode = req.validate()?;

    // Three independent reads merged concurrently (spec §4.5): the focus
    // level, recently reviewed surface forms, and weakest cards never
    // depend on each other, so they run as one join rather than three
    // sequential round-trips.
    let (jlpt_focus_raw, recent, weakest) = tokio::try_join!(
        state.meta_repo.get("jlpt_focus"),
        state.tutor_context_repo.recent_reviewed_surface_forms(10),
        state.tutor_context_repo.weakest_surface_forms(5),
    )
    .map_err(|e| DomainError::Database(e.to_string()))?;

    let jlpt_focus: JlptLevel = jlpt_focus_raw
        .and_then(|v| v.parse().ok())
        .unwrap_or(JlptLevel::N5);

    let system = tutor_gateway::assemble_system_prompt(jlpt_focus, &recent, &weakest, mode, &req.message);

    let stream = tutor_gateway::stream_chat(
        state.http_client.clone(),
        state.config.ollama_base_url.clone(),
        state.config.ollama_model.clone(),
        system,
        req.message.clone(),
    );

    let sse = axum::response::sse::Sse::new(stream.map(Ok::<_, std::convert::Infallible>))
        .keep_alive(KeepAlive::default());

    Ok(([(header::CACHE_CONTROL, "no-cache")], sse).into_response())
}
