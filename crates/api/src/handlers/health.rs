//! `GET /api/health` — probes the Store, the LLM runtime, and the
//! synthesizer binary, and reports the schema version witness (spec §6,
//! SPEC_FULL.md §C).

use std::sync::Arc;

use axum::{Json, extract::State};

use jlpt_tutor_domain::HealthResponse;
use jlpt_tutor_storage::check_connection;

use crate::AppState;

pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let db = match check_connection(&state.pool).await {
        Ok(()) => "ok",
        Err(_) => "down",
    };

    let ollama = match state
        .http_client
        .get(format!("{}/api/tags", state.config.ollama_base_url))
        .send()
        .await
    {
        Ok(resp) if resp.status().is_success() => "ok",
        _ => "down",
    };

    let piper = match tokio::fs::metadata(&state.config.piper_binary_path).await {
        Ok(_) => "ok",
        Err(_) => "missing",
    };

    let schema_version = state
        .meta_repo
        .get("schema_version")
        .await
        .ok()
        .flatten()
        .unwrap_or_else(|| "unknown".to_string());

    Json(HealthResponse {
        db: db.to_string(),
        ollama: ollama.to_string(),
        piper: piper.to_string(),
        schema_version,
    })
}
