//! `GET`/`POST /api/settings` — study preferences backed by the `meta`
//! key-value table (spec §4.3, §6).

use std::sync::Arc;

use axum::{Json, extract::State};

use jlpt_tutor_domain::{DomainError, JlptLevel, SettingsResponse, SettingsUpdateRequest};

use crate::AppState;

pub async fn get_settings(
    State(state): State<Arc<AppState>>,
) -> Result<Json<SettingsResponse>, DomainError> {
    let entries = state
        .meta_repo
        .get_all()
        .await
        .map_err(|e| DomainError::Database(e.to_string()))?;

    let mut jlpt_focus = JlptLevel::N5;
    let mut new_cards_per_day = state.config.new_cards_per_day;

    for entry in entries {
        match entry.key.as_str() {
            "jlpt_focus" => {
                if let Ok(level) = entry.value.parse() {
                    jlpt_focus = level;
                }
            }
            "new_cards_per_day" => {
                if let Ok(n) = entry.value.parse() {
                    new_cards_per_day = n;
                }
            }
            _ => {}
        }
    }

    Ok(Json(SettingsResponse {
        jlpt_focus,
        new_cards_per_day,
    }))
}

pub async fn update_settings(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SettingsUpdateRequest>,
) -> Result<Json<SettingsResponse>, DomainError> {
    let jlpt_focus = req.validate()?;

    if let Some(level) = jlpt_focus {
        state
            .meta_repo
            .set("jlpt_focus", &level.to_string())
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;
    }

    if let Some(n) = req.new_cards_per_day {
        state
            .meta_repo
            .set("new_cards_per_day", &n.to_string())
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;
    }

    get_settings(State(state)).await
}
