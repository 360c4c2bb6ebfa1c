//! `GET /api/kanji` and `GET /api/kanji/{character}` (spec §6).

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, Query, State},
};

use jlpt_tutor_domain::{DomainError, KanjiItem, ListQuery, Page};

use crate::AppState;

pub async fn list_kanji(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Page<KanjiItem>>, DomainError> {
    query.validate()?;

    let page = state
        .kanji_repo
        .list(
            query.level.as_deref(),
            query.search.as_deref(),
            query.limit as i64,
            query.offset(),
        )
        .await
        .map_err(|e| DomainError::Database(e.to_string()))?;

    Ok(Json(page))
}

pub async fn get_kanji(
    State(state): State<Arc<AppState>>,
    Path(character): Path<String>,
) -> Result<Json<KanjiItem>, DomainError> {
    let item = state
        .kanji_repo
        .get_by_character(&character)
        .await
        .map_err(|e| DomainError::Database(e.to_string()))?
        .ok_or_else(|| DomainError::NotFound(format!("kanji '{character}' not found")))?;

    Ok(Json(item))
}
