//! `GET /api/vocab` and `GET /api/vocab/{id}` (spec §6).

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, Query, State},
};

use jlpt_tutor_domain::{DomainError, ListQuery, Page, VocabItem};

use crate::AppState;

pub async fn list_vocab(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Page<VocabItem>>, DomainError> {
    query.validate()?;

    let page = state
        .vocab_repo
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

pub async fn get_vocab(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<VocabItem>, DomainError> {
    let item = state
        .vocab_repo
        .get_by_id(id)
        .await
        .map_err(|e| DomainError::Database(e.to_string()))?
        .ok_or_else(|| DomainError::NotFound(format!("vocab item {id} not found")))?;

    Ok(Json(item))
}
