//! Due/new card listing, review submission, and session lifecycle (spec §6).

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use chrono::Utc;
use uuid::Uuid;

use jlpt_tutor_domain::{
    CardQuery, CardWithItem, DomainError, ItemSummary, ReviewRequest, ReviewResponse,
    SessionOpenResponse, effective_new_card_limit,
};

use crate::AppState;

/// `GET /api/cards/due?level=&type=&limit=`
pub async fn due_cards(
    State(state): State<Arc<AppState>>,
    Query(query): Query<CardQuery>,
) -> Result<Json<Vec<CardWithItem>>, DomainError> {
    query.validate()?;
    let today = Utc::now().date_naive();

    let cards = state
        .card_repo
        .select_due(
            query.level.as_deref(),
            query.item_type.as_deref(),
            query.limit_or_default() as i64,
            today,
        )
        .await
        .map_err(|e| {
            tracing::error!("Failed to select due cards: {}", e);
            DomainError::Database(e.to_string())
        })?;

    Ok(Json(cards))
}

/// `GET /api/cards/new?level=&type=&limit=` — bounded by the daily intake
/// cap (spec §4.2).
pub async fn new_cards(
    State(state): State<Arc<AppState>>,
    Query(query): Query<CardQuery>,
) -> Result<Json<Vec<ItemSummary>>, DomainError> {
    query.validate()?;
    let today = Utc::now().date_naive();

    let cap: u32 = state
        .meta_repo
        .get("new_cards_per_day")
        .await
        .map_err(|e| DomainError::Database(e.to_string()))?
        .and_then(|v| v.parse().ok())
        .unwrap_or(state.config.new_cards_per_day);

    let used_today = state
        .card_repo
        .count_created_today(today)
        .await
        .map_err(|e| DomainError::Database(e.to_string()))?;

    let effective_limit = effective_new_card_limit(query.limit_or_default(), cap, used_today);

    let items = state
        .card_repo
        .select_new(
            query.level.as_deref(),
            query.item_type.as_deref(),
            effective_limit as i64,
        )
        .await
        .map_err(|e| {
            tracing::error!("Failed to select new items: {}", e);
            DomainError::Database(e.to_string())
        })?;

    Ok(Json(items))
}

/// `POST /api/cards/review` — applies the SM-2 transition transactionally
/// (spec §4.1, §4.2).
pub async fn submit_review(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ReviewRequest>,
) -> Result<Json<ReviewResponse>, DomainError> {
    let item_type = req.validate()?;
    let today = Utc::now().date_naive();
    let now = Utc::now();

    let (card, session_correct, session_incorrect) = state
        .review_repo
        .record_review(item_type, req.item_id, req.score, req.session_id, today, now)
        .await
        .map_err(|e| {
            tracing::error!("Failed to record review: {}", e);
            match e {
                jlpt_tutor_storage::StorageError::NotFound(msg) => DomainError::NotFound(msg),
                jlpt_tutor_storage::StorageError::Integrity(msg) => DomainError::Integrity(msg),
                jlpt_tutor_storage::StorageError::Validation(msg) => DomainError::Validation(msg),
                other => DomainError::Database(other.to_string()),
            }
        })?;

    let next_due = card.due_date;
    Ok(Json(ReviewResponse {
        card,
        next_due,
        session_correct,
        session_incorrect,
    }))
}

/// `POST /api/cards/sessions` — opens a new session (spec §4.3).
pub async fn open_session(
    State(state): State<Arc<AppState>>,
) -> Result<Json<SessionOpenResponse>, DomainError> {
    let id = state
        .session_repo
        .open(Utc::now())
        .await
        .map_err(|e| DomainError::Database(e.to_string()))?;

    Ok(Json(SessionOpenResponse { id }))
}

/// `PATCH /api/cards/sessions/{id}` — closes a session (spec §4.3).
pub async fn close_session(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, DomainError> {
    state
        .session_repo
        .close(id, Utc::now())
        .await
        .map_err(|e| match e {
            jlpt_tutor_storage::StorageError::NotFound(msg) => DomainError::NotFound(msg),
            other => DomainError::Database(other.to_string()),
        })?;

    Ok(StatusCode::NO_CONTENT)
}
