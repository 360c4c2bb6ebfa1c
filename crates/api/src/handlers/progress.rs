//! `GET /api/progress` (spec §4.4, §6).

use std::sync::Arc;

use axum::{Json, extract::State};
use chrono::Utc;

use jlpt_tutor_domain::{DomainError, ProgressResponse, accuracy_percent, build_forecast, streak_days};

use crate::AppState;

pub async fn progress(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ProgressResponse>, DomainError> {
    let today = Utc::now().date_naive();

    let (review_dates, accuracy_counts, levels, counts_by_date) = tokio::try_join!(
        state.progress_repo.review_dates(),
        state.progress_repo.accuracy_counts(),
        state.progress_repo.level_stats(today),
        state.progress_repo.due_counts_by_date(today),
    )
    .map_err(|e| {
        tracing::error!("Failed to compute progress: {}", e);
        DomainError::Database(e.to_string())
    })?;

    let (correct, total) = accuracy_counts;

    Ok(Json(ProgressResponse {
        streak_days: streak_days(&review_dates, today),
        accuracy_percent: accuracy_percent(correct, total),
        levels,
        forecast: build_forecast(&counts_by_date, today),
    }))
}
