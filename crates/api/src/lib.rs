//! JLPT Tutor backend server library.

pub mod handlers;
pub mod services;

use std::sync::Arc;
use std::time::Instant;

use axum::{
    Router,
    routing::{get, patch, post},
};
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

use jlpt_tutor_config::AppConfig;
use jlpt_tutor_storage::{
    CardRepository, KanjiRepository, MetaRepository, ProgressRepository, ReviewRepository,
    SessionRepository, TutorContextRepository, VocabRepository,
};
use sqlx::PgPool;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub vocab_repo: VocabRepository,
    pub kanji_repo: KanjiRepository,
    pub card_repo: CardRepository,
    pub review_repo: ReviewRepository,
    pub session_repo: SessionRepository,
    pub meta_repo: MetaRepository,
    pub progress_repo: ProgressRepository,
    pub tutor_context_repo: TutorContextRepository,
    pub http_client: reqwest::Client,
    pub config: AppConfig,
    pub start_time: Instant,
}

impl AppState {
    pub fn new(pool: PgPool, config: AppConfig) -> Self {
        // No total-request timeout: the tutor gateway streams a live SSE
        // response that can legitimately run well past any fixed deadline.
        // The per-read no-token timeout lives in `services::tutor_gateway`.
        let http_client = reqwest::Client::builder()
            .build()
            .expect("reqwest client should build with static config");

        Self {
            vocab_repo: VocabRepository::new(pool.clone()),
            kanji_repo: KanjiRepository::new(pool.clone()),
            card_repo: CardRepository::new(pool.clone()),
            review_repo: ReviewRepository::new(pool.clone()),
            session_repo: SessionRepository::new(pool.clone()),
            meta_repo: MetaRepository::new(pool.clone()),
            progress_repo: ProgressRepository::new(pool.clone()),
            tutor_context_repo: TutorContextRepository::new(pool.clone()),
            pool,
            http_client,
            config,
            start_time: Instant::now(),
        }
    }
}

pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/health", get(handlers::health::health))
        .route("/api/cards/due", get(handlers::cards::due_cards))
        .route("/api/cards/new", get(handlers::cards::new_cards))
        .route("/api/cards/review", post(handlers::cards::submit_review))
        .route("/api/cards/sessions", post(handlers::cards::open_session))
        .route(
            "/api/cards/sessions/{id}",
            patch(handlers::cards::close_session),
        )
        .route("/api/vocab", get(handlers::vocab::list_vocab))
        .route("/api/vocab/{id}", get(handlers::vocab::get_vocab))
        .route("/api/kanji", get(handlers::kanji::list_kanji))
        .route("/api/kanji/{character}", get(handlers::kanji::get_kanji))
        .route("/api/tutor/chat", post(handlers::tutor::chat))
        .route("/api/tts", post(handlers::tts::synthesize))
        .route("/api/progress", get(handlers::progress::progress))
        .route(
            "/api/settings",
            get(handlers::settings::get_settings).post(handlers::settings::update_settings),
        )
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
