//! Memory cards, review events and study sessions (spec §3, §4.3).

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{ItemKind, KanjiItem, VocabItem, scheduler::validate_grade};

/// Per-item memory state (invariant I1: unique per (item_type, item_id)).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemoryCard {
    pub id: i64,
    pub item_type: ItemKind,
    pub item_id: i64,
    pub ease_factor: f64,
    pub interval_days: i64,
    pub reps: i32,
    pub due_date: NaiveDate,
    pub last_reviewed: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// Append-only log of one graded review (invariant I3).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewEvent {
    pub id: i64,
    pub session_id: Uuid,
    pub card_id: i64,
    pub grade: i32,
    pub timestamp: DateTime<Utc>,
}

/// A contiguous review sitting, delimited by explicit open/close.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub id: Uuid,
    pub started_at: DateTime<Utc>,
    pub ended_at: Option<DateTime<Utc>>,
    pub cards_reviewed: i32,
    pub correct_count: i32,
    pub incorrect_count: i32,
}

/// `POST /api/cards/review` request body.
#[derive(Debug, Clone, Deserialize)]
pub struct ReviewRequest {
    pub item_type: String,
    pub item_id: i64,
    pub score: i32,
    pub session_id: Uuid,
}

impl ReviewRequest {
    pub fn validate(&self) -> Result<ItemKind, crate::DomainError> {
        validate_grade(self.score)?;
        self.item_type
            .parse::<ItemKind>()
            .map_err(crate::DomainError::Validation)
    }
}

/// `POST /api/cards/review` response body.
#[derive(Debug, Clone, Serialize)]
pub struct ReviewResponse {
    pub card: MemoryCard,
    pub next_due: NaiveDate,
    pub session_correct: i32,
    pub session_incorrect: i32,
}

/// `POST /api/cards/sessions` response body.
#[derive(Debug, Clone, Serialize)]
pub struct SessionOpenResponse {
    pub id: Uuid,
}

/// Either kind of learnable item, embedded in list responses.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum ItemSummary {
    Vocab(VocabItem),
    Kanji(KanjiItem),
}

/// One row of `GET /api/cards/due`: the card joined with its item (spec §4.1:
/// "Joins the item so the caller has full fields for the UI").
#[derive(Debug, Clone, Serialize)]
pub struct CardWithItem {
    pub card: MemoryCard,
    pub item: ItemSummary,
}

/// Query parameters for `GET /api/cards/due` and `GET /api/cards/new`.
#[derive(Debug, Clone, Deserialize)]
pub struct CardQuery {
    pub level: Option<String>,
    #[serde(rename = "type")]
    pub item_type: Option<String>,
    pub limit: Option<u32>,
}

impl CardQuery {
    pub fn validate(&self) -> Result<(), crate::DomainError> {
        if let Some(level) = &self.level {
            level
                .parse::<crate::JlptLevel>()
                .map_err(crate::DomainError::Validation)?;
        }
        if let Some(item_type) = &self.item_type {
            item_type
                .parse::<ItemKind>()
                .map_err(crate::DomainError::Validation)?;
        }
        if let Some(limit) = self.limit {
            if !(1..=200).contains(&limit) {
                return Err(crate::DomainError::Validation(
                    "limit must be between 1 and 200".to_string(),
                ));
            }
        }
        Ok(())
    }

    pub fn limit_or_default(&self) -> u32 {
        self.limit.unwrap_or(20)
    }
}
