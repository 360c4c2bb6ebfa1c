//! Content entities: vocabulary and kanji (spec §3). Inserted once by the
//! out-of-scope ingestion pipeline; read-only from the core's perspective.

use serde::{Deserialize, Serialize};

use crate::JlptLevel;

/// A worked example pairing Japanese text with its English gloss.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Example {
    pub jp: String,
    pub en: String,
}

/// A learnable word.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VocabItem {
    pub id: i64,
    pub surface: String,
    pub reading: String,
    pub gloss: String,
    pub part_of_speech: String,
    pub jlpt_level: JlptLevel,
    pub example: Option<Example>,
}

/// A learnable character.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KanjiItem {
    pub id: i64,
    pub character: String,
    pub on_readings: Vec<String>,
    pub kun_readings: Vec<String>,
    pub meanings: Vec<String>,
    pub stroke_count: i32,
    pub jlpt_level: Option<JlptLevel>,
    pub frequency_rank: Option<i32>,
    pub example: Option<Example>,
}

/// A page of items plus the total matching count, for list endpoints.
#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: i64,
}

/// Query parameters shared by `GET /api/vocab` and `GET /api/kanji`.
#[derive(Debug, Clone, Deserialize)]
pub struct ListQuery {
    pub level: Option<String>,
    pub search: Option<String>,
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default = "default_limit")]
    pub limit: u32,
}

fn default_page() -> u32 {
    1
}

fn default_limit() -> u32 {
    50
}

impl ListQuery {
    /// Validates `page >= 1` and `1 <= limit <= 200` (spec §6).
    pub fn validate(&self) -> Result<(), crate::DomainError> {
        if self.page < 1 {
            return Err(crate::DomainError::Validation(
                "page must be >= 1".to_string(),
            ));
        }
        if !(1..=200).contains(&self.limit) {
            return Err(crate::DomainError::Validation(
                "limit must be between 1 and 200".to_string(),
            ));
        }
        if let Some(level) = &self.level {
            level
                .parse::<JlptLevel>()
                .map_err(crate::DomainError::Validation)?;
        }
        Ok(())
    }

    pub fn offset(&self) -> i64 {
        ((self.page - 1) * self.limit) as i64
    }
}
