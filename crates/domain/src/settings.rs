//! User-tunable study settings, persisted as key-value rows (spec §3, §4.3).

use serde::{Deserialize, Serialize};

use crate::JlptLevel;

/// A single row in the key-value settings table.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct MetaEntry {
    pub key: String,
    pub value: String,
}

/// `GET /api/settings` response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SettingsResponse {
    pub jlpt_focus: JlptLevel,
    pub new_cards_per_day: u32,
}

/// `POST /api/settings` request body. Both fields optional: omitted fields
/// leave the corresponding stored value untouched (spec §4.3, invariant I7).
#[derive(Debug, Clone, Deserialize)]
pub struct SettingsUpdateRequest {
    pub jlpt_focus: Option<String>,
    pub new_cards_per_day: Option<u32>,
}

impl SettingsUpdateRequest {
    /// Parses `jlpt_focus` if present. `new_cards_per_day` is a `u32` at the
    /// wire layer already, so non-negativity is enforced by the type itself.
    pub fn validate(&self) -> Result<Option<JlptLevel>, crate::DomainError> {
        self.jlpt_focus
            .as_deref()
            .map(|s| s.parse::<JlptLevel>().map_err(crate::DomainError::Validation))
            .transpose()
    }
}
