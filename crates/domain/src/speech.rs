//! Speech Gateway request types (spec §4.6).

use serde::Deserialize;

use crate::DomainError;

const MAX_TEXT_CODEPOINTS: usize = 500;

/// `POST /api/tts` request body.
#[derive(Debug, Clone, Deserialize)]
pub struct TtsRequest {
    pub text: String,
}

impl TtsRequest {
    /// Non-empty after trim, at most 500 Unicode codepoints.
    pub fn validate(&self) -> Result<&str, DomainError> {
        let trimmed = self.text.trim();
        if trimmed.is_empty() {
            return Err(DomainError::Validation("text must not be empty".to_string()));
        }
        if trimmed.chars().count() > MAX_TEXT_CODEPOINTS {
            return Err(DomainError::Validation(format!(
                "text must be at most {MAX_TEXT_CODEPOINTS} characters"
            )));
        }
        Ok(trimmed)
    }
}
