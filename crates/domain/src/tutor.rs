//! Tutor Gateway request types (spec §4.5). The gateway itself — prompt
//! assembly, the Ollama streaming client, and the SSE relay — has no
//! persistent state and lives in the API crate's services module; this
//! module holds only the wire-facing vocabulary it shares with handlers.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which posture the tutor should take for a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    Teach,
    Quiz,
    Explain,
    Correct,
    Chat,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Mode::Teach => "teach",
            Mode::Quiz => "quiz",
            Mode::Explain => "explain",
            Mode::Correct => "correct",
            Mode::Chat => "chat",
        };
        write!(f, "{s}")
    }
}

impl FromStr for Mode {
    type Err = String;

    /// Accepts the spec's uppercase wire form (`TEACH`, `QUIZ`, ...) as well
    /// as lowercase, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "teach" => Ok(Mode::Teach),
            "quiz" => Ok(Mode::Quiz),
            "explain" => Ok(Mode::Explain),
            "correct" => Ok(Mode::Correct),
            "chat" => Ok(Mode::Chat),
            other => Err(format!("unknown tutor mode '{other}'")),
        }
    }
}

/// `POST /api/tutor/chat` request body (spec §4.5: `{message, mode}`).
#[derive(Debug, Clone, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    pub mode: String,
}

impl ChatRequest {
    pub fn validate(&self) -> Result<Mode, crate::DomainError> {
        if self.message.trim().is_empty() {
            return Err(crate::DomainError::Validation(
                "message must not be empty".to_string(),
            ));
        }
        self.mode.parse::<Mode>().map_err(crate::DomainError::Validation)
    }
}
