//! Domain types for the JLPT tutor backend.

pub mod cards;
pub mod errors;
pub mod progress;
pub mod scheduler;
pub mod settings;
pub mod speech;
pub mod tutor;
pub mod vocab;

pub use cards::*;
pub use errors::*;
pub use progress::*;
pub use scheduler::*;
pub use settings::*;
pub use speech::*;
pub use tutor::*;
pub use vocab::*;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which kind of learnable item a `MemoryCard` points at. A sum type in the
/// API/domain layer; persisted as plain TEXT in storage rows, the same way
/// the teacher's `PackType` is serialized to a string column and parsed back
/// at the boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
    Vocab,
    Kanji,
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ItemKind::Vocab => write!(f, "vocab"),
            ItemKind::Kanji => write!(f, "kanji"),
        }
    }
}

impl FromStr for ItemKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "vocab" => Ok(ItemKind::Vocab),
            "kanji" => Ok(ItemKind::Kanji),
            other => Err(format!("unknown item_type '{other}'")),
        }
    }
}

/// JLPT proficiency level, N5 (elementary) through N1 (advanced).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum JlptLevel {
    N5,
    N4,
    N3,
    N2,
    N1,
}

impl JlptLevel {
    /// All levels ordered N5 → N1, the order `select-new-items` prefers.
    pub const ALL: [JlptLevel; 5] = [
        JlptLevel::N5,
        JlptLevel::N4,
        JlptLevel::N3,
        JlptLevel::N2,
        JlptLevel::N1,
    ];
}

impl fmt::Display for JlptLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            JlptLevel::N5 => "N5",
            JlptLevel::N4 => "N4",
            JlptLevel::N3 => "N3",
            JlptLevel::N2 => "N2",
            JlptLevel::N1 => "N1",
        };
        write!(f, "{s}")
    }
}

impl FromStr for JlptLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "N5" => Ok(JlptLevel::N5),
            "N4" => Ok(JlptLevel::N4),
            "N3" => Ok(JlptLevel::N3),
            "N2" => Ok(JlptLevel::N2),
            "N1" => Ok(JlptLevel::N1),
            other => Err(format!("unknown jlpt level '{other}'")),
        }
    }
}

/// Health check response — `GET /api/health`.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub db: String,
    pub ollama: String,
    pub piper: String,
    pub schema_version: String,
}
