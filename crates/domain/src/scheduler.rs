//! The pure SM-2 scheduling transition (spec §4.2). This module has no I/O:
//! it is a pure function over `CardState`, testable as algebra. The due-card
//! and new-card selection queries it depends on live in the storage crate
//! since they require the database.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

/// Minimum ease factor a card can ever have (invariant I2).
pub const MIN_EASE: f64 = 1.3;
/// Initial ease factor for a freshly-introduced card.
pub const INITIAL_EASE: f64 = 2.5;
/// Interval cap in days (~100 years), applied when `round(I * E')` overflows.
pub const MAX_INTERVAL_DAYS: i64 = 36_500;

/// Grades exposed by the UI. 1 and 4 are reserved and rejected by handlers.
pub const VALID_GRADES: [i32; 4] = [0, 2, 3, 5];

/// Per-card memory state: ease factor, interval in days, and repetition count.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CardState {
    pub ease: f64,
    pub interval_days: i64,
    pub reps: i32,
}

impl CardState {
    /// The state synthesized for a card that has never been reviewed.
    pub fn new_card() -> Self {
        Self {
            ease: INITIAL_EASE,
            interval_days: 1,
            reps: 0,
        }
    }
}

/// Result of applying one graded review to a `CardState`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransitionOutcome {
    pub state: CardState,
    pub due_date: NaiveDate,
}

/// Returns `Ok(())` if `grade` is one of the grades the UI is allowed to
/// submit (`{0,2,3,5}`); `1` and `4` are valid inputs to the formula but are
/// never exposed, per spec §4.2.
pub fn validate_grade(grade: i32) -> Result<(), DomainError> {
    if VALID_GRADES.contains(&grade) {
        Ok(())
    } else {
        Err(DomainError::Validation(format!(
            "score must be one of {VALID_GRADES:?}, got {grade}"
        )))
    }
}

/// Apply the SM-2 transition function to `state` given a grade and today's
/// local-civil date. `grade` must already be validated by the caller; this
/// function accepts the full `0..=5` domain (spec §4.2, §9) so it stays
/// general even though only `{0,2,3,5}` reach it from the HTTP surface.
pub fn transition(state: CardState, grade: i32, today: NaiveDate) -> TransitionOutcome {
    let q = grade as f64;
    let new_ease = (state.ease + 0.1 - (5.0 - q) * (0.08 + (5.0 - q) * 0.02)).max(MIN_EASE);

    let (new_interval, new_reps) = if grade < 3 {
        (1i64, 0i32)
    } else if state.reps == 0 {
        (1i64, 1i32)
    } else if state.reps == 1 {
        (6i64, 2i32)
    } else {
        let grown = round_half_away_from_zero(state.interval_days as f64 * new_ease);
        (grown.min(MAX_INTERVAL_DAYS), state.reps + 1)
    };

    let due_date = today + chrono::Duration::days(new_interval);

    TransitionOutcome {
        state: CardState {
            ease: new_ease,
            interval_days: new_interval,
            reps: new_reps,
        },
        due_date,
    }
}

/// Half-away-from-zero rounding, as `f64::round` already implements for
/// positive inputs (the only inputs this module ever produces).
fn round_half_away_from_zero(x: f64) -> i64 {
    x.round() as i64
}

/// Effective new-card intake limit for today, given the configured daily
/// cap, how many new cards have already been created today, and the
/// caller's requested limit. Overdue due cards are never subject to this
/// cap (spec §4.2) — this function only governs `select-new-items`.
pub fn effective_new_card_limit(requested_limit: u32, cap: u32, used_today: u32) -> u32 {
    let remaining = cap.saturating_sub(used_today);
    requested_limit.min(remaining)
}

/// `interval_days >= 21` is the learning/mature boundary (spec §4.2, glossary).
pub const MATURE_INTERVAL_DAYS: i64 = 21;

pub fn is_mature(interval_days: i64) -> bool {
    interval_days >= MATURE_INTERVAL_DAYS
}
