//! Pure helpers backing the Progress Aggregator (spec §4.4). The actual
//! aggregate queries (GROUP BY counts per level, distinct review dates) live
//! in the storage crate; these functions turn their raw results into the
//! response shape without touching the database.

use chrono::NaiveDate;
use serde::Serialize;
use std::collections::HashSet;

use crate::JlptLevel;

/// Longest unbroken chain of consecutive local dates, counting back from
/// `today`, on each of which a review happened. `today` itself having zero
/// reviews so far does not break the streak (spec §4.4).
pub fn streak_days(review_dates: &HashSet<NaiveDate>, today: NaiveDate) -> u32 {
    let mut cursor = today;
    if !review_dates.contains(&cursor) {
        cursor -= chrono::Duration::days(1);
    }

    let mut streak = 0u32;
    while review_dates.contains(&cursor) {
        streak += 1;
        cursor -= chrono::Duration::days(1);
    }
    streak
}

/// All-time accuracy percentage, 0-100. `grade >= 3` counts as correct.
pub fn accuracy_percent(correct: i64, total: i64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    100.0 * correct as f64 / total as f64
}

#[derive(Debug, Clone, Serialize)]
pub struct LevelStats {
    pub level: JlptLevel,
    pub total: i64,
    pub seen: i64,
    pub mastered: i64,
    pub due_today: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ForecastEntry {
    pub date: NaiveDate,
    pub count: i64,
}

/// Builds the 7-day forecast (today..today+6), filling in zero counts for
/// dates absent from `counts_by_date` (spec §4.4: "entries with count 0 are
/// still returned").
pub fn build_forecast(
    counts_by_date: &std::collections::HashMap<NaiveDate, i64>,
    today: NaiveDate,
) -> Vec<ForecastEntry> {
    (0..7)
        .map(|offset| {
            let date = today + chrono::Duration::days(offset);
            ForecastEntry {
                date,
                count: counts_by_date.get(&date).copied().unwrap_or(0),
            }
        })
        .collect()
}

#[derive(Debug, Clone, Serialize)]
pub struct ProgressResponse {
    pub streak_days: u32,
    pub accuracy_percent: f64,
    pub levels: Vec<LevelStats>,
    pub forecast: Vec<ForecastEntry>,
}
