use chrono::NaiveDate;
use serde::Serialize;

/// Per-day aggregate over entries grouped by their `day` field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DaySummary {
    pub day: NaiveDate,
    pub entries: usize,
    /// Raw sum of `duration_ms`.
    pub raw_ms: i64,
    /// Sum of every entry's rounded duration.
    pub rounded_sum_ms: i64,
    /// Raw sum, rounded once.
    pub rounded_total_ms: i64,
}
