//! Read-time duration rounding and per-day aggregation.
//!
//! Rounding is a projection: stored `duration_ms` values are never touched.

use crate::core::services::Services;
use crate::core::settings::SettingsLogic;
use crate::core::timer::{TimerLogic, TimerStatus};
use crate::errors::AppResult;
use crate::models::actor::Actor;
use crate::models::day_summary::DaySummary;
use crate::models::entry::{Entry, local_day};
use chrono::NaiveDate;
use std::collections::BTreeMap;

const MS_PER_MINUTE: i64 = 60_000;

/// Round `ms` to the nearest multiple of `step_minutes` minutes, halves up.
/// A step of 0 returns `ms` unchanged.
pub fn round_duration(ms: i64, step_minutes: u32) -> i64 {
    if step_minutes == 0 {
        return ms;
    }
    let step = i64::from(step_minutes) * MS_PER_MINUTE;
    (ms + step / 2).div_euclid(step) * step
}

/// Whole minutes of the rounded duration, as exported.
pub fn duration_minutes(ms: i64, step_minutes: u32) -> i64 {
    let rounded = round_duration(ms, step_minutes);
    (rounded + MS_PER_MINUTE / 2).div_euclid(MS_PER_MINUTE)
}

/// Group by the stored `day` field, newest day first.
pub fn daily_summaries(entries: &[Entry], step_minutes: u32) -> Vec<DaySummary> {
    let mut by_day: BTreeMap<NaiveDate, DaySummary> = BTreeMap::new();

    for e in entries {
        let s = by_day.entry(e.day).or_insert_with(|| DaySummary {
            day: e.day,
            entries: 0,
            raw_ms: 0,
            rounded_sum_ms: 0,
            rounded_total_ms: 0,
        });
        s.entries += 1;
        s.raw_ms += e.duration_ms;
        s.rounded_sum_ms += round_duration(e.duration_ms, step_minutes);
    }

    by_day
        .into_values()
        .rev()
        .map(|mut s| {
            s.rounded_total_ms = round_duration(s.raw_ms, step_minutes);
            s
        })
        .collect()
}

/// The actor's day at a glance.
#[derive(Debug, Clone)]
pub struct TodaySummary {
    pub day: NaiveDate,
    pub entries: usize,
    pub raw_ms: i64,
    pub rounded_ms: i64,
    pub running: Option<TimerStatus>,
}

pub struct SummaryLogic;

impl SummaryLogic {
    pub fn today(svc: &Services, actor: &Actor) -> AppResult<TodaySummary> {
        let day = local_day(svc.now());
        let step = SettingsLogic::load(svc)?.rounding;

        let todays: Vec<Entry> = svc
            .store
            .list::<Entry>()?
            .into_iter()
            .filter(|e| e.user_id == actor.id && e.day == day)
            .collect();

        let raw_ms: i64 = todays.iter().map(|e| e.duration_ms).sum();

        Ok(TodaySummary {
            day,
            entries: todays.len(),
            raw_ms,
            rounded_ms: round_duration(raw_ms, step),
            running: TimerLogic::status(svc, actor)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const H: i64 = 3_600_000;
    const M: i64 = 60_000;

    #[test]
    fn zero_step_is_identity() {
        for ms in [0, 1, 59_999, 2 * H + 15 * M + 7] {
            assert_eq!(round_duration(ms, 0), ms);
        }
    }

    #[test]
    fn rounds_half_up() {
        assert_eq!(round_duration(2 * H + 15 * M, 15), 2 * H + 15 * M);
        assert_eq!(round_duration(2 * H + 15 * M, 10), 2 * H + 20 * M);
        assert_eq!(round_duration(7 * M + 29_999, 15), 0);
        assert_eq!(round_duration(7 * M + 30_000, 15), 15 * M);
    }

    #[test]
    fn result_is_multiple_of_step() {
        for ms in [1, 123_456, 9 * H + 1, 17 * M] {
            for step in [1u32, 5, 7, 15, 60] {
                assert_eq!(round_duration(ms, step) % (i64::from(step) * M), 0);
            }
        }
    }

    #[test]
    fn minutes_of_rounded_duration() {
        assert_eq!(duration_minutes(2 * H + 15 * M, 10), 140);
        assert_eq!(duration_minutes(90_000, 0), 2);
        assert_eq!(duration_minutes(89_999, 0), 1);
    }
}
