//! Formatting helpers for CLI output.

use chrono::{DateTime, Duration, Local, Utc};

/// `HH:MM:SS`; hours are not wrapped at 24.
pub fn fmt_duration(ms: i64) -> String {
    let secs = ms.max(0) / 1000;
    format!("{:02}:{:02}:{:02}", secs / 3600, (secs % 3600) / 60, secs % 60)
}

pub fn fmt_elapsed(d: Duration) -> String {
    fmt_duration(d.num_milliseconds())
}

/// `02h 15m`
pub fn mins2readable(mins: i64) -> String {
    let sign = if mins < 0 { "-" } else { "" };
    let m = mins.abs();
    format!("{sign}{:02}h {:02}m", m / 60, m % 60)
}

/// Local `dd.mm.yyyy HH:MM`.
pub fn fmt_ts(ts: DateTime<Utc>) -> String {
    ts.with_timezone(&Local).format("%d.%m.%Y %H:%M").to_string()
}

pub fn fmt_opt_ts(ts: Option<DateTime<Utc>>) -> String {
    ts.map(fmt_ts).unwrap_or_else(|| "—".to_string())
}

pub fn check_mark(b: bool) -> &'static str {
    if b { "✔" } else { "·" }
}
