use crate::errors::{AppError, AppResult};
use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

pub fn parse_date(s: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|_| AppError::InvalidDate(format!("'{s}' (expected YYYY-MM-DD)")))
}

pub fn parse_opt_date(s: Option<&str>) -> AppResult<Option<NaiveDate>> {
    s.map(parse_date).transpose()
}

const LOCAL_FORMATS: [&str; 3] = ["%Y-%m-%d %H:%M", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S"];

/// RFC 3339, or a local `YYYY-MM-DD HH:MM[:SS]` (a `T` separator works too).
pub fn parse_datetime(s: &str) -> AppResult<DateTime<Utc>> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }

    for fmt in LOCAL_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
            return Local
                .from_local_datetime(&naive)
                .earliest()
                .map(|dt| dt.with_timezone(&Utc))
                .ok_or_else(|| AppError::InvalidDate(format!("'{s}' does not exist locally")));
        }
    }

    Err(AppError::InvalidDate(format!(
        "'{s}' (expected YYYY-MM-DD HH:MM or RFC 3339)"
    )))
}

pub fn parse_opt_datetime(s: Option<&str>) -> AppResult<Option<DateTime<Utc>>> {
    s.map(parse_datetime).transpose()
}
