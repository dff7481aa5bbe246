use crate::errors::{AppError, AppResult};
use chrono::{Datelike, NaiveDate};

fn bad(msg: &str, input: &str) -> AppError {
    AppError::InvalidDate(format!("{msg}: '{input}'"))
}

/// First and last day of one period: `YYYY`, `YYYY-MM` or `YYYY-MM-DD`.
fn period_bounds(p: &str) -> AppResult<(NaiveDate, NaiveDate)> {
    match p.len() {
        4 => {
            let y: i32 = p.parse().map_err(|_| bad("invalid year", p))?;
            let first = NaiveDate::from_ymd_opt(y, 1, 1).ok_or_else(|| bad("invalid year", p))?;
            let last = NaiveDate::from_ymd_opt(y, 12, 31).ok_or_else(|| bad("invalid year", p))?;
            Ok((first, last))
        }
        7 => {
            let first = NaiveDate::parse_from_str(&format!("{p}-01"), "%Y-%m-%d")
                .map_err(|_| bad("invalid month", p))?;
            Ok((first, month_last_day(first).ok_or_else(|| bad("invalid month", p))?))
        }
        10 => {
            let d = NaiveDate::parse_from_str(p, "%Y-%m-%d").map_err(|_| bad("invalid date", p))?;
            Ok((d, d))
        }
        _ => Err(bad("unsupported range format", p)),
    }
}

fn month_last_day(first: NaiveDate) -> Option<NaiveDate> {
    let (y, m) = if first.month() == 12 {
        (first.year() + 1, 1)
    } else {
        (first.year(), first.month() + 1)
    };
    NaiveDate::from_ymd_opt(y, m, 1)?.pred_opt()
}

/// Parse `--range`.
///
/// Accepts:
/// - YYYY
/// - YYYY-MM
/// - YYYY-MM-DD
/// - YYYY:YYYY
/// - YYYY-MM:YYYY-MM
/// - YYYY-MM-DD:YYYY-MM-DD
pub fn parse_range(r: &str) -> AppResult<(NaiveDate, NaiveDate)> {
    let r = r.trim();
    match r.split_once(':') {
        Some((start, end)) => {
            let (start, end) = (start.trim(), end.trim());
            if start.len() != end.len() {
                return Err(bad("start and end must have the same format", r));
            }
            let (from, _) = period_bounds(start)?;
            let (_, to) = period_bounds(end)?;
            if to < from {
                return Err(bad("range ends before it starts", r));
            }
            Ok((from, to))
        }
        None => period_bounds(r),
    }
}

/// `None` and `"all"` mean no bounds.
pub fn parse_optional_range(r: Option<&str>) -> AppResult<Option<(NaiveDate, NaiveDate)>> {
    match r {
        None => Ok(None),
        Some(s) if s.trim().eq_ignore_ascii_case("all") => Ok(None),
        Some(s) => parse_range(s).map(Some),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn single_periods() {
        assert_eq!(parse_range("2024").unwrap(), (d(2024, 1, 1), d(2024, 12, 31)));
        assert_eq!(parse_range("2024-02").unwrap(), (d(2024, 2, 1), d(2024, 2, 29)));
        assert_eq!(parse_range("2023-12").unwrap(), (d(2023, 12, 1), d(2023, 12, 31)));
        assert_eq!(parse_range("2024-03-01").unwrap(), (d(2024, 3, 1), d(2024, 3, 1)));
    }

    #[test]
    fn intervals() {
        assert_eq!(
            parse_range("2024-01:2024-03").unwrap(),
            (d(2024, 1, 1), d(2024, 3, 31))
        );
        assert!(parse_range("2024:2024-03").is_err());
        assert!(parse_range("2024-03-02:2024-03-01").is_err());
    }

    #[test]
    fn all_means_unbounded() {
        assert_eq!(parse_optional_range(Some("all")).unwrap(), None);
        assert_eq!(parse_optional_range(None).unwrap(), None);
    }
}
