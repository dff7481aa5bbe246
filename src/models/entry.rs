use super::collection::Collection;
use super::geo::GeoFix;
use crate::db::store::Record;
use crate::errors::{AppError, AppResult};
use chrono::{DateTime, Local, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A completed, timed unit of work against an area.
///
/// `duration_ms` and `day` are always derived from `start`/`end`; the only
/// ways to change the interval are [`Entry::new`] and [`Entry::set_interval`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    #[serde(default)]
    pub id: i64,
    pub user_id: i64,
    pub area_id: i64,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub duration_ms: i64,
    #[serde(default)]
    pub note: String,
    pub day: NaiveDate,
    #[serde(default)]
    pub geo_start: Option<GeoFix>,
    #[serde(default)]
    pub geo_end: Option<GeoFix>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub approved: bool,
    #[serde(default)]
    pub published: bool,
}

/// Calendar date of `ts` in the local timezone.
pub fn local_day(ts: DateTime<Utc>) -> NaiveDate {
    ts.with_timezone(&Local).date_naive()
}

impl Entry {
    /// Build an unreviewed entry (`id = 0`, both flags false).
    pub fn new(
        user_id: i64,
        area_id: i64,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        note: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> AppResult<Self> {
        let mut entry = Self {
            id: 0,
            user_id,
            area_id,
            start,
            end: start,
            duration_ms: 0,
            note: note.into(),
            day: local_day(start),
            geo_start: None,
            geo_end: None,
            created_at,
            approved: false,
            published: false,
        };
        entry.set_interval(start, end)?;
        Ok(entry)
    }

    pub fn with_geo(mut self, geo_start: Option<GeoFix>, geo_end: Option<GeoFix>) -> Self {
        self.geo_start = geo_start;
        self.geo_end = geo_end;
        self
    }

    /// Replace the interval, re-deriving `duration_ms` and `day`.
    pub fn set_interval(&mut self, start: DateTime<Utc>, end: DateTime<Utc>) -> AppResult<()> {
        if end <= start {
            return Err(AppError::Validation(format!(
                "entry end ({}) must be later than start ({})",
                end.to_rfc3339(),
                start.to_rfc3339()
            )));
        }
        self.start = start;
        self.end = end;
        self.duration_ms = (end - start).num_milliseconds();
        self.day = local_day(start);
        Ok(())
    }
}

impl Record for Entry {
    const COLLECTION: Collection = Collection::Entries;

    fn id(&self) -> i64 {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = id;
    }
}
