//! Geolocation collaborator. Position capture is always best effort: a
//! failure is reported next to the transition it was requested for and never
//! aborts it.

use crate::errors::{AppError, AppResult};
use crate::models::geo::GeoFix;
use chrono::{DateTime, Duration, Utc};
use tracing::warn;

#[derive(Debug, Clone, Copy)]
pub struct GeoOptions {
    /// Upper bound for one capture attempt.
    pub timeout: Duration,
    /// A cached fix older than this is not reused.
    pub max_age: Duration,
    pub high_accuracy: bool,
}

impl Default for GeoOptions {
    fn default() -> Self {
        Self {
            timeout: Duration::seconds(8),
            max_age: Duration::seconds(5),
            high_accuracy: true,
        }
    }
}

pub trait LocationProvider {
    /// One capture attempt. Must give up with `LocationUnavailable` once
    /// `opts.timeout` has elapsed.
    fn locate(&self, opts: &GeoOptions, now: DateTime<Utc>) -> AppResult<GeoFix>;
}

/// Device without positioning (or permission denied).
pub struct NoLocation;

impl LocationProvider for NoLocation {
    fn locate(&self, _opts: &GeoOptions, _now: DateTime<Utc>) -> AppResult<GeoFix> {
        Err(AppError::LocationUnavailable(
            "geolocation not available".into(),
        ))
    }
}

/// A fix supplied from outside, e.g. `--lat/--lon/--acc` on the command line.
pub struct StaticLocation {
    pub lat: f64,
    pub lon: f64,
    pub acc: f64,
    /// When the fix was taken; `None` means "fresh at capture time".
    pub taken_at: Option<DateTime<Utc>>,
}

impl StaticLocation {
    pub fn new(lat: f64, lon: f64, acc: f64) -> Self {
        Self {
            lat,
            lon,
            acc,
            taken_at: None,
        }
    }
}

impl LocationProvider for StaticLocation {
    fn locate(&self, opts: &GeoOptions, now: DateTime<Utc>) -> AppResult<GeoFix> {
        if !(-90.0..=90.0).contains(&self.lat) || !(-180.0..=180.0).contains(&self.lon) {
            return Err(AppError::LocationUnavailable(format!(
                "coordinates out of range: {}, {}",
                self.lat, self.lon
            )));
        }

        let ts = self.taken_at.unwrap_or(now);
        if now - ts > opts.max_age {
            return Err(AppError::LocationUnavailable(format!(
                "cached position is {}s old (max {}s)",
                (now - ts).num_seconds(),
                opts.max_age.num_seconds()
            )));
        }

        Ok(GeoFix {
            lat: self.lat,
            lon: self.lon,
            acc: self.acc,
            ts,
        })
    }
}

/// Attempt one capture and split the outcome into "fix" and "notice".
pub fn capture_best_effort(
    provider: &dyn LocationProvider,
    opts: &GeoOptions,
    now: DateTime<Utc>,
) -> (Option<GeoFix>, Option<AppError>) {
    match provider.locate(opts, now) {
        Ok(fix) => (Some(fix), None),
        Err(e) => {
            warn!(error = %e, "location capture failed");
            let notice = match e {
                AppError::LocationUnavailable(_) => e,
                other => AppError::LocationUnavailable(other.to_string()),
            };
            (None, Some(notice))
        }
    }
}
