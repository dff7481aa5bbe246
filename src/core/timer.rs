use crate::core::services::Services;
use crate::core::session::RunningSession;
use crate::errors::{AppError, AppResult};
use crate::models::actor::Actor;
use crate::models::area::Area;
use crate::models::entry::Entry;
use chrono::Duration;
use tracing::debug;

/// Result of a timer start. `location` carries the capture failure, if any.
#[derive(Debug)]
pub struct TimerStarted {
    pub session: RunningSession,
    pub location: Option<AppError>,
}

#[derive(Debug)]
pub struct TimerStopped {
    pub entry: Entry,
    pub location: Option<AppError>,
}

/// A restored running timer; `elapsed` is measured from the stored start.
#[derive(Debug, Clone)]
pub struct TimerStatus {
    pub session: RunningSession,
    pub elapsed: Duration,
}

/// Idle → Running → Idle, one running session per actor.
pub struct TimerLogic;

impl TimerLogic {
    pub fn start(
        svc: &Services,
        actor: &Actor,
        area_id: i64,
        note: &str,
        geo_enabled: bool,
    ) -> AppResult<TimerStarted> {
        if svc.sessions.load_timer(actor.id)?.is_some() {
            return Err(AppError::AlreadyRunning);
        }
        let area: Area = svc.store.require(area_id)?;

        let (geo_start, location) = if geo_enabled {
            svc.capture_location()
        } else {
            (None, None)
        };

        let session = RunningSession {
            user_id: actor.id,
            area_id: area.id,
            note: note.trim().to_string(),
            start: svc.now(),
            geo_start,
        };
        svc.sessions.save_timer(&session)?;

        debug!(user = actor.id, area = area.id, "timer started");
        svc.audit(
            "timer_start",
            &format!("user #{}", actor.id),
            &format!("Started in area '{}'", area.name),
        );

        Ok(TimerStarted { session, location })
    }

    /// Persist the running session as an entry and go back to idle.
    ///
    /// The session is only cleared once the entry is stored, so a failed
    /// write leaves the timer running and the stop can be retried.
    pub fn stop(svc: &Services, actor: &Actor, geo_enabled: bool) -> AppResult<TimerStopped> {
        let session = svc
            .sessions
            .load_timer(actor.id)?
            .ok_or(AppError::NotRunning)?;

        let end = svc.now();
        let (geo_end, location) = if geo_enabled {
            svc.capture_location()
        } else {
            (None, None)
        };

        let mut entry = Entry::new(
            actor.id,
            session.area_id,
            session.start,
            end,
            session.note.clone(),
            end,
        )?
        .with_geo(session.geo_start, geo_end);

        svc.store.create(&mut entry)?;
        svc.sessions.clear_timer(actor.id)?;

        debug!(user = actor.id, entry = entry.id, "timer stopped");
        svc.audit(
            "timer_stop",
            &format!("entry #{}", entry.id),
            &format!("Recorded {} ms", entry.duration_ms),
        );

        Ok(TimerStopped { entry, location })
    }

    /// Running state restored from the durable snapshot, if it belongs to
    /// `actor`.
    pub fn status(svc: &Services, actor: &Actor) -> AppResult<Option<TimerStatus>> {
        Ok(svc
            .sessions
            .load_timer(actor.id)?
            .filter(|s| s.user_id == actor.id)
            .map(|session| TimerStatus {
                elapsed: svc.now() - session.start,
                session,
            }))
    }
}
