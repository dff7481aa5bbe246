//! Explicit context handed to every workflow operation: the store plus the
//! collaborators that would otherwise be ambient globals.

use crate::core::clock::{Clock, SystemClock};
use crate::core::geo::{GeoOptions, LocationProvider, NoLocation, capture_best_effort};
use crate::core::session::SessionStore;
use crate::db::log::ttlog;
use crate::db::store::Store;
use crate::errors::{AppError, AppResult};
use crate::models::actor::Actor;
use crate::models::geo::GeoFix;
use chrono::{DateTime, Utc};
use tracing::warn;

pub struct Services {
    pub store: Store,
    pub sessions: Box<dyn SessionStore>,
    pub clock: Box<dyn Clock>,
    pub locator: Box<dyn LocationProvider>,
    pub geo: GeoOptions,
}

impl Services {
    pub fn new(store: Store, sessions: impl SessionStore + 'static) -> Self {
        Self {
            store,
            sessions: Box::new(sessions),
            clock: Box::new(SystemClock),
            locator: Box::new(NoLocation),
            geo: GeoOptions::default(),
        }
    }

    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    pub fn with_locator(mut self, locator: impl LocationProvider + 'static) -> Self {
        self.locator = Box::new(locator);
        self
    }

    pub fn with_geo_options(mut self, geo: GeoOptions) -> Self {
        self.geo = geo;
        self
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    pub fn capture_location(&self) -> (Option<GeoFix>, Option<AppError>) {
        capture_best_effort(self.locator.as_ref(), &self.geo, self.now())
    }

    /// The logged-in actor, or an `Auth` error.
    pub fn current_actor(&self) -> AppResult<Actor> {
        self.sessions
            .load_actor()?
            .ok_or_else(|| AppError::Auth("not logged in; run `fieldops login` first".into()))
    }

    /// Audit trail write. The mutation it describes already happened, so a
    /// failure here is logged instead of being turned into an error.
    pub fn audit(&self, operation: &str, target: &str, message: &str) {
        if let Err(e) = ttlog(self.store.conn(), operation, target, message) {
            warn!(operation, target, error = %e, "failed to write audit log");
        }
    }
}

pub(crate) fn require_manager(actor: &Actor, action: &str) -> AppResult<()> {
    if actor.is_manager() {
        Ok(())
    } else {
        Err(AppError::Forbidden(format!(
            "{action} requires a managerial role"
        )))
    }
}

pub(crate) fn require_executive(actor: &Actor, action: &str) -> AppResult<()> {
    if actor.is_executive() {
        Ok(())
    } else {
        Err(AppError::Forbidden(format!("{action} requires the executive role")))
    }
}
