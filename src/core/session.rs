//! Durable session snapshots: the authenticated actor and per-user running
//! timers. Neither is ever written to the entity store; a running timer only
//! becomes an entry when it is stopped.

use crate::errors::AppResult;
use crate::models::actor::Actor;
use crate::models::geo::GeoFix;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

/// A timer that has been started and not stopped yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunningSession {
    pub user_id: i64,
    pub area_id: i64,
    #[serde(default)]
    pub note: String,
    pub start: DateTime<Utc>,
    #[serde(default)]
    pub geo_start: Option<GeoFix>,
}

/// Load/save/clear lifecycle for session state.
///
/// `save_actor` happens on login, `clear_actor` on logout. Timer snapshots are
/// keyed by user and survive a logout, so a worker who logs back in finds the
/// timer still running.
pub trait SessionStore {
    fn load_actor(&self) -> AppResult<Option<Actor>>;
    fn save_actor(&self, actor: &Actor) -> AppResult<()>;
    fn clear_actor(&self) -> AppResult<()>;

    fn load_timer(&self, user_id: i64) -> AppResult<Option<RunningSession>>;
    fn save_timer(&self, session: &RunningSession) -> AppResult<()>;
    fn clear_timer(&self, user_id: i64) -> AppResult<()>;
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct Snapshot {
    #[serde(default)]
    actor: Option<Actor>,
    #[serde(default)]
    timers: BTreeMap<i64, RunningSession>,
}

/// JSON snapshot file next to the configuration.
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn read(&self) -> AppResult<Snapshot> {
        if !self.path.exists() {
            return Ok(Snapshot::default());
        }
        let content = fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(Snapshot::default());
        }
        Ok(serde_json::from_str(&content)?)
    }

    /// Write to a sibling temp file and rename, so a crash never leaves a
    /// half-written snapshot behind.
    fn write(&self, snap: &Snapshot) -> AppResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, serde_json::to_string_pretty(snap)?)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    fn update(&self, f: impl FnOnce(&mut Snapshot)) -> AppResult<()> {
        let mut snap = self.read()?;
        f(&mut snap);
        self.write(&snap)
    }
}

impl SessionStore for FileSessionStore {
    fn load_actor(&self) -> AppResult<Option<Actor>> {
        Ok(self.read()?.actor)
    }

    fn save_actor(&self, actor: &Actor) -> AppResult<()> {
        self.update(|s| s.actor = Some(actor.clone()))
    }

    fn clear_actor(&self) -> AppResult<()> {
        self.update(|s| s.actor = None)
    }

    fn load_timer(&self, user_id: i64) -> AppResult<Option<RunningSession>> {
        Ok(self.read()?.timers.remove(&user_id))
    }

    fn save_timer(&self, session: &RunningSession) -> AppResult<()> {
        self.update(|s| {
            s.timers.insert(session.user_id, session.clone());
        })
    }

    fn clear_timer(&self, user_id: i64) -> AppResult<()> {
        self.update(|s| {
            s.timers.remove(&user_id);
        })
    }
}

#[derive(Default)]
pub struct MemorySessionStore {
    inner: RefCell<Snapshot>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemorySessionStore {
    fn load_actor(&self) -> AppResult<Option<Actor>> {
        Ok(self.inner.borrow().actor.clone())
    }

    fn save_actor(&self, actor: &Actor) -> AppResult<()> {
        self.inner.borrow_mut().actor = Some(actor.clone());
        Ok(())
    }

    fn clear_actor(&self) -> AppResult<()> {
        self.inner.borrow_mut().actor = None;
        Ok(())
    }

    fn load_timer(&self, user_id: i64) -> AppResult<Option<RunningSession>> {
        Ok(self.inner.borrow().timers.get(&user_id).cloned())
    }

    fn save_timer(&self, session: &RunningSession) -> AppResult<()> {
        self.inner
            .borrow_mut()
            .timers
            .insert(session.user_id, session.clone());
        Ok(())
    }

    fn clear_timer(&self, user_id: i64) -> AppResult<()> {
        self.inner.borrow_mut().timers.remove(&user_id);
        Ok(())
    }
}

impl<T: SessionStore + ?Sized> SessionStore for std::rc::Rc<T> {
    fn load_actor(&self) -> AppResult<Option<Actor>> {
        (**self).load_actor()
    }

    fn save_actor(&self, actor: &Actor) -> AppResult<()> {
        (**self).save_actor(actor)
    }

    fn clear_actor(&self) -> AppResult<()> {
        (**self).clear_actor()
    }

    fn load_timer(&self, user_id: i64) -> AppResult<Option<RunningSession>> {
        (**self).load_timer(user_id)
    }

    fn save_timer(&self, session: &RunningSession) -> AppResult<()> {
        (**self).save_timer(session)
    }

    fn clear_timer(&self, user_id: i64) -> AppResult<()> {
        (**self).clear_timer(user_id)
    }
}
