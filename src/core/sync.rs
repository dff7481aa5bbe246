//! Mirror of the keyed collections to a remote endpoint.
//!
//! Push and pull are overwrite-by-id, last write wins; there is no conflict
//! detection. Watermarks live in settings under `sync:<collection>`.

use crate::core::services::{Services, require_executive};
use crate::db::store::stamp;
use crate::errors::{AppError, AppResult};
use crate::models::actor::Actor;
use crate::models::collection::Collection;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap};
use tracing::debug;

/// Remote endpoint. Records are JSON objects carrying their `id`.
pub trait SyncRemote {
    /// Upsert by id.
    fn push(&self, collection: Collection, records: &[Value]) -> AppResult<()>;
    /// Records modified at or after `since` (all when `None`), ordered by id.
    fn pull(&self, collection: Collection, since: Option<DateTime<Utc>>) -> AppResult<Vec<Value>>;
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Watermark {
    #[serde(default)]
    pub pushed: Option<DateTime<Utc>>,
    #[serde(default)]
    pub pulled: Option<DateTime<Utc>>,
}

fn watermark_key(c: Collection) -> String {
    format!("sync:{}", c.table())
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SyncReport {
    /// `(collection, pushed, pulled)`.
    pub collections: Vec<(Collection, usize, usize)>,
}

pub struct SyncService<'a> {
    svc: &'a Services,
    remote: &'a dyn SyncRemote,
}

impl<'a> SyncService<'a> {
    pub fn new(svc: &'a Services, remote: &'a dyn SyncRemote) -> Self {
        Self { svc, remote }
    }

    pub fn watermark(&self, c: Collection) -> AppResult<Watermark> {
        match self.svc.store.setting(&watermark_key(c))? {
            Some(v) => Ok(serde_json::from_value(v)?),
            None => Ok(Watermark::default()),
        }
    }

    fn save_watermark(&self, c: Collection, w: &Watermark) -> AppResult<()> {
        self.svc
            .store
            .set_setting(&watermark_key(c), &serde_json::to_value(w)?)
    }

    fn check(c: Collection) -> AppResult<()> {
        if c == Collection::Settings {
            return Err(AppError::Validation("settings are not synchronised".into()));
        }
        Ok(())
    }

    /// Send every local record written since the last push.
    ///
    /// The watermark is the wall clock, like the store's `updated_at` stamps.
    pub fn push_changes(&self, c: Collection) -> AppResult<usize> {
        Self::check(c)?;
        let mut w = self.watermark(c)?;
        let started = Utc::now();

        let records = self.svc.store.modified_since(c, w.pushed)?;
        if !records.is_empty() {
            self.remote.push(c, &records)?;
        }

        w.pushed = Some(started);
        self.save_watermark(c, &w)?;

        debug!(collection = c.table(), count = records.len(), "pushed");
        Ok(records.len())
    }

    /// Upsert every remote record modified since the last pull.
    ///
    /// Pulled records are stamped just below the push watermark: they already
    /// match the remote and must not be pushed back.
    pub fn pull_changes(&self, c: Collection) -> AppResult<usize> {
        Self::check(c)?;
        let mut w = self.watermark(c)?;
        let started = Utc::now();
        let in_sync_at = w
            .pushed
            .map_or(started, |pushed| pushed - Duration::milliseconds(1));

        let records = self.remote.pull(c, w.pulled)?;
        self.svc.store.transaction(|store| {
            for r in &records {
                store.put_raw_at(c, r, in_sync_at)?;
            }
            Ok(())
        })?;

        w.pulled = Some(started);
        self.save_watermark(c, &w)?;

        debug!(collection = c.table(), count = records.len(), "pulled");
        Ok(records.len())
    }

    /// Push then pull every keyed collection.
    pub fn sync_all(&self, actor: &Actor) -> AppResult<SyncReport> {
        require_executive(actor, "synchronising")?;

        let mut report = SyncReport::default();
        for c in Collection::KEYED {
            let pushed = self.push_changes(c)?;
            let pulled = self.pull_changes(c)?;
            report.collections.push((c, pushed, pulled));
        }

        let (p, l) = report
            .collections
            .iter()
            .fold((0, 0), |(p, l), (_, a, b)| (p + a, l + b));
        self.svc
            .audit("sync", "all", &format!("pushed {p}, pulled {l}"));
        Ok(report)
    }
}

/// In-process remote, stamps records with the time they were pushed.
#[derive(Default)]
pub struct MemoryRemote {
    tables: RefCell<HashMap<Collection, BTreeMap<i64, (String, Value)>>>,
}

impl MemoryRemote {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a record as if another device had pushed it at `updated_at`.
    pub fn insert(&self, c: Collection, record: Value, updated_at: DateTime<Utc>) -> AppResult<()> {
        let id = record_id(&record)?;
        self.tables
            .borrow_mut()
            .entry(c)
            .or_default()
            .insert(id, (stamp(updated_at), record));
        Ok(())
    }

    pub fn len(&self, c: Collection) -> usize {
        self.tables.borrow().get(&c).map_or(0, BTreeMap::len)
    }

    pub fn is_empty(&self, c: Collection) -> bool {
        self.len(c) == 0
    }

    pub fn get(&self, c: Collection, id: i64) -> Option<Value> {
        self.tables
            .borrow()
            .get(&c)
            .and_then(|t| t.get(&id))
            .map(|(_, v)| v.clone())
    }
}

fn record_id(record: &Value) -> AppResult<i64> {
    record
        .get("id")
        .and_then(Value::as_i64)
        .filter(|id| *id > 0)
        .ok_or_else(|| AppError::Validation("record without a valid id".into()))
}

impl SyncRemote for MemoryRemote {
    fn push(&self, c: Collection, records: &[Value]) -> AppResult<()> {
        let now = stamp(Utc::now());
        let mut tables = self.tables.borrow_mut();
        let table = tables.entry(c).or_default();
        for r in records {
            table.insert(record_id(r)?, (now.clone(), r.clone()));
        }
        Ok(())
    }

    fn pull(&self, c: Collection, since: Option<DateTime<Utc>>) -> AppResult<Vec<Value>> {
        let since = since.map(stamp);
        Ok(self
            .tables
            .borrow()
            .get(&c)
            .map(|t| {
                t.values()
                    .filter(|(ts, _)| since.as_ref().is_none_or(|s| ts >= s))
                    .map(|(_, v)| v.clone())
                    .collect()
            })
            .unwrap_or_default())
    }
}
