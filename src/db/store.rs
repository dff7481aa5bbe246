//! Generic keyed-record persistence on top of SQLite.
//!
//! Every keyed collection is a table of JSON documents. The `id` column is the
//! only source of truth for a record's identity: it is stripped from the
//! stored document and injected back on read, so a single INSERT/UPSERT is
//! the whole write and no partially written record can ever be observed.

use crate::db::initialize::init_db;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::area::Area;
use crate::models::client::Client;
use crate::models::collection::Collection;
use crate::models::entry::Entry;
use crate::models::file::StoredFile;
use crate::models::order::Order;
use crate::models::setting::Setting;
use crate::models::task::Task;
use crate::models::user::User;
use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::{Connection, OptionalExtension, params};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// A record that lives in one keyed collection.
///
/// `id() == 0` means "not stored yet"; the store assigns the real id on
/// [`Store::create`].
pub trait Record: Serialize + DeserializeOwned {
    const COLLECTION: Collection;

    fn id(&self) -> i64;
    fn set_id(&mut self, id: i64);
}

pub struct Store {
    pool: DbPool,
}

/// Sortable RFC 3339 stamp (fixed millisecond precision, `Z` suffix).
pub fn stamp(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn encode<R: Serialize>(record: &R) -> AppResult<String> {
    let mut value = serde_json::to_value(record)?;
    if let Some(obj) = value.as_object_mut() {
        obj.remove("id");
    }
    Ok(value.to_string())
}

fn inject_id(id: i64, data: &str) -> AppResult<Value> {
    let mut value: Value = serde_json::from_str(data)?;
    match value.as_object_mut() {
        Some(obj) => {
            obj.insert("id".to_string(), Value::from(id));
            Ok(value)
        }
        None => Err(AppError::Other(format!(
            "stored record #{id} is not a JSON object"
        ))),
    }
}

/// Decode an untyped record as `R` and encode it back, so only documents
/// the typed readers accept reach the table.
fn normalize<R: Record>(id: i64, value: &Value) -> AppResult<String> {
    let mut record: R = serde_json::from_value(value.clone()).map_err(|e| {
        AppError::Validation(format!("malformed {} #{id}: {e}", R::COLLECTION))
    })?;
    record.set_id(id);
    encode(&record)
}

fn decode<R: Record>(id: i64, data: &str) -> AppResult<R> {
    let value = inject_id(id, data)?;
    let mut record: R = serde_json::from_value(value)?;
    record.set_id(id);
    Ok(record)
}

impl Store {
    /// Open (or create) the database file and bring the schema up to date.
    pub fn open(path: &str) -> AppResult<Self> {
        let pool = DbPool::new(path)?;
        init_db(&pool.conn)?;
        Ok(Self { pool })
    }

    pub fn open_in_memory() -> AppResult<Self> {
        let pool = DbPool::in_memory()?;
        init_db(&pool.conn)?;
        Ok(Self { pool })
    }

    pub fn conn(&self) -> &Connection {
        &self.pool.conn
    }

    /// Run `f` inside one SQLite transaction; rolled back if `f` fails.
    pub fn transaction<T>(&self, f: impl FnOnce(&Store) -> AppResult<T>) -> AppResult<T> {
        let tx = self.pool.conn.unchecked_transaction()?;
        let out = f(self)?;
        tx.commit()?;
        Ok(out)
    }

    // ---------------------------
    // Typed records
    // ---------------------------

    /// Insert `record`, assign it a fresh id and return that id.
    pub fn create<R: Record>(&self, record: &mut R) -> AppResult<i64> {
        let data = encode(record)?;
        self.conn().execute(
            &format!(
                "INSERT INTO {} (data, updated_at) VALUES (?1, ?2)",
                R::COLLECTION.table()
            ),
            params![data, stamp(Utc::now())],
        )?;
        let id = self.conn().last_insert_rowid();
        record.set_id(id);
        Ok(id)
    }

    pub fn get<R: Record>(&self, id: i64) -> AppResult<Option<R>> {
        let data: Option<String> = self
            .conn()
            .query_row(
                &format!("SELECT data FROM {} WHERE id = ?1", R::COLLECTION.table()),
                [id],
                |row| row.get(0),
            )
            .optional()?;

        data.map(|d| decode(id, &d)).transpose()
    }

    /// Like [`Store::get`] but a missing record is a `NotFound` error.
    pub fn require<R: Record>(&self, id: i64) -> AppResult<R> {
        self.get(id)?
            .ok_or_else(|| AppError::not_found(R::COLLECTION, id))
    }

    pub fn exists(&self, collection: Collection, id: i64) -> AppResult<bool> {
        let mut stmt = self
            .conn()
            .prepare_cached(&format!("SELECT 1 FROM {} WHERE id = ?1", collection.table()))?;
        Ok(stmt.exists([id])?)
    }

    pub fn list<R: Record>(&self) -> AppResult<Vec<R>> {
        let rows = self.rows(R::COLLECTION, None)?;
        rows.iter().map(|(id, data)| decode(*id, data)).collect()
    }

    /// Upsert by id. The record must already carry an id.
    pub fn put<R: Record>(&self, record: &R) -> AppResult<()> {
        if record.id() <= 0 {
            return Err(AppError::Validation(format!(
                "cannot put a {} without an id",
                R::COLLECTION
            )));
        }
        let data = encode(record)?;
        self.upsert(R::COLLECTION, record.id(), &data, Utc::now())
    }

    /// Delete by id; `false` when there was nothing to delete.
    pub fn delete<R: Record>(&self, id: i64) -> AppResult<bool> {
        self.delete_in(R::COLLECTION, id)
    }

    pub fn delete_in(&self, collection: Collection, id: i64) -> AppResult<bool> {
        let n = self.conn().execute(
            &format!("DELETE FROM {} WHERE id = ?1", collection.table()),
            [id],
        )?;
        Ok(n > 0)
    }

    // ---------------------------
    // Untyped access (backup, export, sync)
    // ---------------------------

    fn rows(&self, collection: Collection, since: Option<&str>) -> AppResult<Vec<(i64, String)>> {
        let table = collection.table();
        let mut out = Vec::new();

        match since {
            None => {
                let mut stmt = self
                    .conn()
                    .prepare(&format!("SELECT id, data FROM {table} ORDER BY id ASC"))?;
                let rows = stmt.query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?;
                for r in rows {
                    out.push(r?);
                }
            }
            Some(s) => {
                let mut stmt = self.conn().prepare(&format!(
                    "SELECT id, data FROM {table} WHERE updated_at >= ?1 ORDER BY id ASC"
                ))?;
                let rows = stmt.query_map([s], |row| Ok((row.get(0)?, row.get(1)?)))?;
                for r in rows {
                    out.push(r?);
                }
            }
        }

        Ok(out)
    }

    fn upsert(
        &self,
        collection: Collection,
        id: i64,
        data: &str,
        updated_at: DateTime<Utc>,
    ) -> AppResult<()> {
        self.conn().execute(
            &format!(
                "INSERT INTO {} (id, data, updated_at) VALUES (?1, ?2, ?3)
                 ON CONFLICT(id) DO UPDATE SET data = excluded.data, updated_at = excluded.updated_at",
                collection.table()
            ),
            params![id, data, stamp(updated_at)],
        )?;
        Ok(())
    }

    /// Every record of `collection` as JSON, ids included.
    /// For `settings` each item is a `{key, value}` object.
    pub fn list_raw(&self, collection: Collection) -> AppResult<Vec<Value>> {
        if collection == Collection::Settings {
            return self
                .settings_raw()?
                .into_iter()
                .map(|s| serde_json::to_value(s).map_err(AppError::from))
                .collect();
        }
        self.rows(collection, None)?
            .iter()
            .map(|(id, data)| inject_id(*id, data))
            .collect()
    }

    /// Records written at or after `since` (every record when `None`).
    pub fn modified_since(
        &self,
        collection: Collection,
        since: Option<DateTime<Utc>>,
    ) -> AppResult<Vec<Value>> {
        if collection == Collection::Settings {
            return Err(AppError::Validation(
                "settings are not tracked by modification time".into(),
            ));
        }
        let since = since.map(stamp);
        self.rows(collection, since.as_deref())?
            .iter()
            .map(|(id, data)| inject_id(*id, data))
            .collect()
    }

    /// Upsert one JSON record, keeping the id it carries.
    pub fn put_raw(&self, collection: Collection, value: &Value) -> AppResult<i64> {
        self.put_raw_at(collection, value, Utc::now())
    }

    /// [`Store::put_raw`] with an explicit `updated_at` stamp.
    ///
    /// The record must decode as the collection's model; anything else is a
    /// `Validation` error and nothing is written.
    pub fn put_raw_at(
        &self,
        collection: Collection,
        value: &Value,
        updated_at: DateTime<Utc>,
    ) -> AppResult<i64> {
        if collection == Collection::Settings {
            let setting: Setting = serde_json::from_value(value.clone())
                .map_err(|e| AppError::Validation(format!("malformed setting: {e}")))?;
            self.set_setting(&setting.key, &setting.value)?;
            return Ok(0);
        }

        let id = value
            .get("id")
            .and_then(Value::as_i64)
            .filter(|id| *id > 0)
            .ok_or_else(|| {
                AppError::Validation(format!("{collection} record without a valid id"))
            })?;

        let data = match collection {
            Collection::Users => normalize::<User>(id, value)?,
            Collection::Areas => normalize::<Area>(id, value)?,
            Collection::Entries => normalize::<Entry>(id, value)?,
            Collection::Orders => normalize::<Order>(id, value)?,
            Collection::Tasks => normalize::<Task>(id, value)?,
            Collection::Clients => normalize::<Client>(id, value)?,
            Collection::Files => normalize::<StoredFile>(id, value)?,
            Collection::Settings => {
                return Err(AppError::Validation("settings are keyed by name".into()));
            }
        };
        self.upsert(collection, id, &data, updated_at)?;
        Ok(id)
    }

    /// Remove every record of `collection`. Used ids stay burned.
    pub fn clear(&self, collection: Collection) -> AppResult<usize> {
        Ok(self
            .conn()
            .execute(&format!("DELETE FROM {}", collection.table()), [])?)
    }

    pub fn count(&self, collection: Collection) -> AppResult<i64> {
        Ok(self.conn().query_row(
            &format!("SELECT COUNT(*) FROM {}", collection.table()),
            [],
            |row| row.get(0),
        )?)
    }

    // ---------------------------
    // Settings (singleton key → value)
    // ---------------------------

    pub fn setting(&self, key: &str) -> AppResult<Option<Value>> {
        let raw: Option<String> = self
            .conn()
            .query_row("SELECT value FROM settings WHERE key = ?1", [key], |row| {
                row.get(0)
            })
            .optional()?;
        raw.map(|r| serde_json::from_str(&r).map_err(AppError::from))
            .transpose()
    }

    pub fn set_setting(&self, key: &str, value: &Value) -> AppResult<()> {
        self.conn().execute(
            "INSERT INTO settings (key, value, updated_at) VALUES (?1, ?2, ?3)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
            params![key, value.to_string(), stamp(Utc::now())],
        )?;
        Ok(())
    }

    pub fn settings_raw(&self) -> AppResult<Vec<Setting>> {
        let mut stmt = self
            .conn()
            .prepare("SELECT key, value FROM settings ORDER BY key ASC")?;
        let rows = stmt.query_map([], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
        })?;

        let mut out = Vec::new();
        for r in rows {
            let (key, raw) = r?;
            out.push(Setting {
                key,
                value: serde_json::from_str(&raw)?,
            });
        }
        Ok(out)
    }
}
