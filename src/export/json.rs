use crate::db::store::{Store, stamp};
use crate::errors::AppResult;
use crate::models::collection::Collection;
use chrono::{DateTime, Utc};
use serde_json::{Map, Value};

/// Collections in the JSON export, in output order. Settings are not part of it.
const EXPORTED: [Collection; 7] = [
    Collection::Users,
    Collection::Areas,
    Collection::Entries,
    Collection::Orders,
    Collection::Tasks,
    Collection::Clients,
    Collection::Files,
];

/// Full, unrounded, unfiltered snapshot with an `exportedAt` stamp.
pub fn snapshot_json(store: &Store, exported_at: DateTime<Utc>) -> AppResult<Value> {
    let mut map = Map::new();
    map.insert("exportedAt".to_string(), Value::from(stamp(exported_at)));
    for c in EXPORTED {
        map.insert(c.table().to_string(), Value::Array(store.list_raw(c)?));
    }
    Ok(Value::Object(map))
}
