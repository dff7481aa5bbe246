use super::collection::Collection;
use crate::db::store::Record;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Opaque binary payload (photo or signature) kept as a data URL.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredFile {
    #[serde(default)]
    pub id: i64,
    pub data_url: String,
    pub created_at: DateTime<Utc>,
}

impl Record for StoredFile {
    const COLLECTION: Collection = Collection::Files;

    fn id(&self) -> i64 {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = id;
    }
}
