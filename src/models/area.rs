use super::collection::Collection;
use crate::db::store::Record;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const DEFAULT_AREA_NAME: &str = "Allgemein";
pub const DEFAULT_AREA_COLOR: &str = "#14b8a6";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Area {
    #[serde(default)]
    pub id: i64,
    pub name: String,
    pub color: String,
    pub created_at: DateTime<Utc>,
}

impl Record for Area {
    const COLLECTION: Collection = Collection::Areas;

    fn id(&self) -> i64 {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = id;
    }
}
