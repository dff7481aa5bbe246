use super::collection::Collection;
use crate::db::store::Record;
use serde::{Deserialize, Serialize};

/// A customer with read access to the portal feed of its areas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    #[serde(default)]
    pub id: i64,
    pub name: String,
    pub token: String,
    #[serde(default)]
    pub area_ids: Vec<i64>,
}

impl Record for Client {
    const COLLECTION: Collection = Collection::Clients;

    fn id(&self) -> i64 {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = id;
    }
}
