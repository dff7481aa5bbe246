use super::collection::Collection;
use super::geo::GeoFix;
use crate::db::store::Record;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Planned,
    Started,
    Finished,
    Confirmed,
}

impl OrderStatus {
    pub fn code(&self) -> &'static str {
        match self {
            OrderStatus::Planned => "planned",
            OrderStatus::Started => "started",
            OrderStatus::Finished => "finished",
            OrderStatus::Confirmed => "confirmed",
        }
    }
}

/// A planned unit of work assigned to one worker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    #[serde(default)]
    pub id: i64,
    pub title: String,
    pub area_id: i64,
    pub assigned_to: i64,
    #[serde(default)]
    pub start_plan: Option<DateTime<Utc>>,
    #[serde(default)]
    pub end_plan: Option<DateTime<Utc>>,
    #[serde(default)]
    pub instructions: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub lat: Option<f64>,
    #[serde(default)]
    pub lon: Option<f64>,
    #[serde(default)]
    pub photos: Vec<i64>,
    #[serde(default)]
    pub signature: Option<i64>,
    pub status: OrderStatus,
    #[serde(default)]
    pub start_real: Option<DateTime<Utc>>,
    #[serde(default)]
    pub end_real: Option<DateTime<Utc>>,
    #[serde(default)]
    pub geo_start: Option<GeoFix>,
    #[serde(default)]
    pub geo_end: Option<GeoFix>,
    #[serde(default)]
    pub approved: bool,
    #[serde(default)]
    pub published: bool,
}

impl Order {
    /// Note written on the entry an order produces when it is stopped.
    pub fn entry_note(&self) -> String {
        format!("Einsatz: {}", self.title)
    }

    pub fn maps_link(&self) -> Option<String> {
        match (self.lat, self.lon) {
            (Some(lat), Some(lon)) => Some(format!(
                "https://maps.apple.com/?ll={lat},{lon}&q={}",
                self.address.as_deref().unwrap_or(&self.title).replace(' ', "+")
            )),
            _ => None,
        }
    }
}

impl Record for Order {
    const COLLECTION: Collection = Collection::Orders;

    fn id(&self) -> i64 {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = id;
    }
}
