use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One position sample: latitude, longitude, accuracy radius in metres.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoFix {
    pub lat: f64,
    pub lon: f64,
    pub acc: f64,
    pub ts: DateTime<Utc>,
}

impl GeoFix {
    pub fn short(&self) -> String {
        format!("{:.5}, {:.5} ±{} m", self.lat, self.lon, self.acc.round())
    }
}
