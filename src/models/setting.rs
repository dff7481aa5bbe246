use serde::{Deserialize, Serialize};

pub const KEY_ROUNDING: &str = "rounding";
pub const KEY_GEO: &str = "geo";
pub const KEY_THEME: &str = "theme";
pub const DEFAULT_THEME: &str = "friendly";

/// One row of the settings collection, as it appears in backups.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Setting {
    pub key: String,
    pub value: serde_json::Value,
}

/// Typed view over the well-known settings.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Settings {
    /// Rounding step in minutes; 0 disables rounding.
    pub rounding: u32,
    pub geo: bool,
    pub theme: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            rounding: 0,
            geo: false,
            theme: DEFAULT_THEME.to_string(),
        }
    }
}
