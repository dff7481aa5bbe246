use crate::errors::{AppError, AppResult};
use crate::utils::path::resolve_in;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub database: String,
    #[serde(default = "default_session_file")]
    pub session_file: String,
    #[serde(default = "default_geo_timeout")]
    pub geo_timeout_secs: u64,
    #[serde(default = "default_geo_max_age")]
    pub geo_max_age_secs: u64,
    /// Rounding step written into the settings on `init` when none is set.
    #[serde(default)]
    pub default_rounding: u32,
}

fn default_session_file() -> String {
    Config::config_dir()
        .join("session.json")
        .to_string_lossy()
        .to_string()
}
fn default_geo_timeout() -> u64 {
    8
}
fn default_geo_max_age() -> u64 {
    5
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: Self::database_file().to_string_lossy().to_string(),
            session_file: default_session_file(),
            geo_timeout_secs: default_geo_timeout(),
            geo_max_age_secs: default_geo_max_age(),
            default_rounding: 0,
        }
    }
}

impl Config {
    /// Standard configuration directory depending on the platform.
    pub fn config_dir() -> PathBuf {
        if cfg!(target_os = "windows") {
            dirs::config_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("fieldops")
        } else {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".fieldops")
        }
    }

    pub fn config_file() -> PathBuf {
        Self::config_dir().join("fieldops.conf")
    }

    pub fn database_file() -> PathBuf {
        Self::config_dir().join("fieldops.sqlite")
    }

    /// Load the configuration file, or the defaults when there is none.
    pub fn load() -> AppResult<Self> {
        Self::load_from(&Self::config_file())
    }

    pub fn load_from(path: &Path) -> AppResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        serde_yaml::from_str(&content).map_err(|e| {
            AppError::Config(format!("failed to parse {}: {e}", path.display()))
        })
    }

    pub fn save(&self) -> AppResult<PathBuf> {
        let path = Self::config_file();
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }
        fs::write(&path, serde_yaml::to_string(self)?)?;
        Ok(path)
    }

    /// Create the config directory and file. A relative `custom_db` is placed
    /// in the config directory. In test mode the file is not written.
    pub fn init_all(custom_db: Option<&str>, is_test: bool) -> AppResult<Self> {
        let dir = Self::config_dir();

        let mut cfg = Self::default();
        if let Some(name) = custom_db {
            cfg.database = resolve_in(&dir, name).to_string_lossy().to_string();
        }

        if !is_test {
            fs::create_dir_all(&dir)?;
            cfg.save()?;
        }
        Ok(cfg)
    }
}
