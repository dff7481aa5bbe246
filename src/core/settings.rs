use crate::core::services::{Services, require_manager};
use crate::errors::{AppError, AppResult};
use crate::models::actor::Actor;
use crate::models::setting::{KEY_GEO, KEY_ROUNDING, KEY_THEME, Settings};
use serde_json::Value;

pub struct SettingsLogic;

impl SettingsLogic {
    /// Typed view; missing or malformed keys fall back to defaults.
    pub fn load(svc: &Services) -> AppResult<Settings> {
        let mut s = Settings::default();

        if let Some(v) = svc.store.setting(KEY_ROUNDING)?.and_then(|v| v.as_u64()) {
            s.rounding = u32::try_from(v).unwrap_or(0);
        }
        if let Some(v) = svc.store.setting(KEY_GEO)?.and_then(|v| v.as_bool()) {
            s.geo = v;
        }
        if let Some(v) = svc.store.setting(KEY_THEME)? {
            if let Some(t) = v.as_str() {
                s.theme = t.to_string();
            }
        }
        Ok(s)
    }

    /// Set one well-known key from its textual form.
    pub fn set(svc: &Services, actor: &Actor, key: &str, raw: &str) -> AppResult<Value> {
        require_manager(actor, "changing settings")?;

        let value = match key {
            KEY_ROUNDING => {
                let minutes: u32 = raw.trim().parse().map_err(|_| {
                    AppError::Validation(format!("rounding must be whole minutes, got '{raw}'"))
                })?;
                Value::from(minutes)
            }
            KEY_GEO => match raw.trim().to_lowercase().as_str() {
                "true" | "on" | "1" | "yes" => Value::Bool(true),
                "false" | "off" | "0" | "no" => Value::Bool(false),
                _ => {
                    return Err(AppError::Validation(format!(
                        "geo must be on or off, got '{raw}'"
                    )));
                }
            },
            KEY_THEME => {
                let theme = raw.trim();
                if theme.is_empty() {
                    return Err(AppError::Validation("theme must not be empty".into()));
                }
                Value::from(theme)
            }
            other => {
                return Err(AppError::Validation(format!("unknown setting '{other}'")));
            }
        };

        svc.store.set_setting(key, &value)?;
        svc.audit("setting", key, &value.to_string());
        Ok(value)
    }
}
