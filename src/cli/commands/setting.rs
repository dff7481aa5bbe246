use crate::cli::parser::{Commands, SettingCmd};
use crate::core::services::Services;
use crate::core::settings::SettingsLogic;
use crate::errors::AppResult;
use crate::ui::messages::success;

pub fn handle(cmd: &Commands, svc: &Services) -> AppResult<()> {
    let Commands::Setting { action } = cmd else {
        return Ok(());
    };

    match action {
        SettingCmd::List => {
            let s = SettingsLogic::load(svc)?;
            println!("rounding = {}", s.rounding);
            println!("geo      = {}", if s.geo { "on" } else { "off" });
            println!("theme    = {}", s.theme);
        }
        SettingCmd::Set { key, value } => {
            let actor = svc.current_actor()?;
            let stored = SettingsLogic::set(svc, &actor, key, value)?;
            success(format!("{key} = {stored}"));
        }
    }
    Ok(())
}
