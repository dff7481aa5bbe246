use crate::cli::parser::Commands;
use crate::core::services::Services;
use crate::errors::AppResult;
use crate::export::{ExportLogic, ExportRequest, notify_export_success};
use std::path::Path;

pub fn handle(cmd: &Commands, svc: &Services) -> AppResult<()> {
    if let Commands::Export {
        format,
        file,
        range,
        user,
        force,
    } = cmd
    {
        let actor = svc.current_actor()?;
        let req = ExportRequest {
            format: *format,
            file: file.clone(),
            range: range.clone(),
            user_id: *user,
            force: *force,
        };
        ExportLogic::export(svc, &actor, &req)?;
        notify_export_success(&format.as_str().to_uppercase(), Path::new(file));
    }
    Ok(())
}
