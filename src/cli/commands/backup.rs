use crate::cli::parser::Commands;
use crate::core::backup::BackupLogic;
use crate::core::services::Services;
use crate::errors::AppResult;
use crate::ui::messages::{info, success};

pub fn handle(cmd: &Commands, svc: &Services) -> AppResult<()> {
    match cmd {
        Commands::Backup {
            file,
            compress,
            force,
        } => {
            let actor = svc.current_actor()?;
            let path = BackupLogic::backup(svc, &actor, file, *compress, *force)?;
            success(format!("Backup created: {}", path.display()));
        }
        Commands::Restore { file } => {
            let actor = svc.current_actor()?;
            let report = BackupLogic::restore_file(svc, &actor, file)?;
            for (c, n) in &report.counts {
                info(format!("{:<8} {n}", c.table()));
            }
            success(format!("Backup restored from {file}"));
        }
        _ => {}
    }

    Ok(())
}
