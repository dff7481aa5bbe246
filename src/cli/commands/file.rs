use crate::cli::parser::{Commands, FileCmd};
use crate::core::files::FileLogic;
use crate::core::services::Services;
use crate::errors::{AppError, AppResult};
use crate::models::collection::Collection;
use crate::ui::messages::success;
use crate::utils::formatting::fmt_ts;

pub fn handle(cmd: &Commands, svc: &Services) -> AppResult<()> {
    let Commands::File { action } = cmd else {
        return Ok(());
    };
    // any logged-in user may upload photos and signatures
    svc.current_actor()?;

    match action {
        FileCmd::Add { data } => {
            let file = FileLogic::save(svc, data)?;
            success(format!("File stored with id {}", file.id));
        }
        FileCmd::Show { id } => {
            let file = FileLogic::get(svc, *id)?
                .ok_or_else(|| AppError::not_found(Collection::Files, *id))?;
            println!("# file {} ({})", file.id, fmt_ts(file.created_at));
            println!("{}", file.data_url);
        }
    }
    Ok(())
}
