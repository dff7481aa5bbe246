use crate::cli::parser::Commands;
use crate::core::log::LogLogic;
use crate::core::services::Services;
use crate::errors::AppResult;

pub fn handle(cmd: &Commands, svc: &Services) -> AppResult<()> {
    if matches!(cmd, Commands::Log { print: true }) {
        LogLogic::print_log(svc)?;
    }

    Ok(())
}
