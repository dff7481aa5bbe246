use crate::cli::parser::Commands;
use crate::core::portal::PortalLogic;
use crate::core::services::Services;
use crate::errors::AppResult;
use crate::utils::date::parse_opt_date;

/// No login needed: the token is the credential.
pub fn handle(cmd: &Commands, svc: &Services) -> AppResult<()> {
    if let Commands::Portal { token, from, to } = cmd {
        let feed = PortalLogic::feed(
            svc,
            token,
            parse_opt_date(from.as_deref())?,
            parse_opt_date(to.as_deref())?,
        )?;
        println!("{}", serde_json::to_string_pretty(&feed)?);
    }
    Ok(())
}
