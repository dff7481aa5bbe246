use crate::cli::parser::{Commands, UserCmd};
use crate::core::services::Services;
use crate::core::users::UserLogic;
use crate::errors::{AppError, AppResult};
use crate::models::user::Role;
use crate::ui::messages::{success, warning};
use crate::utils::formatting::fmt_ts;
use crate::utils::table::Table;

fn parse_role(s: &str) -> AppResult<Role> {
    Role::from_code(s).ok_or_else(|| {
        AppError::Validation(format!(
            "unknown role '{s}' (field-worker, staff-manager, executive)"
        ))
    })
}

pub fn handle(cmd: &Commands, svc: &Services) -> AppResult<()> {
    let Commands::User { action } = cmd else {
        return Ok(());
    };
    let actor = svc.current_actor()?;

    match action {
        UserCmd::List => {
            let mut table = Table::new(["ID", "Name", "Role", "Created"]);
            for u in UserLogic::list(svc, &actor)? {
                table.add_row(vec![
                    u.id.to_string(),
                    u.name.clone(),
                    u.role.label().to_string(),
                    fmt_ts(u.created_at),
                ]);
            }
            print!("{}", table.render());
        }
        UserCmd::Add { name, role, pin } => {
            let user = UserLogic::create(svc, &actor, name, parse_role(role)?, pin)?;
            success(format!("User '{}' created with id {}", user.name, user.id));
        }
        UserCmd::Role { id, role } => {
            let user = UserLogic::set_role(svc, &actor, *id, parse_role(role)?)?;
            success(format!("{} is now {}", user.name, user.role.label()));
        }
        UserCmd::Pin { id, pin } => {
            UserLogic::set_pin(svc, &actor, *id, pin)?;
            success(format!("PIN of user #{id} changed"));
        }
        UserCmd::Del { id } => {
            if UserLogic::delete(svc, &actor, *id)? {
                success(format!("User #{id} deleted"));
            } else {
                warning(format!("User #{id} does not exist"));
            }
        }
    }
    Ok(())
}
