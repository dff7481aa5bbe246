use crate::cli::parser::Commands;
use crate::core::auth::AuthLogic;
use crate::core::services::Services;
use crate::errors::AppResult;
use crate::ui::messages::{info, success};

/// `setup`, `login`, `logout` and `whoami`.
pub fn handle(cmd: &Commands, svc: &Services) -> AppResult<()> {
    match cmd {
        Commands::Setup { pin } => {
            let admin = AuthLogic::bootstrap_admin(svc, pin)?;
            success(format!(
                "Administrator '{}' created with id {}",
                admin.name, admin.id
            ));
            println!("Next: fieldops login {} --pin <PIN>", admin.id);
        }
        Commands::Login { user_id, pin } => {
            let actor = AuthLogic::login(svc, *user_id, pin)?;
            success(format!(
                "Logged in as {} ({})",
                actor.name,
                actor.role.label()
            ));
        }
        Commands::Logout => match AuthLogic::logout(svc)? {
            Some(actor) => success(format!("Logged out {}", actor.name)),
            None => info("Nobody is logged in."),
        },
        Commands::Whoami => {
            let actor = svc.current_actor()?;
            println!(
                "#{} {} ({})",
                actor.id,
                actor.name,
                actor.role.label()
            );
        }
        _ => {}
    }
    Ok(())
}
