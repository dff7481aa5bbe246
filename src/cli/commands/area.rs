use crate::cli::parser::{AreaCmd, Commands};
use crate::core::areas::AreaLogic;
use crate::core::services::Services;
use crate::errors::AppResult;
use crate::ui::messages::{success, warning};
use crate::utils::table::Table;

pub fn handle(cmd: &Commands, svc: &Services) -> AppResult<()> {
    let Commands::Area { action } = cmd else {
        return Ok(());
    };
    let actor = svc.current_actor()?;

    match action {
        AreaCmd::List => {
            let mut table = Table::new(["ID", "Name", "Color", "Entries"]);
            for (area, n) in AreaLogic::entry_counts(svc)? {
                table.add_row(vec![
                    area.id.to_string(),
                    area.name.clone(),
                    area.color.clone(),
                    n.to_string(),
                ]);
            }
            print!("{}", table.render());
        }
        AreaCmd::Add { name, color } => {
            let area = AreaLogic::create(svc, &actor, name, color)?;
            success(format!("Area '{}' created with id {}", area.name, area.id));
        }
        AreaCmd::Edit { id, name, color } => {
            let area = AreaLogic::edit(svc, &actor, *id, name.as_deref(), color.as_deref())?;
            success(format!("Area #{} updated: {} {}", area.id, area.name, area.color));
        }
        AreaCmd::Del { id } => {
            if AreaLogic::delete(svc, &actor, *id)? {
                success(format!("Area #{id} deleted"));
            } else {
                warning(format!("Area #{id} does not exist"));
            }
        }
    }
    Ok(())
}
