use crate::cli::parser::{ClientCmd, Commands};
use crate::core::clients::ClientLogic;
use crate::core::services::Services;
use crate::errors::AppResult;
use crate::ui::messages::{success, warning};
use crate::utils::table::Table;

fn fmt_areas(ids: &[i64]) -> String {
    ids.iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(",")
}

pub fn handle(cmd: &Commands, svc: &Services) -> AppResult<()> {
    let Commands::Client { action } = cmd else {
        return Ok(());
    };
    let actor = svc.current_actor()?;

    match action {
        ClientCmd::List => {
            let mut table = Table::new(["ID", "Name", "Areas", "Token"]);
            for c in ClientLogic::list(svc, &actor)? {
                table.add_row(vec![
                    c.id.to_string(),
                    c.name.clone(),
                    fmt_areas(&c.area_ids),
                    c.token.clone(),
                ]);
            }
            print!("{}", table.render());
        }
        ClientCmd::Add { name, areas } => {
            let client = ClientLogic::create(svc, &actor, name, areas.clone())?;
            success(format!(
                "Client '{}' created with id {}, portal token {}",
                client.name, client.id, client.token
            ));
        }
        ClientCmd::Rename { id, name } => {
            let client = ClientLogic::rename(svc, &actor, *id, name)?;
            success(format!("Client #{} renamed to '{}'", client.id, client.name));
        }
        ClientCmd::Areas { id, areas } => {
            let client = ClientLogic::set_areas(svc, &actor, *id, areas.clone())?;
            success(format!(
                "Client #{} areas: {}",
                client.id,
                fmt_areas(&client.area_ids)
            ));
        }
        ClientCmd::Del { id } => {
            if ClientLogic::delete(svc, &actor, *id)? {
                success(format!("Client #{id} deleted"));
            } else {
                warning(format!("Client #{id} does not exist"));
            }
        }
    }
    Ok(())
}
