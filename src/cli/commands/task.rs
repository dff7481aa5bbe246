use crate::cli::parser::{Commands, TaskCmd};
use crate::core::services::Services;
use crate::core::tasks::{TaskDraft, TaskLogic};
use crate::errors::AppResult;
use crate::models::task::TaskStatus;
use crate::ui::messages::{success, warning};
use crate::utils::formatting::fmt_ts;
use crate::utils::table::Table;

pub fn handle(cmd: &Commands, svc: &Services) -> AppResult<()> {
    let Commands::Task { action } = cmd else {
        return Ok(());
    };
    let actor = svc.current_actor()?;

    match action {
        TaskCmd::List => {
            let mut table = Table::new(["ID", "Created", "Title", "Assigned", "Status"]);
            for t in TaskLogic::list(svc, &actor)? {
                table.add_row(vec![
                    t.id.to_string(),
                    fmt_ts(t.created_at),
                    t.title.clone(),
                    t.assigned_to
                        .map(|u| format!("#{u}"))
                        .unwrap_or_else(|| "all".into()),
                    match t.status {
                        TaskStatus::Open => "open".to_string(),
                        TaskStatus::Done => "done".to_string(),
                    },
                ]);
            }
            print!("{}", table.render());
        }
        TaskCmd::Add {
            title,
            desc,
            area,
            assigned_to,
        } => {
            let task = TaskLogic::create(
                svc,
                &actor,
                TaskDraft {
                    title: title.clone(),
                    desc: desc.clone(),
                    area_id: *area,
                    assigned_to: *assigned_to,
                },
            )?;
            success(format!("Task '{}' created with id {}", task.title, task.id));
        }
        TaskCmd::Done { id } => {
            let task = TaskLogic::mark_done(svc, &actor, *id)?;
            success(format!("Task #{} done", task.id));
        }
        TaskCmd::Del { id } => {
            if TaskLogic::delete(svc, &actor, *id)? {
                success(format!("Task #{id} deleted"));
            } else {
                warning(format!("Task #{id} does not exist"));
            }
        }
    }
    Ok(())
}
