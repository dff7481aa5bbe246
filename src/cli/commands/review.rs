use crate::cli::parser::{Commands, ReviewCmd};
use crate::core::review::{ReviewFlags, ReviewKind, ReviewLogic};
use crate::core::services::Services;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::success;
use crate::utils::colors::colorize_flag;
use crate::utils::formatting::{check_mark, fmt_opt_ts};
use crate::utils::table::Table;

fn flag(on: bool, off: bool) -> Option<bool> {
    match (on, off) {
        (true, _) => Some(true),
        (_, true) => Some(false),
        _ => None,
    }
}

pub fn handle(cmd: &Commands, svc: &Services) -> AppResult<()> {
    let Commands::Review { action } = cmd else {
        return Ok(());
    };
    let actor = svc.current_actor()?;

    match action {
        ReviewCmd::List => {
            let mut table = Table::new(["Kind", "ID", "When", "Label", "Appr", "Publ"]);
            for item in ReviewLogic::list(svc, &actor)? {
                table.add_row(vec![
                    item.kind.code().to_string(),
                    item.id.to_string(),
                    fmt_opt_ts(item.when),
                    item.label.clone(),
                    check_mark(item.approved).to_string(),
                    check_mark(item.published).to_string(),
                ]);
            }
            print!("{}", table.render());
        }
        ReviewCmd::Set {
            kind,
            id,
            approve,
            unapprove,
            publish,
            unpublish,
        } => {
            let kind = ReviewKind::from_code(kind).ok_or_else(|| {
                AppError::Validation(format!("unknown kind '{kind}' (entry, order)"))
            })?;
            let flags = ReviewFlags {
                approved: flag(*approve, *unapprove),
                published: flag(*publish, *unpublish),
            };
            let item = ReviewLogic::set_review(svc, &actor, kind, *id, flags)?;
            success(format!(
                "{} #{}: {}  {}",
                item.kind.code(),
                item.id,
                colorize_flag("approved", item.approved),
                colorize_flag("published", item.published)
            ));
        }
    }
    Ok(())
}
