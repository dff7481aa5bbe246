use crate::cli::parser::{Commands, EntryCmd};
use crate::core::aggregate::{SummaryLogic, daily_summaries, duration_minutes};
use crate::core::entries::{EntryEdit, EntryFilter, EntryLogic};
use crate::core::services::Services;
use crate::core::settings::SettingsLogic;
use crate::errors::{AppError, AppResult};
use crate::models::area::Area;
use crate::ui::messages::{info, success, warning};
use crate::utils::date::{parse_opt_date, parse_opt_datetime};
use crate::utils::formatting::{check_mark, fmt_duration, fmt_elapsed, fmt_ts, mins2readable};
use crate::utils::table::Table;
use std::collections::HashMap;

/// `entry …` and `summary`.
pub fn handle(cmd: &Commands, svc: &Services) -> AppResult<()> {
    match cmd {
        Commands::Entry { action } => handle_entry(action, svc),
        Commands::Summary => print_today(svc),
        _ => Ok(()),
    }
}

fn handle_entry(action: &EntryCmd, svc: &Services) -> AppResult<()> {
    let actor = svc.current_actor()?;

    match action {
        EntryCmd::List {
            from,
            to,
            user,
            daily,
        } => {
            let filter = EntryFilter {
                from: parse_opt_date(from.as_deref())?,
                to: parse_opt_date(to.as_deref())?,
                user_id: *user,
            };
            let entries = EntryLogic::list(svc, &actor, &filter)?;
            let step = SettingsLogic::load(svc)?.rounding;

            if *daily {
                let mut table = Table::new(["Day", "Entries", "Raw", "Rounded"]);
                for d in daily_summaries(&entries, step) {
                    table.add_row(vec![
                        d.day.format("%d.%m.%Y").to_string(),
                        d.entries.to_string(),
                        fmt_duration(d.raw_ms),
                        fmt_duration(d.rounded_total_ms),
                    ]);
                }
                print!("{}", table.render());
                return Ok(());
            }

            let areas: HashMap<i64, String> = svc
                .store
                .list::<Area>()?
                .into_iter()
                .map(|a| (a.id, a.name))
                .collect();

            let mut table = Table::new([
                "ID", "User", "Area", "Start", "End", "Duration", "Note", "Appr", "Publ",
            ]);
            for e in &entries {
                table.add_row(vec![
                    e.id.to_string(),
                    format!("#{}", e.user_id),
                    areas.get(&e.area_id).cloned().unwrap_or_else(|| "—".into()),
                    fmt_ts(e.start),
                    fmt_ts(e.end),
                    mins2readable(duration_minutes(e.duration_ms, step)),
                    e.note.clone(),
                    check_mark(e.approved).to_string(),
                    check_mark(e.published).to_string(),
                ]);
            }
            print!("{}", table.render());
        }
        EntryCmd::Edit {
            id,
            start,
            end,
            note,
            user,
            area,
        } => {
            let edit = EntryEdit {
                start: parse_opt_datetime(start.as_deref())?,
                end: parse_opt_datetime(end.as_deref())?,
                note: note.clone(),
                user_id: *user,
                area_id: *area,
            };
            if edit.is_empty() {
                return Err(AppError::Validation("nothing to change".into()));
            }
            let entry = EntryLogic::edit(svc, &actor, *id, edit)?;
            success(format!(
                "Entry #{} updated: {} → {} ({})",
                entry.id,
                fmt_ts(entry.start),
                fmt_ts(entry.end),
                fmt_duration(entry.duration_ms)
            ));
        }
        EntryCmd::Del { id } => {
            if EntryLogic::delete(svc, &actor, *id)? {
                success(format!("Entry #{id} deleted"));
            } else {
                warning(format!("Entry #{id} does not exist"));
            }
        }
    }
    Ok(())
}

fn print_today(svc: &Services) -> AppResult<()> {
    let actor = svc.current_actor()?;
    let today = SummaryLogic::today(svc, &actor)?;

    println!("📅 {} · {}", today.day.format("%d.%m.%Y"), actor.name);
    println!("   Entries : {}", today.entries);
    println!("   Total   : {}", fmt_duration(today.raw_ms));
    if today.rounded_ms != today.raw_ms {
        println!("   Rounded : {}", fmt_duration(today.rounded_ms));
    }
    match today.running {
        Some(status) => println!("   Running : {}", fmt_elapsed(status.elapsed)),
        None => info("No timer running."),
    }
    Ok(())
}
