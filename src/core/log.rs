use crate::core::services::Services;
use crate::db::log::load_log;
use crate::errors::AppResult;
use ansi_term::Colour;

const OP_MAX: usize = 60;

/// Colour of the operation column.
fn color_for_operation(op: &str) -> Colour {
    match op {
        "timer_start" | "order_start" => Colour::Green,
        "timer_stop" | "order_stop" | "entry_add" => Colour::Cyan,
        op if op.ends_with("_del") => Colour::Red,
        op if op.ends_with("_edit") || op == "review" || op == "setting" => Colour::Yellow,
        "migration_applied" => Colour::Purple,
        "backup" | "restore" | "sync" | "export" => Colour::Blue,
        "init" | "login" | "logout" => Colour::RGB(255, 153, 51),
        _ => Colour::White,
    }
}

pub struct LogLogic;

impl LogLogic {
    pub fn print_log(svc: &Services) -> AppResult<()> {
        let rows = load_log(svc.store.conn())?;

        println!("📜 Internal log:\n");
        if rows.is_empty() {
            println!("(empty)");
            return Ok(());
        }

        let id_w = rows.iter().map(|r| r.id.to_string().len()).max().unwrap_or(1);
        let date_w = rows.iter().map(|r| r.date.chars().count()).max().unwrap_or(10);
        let op_w = rows
            .iter()
            .map(|r| op_target(&r.operation, &r.target).chars().count())
            .max()
            .unwrap_or(10)
            .min(OP_MAX);

        for r in &rows {
            let mut visible = op_target(&r.operation, &r.target);
            if visible.chars().count() > OP_MAX {
                visible = visible.chars().take(OP_MAX - 3).collect::<String>() + "...";
            }
            let padding = " ".repeat(op_w.saturating_sub(visible.chars().count()));

            // only the operation word is coloured
            let color = color_for_operation(&r.operation);
            let colored = match visible.split_once(' ') {
                Some((op, rest)) => format!("{} {}", color.paint(op), rest),
                None => color.paint(visible.as_str()).to_string(),
            };

            println!(
                "{:>id_w$}: {:<date_w$} | {}{} => {}",
                r.id, r.date, colored, padding, r.message
            );
        }

        Ok(())
    }
}

fn op_target(operation: &str, target: &str) -> String {
    if target.is_empty() {
        operation.to_string()
    } else {
        format!("{operation} ({target})")
    }
}
