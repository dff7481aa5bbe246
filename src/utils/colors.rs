//! ANSI colouring for table cells and status labels.

use crate::models::order::OrderStatus;

pub const RESET: &str = "\x1b[0m";

pub const GREY: &str = "\x1b[90m";
pub const GREEN: &str = "\x1b[32m";
pub const YELLOW: &str = "\x1b[33m";
pub const BLUE: &str = "\x1b[34m";
pub const CYAN: &str = "\x1b[36m";

/// Grey for empty placeholders, the value itself otherwise.
pub fn colorize_optional(value: &str) -> String {
    let v = value.trim();
    if v.is_empty() || v == "—" || v == "00:00:00" {
        format!("{GREY}{value}{RESET}")
    } else {
        value.to_string()
    }
}

pub fn color_for_status(status: OrderStatus) -> &'static str {
    match status {
        OrderStatus::Planned => BLUE,
        OrderStatus::Started => YELLOW,
        OrderStatus::Finished => CYAN,
        OrderStatus::Confirmed => GREEN,
    }
}

pub fn colorize_status(status: OrderStatus) -> String {
    format!("{}{}{RESET}", color_for_status(status), status.code())
}

/// Green when set, grey otherwise.
pub fn colorize_flag(label: &str, set: bool) -> String {
    if set {
        format!("{GREEN}{label}{RESET}")
    } else {
        format!("{GREY}{label}{RESET}")
    }
}
