//! One-line status output for crew members at the terminal.
//!
//! Colour is dropped when `NO_COLOR` is set.

use crate::errors::AppError;
use std::env;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tone {
    Info,
    Done,
    Warn,
}

impl Tone {
    fn icon(self) -> &'static str {
        match self {
            Tone::Info => "ℹ️",
            Tone::Done => "✅",
            Tone::Warn => "⚠️",
        }
    }

    fn ansi(self) -> &'static str {
        match self {
            Tone::Info => "\x1b[1;34m",
            Tone::Done => "\x1b[1;32m",
            Tone::Warn => "\x1b[1;33m",
        }
    }
}

fn render(tone: Tone, msg: impl fmt::Display, colour: bool) -> String {
    if colour {
        format!("{}{}\x1b[0m {msg}", tone.ansi(), tone.icon())
    } else {
        format!("{} {msg}", tone.icon())
    }
}

fn emit(tone: Tone, msg: impl fmt::Display) {
    println!("{}", render(tone, msg, env::var_os("NO_COLOR").is_none()));
}

pub fn info<T: fmt::Display>(msg: T) {
    emit(Tone::Info, msg);
}

pub fn success<T: fmt::Display>(msg: T) {
    emit(Tone::Done, msg);
}

pub fn warning<T: fmt::Display>(msg: T) {
    emit(Tone::Warn, msg);
}

/// Shown after a timer or order transition whose position fix failed.
/// The transition itself went through.
pub fn location_notice(err: Option<&AppError>) {
    if let Some(e) = err {
        warning(format!("Recorded without position ({e})"));
    }
}
