use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{success, warning};
use std::env;
use std::path::Path;
use std::process::Command;

/// `$EDITOR`, then `$VISUAL`, then the platform default.
fn default_editor() -> String {
    env::var("EDITOR")
        .or_else(|_| env::var("VISUAL"))
        .unwrap_or_else(|_| {
            if cfg!(windows) { "notepad" } else { "nano" }.to_string()
        })
}

fn edit_with(editor: &str, path: &Path) -> bool {
    Command::new(editor)
        .arg(path)
        .status()
        .is_ok_and(|s| s.success())
}

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Config {
        print_config,
        edit_config,
        editor,
    } = cmd
    else {
        return Ok(());
    };
    let path = Config::config_file();

    if *print_config {
        println!("# {}", path.display());
        print!("{}", serde_yaml::to_string(cfg)?);
    }

    if *edit_config {
        if !path.exists() {
            cfg.save()?;
        }

        let fallback = default_editor();
        let mut candidates = vec![editor.clone().unwrap_or_else(|| fallback.clone())];
        if candidates[0] != fallback {
            candidates.push(fallback);
        }

        for (i, ed) in candidates.iter().enumerate() {
            if edit_with(ed, &path) {
                success(format!("Configuration edited with '{ed}'"));
                return Ok(());
            }
            if i + 1 < candidates.len() {
                warning(format!("Editor '{ed}' not available, trying the next one"));
            }
        }
        return Err(AppError::Config(format!(
            "no usable editor for {}",
            path.display()
        )));
    }

    Ok(())
}
