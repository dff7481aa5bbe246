use crate::cli::parser::Cli;
use crate::config::Config;
use crate::db::store::Store;
use crate::errors::AppResult;
use crate::models::setting::KEY_ROUNDING;
use crate::ui::messages::{success, warning};
use serde_json::Value;

/// Handle the `init` command
///
/// Creates the config directory and file (skipped with `--test`), the SQLite
/// database with every pending migration, and the initial rounding setting.
pub fn handle(cli: &Cli) -> AppResult<()> {
    let cfg = Config::init_all(cli.db.as_deref(), cli.test)?;
    let db_path = cfg.database.clone();

    println!("⚙️  Initializing fieldops…");
    if !cli.test {
        println!("📄 Config file : {}", Config::config_file().display());
    }
    println!("🗄️  Database   : {}", &db_path);

    if let Some(parent) = std::path::Path::new(&db_path).parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)?;
    }
    let store = Store::open(&db_path)?;

    if store.setting(KEY_ROUNDING)?.is_none() {
        store.set_setting(KEY_ROUNDING, &Value::from(cfg.default_rounding))?;
    }

    if let Err(e) = crate::db::log::ttlog(
        store.conn(),
        "init",
        &db_path,
        &format!("Database initialized at {}", &db_path),
    ) {
        warning(format!("Failed to write internal log: {e}"));
    }

    success(format!("Database initialized at {}", &db_path));
    println!("Next: fieldops setup --pin <PIN> to create the administrator.");
    Ok(())
}
