use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::initialize::init_db;
use crate::db::stats;
use crate::db::store::Store;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{info, success};

/// Maintenance on the configured database file. Flags combine; they run in
/// the order migrate, info, check, vacuum.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Db {
        migrate,
        check,
        vacuum,
        info: show_info,
    } = cmd
    else {
        return Ok(());
    };

    let store = Store::open(&cfg.database)?;

    if *migrate {
        // idempotent: applied versions are skipped
        init_db(store.conn())?;
        success("Schema is up to date");
    }

    if *show_info {
        stats::print_db_info(&store, &cfg.database)?;
    }

    if *check {
        info("Running integrity check");
        let verdict: String = store
            .conn()
            .query_row("PRAGMA integrity_check", [], |row| row.get(0))?;
        if verdict != "ok" {
            return Err(AppError::Other(format!("integrity check failed: {verdict}")));
        }
        success("Integrity check passed");
    }

    if *vacuum {
        store.conn().execute_batch("VACUUM")?;
        success("Database compacted");
    }

    Ok(())
}
