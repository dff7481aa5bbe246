use crate::db::migrate::run_pending_migrations;
use crate::errors::{AppError, AppResult};
use rusqlite::Connection;
use tracing::debug;

/// Prepare a freshly opened connection: pragmas first, then the schema.
///
/// Tables are only ever created by migrations.
pub fn init_db(conn: &Connection) -> AppResult<()> {
    conn.pragma_update(None, "foreign_keys", "ON")?;
    run_pending_migrations(conn).map_err(|e| AppError::Migration(e.to_string()))?;

    let applied: i64 = conn.query_row(
        "SELECT COUNT(*) FROM log WHERE operation = 'migration_applied'",
        [],
        |row| row.get(0),
    )?;
    debug!(applied, "schema ready");
    Ok(())
}
