use crate::models::collection::Collection;
use rusqlite::{Connection, OptionalExtension, Result};
use tracing::info;

/// Ensure that the `log` table exists; migration markers are stored there.
fn ensure_log_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

fn table_exists(conn: &Connection, name: &str) -> Result<bool> {
    let mut stmt = conn.prepare("SELECT name FROM sqlite_master WHERE type='table' AND name=?1")?;
    let exists: Option<String> = stmt.query_row([name], |row| row.get(0)).optional()?;
    Ok(exists.is_some())
}

fn is_applied(conn: &Connection, version: &str) -> Result<bool> {
    let mut chk = conn.prepare(
        "SELECT 1 FROM log
         WHERE operation = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    Ok(chk.query_row([version], |_| Ok(())).optional()?.is_some())
}

fn mark_applied(conn: &Connection, version: &str, message: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO log (date, operation, target, message)
         VALUES (datetime('now'), 'migration_applied', ?1, ?2)",
        [version, message],
    )?;
    info!(version, "migration applied: {message}");
    Ok(())
}

/// One JSON-document table per keyed collection, plus the settings map.
///
/// AUTOINCREMENT keeps ids monotonic: SQLite never hands out an id that was
/// used before, even after the row is deleted.
fn create_collection_tables(conn: &Connection) -> Result<()> {
    let version = "20240301_0001_create_collections";
    if is_applied(conn, version)? {
        return Ok(());
    }

    for c in Collection::KEYED {
        if table_exists(conn, c.table())? {
            continue;
        }
        conn.execute_batch(&format!(
            r#"
            CREATE TABLE {table} (
                id          INTEGER PRIMARY KEY AUTOINCREMENT,
                data        TEXT NOT NULL,
                updated_at  TEXT NOT NULL
            );
            "#,
            table = c.table()
        ))?;
    }

    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS settings (
            key         TEXT PRIMARY KEY,
            value       TEXT NOT NULL,
            updated_at  TEXT NOT NULL
        );
        "#,
    )?;

    mark_applied(conn, version, "Created collection tables")
}

/// Indexes used by the sync watermark scan.
fn add_updated_at_indexes(conn: &Connection) -> Result<()> {
    let version = "20240415_0002_updated_at_indexes";
    if is_applied(conn, version)? {
        return Ok(());
    }

    for c in Collection::KEYED {
        conn.execute_batch(&format!(
            "CREATE INDEX IF NOT EXISTS idx_{table}_updated_at ON {table}(updated_at);",
            table = c.table()
        ))?;
    }

    mark_applied(conn, version, "Added updated_at indexes")
}

/// Public entry point: run all pending migrations.
///
/// Invoked by db::initialize::init_db().
pub fn run_pending_migrations(conn: &Connection) -> Result<()> {
    ensure_log_table(conn)?;
    create_collection_tables(conn)?;
    add_updated_at_indexes(conn)?;
    Ok(())
}
