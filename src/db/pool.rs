//! Single SQLite connection; every command runs in its own process, so
//! access is serialized by construction.

use rusqlite::{Connection, Result};
use std::path::Path;
use std::time::Duration;

/// Another process holding the write lock is waited for this long.
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

pub struct DbPool {
    pub conn: Connection,
}

impl DbPool {
    pub fn new(path: &str) -> Result<Self> {
        let conn = Connection::open(Path::new(path))?;
        conn.busy_timeout(BUSY_TIMEOUT)?;
        Ok(Self { conn })
    }

    /// Private database that disappears with the pool (tests, dry runs).
    pub fn in_memory() -> Result<Self> {
        Ok(Self {
            conn: Connection::open_in_memory()?,
        })
    }
}
