use std::path::Path;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use rusqlite::{Connection, OptionalExtension};

use crate::store::{KeyValueStore, StoreError};

/// Opens (or creates) the SQLite database at `path`, configures WAL mode,
/// and applies schema migrations via the `schema_version` table.
///
/// This is the single entry point for database connections. `busy_timeout` is
/// set through the `Connection` method rather than a PRAGMA string so it takes
/// effect regardless of pragma caching.
///
/// # Errors
///
/// Returns `rusqlite::Error` if the file cannot be opened, WAL configuration
/// fails, or schema DDL fails.
pub fn open_db(path: impl AsRef<Path>) -> Result<Connection, rusqlite::Error> {
    let mut db = Connection::open(path)?;

    db.execute_batch(
        "PRAGMA journal_mode=WAL;
         PRAGMA synchronous=NORMAL;",
    )?;
    db.busy_timeout(Duration::from_secs(5))?;

    // Fold any WAL left behind by a previous run back into the main file.
    db.execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;

    crate::schema::migrate(&mut db)?;

    Ok(db)
}

/// Returns the current Unix timestamp in seconds.
fn now_secs() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs() as i64
}

/// Durable [`KeyValueStore`] over the `kv_store` table.
///
/// Owns its connection. Wrap it in an `Rc` to share one store between the
/// start screen and every quiz session.
#[derive(Debug)]
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Opens the database at `path` with [`open_db`].
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Sqlite` if the database cannot be opened or migrated.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        Ok(Self { conn: open_db(path)? })
    }

    /// Wraps an already-migrated connection.
    pub fn from_connection(conn: Connection) -> Self {
        Self { conn }
    }

    /// Borrow of the underlying connection, for inspection in tests and tools.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}

impl KeyValueStore for SqliteStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM kv_store WHERE key = ?1",
                rusqlite::params![key],
                |r| r.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    /// Upserts `key` inside `BEGIN IMMEDIATE`.
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let tx = rusqlite::Transaction::new_unchecked(
            &self.conn,
            rusqlite::TransactionBehavior::Immediate,
        )?;
        tx.execute(
            "INSERT INTO kv_store (key, value, updated_at)
             VALUES (?1, ?2, ?3)
             ON CONFLICT(key)
             DO UPDATE SET value = excluded.value,
                           updated_at = excluded.updated_at",
            rusqlite::params![key, value, now_secs()],
        )?;
        tx.commit()?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.conn
            .execute("DELETE FROM kv_store WHERE key = ?1", rusqlite::params![key])?;
        Ok(())
    }
}
