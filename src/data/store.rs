//! SQLite-backed progress store
//!
//! Remembers player profiles and which suspects have been questioned. The
//! connection is owned exclusively by one game session: created when a
//! case opens, dropped when it closes, never shared.

use std::path::Path;

use rusqlite::{params, Connection, OptionalExtension};

/// Errors from the progress store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

/// Local store for player rows and per-suspect questioned flags.
#[derive(Debug)]
pub struct ProgressStore {
    conn: Connection,
}

impl ProgressStore {
    /// Opens (or creates) the store at `path` and bootstraps the schema.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let store = Self {
            conn: Connection::open(path)?,
        };
        store.migrate()?;
        Ok(store)
    }

    /// An in-memory store. Used by tests, and as a degraded fallback when
    /// the on-disk database cannot be opened.
    pub fn open_in_memory() -> Result<Self, StoreError> {
        let store = Self {
            conn: Connection::open_in_memory()?,
        };
        store.migrate()?;
        Ok(store)
    }

    fn migrate(&self) -> Result<(), StoreError> {
        self.conn.execute_batch(
            "
            CREATE TABLE IF NOT EXISTS player (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                progress TEXT
            );

            CREATE TABLE IF NOT EXISTS suspect (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                questioned BOOLEAN NOT NULL
            );
            ",
        )?;
        Ok(())
    }

    /// Records a player profile row.
    pub fn insert_player(&self, name: &str, progress: &str) -> Result<(), StoreError> {
        self.conn.execute(
            "INSERT INTO player (name, progress) VALUES (?1, ?2)",
            params![name, progress],
        )?;
        Ok(())
    }

    /// Sets a suspect's questioned flag, inserting the row on first touch.
    ///
    /// Update-by-name first; zero rows affected means the suspect has no
    /// row yet, so one is inserted. The pair is not transactionally
    /// guarded - the store has exactly one single-threaded caller, which
    /// makes the write sequence safe as-is.
    pub fn upsert_suspect_questioned(&self, name: &str, questioned: bool) -> Result<(), StoreError> {
        let rows = self.conn.execute(
            "UPDATE suspect SET questioned = ?1 WHERE name = ?2",
            params![questioned, name],
        )?;
        if rows == 0 {
            self.conn.execute(
                "INSERT INTO suspect (name, questioned) VALUES (?1, ?2)",
                params![name, questioned],
            )?;
        }
        Ok(())
    }

    /// Whether the named suspect has been questioned. A suspect with no
    /// row yet reads as `false`.
    pub fn questioned(&self, name: &str) -> Result<bool, StoreError> {
        let flag = self
            .conn
            .query_row(
                "SELECT questioned FROM suspect WHERE name = ?1",
                params![name],
                |row| row.get::<_, bool>(0),
            )
            .optional()?;
        Ok(flag.unwrap_or(false))
    }

    #[cfg(test)]
    pub(crate) fn suspect_rows(&self, name: &str) -> Result<i64, StoreError> {
        Ok(self.conn.query_row(
            "SELECT COUNT(*) FROM suspect WHERE name = ?1",
            params![name],
            |row| row.get(0),
        )?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unquestioned_suspect_reads_false() {
        let store = ProgressStore::open_in_memory().unwrap();
        assert!(!store.questioned("Nomsa").unwrap());
    }

    #[test]
    fn upsert_inserts_then_updates_the_same_row() {
        let store = ProgressStore::open_in_memory().unwrap();

        store.upsert_suspect_questioned("Sipho", true).unwrap();
        assert!(store.questioned("Sipho").unwrap());
        assert_eq!(store.suspect_rows("Sipho").unwrap(), 1);

        // Re-asserting the flag must not grow a second row.
        store.upsert_suspect_questioned("Sipho", true).unwrap();
        assert!(store.questioned("Sipho").unwrap());
        assert_eq!(store.suspect_rows("Sipho").unwrap(), 1);

        store.upsert_suspect_questioned("Sipho", false).unwrap();
        assert!(!store.questioned("Sipho").unwrap());
        assert_eq!(store.suspect_rows("Sipho").unwrap(), 1);
    }

    #[test]
    fn suspects_are_tracked_independently() {
        let store = ProgressStore::open_in_memory().unwrap();
        store.upsert_suspect_questioned("Nomsa", true).unwrap();

        assert!(store.questioned("Nomsa").unwrap());
        assert!(!store.questioned("Thando").unwrap());
        assert_eq!(store.suspect_rows("Thando").unwrap(), 0);
    }

    #[test]
    fn player_rows_accumulate() {
        let store = ProgressStore::open_in_memory().unwrap();
        store.insert_player("Detective", "investigating").unwrap();
        store.insert_player("Detective", "investigating").unwrap();

        let count: i64 = store
            .conn
            .query_row("SELECT COUNT(*) FROM player", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 2);
    }

    #[test]
    fn schema_survives_reopening_a_database_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("progress.db");

        {
            let store = ProgressStore::open(&path).unwrap();
            store.upsert_suspect_questioned("Thando", true).unwrap();
        }

        let store = ProgressStore::open(&path).unwrap();
        assert!(store.questioned("Thando").unwrap());
    }
}
