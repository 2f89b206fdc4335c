//! Database connection and schema management

use log::{debug, info};
use rusqlite::{Connection, OpenFlags};
use std::fs;

use crate::config::StoreConfig;
use crate::error::StorageError;

/// Accounts table. `username` uses the default binary collation, so the
/// uniqueness check is case-sensitive.
const SCHEMA: &str = "CREATE TABLE IF NOT EXISTS accounts (
    id            INTEGER PRIMARY KEY AUTOINCREMENT,
    username      TEXT NOT NULL UNIQUE,
    password_hash BLOB NOT NULL
);";

const REQUIRED_COLUMNS: [&str; 3] = ["id", "username", "password_hash"];

/// Create the database file and accounts table if absent, then confirm the
/// schema. Safe to call repeatedly.
pub fn initialize(config: &StoreConfig) -> Result<(), StorageError> {
    let path = config.database_path();

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| StorageError::Location {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    let conn = Connection::open(path)?;
    conn.busy_timeout(config.busy_timeout())?;

    // WAL so readers never block the single writer
    let mode: String = conn.query_row("PRAGMA journal_mode = WAL", [], |row| row.get(0))?;
    debug!("Journal mode: {}", mode);
    conn.execute_batch(SCHEMA)?;
    check_schema(&conn)?;

    info!("Account storage ready at {}", path.display());
    Ok(())
}

/// Open a connection to an already-initialized store.
///
/// Never creates the file: a missing database is a storage failure.
pub fn open(config: &StoreConfig) -> Result<Connection, StorageError> {
    let flags = OpenFlags::SQLITE_OPEN_READ_WRITE
        | OpenFlags::SQLITE_OPEN_URI
        | OpenFlags::SQLITE_OPEN_NO_MUTEX;
    let conn = Connection::open_with_flags(config.database_path(), flags)?;
    conn.busy_timeout(config.busy_timeout())?;
    debug!("Opened connection to {}", config.database_path().display());
    Ok(conn)
}

fn check_schema(conn: &Connection) -> Result<(), StorageError> {
    let mut stmt = conn.prepare("PRAGMA table_info(accounts)")?;
    let columns = stmt
        .query_map([], |row| row.get::<_, String>(1))?
        .collect::<Result<Vec<_>, _>>()?;

    for required in REQUIRED_COLUMNS {
        if !columns.iter().any(|c| c == required) {
            return Err(StorageError::SchemaMismatch(format!(
                "accounts table is missing column '{required}'"
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_in(dir: &tempfile::TempDir) -> StoreConfig {
        StoreConfig::new(dir.path().join("nested").join("users.db"))
    }

    #[test]
    fn creates_parent_directory_and_table() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(&dir);

        initialize(&config).unwrap();

        assert!(config.database_path().exists());
        let conn = open(&config).unwrap();
        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM accounts", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 0);
    }

    #[test]
    fn initialize_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(&dir);

        initialize(&config).unwrap();
        open(&config)
            .unwrap()
            .execute(
                "INSERT INTO accounts (username, password_hash) VALUES ('alice', x'00')",
                [],
            )
            .unwrap();
        initialize(&config).unwrap();

        let count: i64 = open(&config)
            .unwrap()
            .query_row("SELECT COUNT(*) FROM accounts", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 1);
    }

    #[test]
    fn open_does_not_create_missing_database() {
        let dir = tempfile::tempdir().unwrap();
        let config = StoreConfig::new(dir.path().join("absent.db"));

        assert!(open(&config).is_err());
        assert!(!config.database_path().exists());
    }

    #[test]
    fn rejects_foreign_accounts_table() {
        let dir = tempfile::tempdir().unwrap();
        let config = StoreConfig::new(dir.path().join("users.db"));
        Connection::open(config.database_path())
            .unwrap()
            .execute_batch("CREATE TABLE accounts (id INTEGER PRIMARY KEY, name TEXT);")
            .unwrap();

        assert!(matches!(
            initialize(&config),
            Err(StorageError::SchemaMismatch(_))
        ));
    }

    #[test]
    fn rejects_file_that_is_not_a_database() {
        let dir = tempfile::tempdir().unwrap();
        let config = StoreConfig::new(dir.path().join("users.db"));
        fs::write(config.database_path(), vec![0x42u8; 4096]).unwrap();

        assert!(matches!(initialize(&config), Err(StorageError::Database(_))));
    }
}
