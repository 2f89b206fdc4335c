//! Storage operations
//!
//! Single-statement reads and writes against the accounts table.

use log::debug;
use rusqlite::types::ValueRef;
use rusqlite::{Connection, OptionalExtension, ffi, params};

use crate::error::StorageError;
use crate::storage::results::{Account, InsertResult};

/// Insert a new account, letting the unique constraint decide duplicates.
///
/// The insert is one statement, so a rejected row leaves nothing behind.
pub fn insert_account(
    conn: &Connection,
    username: &str,
    password_hash: &[u8],
) -> Result<InsertResult, StorageError> {
    let result = conn.execute(
        "INSERT INTO accounts (username, password_hash) VALUES (?1, ?2)",
        params![username, password_hash],
    );

    match result {
        Ok(_) => Ok(InsertResult::Inserted {
            id: conn.last_insert_rowid(),
        }),
        Err(rusqlite::Error::SqliteFailure(err, _))
            if err.extended_code == ffi::SQLITE_CONSTRAINT_UNIQUE =>
        {
            debug!("Insert rejected: username '{}' already exists", username);
            Ok(InsertResult::UsernameTaken)
        }
        Err(e) => Err(e.into()),
    }
}

/// Fetch the stored hash bytes for a username.
///
/// Text and blob columns are both returned as raw bytes; any other stored
/// type yields an empty value, which no hash verifies against.
pub fn find_password_hash(
    conn: &Connection,
    username: &str,
) -> Result<Option<Vec<u8>>, StorageError> {
    let hash = conn
        .query_row(
            "SELECT password_hash FROM accounts WHERE username = ?1",
            params![username],
            |row| {
                Ok(match row.get_ref(0)? {
                    ValueRef::Blob(bytes) | ValueRef::Text(bytes) => bytes.to_vec(),
                    _ => Vec::new(),
                })
            },
        )
        .optional()?;
    Ok(hash)
}

/// Look up an account by username
pub fn find_account(conn: &Connection, username: &str) -> Result<Option<Account>, StorageError> {
    let account = conn
        .query_row(
            "SELECT id, username FROM accounts WHERE username = ?1",
            params![username],
            |row| {
                Ok(Account {
                    id: row.get(0)?,
                    username: row.get(1)?,
                })
            },
        )
        .optional()?;
    Ok(account)
}

/// Number of stored accounts
pub fn count_accounts(conn: &Connection) -> Result<u64, StorageError> {
    let count: i64 = conn.query_row("SELECT COUNT(*) FROM accounts", [], |row| row.get(0))?;
    Ok(count as u64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StoreConfig;
    use crate::storage::database;

    fn setup() -> (tempfile::TempDir, Connection) {
        let dir = tempfile::tempdir().unwrap();
        let config = StoreConfig::new(dir.path().join("users.db"));
        database::initialize(&config).unwrap();
        let conn = database::open(&config).unwrap();
        (dir, conn)
    }

    #[test]
    fn insert_assigns_increasing_ids() {
        let (_dir, conn) = setup();

        let first = insert_account(&conn, "alice", b"h1").unwrap();
        let second = insert_account(&conn, "bob", b"h2").unwrap();

        match (first, second) {
            (InsertResult::Inserted { id: a }, InsertResult::Inserted { id: b }) => assert!(b > a),
            other => panic!("unexpected results: {other:?}"),
        }
    }

    #[test]
    fn duplicate_username_is_a_value_not_an_error() {
        let (_dir, conn) = setup();

        insert_account(&conn, "alice", b"h1").unwrap();
        let again = insert_account(&conn, "alice", b"h2").unwrap();

        assert_eq!(again, InsertResult::UsernameTaken);
        assert_eq!(count_accounts(&conn).unwrap(), 1);
        assert_eq!(find_password_hash(&conn, "alice").unwrap(), Some(b"h1".to_vec()));
    }

    #[test]
    fn usernames_are_case_sensitive() {
        let (_dir, conn) = setup();

        insert_account(&conn, "alice", b"h1").unwrap();
        let upper = insert_account(&conn, "Alice", b"h2").unwrap();

        assert!(matches!(upper, InsertResult::Inserted { .. }));
        assert_eq!(find_password_hash(&conn, "ALICE").unwrap(), None);
    }

    #[test]
    fn ids_are_not_reused_after_removal() {
        let (_dir, conn) = setup();

        let InsertResult::Inserted { id: first } = insert_account(&conn, "alice", b"h").unwrap()
        else {
            panic!("insert failed");
        };
        conn.execute("DELETE FROM accounts WHERE id = ?1", [first]).unwrap();
        let InsertResult::Inserted { id: second } = insert_account(&conn, "bob", b"h").unwrap()
        else {
            panic!("insert failed");
        };

        assert!(second > first);
    }

    #[test]
    fn text_hashes_are_read_as_bytes() {
        let (_dir, conn) = setup();
        conn.execute(
            "INSERT INTO accounts (username, password_hash) VALUES ('legacy', '$2b$12$abc')",
            [],
        )
        .unwrap();

        assert_eq!(
            find_password_hash(&conn, "legacy").unwrap(),
            Some(b"$2b$12$abc".to_vec())
        );
    }

    #[test]
    fn find_account_hides_hash() {
        let (_dir, conn) = setup();
        insert_account(&conn, "alice", b"h1").unwrap();

        let account = find_account(&conn, "alice").unwrap().unwrap();
        assert_eq!(account.username, "alice");
        assert!(find_account(&conn, "bob").unwrap().is_none());
    }
}
