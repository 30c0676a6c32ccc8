//! Task list snapshot repository contracts and implementations.
//!
//! # Responsibility
//! - Persist the serialized task list under a single well-known key.
//! - Restore the task list at startup, tolerating missing or damaged state.
//!
//! # Invariants
//! - The snapshot value is a JSON array of `{id, name, completed}` objects.
//! - A malformed value is reported via logging and read as an empty list;
//!   it is never surfaced as an error to callers.

use crate::db::DbError;
use crate::model::task::Task;
use log::warn;
use rusqlite::{params, Connection, OptionalExtension};
use std::cell::RefCell;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Well-known key the task list snapshot is stored under.
pub const SNAPSHOT_KEY: &str = "tasks";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for snapshot persistence operations.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    Serialize(serde_json::Error),
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    MissingRequiredTable(&'static str),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Serialize(err) => write!(f, "failed to serialize snapshot: {err}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection schema version {actual_version} has not been migrated to {expected_version}"
            ),
            Self::MissingRequiredTable(table) => {
                write!(f, "required table `{table}` is missing")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Serialize(err) => Some(err),
            Self::UninitializedConnection { .. } => None,
            Self::MissingRequiredTable(_) => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Durable store contract for the task list snapshot.
///
/// Injected into the task store at construction so tests can substitute the
/// in-memory implementation.
pub trait SnapshotRepository {
    /// Loads the persisted task list.
    ///
    /// Returns an empty list when no snapshot exists or the stored value is
    /// malformed; errors only on transport failures.
    fn load(&self) -> RepoResult<Vec<Task>>;

    /// Overwrites the persisted snapshot with the full task list.
    fn save(&self, tasks: &[Task]) -> RepoResult<()>;
}

/// SQLite-backed snapshot repository over the `snapshots` key-value table.
pub struct SqliteSnapshotRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteSnapshotRepository<'conn> {
    /// Creates a repository after verifying the connection is usable.
    ///
    /// # Errors
    /// - `RepoError::UninitializedConnection` when migrations never ran.
    /// - `RepoError::MissingRequiredTable` when the snapshot table is absent.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        let expected_version = crate::db::migrations::latest_version();
        let actual_version: u32 =
            conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
        if actual_version == 0 {
            return Err(RepoError::UninitializedConnection {
                expected_version,
                actual_version,
            });
        }

        let table_exists: bool = conn.query_row(
            "SELECT EXISTS (
                SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = 'snapshots'
            );",
            [],
            |row| row.get(0),
        )?;
        if !table_exists {
            return Err(RepoError::MissingRequiredTable("snapshots"));
        }

        Ok(Self { conn })
    }
}

impl SnapshotRepository for SqliteSnapshotRepository<'_> {
    fn load(&self) -> RepoResult<Vec<Task>> {
        let value: Option<String> = self
            .conn
            .query_row(
                "SELECT value FROM snapshots WHERE key = ?1;",
                [SNAPSHOT_KEY],
                |row| row.get(0),
            )
            .optional()?;

        match value {
            Some(raw) => Ok(parse_snapshot(&raw)),
            None => Ok(Vec::new()),
        }
    }

    fn save(&self, tasks: &[Task]) -> RepoResult<()> {
        let value = serde_json::to_string(tasks).map_err(RepoError::Serialize)?;
        self.conn.execute(
            "INSERT INTO snapshots (key, value) VALUES (?1, ?2)
             ON CONFLICT (key) DO UPDATE SET
                value = excluded.value,
                updated_at = (strftime('%s', 'now') * 1000);",
            params![SNAPSHOT_KEY, value],
        )?;
        Ok(())
    }
}

/// In-memory snapshot repository holding the raw serialized value.
///
/// Test double for the durable store; `with_raw` seeds arbitrary (including
/// malformed) persisted state.
#[derive(Debug, Default)]
pub struct MemorySnapshotRepository {
    value: RefCell<Option<String>>,
}

impl MemorySnapshotRepository {
    /// Creates an empty store with no prior snapshot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store seeded with a raw serialized value.
    pub fn with_raw(raw: impl Into<String>) -> Self {
        Self {
            value: RefCell::new(Some(raw.into())),
        }
    }

    /// Returns the currently stored raw value, if any.
    pub fn raw(&self) -> Option<String> {
        self.value.borrow().clone()
    }
}

impl SnapshotRepository for MemorySnapshotRepository {
    fn load(&self) -> RepoResult<Vec<Task>> {
        match self.value.borrow().as_deref() {
            Some(raw) => Ok(parse_snapshot(raw)),
            None => Ok(Vec::new()),
        }
    }

    fn save(&self, tasks: &[Task]) -> RepoResult<()> {
        let value = serde_json::to_string(tasks).map_err(RepoError::Serialize)?;
        *self.value.borrow_mut() = Some(value);
        Ok(())
    }
}

/// Reads a snapshot value, falling back to an empty list when damaged.
fn parse_snapshot(raw: &str) -> Vec<Task> {
    match serde_json::from_str::<Vec<Task>>(raw) {
        Ok(tasks) => tasks,
        Err(err) => {
            warn!(
                "event=snapshot_load module=repo status=malformed key={} error={}",
                SNAPSHOT_KEY, err
            );
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{
        MemorySnapshotRepository, RepoError, SnapshotRepository, SqliteSnapshotRepository,
        SNAPSHOT_KEY,
    };
    use crate::db::open_db_in_memory;
    use crate::model::task::{Task, TaskId};
    use rusqlite::Connection;

    fn sample_tasks() -> Vec<Task> {
        vec![
            Task::with_id(TaskId::from_raw("todo-1"), "buy milk"),
            Task::with_id(TaskId::from_raw("todo-2"), "walk dog").toggled(),
        ]
    }

    #[test]
    fn load_without_snapshot_yields_empty_list() {
        let conn = open_db_in_memory().unwrap();
        let repo = SqliteSnapshotRepository::try_new(&conn).unwrap();
        assert!(repo.load().unwrap().is_empty());
    }

    #[test]
    fn save_then_load_round_trips() {
        let conn = open_db_in_memory().unwrap();
        let repo = SqliteSnapshotRepository::try_new(&conn).unwrap();

        let tasks = sample_tasks();
        repo.save(&tasks).unwrap();
        assert_eq!(repo.load().unwrap(), tasks);
    }

    #[test]
    fn save_overwrites_the_single_key() {
        let conn = open_db_in_memory().unwrap();
        let repo = SqliteSnapshotRepository::try_new(&conn).unwrap();

        repo.save(&sample_tasks()).unwrap();
        repo.save(&[]).unwrap();

        let rows: i64 = conn
            .query_row("SELECT COUNT(*) FROM snapshots;", [], |row| row.get(0))
            .unwrap();
        assert_eq!(rows, 1);
        assert!(repo.load().unwrap().is_empty());
    }

    #[test]
    fn malformed_snapshot_reads_as_empty() {
        let conn = open_db_in_memory().unwrap();
        conn.execute(
            "INSERT INTO snapshots (key, value) VALUES (?1, ?2);",
            [SNAPSHOT_KEY, "{not json"],
        )
        .unwrap();

        let repo = SqliteSnapshotRepository::try_new(&conn).unwrap();
        assert!(repo.load().unwrap().is_empty());
    }

    #[test]
    fn wrong_shape_snapshot_reads_as_empty() {
        let repo = MemorySnapshotRepository::with_raw(r#"{"id":"todo-1"}"#);
        assert!(repo.load().unwrap().is_empty());
    }

    #[test]
    fn repository_rejects_uninitialized_connection() {
        let conn = Connection::open_in_memory().unwrap();

        match SqliteSnapshotRepository::try_new(&conn) {
            Err(RepoError::UninitializedConnection {
                expected_version,
                actual_version: 0,
            }) => assert!(expected_version > 0),
            Err(other) => panic!("unexpected error: {other}"),
            Ok(_) => panic!("expected uninitialized connection error"),
        }
    }

    #[test]
    fn repository_rejects_connection_without_snapshot_table() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(&format!(
            "PRAGMA user_version = {};",
            crate::db::migrations::latest_version()
        ))
        .unwrap();

        assert!(matches!(
            SqliteSnapshotRepository::try_new(&conn),
            Err(RepoError::MissingRequiredTable("snapshots"))
        ));
    }
}
