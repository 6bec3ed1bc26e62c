//! Database operations for the practice tracker
//!
//! Handles SQLite database initialization and the CRUD operations the tracker
//! needs: loading a user's problems, creating a problem, patching its review
//! state and deleting it.

use super::ProblemStorage;
use crate::error::{Result, SageError};
use crate::models::{ProblemId, ProblemRecord, ReviewUpdate};
use rusqlite::{Connection, Row, params};
use std::path::Path;

/// Opens (or creates) the SQLite database at `path` and ensures the schema exists.
pub fn init_database(path: impl AsRef<Path>) -> Result<Connection> {
    let conn = Connection::open(path.as_ref())?;
    init_schema(&conn)?;
    log::debug!("Opened database at {}", path.as_ref().display());
    Ok(conn)
}

/// Creates the problems table if missing.
///
/// Everything but the owner is nullable; NULL columns are read back as the
/// record defaults (empty text, zero count, no review date).
pub fn init_schema(conn: &Connection) -> Result<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS problems (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id TEXT NOT NULL,
            url TEXT,
            title TEXT,
            notes TEXT,
            description TEXT,
            pattern TEXT,
            solved_date TEXT,
            mastery_achieved INTEGER,
            review_count INTEGER,
            next_review_date TEXT,
            created_at TEXT
        )",
        (),
    )?;

    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_problems_user ON problems(user_id)",
        (),
    )?;

    Ok(())
}

fn text(row: &Row<'_>, idx: usize) -> rusqlite::Result<String> {
    Ok(row.get::<_, Option<String>>(idx)?.unwrap_or_default())
}

fn problem_from_row(row: &Row<'_>) -> rusqlite::Result<ProblemRecord> {
    Ok(ProblemRecord {
        id: row.get(0)?,
        user_id: text(row, 1)?,
        url: text(row, 2)?,
        title: text(row, 3)?,
        notes: text(row, 4)?,
        description: text(row, 5)?,
        pattern: text(row, 6)?,
        solved_date: text(row, 7)?,
        mastery_achieved: row.get::<_, Option<bool>>(8)?.unwrap_or(false),
        review_count: row.get::<_, Option<u32>>(9)?.unwrap_or(0),
        next_review_date: row
            .get::<_, Option<String>>(10)?
            .filter(|d| !d.is_empty()),
        created_at: text(row, 11)?,
    })
}

/// Retrieves all problems owned by a user, in insertion order.
pub fn get_problems_for_user(user_id: &str, conn: &Connection) -> Result<Vec<ProblemRecord>> {
    let mut stmt = conn.prepare(
        "SELECT id, user_id, url, title, notes, description, pattern, solved_date,
                mastery_achieved, review_count, next_review_date, created_at
         FROM problems
         WHERE user_id = ?1
         ORDER BY id ASC",
    )?;

    let problems = stmt
        .query_map(params![user_id], problem_from_row)?
        .collect::<rusqlite::Result<Vec<ProblemRecord>>>()?;

    Ok(problems)
}

/// Inserts a problem for `user_id` and returns the assigned ID. The record's
/// own `id` and `user_id` are ignored.
pub fn add_problem(user_id: &str, problem: &ProblemRecord, conn: &Connection) -> Result<ProblemId> {
    conn.execute(
        "INSERT INTO problems (user_id, url, title, notes, description, pattern, solved_date,
                               mastery_achieved, review_count, next_review_date, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
        params![
            user_id,
            problem.url,
            problem.title,
            problem.notes,
            problem.description,
            problem.pattern,
            problem.solved_date,
            problem.mastery_achieved,
            problem.review_count,
            problem.next_review_date,
            problem.created_at,
        ],
    )?;

    let id = conn.last_insert_rowid();
    log::info!("Problem '{}' saved with id {}", problem.title, id);
    Ok(id)
}

/// Merges a review patch into a stored problem. The mastery flag is only
/// written when the patch carries one.
pub fn update_review_state(id: ProblemId, update: &ReviewUpdate, conn: &Connection) -> Result<()> {
    let changed = conn.execute(
        "UPDATE problems
         SET review_count = ?1,
             next_review_date = ?2,
             mastery_achieved = COALESCE(?3, mastery_achieved)
         WHERE id = ?4",
        params![
            update.review_count,
            update.next_review_date,
            update.mastery_achieved,
            id
        ],
    )?;

    if changed == 0 {
        return Err(SageError::ProblemNotFound(id));
    }
    Ok(())
}

/// Removes a problem. Deleting a problem that does not exist is not an error.
pub fn delete_problem(user_id: &str, id: ProblemId, conn: &Connection) -> Result<()> {
    let removed = conn.execute(
        "DELETE FROM problems WHERE id = ?1 AND user_id = ?2",
        params![id, user_id],
    )?;
    if removed == 0 {
        log::debug!("No problem {} for user {} to delete", id, user_id);
    }
    Ok(())
}

/// [`ProblemStorage`] backed by a single SQLite connection.
pub struct SqliteStorage {
    conn: Connection,
}

impl SqliteStorage {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self {
            conn: init_database(path)?,
        })
    }

    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        init_schema(&conn)?;
        Ok(Self { conn })
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}

impl ProblemStorage for SqliteStorage {
    fn load_problems(&self, user_id: &str) -> Result<Vec<ProblemRecord>> {
        get_problems_for_user(user_id, &self.conn)
    }

    fn create_problem(&self, user_id: &str, problem: &ProblemRecord) -> Result<ProblemId> {
        add_problem(user_id, problem, &self.conn)
    }

    fn apply_review_update(&self, id: ProblemId, update: &ReviewUpdate) -> Result<()> {
        update_review_state(id, update, &self.conn)
    }

    fn delete_problem(&self, user_id: &str, id: ProblemId) -> Result<()> {
        delete_problem(user_id, id, &self.conn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(title: &str, solved: &str) -> ProblemRecord {
        ProblemRecord {
            url: format!("https://leetcode.com/problems/{}/", title.to_lowercase()),
            title: title.to_string(),
            pattern: "Arrays".to_string(),
            solved_date: solved.to_string(),
            next_review_date: Some("2024-01-04".to_string()),
            created_at: "2024-01-01T10:00:00.000Z".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_create_and_load() {
        let storage = SqliteStorage::open_in_memory().unwrap();
        let id = storage
            .create_problem("alice", &sample("Two-Sum", "2024-01-01"))
            .unwrap();

        let problems = storage.load_problems("alice").unwrap();
        assert_eq!(problems.len(), 1);
        assert_eq!(problems[0].id, id);
        assert_eq!(problems[0].user_id, "alice");
        assert_eq!(problems[0].title, "Two-Sum");
        assert_eq!(problems[0].next_review_date.as_deref(), Some("2024-01-04"));
        assert!(!problems[0].mastery_achieved);
    }

    #[test]
    fn test_load_is_scoped_to_user() {
        let storage = SqliteStorage::open_in_memory().unwrap();
        storage.create_problem("alice", &sample("A", "2024-01-01")).unwrap();
        storage.create_problem("bob", &sample("B", "2024-01-02")).unwrap();

        let problems = storage.load_problems("bob").unwrap();
        assert_eq!(problems.len(), 1);
        assert_eq!(problems[0].title, "B");
        assert!(storage.load_problems("carol").unwrap().is_empty());
    }

    #[test]
    fn test_null_columns_load_as_defaults() {
        let storage = SqliteStorage::open_in_memory().unwrap();
        storage
            .connection()
            .execute(
                "INSERT INTO problems (user_id, title) VALUES ('alice', 'Legacy')",
                (),
            )
            .unwrap();

        let problems = storage.load_problems("alice").unwrap();
        assert_eq!(problems[0].title, "Legacy");
        assert_eq!(problems[0].review_count, 0);
        assert_eq!(problems[0].next_review_date, None);
        assert_eq!(problems[0].pattern, "");
        assert!(!problems[0].mastery_achieved);
    }

    #[test]
    fn test_review_update_merges() {
        let storage = SqliteStorage::open_in_memory().unwrap();
        let id = storage.create_problem("alice", &sample("A", "2024-01-01")).unwrap();

        storage
            .apply_review_update(
                id,
                &ReviewUpdate {
                    review_count: 1,
                    next_review_date: Some("2024-02-01".to_string()),
                    mastery_achieved: None,
                },
            )
            .unwrap();
        let problem = &storage.load_problems("alice").unwrap()[0];
        assert_eq!(problem.review_count, 1);
        assert_eq!(problem.next_review_date.as_deref(), Some("2024-02-01"));
        assert!(!problem.mastery_achieved);
        assert_eq!(problem.title, "A");

        storage
            .apply_review_update(
                id,
                &ReviewUpdate {
                    review_count: 4,
                    next_review_date: None,
                    mastery_achieved: Some(true),
                },
            )
            .unwrap();
        let problem = &storage.load_problems("alice").unwrap()[0];
        assert_eq!(problem.review_count, 4);
        assert_eq!(problem.next_review_date, None);
        assert!(problem.mastery_achieved);
    }

    #[test]
    fn test_review_update_missing_problem() {
        let storage = SqliteStorage::open_in_memory().unwrap();
        let update = ReviewUpdate {
            review_count: 1,
            next_review_date: None,
            mastery_achieved: None,
        };
        let err = storage.apply_review_update(42, &update).unwrap_err();
        assert!(matches!(err, SageError::ProblemNotFound(42)));
    }

    #[test]
    fn test_delete() {
        let storage = SqliteStorage::open_in_memory().unwrap();
        let id = storage.create_problem("alice", &sample("A", "2024-01-01")).unwrap();

        // Other users cannot delete it
        storage.delete_problem("bob", id).unwrap();
        assert_eq!(storage.load_problems("alice").unwrap().len(), 1);

        storage.delete_problem("alice", id).unwrap();
        assert!(storage.load_problems("alice").unwrap().is_empty());
        storage.delete_problem("alice", id).unwrap();
    }

    #[test]
    fn test_init_database_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sage.sqlite3");
        {
            let storage = SqliteStorage::open(&path).unwrap();
            storage.create_problem("alice", &sample("A", "2024-01-01")).unwrap();
        }
        let reopened = SqliteStorage::open(&path).unwrap();
        assert_eq!(reopened.load_problems("alice").unwrap().len(), 1);
    }
}
