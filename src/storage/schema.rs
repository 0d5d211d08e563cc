//! Schema creation and one-time seeding.

use rusqlite::{params, Connection};

pub const LATEST_SCHEMA_VERSION: i32 = 1;

/// Rows inserted when the relation is first created with seeding enabled.
pub const SEED_COMMENTS: &[(&str, &str)] = &[
    ("System", "Comments API deployed successfully"),
    ("Demo User", "This is an example comment"),
];

/// Bring the database up to the latest schema.
///
/// Safe to run on every start: each step is gated on `user_version`, so
/// neither the relation nor the seed rows are created twice.
pub fn run_migrations(conn: &Connection, seed: bool) -> rusqlite::Result<()> {
    let current_version: i32 = conn.pragma_query_value(None, "user_version", |row| row.get(0))?;

    if current_version < 1 {
        migrate_v0_to_v1(conn, seed)?;
    }

    Ok(())
}

fn migrate_v0_to_v1(conn: &Connection, seed: bool) -> rusqlite::Result<()> {
    let tx = conn.unchecked_transaction()?;

    tx.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS comments (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            author TEXT NOT NULL,
            content TEXT NOT NULL,
            timestamp TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_comments_timestamp ON comments(timestamp);
        "#,
    )?;

    if seed {
        let now = super::store::format_timestamp(chrono::Utc::now());
        let mut stmt =
            tx.prepare("INSERT INTO comments (author, content, timestamp) VALUES (?1, ?2, ?3)")?;
        for (author, content) in SEED_COMMENTS {
            stmt.execute(params![author, content, now])?;
        }
    }

    tx.pragma_update(None, "user_version", LATEST_SCHEMA_VERSION)?;
    tx.commit()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn count(conn: &Connection) -> i64 {
        conn.query_row("SELECT COUNT(*) FROM comments", [], |row| row.get(0))
            .unwrap()
    }

    #[test]
    fn fresh_db_has_latest_schema_version() {
        let conn = Connection::open_in_memory().unwrap();
        run_migrations(&conn, false).unwrap();

        let version: i32 = conn
            .pragma_query_value(None, "user_version", |row| row.get(0))
            .unwrap();
        assert_eq!(version, LATEST_SCHEMA_VERSION);
    }

    #[test]
    fn migration_is_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        run_migrations(&conn, false).unwrap();
        assert!(run_migrations(&conn, false).is_ok());
        assert_eq!(count(&conn), 0);
    }

    #[test]
    fn seeding_happens_once() {
        let conn = Connection::open_in_memory().unwrap();
        run_migrations(&conn, true).unwrap();
        run_migrations(&conn, true).unwrap();
        assert_eq!(count(&conn), SEED_COMMENTS.len() as i64);
    }

    #[test]
    fn autoincrement_never_reuses_ids() {
        let conn = Connection::open_in_memory().unwrap();
        run_migrations(&conn, false).unwrap();

        conn.execute(
            "INSERT INTO comments (author, content, timestamp) VALUES ('a', 'b', 'c')",
            [],
        )
        .unwrap();
        let first = conn.last_insert_rowid();
        conn.execute("DELETE FROM comments WHERE id = ?1", [first]).unwrap();
        conn.execute(
            "INSERT INTO comments (author, content, timestamp) VALUES ('a', 'b', 'c')",
            [],
        )
        .unwrap();

        assert!(conn.last_insert_rowid() > first);
    }
}
