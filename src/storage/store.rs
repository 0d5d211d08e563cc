//! Comment store backed by an embedded SQLite engine.

use std::sync::{Arc, Mutex};

use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::types::Type;
use rusqlite::{params, Connection, OptionalExtension, Row};
use thiserror::Error;

use super::schema;
use crate::comments::{Comment, CommentId, NewComment};
use crate::config::StorageConfig;

const COLUMNS: &str = "id, author, content, timestamp";

/// Error type for storage operations.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error(transparent)]
    Sqlite(#[from] rusqlite::Error),

    #[error("storage worker failed: {0}")]
    Worker(#[from] tokio::task::JoinError),

    #[error("storage connection lock poisoned")]
    Poisoned,
}

/// Handle to the comments relation.
///
/// Cheap to clone; all clones share one connection.
#[derive(Clone)]
pub struct CommentStore {
    conn: Arc<Mutex<Connection>>,
}

impl CommentStore {
    /// Open the configured engine and make sure the schema exists.
    pub fn open(config: &StorageConfig) -> Result<Self, StoreError> {
        let conn = if config.path == ":memory:" {
            Connection::open_in_memory()?
        } else {
            Connection::open(&config.path)?
        };

        schema::run_migrations(&conn, config.seed_examples)?;

        tracing::info!(
            path = %config.path,
            seeded = config.seed_examples,
            "Comment store opened"
        );

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// An empty, unseeded in-memory store.
    pub fn in_memory() -> Result<Self, StoreError> {
        Self::open(&StorageConfig {
            path: ":memory:".to_string(),
            seed_examples: false,
        })
    }

    /// Insert a comment and return the row exactly as stored.
    ///
    /// Id and timestamp are assigned under the connection lock and read back
    /// by the same statement, so a concurrent delete cannot race the read.
    pub async fn insert(&self, comment: NewComment) -> Result<Comment, StoreError> {
        self.with_conn(move |conn| {
            let timestamp = format_timestamp(Utc::now());
            conn.query_row(
                &format!(
                    "INSERT INTO comments (author, content, timestamp) VALUES (?1, ?2, ?3) \
                     RETURNING {COLUMNS}"
                ),
                params![comment.author, comment.content, timestamp],
                row_to_comment,
            )
        })
        .await
    }

    /// All comments, newest first.
    pub async fn list(&self) -> Result<Vec<Comment>, StoreError> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {COLUMNS} FROM comments ORDER BY timestamp DESC, id DESC"
            ))?;
            let comments = stmt
                .query_map([], row_to_comment)?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(comments)
        })
        .await
    }

    pub async fn get(&self, id: CommentId) -> Result<Option<Comment>, StoreError> {
        self.with_conn(move |conn| {
            conn.query_row(
                &format!("SELECT {COLUMNS} FROM comments WHERE id = ?1"),
                [id],
                row_to_comment,
            )
            .optional()
        })
        .await
    }

    /// Remove a comment. Returns whether a row was deleted.
    pub async fn delete(&self, id: CommentId) -> Result<bool, StoreError> {
        self.with_conn(move |conn| {
            let changed = conn.execute("DELETE FROM comments WHERE id = ?1", [id])?;
            Ok(changed > 0)
        })
        .await
    }

    pub async fn count(&self) -> Result<usize, StoreError> {
        self.with_conn(|conn| {
            conn.query_row("SELECT COUNT(*) FROM comments", [], |row| {
                row.get::<_, i64>(0)
            })
        })
        .await
        .map(|n| usize::try_from(n).unwrap_or_default())
    }

    /// Run `f` against the connection on the blocking pool.
    async fn with_conn<F, T>(&self, f: F) -> Result<T, StoreError>
    where
        F: FnOnce(&Connection) -> rusqlite::Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let conn = Arc::clone(&self.conn);
        tokio::task::spawn_blocking(move || {
            let conn = conn.lock().map_err(|_| StoreError::Poisoned)?;
            f(&conn).map_err(StoreError::from)
        })
        .await?
    }
}

/// Fixed-width RFC 3339 text, so that text order is time order.
pub(crate) fn format_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn row_to_comment(row: &Row<'_>) -> rusqlite::Result<Comment> {
    let raw: String = row.get(3)?;
    let timestamp = DateTime::parse_from_rfc3339(&raw)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(3, Type::Text, Box::new(e)))?
        .with_timezone(&Utc);

    Ok(Comment {
        id: row.get(0)?,
        author: row.get(1)?,
        content: row.get(2)?,
        timestamp,
    })
}
