//! Comment record as held by the store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Engine-assigned comment identifier.
pub type CommentId = i64;

/// A stored comment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub id: CommentId,
    pub author: String,
    pub content: String,
    /// Creation time, set once by the store.
    pub timestamp: DateTime<Utc>,
}
