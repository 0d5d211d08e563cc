//! Comment domain subsystem.
//!
//! # Data Flow
//! ```text
//! POST body (JSON value)
//!     → validation.rs (presence, type, length checks; trimming)
//!     → NewComment (normalized, ready to persist)
//!     → storage layer assigns id + timestamp
//!     → types.rs Comment (what the store holds)
//!
//! Path identifier (string)
//!     → validation.rs parse_comment_id
//!     → CommentId used for lookups and deletes
//! ```
//!
//! # Design Decisions
//! - Validation is fail-fast: the first violated rule is reported
//! - Nothing reaches storage before validation succeeds
//! - Lengths are measured on the trimmed text, in chars

pub mod types;
pub mod validation;

pub use types::{Comment, CommentId};
pub use validation::{parse_comment_id, NewComment, ValidationError};
