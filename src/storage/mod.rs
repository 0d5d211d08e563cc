//! Storage access subsystem.
//!
//! # Data Flow
//! ```text
//! StorageConfig (path, seed flag)
//!     → store.rs CommentStore::open
//!     → schema.rs (create relation if absent, seed once)
//!     → shared handle injected into the HTTP state
//!
//! Per request:
//!     handler → CommentStore (async) → blocking worker → SQLite
//! ```
//!
//! # Design Decisions
//! - One connection behind a mutex; the engine sees serialized access
//! - Every operation is a single statement, no cross-request transactions
//! - `:memory:` is the default engine; a file path opts into persistence

pub mod schema;
pub mod store;

pub use store::{CommentStore, StoreError};
