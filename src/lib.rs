//! Comments REST service library.

pub mod comments;
pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod storage;

pub use comments::{Comment, NewComment};
pub use config::ServiceConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use storage::CommentStore;
