//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware stack)
//!     → request.rs (request ID, tracing span)
//!     → handlers.rs (validate → storage → envelope)
//!     → response.rs (envelope, error → status mapping)
//!     → Send to client
//!
//! Unmatched or informational paths:
//!     → info.rs (health, home, docs, route fallback)
//! ```

pub mod handlers;
pub mod info;
pub mod request;
pub mod response;
pub mod server;

pub use request::{UuidRequestId, X_REQUEST_ID};
pub use response::{ApiError, Envelope};
pub use server::{build_router, AppState, HttpServer};
