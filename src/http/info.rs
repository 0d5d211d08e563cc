//! Informational endpoints and the unmatched-route fallback.

use axum::{
    extract::{OriginalUri, State},
    http::{header, HeaderMap, Method, StatusCode},
    Json,
};
use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use serde_json::{json, Value};

use crate::http::server::AppState;

pub const SERVICE_NAME: &str = "comments-api";
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Routes advertised by the fallback.
pub const AVAILABLE_ROUTES: &[&str] = &["/health", "/", "/api/comments", "/api/docs"];

#[derive(Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    pub timestamp: String,
    pub service: &'static str,
    pub version: &'static str,
    /// Stored comment count; absent when the store could not be queried.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comments: Option<usize>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteNotFound {
    pub error: &'static str,
    pub message: String,
    pub available_routes: &'static [&'static str],
}

pub async fn health(State(state): State<AppState>) -> Json<HealthStatus> {
    let comments = match state.store.count().await {
        Ok(n) => Some(n),
        Err(e) => {
            tracing::warn!(error = %e, "Health check could not count comments");
            None
        }
    };

    Json(HealthStatus {
        status: "healthy",
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        service: SERVICE_NAME,
        version: VERSION,
        comments,
    })
}

pub async fn home() -> Json<Value> {
    Json(json!({
        "message": "Comments API",
        "version": VERSION,
        "endpoints": {
            "health": "/health",
            "get_comments": "GET /api/comments",
            "create_comment": "POST /api/comments",
            "get_comment": "GET /api/comments/{id}",
            "delete_comment": "DELETE /api/comments/{id}",
        },
        "documentation": "/api/docs",
    }))
}

pub async fn docs(headers: HeaderMap) -> Json<Value> {
    let host = headers
        .get(header::HOST)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("localhost:3000");

    Json(json!({
        "title": "Comments API Documentation",
        "version": VERSION,
        "baseUrl": format!("http://{host}"),
        "endpoints": [
            {
                "method": "GET",
                "path": "/health",
                "description": "Health check endpoint",
            },
            {
                "method": "GET",
                "path": "/api/comments",
                "description": "Get all comments, newest first",
            },
            {
                "method": "POST",
                "path": "/api/comments",
                "description": "Create a new comment",
                "body": {
                    "author": "string (required, 2-100 characters)",
                    "content": "string (required, 10-1000 characters)",
                },
            },
            {
                "method": "GET",
                "path": "/api/comments/:id",
                "description": "Get a specific comment by ID",
            },
            {
                "method": "DELETE",
                "path": "/api/comments/:id",
                "description": "Delete a comment by ID",
            },
        ],
    }))
}

/// Fallback for unknown paths and unsupported methods on known paths.
pub async fn route_not_found(
    method: Method,
    OriginalUri(uri): OriginalUri,
) -> (StatusCode, Json<RouteNotFound>) {
    let target = uri
        .path_and_query()
        .map(|pq| pq.as_str())
        .unwrap_or_else(|| uri.path());

    tracing::debug!(method = %method, target = %target, "No route matched");

    (
        StatusCode::NOT_FOUND,
        Json(RouteNotFound {
            error: "Route not found",
            message: format!("The route {method} {target} does not exist"),
            available_routes: AVAILABLE_ROUTES,
        }),
    )
}
