//! Comment endpoint handlers.
//!
//! Each handler follows the same sequence: validate input, make at most one
//! mutating storage call, wrap the result in the envelope. Validation
//! failures return before any storage access.

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    Json,
};
use serde_json::Value;

use crate::comments::{parse_comment_id, Comment, CommentId, NewComment, ValidationError};
use crate::http::response::{ApiError, Envelope};
use crate::http::server::AppState;
use crate::observability::metrics;

pub async fn list_comments(
    State(state): State<AppState>,
) -> Result<Envelope<Vec<Comment>>, ApiError> {
    let comments = state
        .store
        .list()
        .await
        .map_err(ApiError::internal("Failed to fetch comments"))?;

    let total = comments.len();
    Ok(Envelope::ok(comments).with_total(total))
}

pub async fn create_comment(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Envelope<Comment>), ApiError> {
    let Json(payload) = payload.map_err(|rejection| {
        tracing::debug!(error = %rejection, "Unreadable comment body");
        // Bodies without a length header hit the limit while buffering.
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            ApiError::PayloadTooLarge
        } else {
            ApiError::from(ValidationError::NotAnObject)
        }
    })?;

    let new_comment = NewComment::from_payload(&payload)?;

    let created = state
        .store
        .insert(new_comment)
        .await
        .map_err(ApiError::internal("Failed to create comment"))?;

    metrics::record_comment_created();
    tracing::info!(id = created.id, author = %created.author, "Comment created");

    Ok((
        StatusCode::CREATED,
        Envelope::ok(created).with_message("Comment created successfully"),
    ))
}

pub async fn get_comment(
    State(state): State<AppState>,
    raw_id: Result<Path<String>, PathRejection>,
) -> Result<Envelope<Comment>, ApiError> {
    let id = comment_id(raw_id)?;

    let comment = state
        .store
        .get(id)
        .await
        .map_err(ApiError::internal("Failed to fetch comment"))?
        .ok_or_else(|| ApiError::not_found(id))?;

    Ok(Envelope::ok(comment))
}

pub async fn delete_comment(
    State(state): State<AppState>,
    raw_id: Result<Path<String>, PathRejection>,
) -> Result<Envelope<Comment>, ApiError> {
    let id = comment_id(raw_id)?;

    let existing = state
        .store
        .get(id)
        .await
        .map_err(ApiError::internal("Failed to delete comment"))?
        .ok_or_else(|| ApiError::not_found(id))?;

    let removed = state
        .store
        .delete(id)
        .await
        .map_err(ApiError::internal("Failed to delete comment"))?;

    // Lost a race with another delete.
    if !removed {
        return Err(ApiError::not_found(id));
    }

    metrics::record_comment_deleted();
    tracing::info!(id, "Comment deleted");

    Ok(Envelope::ok(existing).with_message(format!("Comment with ID {id} deleted successfully")))
}

/// Turn the id path segment into a comment id.
///
/// A segment that does not decode as UTF-8 is just another malformed id.
fn comment_id(raw_id: Result<Path<String>, PathRejection>) -> Result<CommentId, ApiError> {
    let Path(raw_id) = raw_id.map_err(|rejection| {
        tracing::debug!(error = %rejection, "Undecodable comment id");
        ValidationError::InvalidId
    })?;

    parse_comment_id(&raw_id)?.ok_or_else(|| ApiError::not_found(raw_id.trim()))
}

/// `/api/comments/` with nothing after the slash.
pub async fn missing_comment_id() -> ApiError {
    ApiError::from(ValidationError::InvalidId)
}
