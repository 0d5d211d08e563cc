//! Input validation for comment payloads and identifiers.
//!
//! # Rule order (first failure wins)
//! 1. `author` and `content` present and non-empty
//! 2. both are strings
//! 3. trimmed author length in [2, 100]
//! 4. trimmed content length in [10, 1000]

use std::num::IntErrorKind;

use serde_json::Value;
use thiserror::Error;

use super::types::CommentId;

pub const AUTHOR_MIN_LEN: usize = 2;
pub const AUTHOR_MAX_LEN: usize = 100;
pub const CONTENT_MIN_LEN: usize = 10;
pub const CONTENT_MAX_LEN: usize = 1000;

/// A rejected comment payload or identifier.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Request body must be a JSON object")]
    NotAnObject,

    #[error("Author and content are required fields")]
    MissingFields,

    #[error("Author and content must be strings")]
    NotStrings,

    #[error("Author must be between 2 and 100 characters")]
    AuthorLength,

    #[error("Content must be between 10 and 1000 characters")]
    ContentLength,

    #[error("Invalid comment ID")]
    InvalidId,
}

/// A validated, trimmed comment ready to be persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewComment {
    pub author: String,
    pub content: String,
}

impl NewComment {
    /// Validate a raw JSON payload.
    ///
    /// The payload is taken as an untyped value so that "missing" and
    /// "wrong type" can be told apart and reported in order.
    pub fn from_payload(payload: &Value) -> Result<Self, ValidationError> {
        let fields = payload.as_object().ok_or(ValidationError::NotAnObject)?;

        let author = fields.get("author").filter(|v| !is_blank(v));
        let content = fields.get("content").filter(|v| !is_blank(v));
        let (Some(author), Some(content)) = (author, content) else {
            return Err(ValidationError::MissingFields);
        };

        let (Some(author), Some(content)) = (author.as_str(), content.as_str()) else {
            return Err(ValidationError::NotStrings);
        };

        let author = author.trim();
        let content = content.trim();

        if !(AUTHOR_MIN_LEN..=AUTHOR_MAX_LEN).contains(&author.chars().count()) {
            return Err(ValidationError::AuthorLength);
        }
        if !(CONTENT_MIN_LEN..=CONTENT_MAX_LEN).contains(&content.chars().count()) {
            return Err(ValidationError::ContentLength);
        }

        Ok(Self {
            author: author.to_string(),
            content: content.to_string(),
        })
    }
}

/// Values treated as "not provided": null, false, zero and the empty string.
fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}

/// Parse a path identifier into a comment id.
///
/// Empty and non-numeric input is rejected. A well-formed integer outside
/// the id range yields `Ok(None)`: it is a valid identifier that no stored
/// comment can carry.
pub fn parse_comment_id(raw: &str) -> Result<Option<CommentId>, ValidationError> {
    match raw.trim().parse::<CommentId>() {
        Ok(id) => Ok(Some(id)),
        Err(e) if matches!(e.kind(), IntErrorKind::PosOverflow | IntErrorKind::NegOverflow) => {
            Ok(None)
        }
        Err(_) => Err(ValidationError::InvalidId),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn accepts_and_trims_valid_payload() {
        let payload = json!({ "author": "  Test User ", "content": "  This is a test comment\n" });
        let comment = NewComment::from_payload(&payload).unwrap();
        assert_eq!(comment.author, "Test User");
        assert_eq!(comment.content, "This is a test comment");
    }

    #[test]
    fn missing_author_is_reported_first() {
        let payload = json!({ "content": "Test content" });
        assert_eq!(
            NewComment::from_payload(&payload),
            Err(ValidationError::MissingFields)
        );
    }

    #[test]
    fn empty_strings_count_as_missing() {
        let payload = json!({ "author": "", "content": "" });
        assert_eq!(
            NewComment::from_payload(&payload),
            Err(ValidationError::MissingFields)
        );
    }

    #[test]
    fn falsy_non_strings_count_as_missing() {
        for blank in [json!(null), json!(false), json!(0)] {
            let payload = json!({ "author": blank, "content": "Long enough content" });
            assert_eq!(
                NewComment::from_payload(&payload),
                Err(ValidationError::MissingFields)
            );
        }
    }

    #[test]
    fn truthy_non_strings_are_type_errors() {
        let payload = json!({ "author": 42, "content": "Long enough content" });
        assert_eq!(
            NewComment::from_payload(&payload),
            Err(ValidationError::NotStrings)
        );

        let payload = json!({ "author": "Ada", "content": ["not", "a", "string"] });
        assert_eq!(
            NewComment::from_payload(&payload),
            Err(ValidationError::NotStrings)
        );
    }

    #[test]
    fn presence_is_checked_before_type() {
        let payload = json!({ "author": 42 });
        assert_eq!(
            NewComment::from_payload(&payload),
            Err(ValidationError::MissingFields)
        );
    }

    #[test]
    fn author_length_bounds() {
        let content = "x".repeat(CONTENT_MIN_LEN);
        let short = json!({ "author": "A", "content": content });
        assert_eq!(
            NewComment::from_payload(&short),
            Err(ValidationError::AuthorLength)
        );

        let long = json!({ "author": "a".repeat(AUTHOR_MAX_LEN + 1), "content": content });
        assert_eq!(
            NewComment::from_payload(&long),
            Err(ValidationError::AuthorLength)
        );

        let edge = json!({ "author": "a".repeat(AUTHOR_MAX_LEN), "content": content });
        assert!(NewComment::from_payload(&edge).is_ok());
    }

    #[test]
    fn author_length_is_measured_after_trimming() {
        let payload = json!({ "author": "   A   ", "content": "Long enough content" });
        assert_eq!(
            NewComment::from_payload(&payload),
            Err(ValidationError::AuthorLength)
        );
    }

    #[test]
    fn whitespace_only_author_fails_length_check() {
        let payload = json!({ "author": "     ", "content": "Long enough content" });
        assert_eq!(
            NewComment::from_payload(&payload),
            Err(ValidationError::AuthorLength)
        );
    }

    #[test]
    fn content_length_bounds() {
        let short = json!({ "author": "Ada", "content": "too short" });
        assert_eq!(
            NewComment::from_payload(&short),
            Err(ValidationError::ContentLength)
        );

        let long = json!({ "author": "Ada", "content": "c".repeat(CONTENT_MAX_LEN + 1) });
        assert_eq!(
            NewComment::from_payload(&long),
            Err(ValidationError::ContentLength)
        );

        let edge = json!({ "author": "Ada", "content": "c".repeat(CONTENT_MAX_LEN) });
        assert!(NewComment::from_payload(&edge).is_ok());
    }

    #[test]
    fn lengths_count_characters_not_bytes() {
        // 10 chars, 20 bytes
        let payload = json!({ "author": "Zoë", "content": "éééééééééé" });
        assert!(NewComment::from_payload(&payload).is_ok());
    }

    #[test]
    fn non_object_payload_is_rejected() {
        assert_eq!(
            NewComment::from_payload(&json!(["author", "content"])),
            Err(ValidationError::NotAnObject)
        );
    }

    #[test]
    fn parses_numeric_ids() {
        assert_eq!(parse_comment_id("42"), Ok(Some(42)));
        assert_eq!(parse_comment_id("-3"), Ok(Some(-3)));
        assert_eq!(parse_comment_id("999999"), Ok(Some(999_999)));
    }

    #[test]
    fn rejects_non_numeric_ids() {
        for raw in ["", "invalid-id", "12abc", "1.5", " "] {
            assert_eq!(parse_comment_id(raw), Err(ValidationError::InvalidId), "{raw:?}");
        }
    }

    #[test]
    fn out_of_range_integers_name_no_comment() {
        assert_eq!(parse_comment_id("99999999999999999999"), Ok(None));
        assert_eq!(parse_comment_id("-99999999999999999999"), Ok(None));
    }

    #[test]
    fn messages_name_the_violated_rule() {
        assert_eq!(
            ValidationError::AuthorLength.to_string(),
            "Author must be between 2 and 100 characters"
        );
        assert_eq!(
            ValidationError::ContentLength.to_string(),
            "Content must be between 10 and 1000 characters"
        );
        assert_eq!(ValidationError::InvalidId.to_string(), "Invalid comment ID");
    }
}
