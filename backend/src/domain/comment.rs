//! Comment entity.
//!
//! Comments are append-only; the only mutation is deletion by their author.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{IdeaId, UserId};

/// Server-assigned comment identifier.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema,
)]
#[serde(transparent)]
pub struct CommentId(pub i64);

impl fmt::Display for CommentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A comment on an idea, joined with its author's display name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: CommentId,
    pub idea_id: IdeaId,
    #[schema(value_type = String)]
    pub user_id: UserId,
    pub text: String,
    /// Author display name, or a placeholder when no profile exists.
    pub author: String,
    pub created_at: DateTime<Utc>,
}

/// Placeholder author shown when the commenting account has no profile row.
pub const ANONYMOUS_AUTHOR: &str = "Anonymous User";

/// Validation failure for comment bodies.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommentValidationError {
    #[error("comment text must not be empty")]
    EmptyText,
}

/// Validated comment body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentText(String);

impl CommentText {
    /// Trim and validate a comment body.
    ///
    /// # Errors
    /// Returns [`CommentValidationError::EmptyText`] for blank input.
    pub fn new(raw: impl Into<String>) -> Result<Self, CommentValidationError> {
        let trimmed = raw.into().trim().to_owned();
        if trimmed.is_empty() {
            return Err(CommentValidationError::EmptyText);
        }
        Ok(Self(trimmed))
    }
}

impl AsRef<str> for CommentText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<CommentText> for String {
    fn from(value: CommentText) -> Self {
        value.0
    }
}
