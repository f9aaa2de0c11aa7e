//! Idea entity and insert-time validation.
//!
//! Ideas are created once and never edited; the only mutation is deletion by
//! the owner. Tags keep their authoring order.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::UserId;

/// Upper bound on tags per idea; extra tags are rejected, not truncated.
pub const MAX_TAGS: usize = 10;
/// Upper bound on title length in characters.
pub const MAX_TITLE_CHARS: usize = 160;
/// Icon used when the author supplies none.
pub const DEFAULT_ICON: &str = "💡";

/// Server-assigned idea identifier, ordered by creation.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema,
)]
#[serde(transparent)]
pub struct IdeaId(pub i64);

impl fmt::Display for IdeaId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A published idea.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Idea {
    /// Creation-ordered identifier.
    pub id: IdeaId,
    /// Short headline.
    pub title: String,
    /// One-paragraph pitch shown on cards.
    pub summary: String,
    /// Markdown body rendered on the detail view.
    pub details: String,
    /// Ordered tag strings.
    pub tags: Vec<String>,
    /// Emoji or short text icon.
    pub icon: String,
    /// Owning user.
    #[schema(value_type = String)]
    pub user_id: UserId,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Validation failures for [`IdeaDraft`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdeaValidationError {
    #[error("title must not be empty")]
    EmptyTitle,
    #[error("title must be at most {MAX_TITLE_CHARS} characters")]
    TitleTooLong,
    #[error("summary must not be empty")]
    EmptySummary,
    #[error("at most {MAX_TAGS} tags are allowed")]
    TooManyTags,
    #[error("tags must not be blank")]
    BlankTag,
}

/// Validated payload for inserting a new idea.
///
/// ## Invariants
/// - `title` and `summary` are trimmed and non-empty; `title` is bounded.
/// - `tags` are trimmed, non-blank, deduplicated case-sensitively, and at
///   most [`MAX_TAGS`] long; their relative order is preserved.
/// - `icon` falls back to [`DEFAULT_ICON`] when blank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdeaDraft {
    title: String,
    summary: String,
    details: String,
    tags: Vec<String>,
    icon: String,
}

impl IdeaDraft {
    /// Validate raw field inputs into a draft.
    ///
    /// # Errors
    /// Returns the first [`IdeaValidationError`] encountered.
    pub fn new(
        title: impl Into<String>,
        summary: impl Into<String>,
        details: impl Into<String>,
        tags: Vec<String>,
        icon: Option<String>,
    ) -> Result<Self, IdeaValidationError> {
        let title = title.into().trim().to_owned();
        if title.is_empty() {
            return Err(IdeaValidationError::EmptyTitle);
        }
        if title.chars().count() > MAX_TITLE_CHARS {
            return Err(IdeaValidationError::TitleTooLong);
        }
        let summary = summary.into().trim().to_owned();
        if summary.is_empty() {
            return Err(IdeaValidationError::EmptySummary);
        }

        let mut seen = Vec::new();
        for tag in tags {
            let tag = tag.trim().to_owned();
            if tag.is_empty() {
                return Err(IdeaValidationError::BlankTag);
            }
            if !seen.contains(&tag) {
                seen.push(tag);
            }
        }
        if seen.len() > MAX_TAGS {
            return Err(IdeaValidationError::TooManyTags);
        }

        let icon = icon
            .map(|raw| raw.trim().to_owned())
            .filter(|raw| !raw.is_empty())
            .unwrap_or_else(|| DEFAULT_ICON.to_owned());

        Ok(Self {
            title,
            summary,
            details: details.into(),
            tags: seen,
            icon,
        })
    }

    /// Headline text.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Card summary text.
    #[must_use]
    pub fn summary(&self) -> &str {
        &self.summary
    }

    /// Markdown body.
    #[must_use]
    pub fn details(&self) -> &str {
        &self.details
    }

    /// Ordered, deduplicated tags.
    #[must_use]
    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    /// Icon, defaulted when the author left it blank.
    #[must_use]
    pub fn icon(&self) -> &str {
        &self.icon
    }
}
