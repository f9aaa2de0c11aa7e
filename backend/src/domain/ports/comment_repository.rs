//! Port for comment persistence.
//!
//! Adapters return comments joined with the author's display name so the
//! thread view never needs a second lookup; accounts without a profile row
//! surface as [`crate::domain::ANONYMOUS_AUTHOR`].

use async_trait::async_trait;

use crate::domain::{Comment, CommentId, CommentText, IdeaId, UserId};

/// Errors raised by comment repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommentRepositoryError {
    /// Repository connection could not be established.
    #[error("comment repository connection failed: {message}")]
    Connection { message: String },
    /// Query or mutation failed during execution.
    #[error("comment repository query failed: {message}")]
    Query { message: String },
}

impl CommentRepositoryError {
    /// Build a [`CommentRepositoryError::Connection`] error.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Build a [`CommentRepositoryError::Query`] error.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }
}

/// Port for comment storage and retrieval.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CommentRepository: Send + Sync {
    /// List comments on an idea, oldest first.
    async fn list_for_idea(&self, idea_id: IdeaId)
    -> Result<Vec<Comment>, CommentRepositoryError>;

    /// Fetch a single comment.
    ///
    /// Returns `None` when no comment has this id.
    async fn find_by_id(
        &self,
        comment_id: CommentId,
    ) -> Result<Option<Comment>, CommentRepositoryError>;

    /// Append a comment and return the stored row with its author name.
    async fn insert(
        &self,
        idea_id: IdeaId,
        user_id: UserId,
        text: &CommentText,
    ) -> Result<Comment, CommentRepositoryError>;

    /// Delete a comment.
    ///
    /// Returns `false` when the comment did not exist. The author-only rule
    /// is enforced by the caller.
    async fn delete(&self, comment_id: CommentId) -> Result<bool, CommentRepositoryError>;
}

/// Fixture implementation for testing without a real database.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureCommentRepository;

#[async_trait]
impl CommentRepository for FixtureCommentRepository {
    async fn list_for_idea(
        &self,
        _idea_id: IdeaId,
    ) -> Result<Vec<Comment>, CommentRepositoryError> {
        Ok(Vec::new())
    }

    async fn find_by_id(
        &self,
        _comment_id: CommentId,
    ) -> Result<Option<Comment>, CommentRepositoryError> {
        Ok(None)
    }

    async fn insert(
        &self,
        idea_id: IdeaId,
        user_id: UserId,
        text: &CommentText,
    ) -> Result<Comment, CommentRepositoryError> {
        Ok(Comment {
            id: CommentId(1),
            idea_id,
            user_id,
            text: text.as_ref().to_owned(),
            author: crate::domain::ANONYMOUS_AUTHOR.to_owned(),
            created_at: chrono::Utc::now(),
        })
    }

    async fn delete(&self, _comment_id: CommentId) -> Result<bool, CommentRepositoryError> {
        Ok(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn fixture_insert_uses_anonymous_author() {
        let repo = FixtureCommentRepository;
        let text = CommentText::new("nice").expect("valid text");
        let comment = repo
            .insert(IdeaId(3), UserId::random(), &text)
            .await
            .expect("fixture insert succeeds");
        assert_eq!(comment.author, crate::domain::ANONYMOUS_AUTHOR);
        assert_eq!(comment.idea_id, IdeaId(3));
    }

    #[tokio::test]
    async fn fixture_lookup_returns_none() {
        let repo = FixtureCommentRepository;
        let found = repo
            .find_by_id(CommentId(9))
            .await
            .expect("fixture lookup succeeds");
        assert!(found.is_none());
    }
}
