//! Comment domain service.
//!
//! Comments hang off an idea; every operation first checks the idea exists.
//! Deletion is author-only and that check happens here, never in the client.

use std::sync::Arc;

use crate::domain::ports::{
    CommentRepository, CommentRepositoryError, IdeaRepository, IdeaRepositoryError,
};
use crate::domain::{Comment, CommentId, CommentText, Error, IdeaId, UserId};

/// Comment service implementing the thread operations.
pub struct CommentService<C: ?Sized, I: ?Sized> {
    comments: Arc<C>,
    ideas: Arc<I>,
}

impl<C: ?Sized, I: ?Sized> Clone for CommentService<C, I> {
    fn clone(&self) -> Self {
        Self {
            comments: Arc::clone(&self.comments),
            ideas: Arc::clone(&self.ideas),
        }
    }
}

impl<C: ?Sized, I: ?Sized> CommentService<C, I> {
    /// Create a new service with the given repositories.
    pub fn new(comments: Arc<C>, ideas: Arc<I>) -> Self {
        Self { comments, ideas }
    }
}

impl<C, I> CommentService<C, I>
where
    C: CommentRepository + ?Sized,
    I: IdeaRepository + ?Sized,
{
    fn map_comment_error(error: CommentRepositoryError) -> Error {
        match error {
            CommentRepositoryError::Connection { message } => {
                Error::service_unavailable(format!("comment repository unavailable: {message}"))
            }
            CommentRepositoryError::Query { message } => {
                Error::internal(format!("comment repository error: {message}"))
            }
        }
    }

    fn map_idea_error(error: IdeaRepositoryError) -> Error {
        match error {
            IdeaRepositoryError::Connection { message } => {
                Error::service_unavailable(format!("idea repository unavailable: {message}"))
            }
            IdeaRepositoryError::Query { message } => {
                Error::internal(format!("idea repository error: {message}"))
            }
        }
    }

    async fn require_idea(&self, idea_id: IdeaId) -> Result<(), Error> {
        self.ideas
            .find_by_id(idea_id)
            .await
            .map_err(Self::map_idea_error)?
            .ok_or_else(|| Error::not_found(format!("no idea with id {idea_id}")))?;
        Ok(())
    }

    /// List an idea's comments, oldest first.
    ///
    /// # Errors
    /// Returns `not_found` when the idea does not exist.
    pub async fn list(&self, idea_id: IdeaId) -> Result<Vec<Comment>, Error> {
        self.require_idea(idea_id).await?;
        self.comments
            .list_for_idea(idea_id)
            .await
            .map_err(Self::map_comment_error)
    }

    /// Append a comment to an idea's thread.
    ///
    /// # Errors
    /// Returns `not_found` when the idea does not exist.
    pub async fn add(
        &self,
        user_id: UserId,
        idea_id: IdeaId,
        text: &CommentText,
    ) -> Result<Comment, Error> {
        self.require_idea(idea_id).await?;
        self.comments
            .insert(idea_id, user_id, text)
            .await
            .map_err(Self::map_comment_error)
    }

    /// Delete a comment the caller authored.
    ///
    /// # Errors
    /// Returns `not_found` when the comment does not exist and `forbidden`
    /// when the caller is not its author.
    pub async fn delete(&self, user_id: UserId, comment_id: CommentId) -> Result<(), Error> {
        let comment = self
            .comments
            .find_by_id(comment_id)
            .await
            .map_err(Self::map_comment_error)?
            .ok_or_else(|| Error::not_found(format!("no comment with id {comment_id}")))?;
        if comment.user_id != user_id {
            return Err(Error::forbidden("only the author may delete a comment"));
        }
        self.comments
            .delete(comment_id)
            .await
            .map_err(Self::map_comment_error)?;
        Ok(())
    }
}
