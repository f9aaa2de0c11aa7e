//! Favorite and upvote toggle service.
//!
//! Toggling reads the current state and inverts it, then reports the new
//! state together with the idea's updated count so clients can render
//! without a follow-up fetch. A concurrent toggle that races the insert is
//! absorbed: the unique constraint fires and the reaction is simply treated
//! as already active.

use std::sync::Arc;

use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::ports::{
    IdeaRepository, IdeaRepositoryError, ReactionKind, ReactionRepository,
    ReactionRepositoryError,
};
use crate::domain::{Error, IdeaId, UserId};

/// Result of one toggle: the caller's new state and the idea's new tally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ToggleOutcome {
    /// Whether the caller's reaction is present after the toggle.
    pub active: bool,
    /// Reactions of this kind on the idea after the toggle.
    pub count: i64,
}

/// Reaction service implementing the favorite and upvote toggles.
pub struct ReactionService<R: ?Sized, I: ?Sized> {
    reactions: Arc<R>,
    ideas: Arc<I>,
}

impl<R: ?Sized, I: ?Sized> Clone for ReactionService<R, I> {
    fn clone(&self) -> Self {
        Self {
            reactions: Arc::clone(&self.reactions),
            ideas: Arc::clone(&self.ideas),
        }
    }
}

impl<R: ?Sized, I: ?Sized> ReactionService<R, I> {
    /// Create a new service with the given repositories.
    pub fn new(reactions: Arc<R>, ideas: Arc<I>) -> Self {
        Self { reactions, ideas }
    }
}

impl<R, I> ReactionService<R, I>
where
    R: ReactionRepository + ?Sized,
    I: IdeaRepository + ?Sized,
{
    fn map_reaction_error(error: ReactionRepositoryError) -> Error {
        match error {
            ReactionRepositoryError::Connection { message } => {
                Error::service_unavailable(format!("reaction repository unavailable: {message}"))
            }
            ReactionRepositoryError::Query { message } => {
                Error::internal(format!("reaction repository error: {message}"))
            }
            ReactionRepositoryError::Duplicate { kind, idea_id } => Error::conflict(format!(
                "duplicate {} for idea {idea_id}",
                kind.as_str()
            )),
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

    /// Toggle the caller's reaction on an idea.
    ///
    /// # Errors
    /// Returns `not_found` when the idea does not exist; repository failures
    /// map to `service_unavailable` or `internal_error`.
    pub async fn toggle(
        &self,
        kind: ReactionKind,
        user_id: UserId,
        idea_id: IdeaId,
    ) -> Result<ToggleOutcome, Error> {
        self.ideas
            .find_by_id(idea_id)
            .await
            .map_err(Self::map_idea_error)?
            .ok_or_else(|| Error::not_found(format!("no idea with id {idea_id}")))?;

        let was_active = self
            .reactions
            .is_active(kind, user_id, idea_id)
            .await
            .map_err(Self::map_reaction_error)?;

        let active = if was_active {
            self.reactions
                .remove(kind, user_id, idea_id)
                .await
                .map_err(Self::map_reaction_error)?;
            false
        } else {
            match self.reactions.insert(kind, user_id, idea_id).await {
                // Lost a race against another toggle; the reaction exists.
                Ok(()) | Err(ReactionRepositoryError::Duplicate { .. }) => true,
                Err(error) => return Err(Self::map_reaction_error(error)),
            }
        };

        let count = self
            .reactions
            .count_for_idea(kind, idea_id)
            .await
            .map_err(Self::map_reaction_error)?;

        Ok(ToggleOutcome { active, count })
    }
}
