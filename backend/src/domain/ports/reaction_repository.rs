//! Port for favorite and upvote persistence.
//!
//! Both reactions share one contract: a reaction either exists for a
//! (user, idea) pair or it does not. Adapters back each kind with its own
//! table carrying a unique constraint on the pair, so concurrent toggles
//! cannot double-insert.

use std::collections::HashSet;

use async_trait::async_trait;

use crate::domain::{IdeaId, UserId};

/// Which reaction a call operates on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReactionKind {
    Favorite,
    Upvote,
}

impl ReactionKind {
    /// Lower-case noun used in log fields and error messages.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Favorite => "favorite",
            Self::Upvote => "upvote",
        }
    }
}

/// Errors raised by reaction repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReactionRepositoryError {
    /// Repository connection could not be established.
    #[error("reaction repository connection failed: {message}")]
    Connection { message: String },
    /// Query or mutation failed during execution.
    #[error("reaction repository query failed: {message}")]
    Query { message: String },
    /// The reaction already exists for this (user, idea) pair.
    #[error("duplicate {} for idea {idea_id}", kind.as_str())]
    Duplicate { kind: ReactionKind, idea_id: IdeaId },
}

impl ReactionRepositoryError {
    /// Build a [`ReactionRepositoryError::Connection`] error.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Build a [`ReactionRepositoryError::Query`] error.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }

    /// Build a [`ReactionRepositoryError::Duplicate`] error.
    #[must_use]
    pub fn duplicate(kind: ReactionKind, idea_id: IdeaId) -> Self {
        Self::Duplicate { kind, idea_id }
    }
}

/// Port for reaction storage.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReactionRepository: Send + Sync {
    /// Whether the user currently has this reaction on the idea.
    async fn is_active(
        &self,
        kind: ReactionKind,
        user_id: UserId,
        idea_id: IdeaId,
    ) -> Result<bool, ReactionRepositoryError>;

    /// Record the reaction.
    ///
    /// Fails with [`ReactionRepositoryError::Duplicate`] when the unique
    /// constraint rejects a second insert for the same pair.
    async fn insert(
        &self,
        kind: ReactionKind,
        user_id: UserId,
        idea_id: IdeaId,
    ) -> Result<(), ReactionRepositoryError>;

    /// Remove the reaction. Removing an absent reaction is a no-op.
    async fn remove(
        &self,
        kind: ReactionKind,
        user_id: UserId,
        idea_id: IdeaId,
    ) -> Result<(), ReactionRepositoryError>;

    /// Count reactions of this kind on an idea.
    async fn count_for_idea(
        &self,
        kind: ReactionKind,
        idea_id: IdeaId,
    ) -> Result<i64, ReactionRepositoryError>;

    /// Ids of every idea the user has this reaction on.
    async fn idea_ids_for_user(
        &self,
        kind: ReactionKind,
        user_id: UserId,
    ) -> Result<HashSet<IdeaId>, ReactionRepositoryError>;
}

/// Fixture implementation for testing without a real database.
///
/// Reports no reactions anywhere and accepts every mutation.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureReactionRepository;

#[async_trait]
impl ReactionRepository for FixtureReactionRepository {
    async fn is_active(
        &self,
        _kind: ReactionKind,
        _user_id: UserId,
        _idea_id: IdeaId,
    ) -> Result<bool, ReactionRepositoryError> {
        Ok(false)
    }

    async fn insert(
        &self,
        _kind: ReactionKind,
        _user_id: UserId,
        _idea_id: IdeaId,
    ) -> Result<(), ReactionRepositoryError> {
        Ok(())
    }

    async fn remove(
        &self,
        _kind: ReactionKind,
        _user_id: UserId,
        _idea_id: IdeaId,
    ) -> Result<(), ReactionRepositoryError> {
        Ok(())
    }

    async fn count_for_idea(
        &self,
        _kind: ReactionKind,
        _idea_id: IdeaId,
    ) -> Result<i64, ReactionRepositoryError> {
        Ok(0)
    }

    async fn idea_ids_for_user(
        &self,
        _kind: ReactionKind,
        _user_id: UserId,
    ) -> Result<HashSet<IdeaId>, ReactionRepositoryError> {
        Ok(HashSet::new())
    }
}
