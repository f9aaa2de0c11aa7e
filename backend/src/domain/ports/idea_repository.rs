//! Port for idea persistence.
//!
//! The [`IdeaRepository`] trait defines the contract for storing and listing
//! ideas, plus the per-idea engagement tallies the feed needs. Adapters
//! implement this trait to provide durable storage.

use std::collections::HashMap;

use async_trait::async_trait;

use crate::domain::{EngagementCounts, Idea, IdeaDraft, IdeaId, UserId};

/// Errors raised by idea repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdeaRepositoryError {
    /// Repository connection could not be established.
    #[error("idea repository connection failed: {message}")]
    Connection { message: String },
    /// Query or mutation failed during execution.
    #[error("idea repository query failed: {message}")]
    Query { message: String },
}

impl IdeaRepositoryError {
    /// Build a [`IdeaRepositoryError::Connection`] error.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Build a [`IdeaRepositoryError::Query`] error.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }
}

/// Port for idea storage and retrieval.
///
/// Listing returns ideas in creation order (id ascending); the feed pipeline
/// relies on that order for its non-trending modes.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IdeaRepository: Send + Sync {
    /// List every idea in creation order.
    async fn list(&self) -> Result<Vec<Idea>, IdeaRepositoryError>;

    /// Fetch a single idea.
    ///
    /// Returns `None` when no idea has this id.
    async fn find_by_id(&self, idea_id: IdeaId) -> Result<Option<Idea>, IdeaRepositoryError>;

    /// Insert a validated draft owned by `user_id` and return the stored row.
    async fn insert(
        &self,
        user_id: UserId,
        draft: &IdeaDraft,
    ) -> Result<Idea, IdeaRepositoryError>;

    /// Delete an idea and its dependent rows.
    ///
    /// Returns `false` when the idea did not exist. Ownership is checked by
    /// the caller, not here.
    async fn delete(&self, idea_id: IdeaId) -> Result<bool, IdeaRepositoryError>;

    /// Upvote, comment, and favorite tallies for every idea that has any.
    ///
    /// Ideas absent from the map have zero engagement.
    async fn engagement_counts(
        &self,
    ) -> Result<HashMap<IdeaId, EngagementCounts>, IdeaRepositoryError>;
}

/// Fixture implementation for testing without a real database.
///
/// Lookups return empty results and mutations are discarded, except
/// [`IdeaRepository::insert`], which echoes the draft back with a fixed id.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureIdeaRepository;

#[async_trait]
impl IdeaRepository for FixtureIdeaRepository {
    async fn list(&self) -> Result<Vec<Idea>, IdeaRepositoryError> {
        Ok(Vec::new())
    }

    async fn find_by_id(&self, _idea_id: IdeaId) -> Result<Option<Idea>, IdeaRepositoryError> {
        Ok(None)
    }

    async fn insert(
        &self,
        user_id: UserId,
        draft: &IdeaDraft,
    ) -> Result<Idea, IdeaRepositoryError> {
        Ok(Idea {
            id: IdeaId(1),
            title: draft.title().to_owned(),
            summary: draft.summary().to_owned(),
            details: draft.details().to_owned(),
            tags: draft.tags().to_vec(),
            icon: draft.icon().to_owned(),
            user_id,
            created_at: chrono::Utc::now(),
        })
    }

    async fn delete(&self, _idea_id: IdeaId) -> Result<bool, IdeaRepositoryError> {
        Ok(false)
    }

    async fn engagement_counts(
        &self,
    ) -> Result<HashMap<IdeaId, EngagementCounts>, IdeaRepositoryError> {
        Ok(HashMap::new())
    }
}
