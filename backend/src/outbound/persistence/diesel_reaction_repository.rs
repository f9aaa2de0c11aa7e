//! PostgreSQL-backed `ReactionRepository` implementation using Diesel ORM.
//!
//! Favorites and upvotes live in separate tables with the same shape, each
//! carrying a unique constraint on (user_id, idea_id). The constraint is the
//! source of truth for "at most one reaction per user per idea"; a violated
//! insert surfaces as the port's `Duplicate` error.

use std::collections::HashSet;

use async_trait::async_trait;
use diesel::dsl::count_star;
use diesel::prelude::*;
use diesel::result::DatabaseErrorKind;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{ReactionKind, ReactionRepository, ReactionRepositoryError};
use crate::domain::{IdeaId, UserId};

use super::error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{NewFavoriteRow, NewUpvoteRow};
use super::pool::{DbPool, PoolError};
use super::schema::{favorites, upvotes};

/// Diesel-backed implementation of the `ReactionRepository` port.
#[derive(Clone)]
pub struct DieselReactionRepository {
    pool: DbPool,
}

impl DieselReactionRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> ReactionRepositoryError {
    map_basic_pool_error(error, ReactionRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> ReactionRepositoryError {
    map_basic_diesel_error(
        error,
        ReactionRepositoryError::query,
        ReactionRepositoryError::connection,
    )
}

fn map_insert_error(
    error: diesel::result::Error,
    kind: ReactionKind,
    idea_id: IdeaId,
) -> ReactionRepositoryError {
    if matches!(
        error,
        diesel::result::Error::DatabaseError(DatabaseErrorKind::UniqueViolation, _)
    ) {
        return ReactionRepositoryError::duplicate(kind, idea_id);
    }
    map_diesel_error(error)
}

#[async_trait]
impl ReactionRepository for DieselReactionRepository {
    async fn is_active(
        &self,
        kind: ReactionKind,
        user_id: UserId,
        idea_id: IdeaId,
    ) -> Result<bool, ReactionRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let uuid = *user_id.as_uuid();

        let count: i64 = match kind {
            ReactionKind::Favorite => {
                favorites::table
                    .filter(favorites::user_id.eq(uuid))
                    .filter(favorites::idea_id.eq(idea_id.0))
                    .select(count_star())
                    .first(&mut conn)
                    .await
            }
            ReactionKind::Upvote => {
                upvotes::table
                    .filter(upvotes::user_id.eq(uuid))
                    .filter(upvotes::idea_id.eq(idea_id.0))
                    .select(count_star())
                    .first(&mut conn)
                    .await
            }
        }
        .map_err(map_diesel_error)?;

        Ok(count > 0)
    }

    async fn insert(
        &self,
        kind: ReactionKind,
        user_id: UserId,
        idea_id: IdeaId,
    ) -> Result<(), ReactionRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let uuid = *user_id.as_uuid();

        match kind {
            ReactionKind::Favorite => {
                diesel::insert_into(favorites::table)
                    .values(NewFavoriteRow {
                        user_id: uuid,
                        idea_id: idea_id.0,
                    })
                    .execute(&mut conn)
                    .await
            }
            ReactionKind::Upvote => {
                diesel::insert_into(upvotes::table)
                    .values(NewUpvoteRow {
                        user_id: uuid,
                        idea_id: idea_id.0,
                    })
                    .execute(&mut conn)
                    .await
            }
        }
        .map(|_| ())
        .map_err(|err| map_insert_error(err, kind, idea_id))
    }

    async fn remove(
        &self,
        kind: ReactionKind,
        user_id: UserId,
        idea_id: IdeaId,
    ) -> Result<(), ReactionRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let uuid = *user_id.as_uuid();

        match kind {
            ReactionKind::Favorite => {
                diesel::delete(
                    favorites::table
                        .filter(favorites::user_id.eq(uuid))
                        .filter(favorites::idea_id.eq(idea_id.0)),
                )
                .execute(&mut conn)
                .await
            }
            ReactionKind::Upvote => {
                diesel::delete(
                    upvotes::table
                        .filter(upvotes::user_id.eq(uuid))
                        .filter(upvotes::idea_id.eq(idea_id.0)),
                )
                .execute(&mut conn)
                .await
            }
        }
        .map(|_| ())
        .map_err(map_diesel_error)
    }

    async fn count_for_idea(
        &self,
        kind: ReactionKind,
        idea_id: IdeaId,
    ) -> Result<i64, ReactionRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        match kind {
            ReactionKind::Favorite => {
                favorites::table
                    .filter(favorites::idea_id.eq(idea_id.0))
                    .select(count_star())
                    .first(&mut conn)
                    .await
            }
            ReactionKind::Upvote => {
                upvotes::table
                    .filter(upvotes::idea_id.eq(idea_id.0))
                    .select(count_star())
                    .first(&mut conn)
                    .await
            }
        }
        .map_err(map_diesel_error)
    }

    async fn idea_ids_for_user(
        &self,
        kind: ReactionKind,
        user_id: UserId,
    ) -> Result<HashSet<IdeaId>, ReactionRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let uuid = *user_id.as_uuid();

        let ids: Vec<i64> = match kind {
            ReactionKind::Favorite => {
                favorites::table
                    .filter(favorites::user_id.eq(uuid))
                    .select(favorites::idea_id)
                    .load(&mut conn)
                    .await
            }
            ReactionKind::Upvote => {
                upvotes::table
                    .filter(upvotes::user_id.eq(uuid))
                    .select(upvotes::idea_id)
                    .load(&mut conn)
                    .await
            }
        }
        .map_err(map_diesel_error)?;

        Ok(ids.into_iter().map(IdeaId).collect())
    }
}
