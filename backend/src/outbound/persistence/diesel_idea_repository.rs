//! PostgreSQL-backed `IdeaRepository` implementation using Diesel ORM.
//!
//! A thin adapter: it translates between Diesel rows and domain types and
//! maps database failures to port errors. Dependent rows (comments and
//! reactions) are removed by `ON DELETE CASCADE`, so deletion is a single
//! statement here.

use std::collections::HashMap;

use async_trait::async_trait;
use diesel::dsl::count_star;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{IdeaRepository, IdeaRepositoryError};
use crate::domain::{EngagementCounts, Idea, IdeaDraft, IdeaId, UserId};

use super::error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{IdeaRow, NewIdeaRow};
use super::pool::{DbPool, PoolError};
use super::schema::{comments, favorites, ideas, upvotes};

/// Diesel-backed implementation of the `IdeaRepository` port.
#[derive(Clone)]
pub struct DieselIdeaRepository {
    pool: DbPool,
}

impl DieselIdeaRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> IdeaRepositoryError {
    map_basic_pool_error(error, IdeaRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> IdeaRepositoryError {
    map_basic_diesel_error(
        error,
        IdeaRepositoryError::query,
        IdeaRepositoryError::connection,
    )
}

fn row_to_idea(row: IdeaRow) -> Idea {
    Idea {
        id: IdeaId(row.id),
        title: row.title,
        summary: row.summary,
        details: row.details,
        tags: row.tags,
        icon: row.icon,
        user_id: UserId::from_uuid(row.user_id),
        created_at: row.created_at,
    }
}

#[async_trait]
impl IdeaRepository for DieselIdeaRepository {
    async fn list(&self) -> Result<Vec<Idea>, IdeaRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<IdeaRow> = ideas::table
            .order(ideas::id.asc())
            .select(IdeaRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(rows.into_iter().map(row_to_idea).collect())
    }

    async fn find_by_id(&self, idea_id: IdeaId) -> Result<Option<Idea>, IdeaRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<IdeaRow> = ideas::table
            .find(idea_id.0)
            .select(IdeaRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        Ok(row.map(row_to_idea))
    }

    async fn insert(
        &self,
        user_id: UserId,
        draft: &IdeaDraft,
    ) -> Result<Idea, IdeaRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let new_row = NewIdeaRow {
            title: draft.title(),
            summary: draft.summary(),
            details: draft.details(),
            tags: draft.tags(),
            icon: draft.icon(),
            user_id: *user_id.as_uuid(),
        };

        let row: IdeaRow = diesel::insert_into(ideas::table)
            .values(&new_row)
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(row_to_idea(row))
    }

    async fn delete(&self, idea_id: IdeaId) -> Result<bool, IdeaRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let deleted = diesel::delete(ideas::table.find(idea_id.0))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(deleted > 0)
    }

    async fn engagement_counts(
        &self,
    ) -> Result<HashMap<IdeaId, EngagementCounts>, IdeaRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let upvote_counts: Vec<(i64, i64)> = upvotes::table
            .group_by(upvotes::idea_id)
            .select((upvotes::idea_id, count_star()))
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        let comment_counts: Vec<(i64, i64)> = comments::table
            .group_by(comments::idea_id)
            .select((comments::idea_id, count_star()))
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        let favorite_counts: Vec<(i64, i64)> = favorites::table
            .group_by(favorites::idea_id)
            .select((favorites::idea_id, count_star()))
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        let mut counts: HashMap<IdeaId, EngagementCounts> = HashMap::new();
        for (idea_id, upvotes) in upvote_counts {
            counts.entry(IdeaId(idea_id)).or_default().upvotes = upvotes;
        }
        for (idea_id, comments) in comment_counts {
            counts.entry(IdeaId(idea_id)).or_default().comments = comments;
        }
        for (idea_id, favorites) in favorite_counts {
            counts.entry(IdeaId(idea_id)).or_default().favorites = favorites;
        }
        Ok(counts)
    }
}
