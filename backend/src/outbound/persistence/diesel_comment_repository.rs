//! PostgreSQL-backed `CommentRepository` implementation using Diesel ORM.
//!
//! Reads join the profiles table so each comment carries its author's
//! display name; accounts without a profile row fall back to the anonymous
//! placeholder.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{CommentRepository, CommentRepositoryError};
use crate::domain::{ANONYMOUS_AUTHOR, Comment, CommentId, CommentText, IdeaId, UserId};

use super::error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{CommentRow, NewCommentRow};
use super::pool::{DbPool, PoolError};
use super::schema::{comments, profiles};

/// Diesel-backed implementation of the `CommentRepository` port.
#[derive(Clone)]
pub struct DieselCommentRepository {
    pool: DbPool,
}

impl DieselCommentRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> CommentRepositoryError {
    map_basic_pool_error(error, CommentRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> CommentRepositoryError {
    map_basic_diesel_error(
        error,
        CommentRepositoryError::query,
        CommentRepositoryError::connection,
    )
}

fn row_to_comment(row: CommentRow, author: Option<String>) -> Comment {
    Comment {
        id: CommentId(row.id),
        idea_id: IdeaId(row.idea_id),
        user_id: UserId::from_uuid(row.user_id),
        text: row.body,
        author: author.unwrap_or_else(|| ANONYMOUS_AUTHOR.to_owned()),
        created_at: row.created_at,
    }
}

#[async_trait]
impl CommentRepository for DieselCommentRepository {
    async fn list_for_idea(
        &self,
        idea_id: IdeaId,
    ) -> Result<Vec<Comment>, CommentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<(CommentRow, Option<String>)> = comments::table
            .left_join(profiles::table.on(profiles::user_id.eq(comments::user_id)))
            .filter(comments::idea_id.eq(idea_id.0))
            .order(comments::id.asc())
            .select((
                CommentRow::as_select(),
                profiles::display_name.nullable(),
            ))
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(rows
            .into_iter()
            .map(|(row, author)| row_to_comment(row, author))
            .collect())
    }

    async fn find_by_id(
        &self,
        comment_id: CommentId,
    ) -> Result<Option<Comment>, CommentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<(CommentRow, Option<String>)> = comments::table
            .left_join(profiles::table.on(profiles::user_id.eq(comments::user_id)))
            .filter(comments::id.eq(comment_id.0))
            .select((
                CommentRow::as_select(),
                profiles::display_name.nullable(),
            ))
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        Ok(row.map(|(row, author)| row_to_comment(row, author)))
    }

    async fn insert(
        &self,
        idea_id: IdeaId,
        user_id: UserId,
        text: &CommentText,
    ) -> Result<Comment, CommentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let new_row = NewCommentRow {
            idea_id: idea_id.0,
            user_id: *user_id.as_uuid(),
            body: text.as_ref(),
        };

        let row: CommentRow = diesel::insert_into(comments::table)
            .values(&new_row)
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        let author: Option<String> = profiles::table
            .find(user_id.as_uuid())
            .select(profiles::display_name)
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        Ok(row_to_comment(row, author))
    }

    async fn delete(&self, comment_id: CommentId) -> Result<bool, CommentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let deleted = diesel::delete(comments::table.find(comment_id.0))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(deleted > 0)
    }
}
