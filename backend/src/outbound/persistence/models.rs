//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain. They exist solely to satisfy Diesel's
//! type requirements for queries and mutations.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::{comments, credentials, favorites, ideas, profiles, upvotes};

/// Row struct for reading from the profiles table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = profiles)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ProfileRow {
    pub user_id: Uuid,
    pub display_name: String,
    pub bio: Option<String>,
}

/// Insertable/changeset struct for upserting profiles.
#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = profiles)]
pub(crate) struct ProfileUpsert<'a> {
    pub user_id: Uuid,
    pub display_name: &'a str,
    pub bio: Option<&'a str>,
}

/// Row struct for reading from the credentials table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = credentials)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct CredentialRow {
    pub user_id: Uuid,
    pub email: String,
    pub password_hash: String,
    pub salt: String,
}

/// Insertable struct for registering a new credential.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = credentials)]
pub(crate) struct NewCredentialRow<'a> {
    pub user_id: Uuid,
    pub email: &'a str,
    pub password_hash: &'a str,
    pub salt: &'a str,
}

/// Row struct for reading from the ideas table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = ideas)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct IdeaRow {
    pub id: i64,
    pub title: String,
    pub summary: String,
    pub details: String,
    pub tags: Vec<String>,
    pub icon: String,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
}

/// Insertable struct for publishing a new idea.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = ideas)]
pub(crate) struct NewIdeaRow<'a> {
    pub title: &'a str,
    pub summary: &'a str,
    pub details: &'a str,
    pub tags: &'a [String],
    pub icon: &'a str,
    pub user_id: Uuid,
}

/// Row struct for reading from the comments table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = comments)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct CommentRow {
    pub id: i64,
    pub idea_id: i64,
    pub user_id: Uuid,
    pub body: String,
    pub created_at: DateTime<Utc>,
}

/// Insertable struct for appending a comment.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = comments)]
pub(crate) struct NewCommentRow<'a> {
    pub idea_id: i64,
    pub user_id: Uuid,
    pub body: &'a str,
}

/// Insertable struct for recording a favorite.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = favorites)]
pub(crate) struct NewFavoriteRow {
    pub user_id: Uuid,
    pub idea_id: i64,
}

/// Insertable struct for recording an upvote.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = upvotes)]
pub(crate) struct NewUpvoteRow {
    pub user_id: Uuid,
    pub idea_id: i64,
}
