//! Idea API handlers: the browse feed, CRUD, and share links.
//!
//! ```text
//! GET    /api/v1/ideas?tags=AI,SaaS&q=market&mode=trending
//! POST   /api/v1/ideas {"title":"...","summary":"...","details":"...","tags":[],"icon":"🚀"}
//! GET    /api/v1/ideas/{id}
//! DELETE /api/v1/ideas/{id}
//! GET    /api/v1/ideas/{id}/share-url
//! ```
//!
//! The feed endpoint works for anonymous callers; the viewer-specific
//! `favorited`/`upvoted` flags are simply false without a session.

use std::collections::BTreeSet;

use actix_web::{HttpResponse, delete, get, post, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::domain::{
    EngagementCounts, Error, FeedFilter, FeedMode, FeedSnapshot, Idea, IdeaDraft, IdeaId,
    IdeaValidationError, UserId,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Query parameters accepted by the feed endpoint.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedQuery {
    /// Comma-separated tag list; every tag must match.
    #[serde(default)]
    pub tags: Option<String>,
    /// Case-insensitive search needle.
    #[serde(default)]
    pub q: Option<String>,
    /// Feed slice selector; defaults to `all`.
    #[serde(default)]
    pub mode: Option<FeedMode>,
}

impl FeedQuery {
    fn into_filter(self) -> FeedFilter {
        let tags: BTreeSet<String> = self
            .tags
            .as_deref()
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|tag| !tag.is_empty())
            .map(str::to_owned)
            .collect();
        FeedFilter::new(tags, self.q.as_deref(), self.mode.unwrap_or_default())
    }
}

/// Feed card: an idea joined with its tallies and the viewer's reactions.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct IdeaCard {
    pub id: IdeaId,
    pub title: String,
    pub summary: String,
    pub details: String,
    pub tags: Vec<String>,
    pub icon: String,
    #[schema(value_type = String)]
    pub user_id: UserId,
    pub created_at: DateTime<Utc>,
    pub upvotes: i64,
    pub comments: i64,
    pub favorites: i64,
    /// Whether the viewer has favorited this idea.
    pub favorited: bool,
    /// Whether the viewer has upvoted this idea.
    pub upvoted: bool,
}

impl IdeaCard {
    fn from_snapshot_entry(idea: Idea, snapshot: &FeedSnapshot) -> Self {
        let counts: EngagementCounts = snapshot.counts.get(&idea.id).copied().unwrap_or_default();
        Self {
            favorited: snapshot.viewer_favorites.contains(&idea.id),
            upvoted: snapshot.viewer_upvotes.contains(&idea.id),
            upvotes: counts.upvotes,
            comments: counts.comments,
            favorites: counts.favorites,
            id: idea.id,
            title: idea.title,
            summary: idea.summary,
            details: idea.details,
            tags: idea.tags,
            icon: idea.icon,
            user_id: idea.user_id,
            created_at: idea.created_at,
        }
    }
}

/// Request body for publishing an idea.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateIdeaRequest {
    pub title: String,
    pub summary: String,
    #[serde(default)]
    pub details: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub icon: Option<String>,
}

/// Share link response.
#[derive(Debug, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ShareUrlResponse {
    /// Canonical URL for this idea, always `<base>?idea=<id>`.
    pub url: String,
}

fn map_idea_validation_error(err: IdeaValidationError) -> Error {
    let (field, code) = match err {
        IdeaValidationError::EmptyTitle => ("title", "empty_title"),
        IdeaValidationError::TitleTooLong => ("title", "title_too_long"),
        IdeaValidationError::EmptySummary => ("summary", "empty_summary"),
        IdeaValidationError::TooManyTags => ("tags", "too_many_tags"),
        IdeaValidationError::BlankTag => ("tags", "blank_tag"),
    };
    Error::invalid_request(err.to_string())
        .with_details(json!({ "field": field, "code": code }))
}

/// Browse the idea feed with optional tag, search, and mode filters.
#[utoipa::path(
    get,
    path = "/api/v1/ideas",
    params(
        ("tags" = Option<String>, Query, description = "Comma-separated tags; all must match"),
        ("q" = Option<String>, Query, description = "Case-insensitive search text"),
        ("mode" = Option<String>, Query, description = "all | favorites | mine | trending")
    ),
    responses(
        (status = 200, description = "Feed cards", body = [IdeaCard])
    ),
    tags = ["ideas"],
    operation_id = "listIdeas",
    security([])
)]
#[get("/ideas")]
pub async fn list_ideas(
    state: web::Data<HttpState>,
    session: SessionContext,
    query: web::Query<FeedQuery>,
) -> ApiResult<web::Json<Vec<IdeaCard>>> {
    let viewer = session.user_id()?;
    let filter = query.into_inner().into_filter();
    let snapshot = state.ideas.feed(&filter, viewer).await;
    let cards = snapshot
        .ideas
        .clone()
        .into_iter()
        .map(|idea| IdeaCard::from_snapshot_entry(idea, &snapshot))
        .collect();
    Ok(web::Json(cards))
}

/// Publish a new idea owned by the caller.
#[utoipa::path(
    post,
    path = "/api/v1/ideas",
    request_body = CreateIdeaRequest,
    responses(
        (status = 201, description = "Stored idea", body = Idea),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Not signed in", body = Error)
    ),
    tags = ["ideas"],
    operation_id = "createIdea"
)]
#[post("/ideas")]
pub async fn create_idea(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<CreateIdeaRequest>,
) -> ApiResult<HttpResponse> {
    let user_id = session.require_user_id()?;
    let payload = payload.into_inner();
    let draft = IdeaDraft::new(
        payload.title,
        payload.summary,
        payload.details,
        payload.tags,
        payload.icon,
    )
    .map_err(map_idea_validation_error)?;
    let idea = state.ideas.create(user_id, &draft).await?;
    Ok(HttpResponse::Created().json(idea))
}

/// Fetch one idea for the detail view.
#[utoipa::path(
    get,
    path = "/api/v1/ideas/{id}",
    params(("id" = i64, Path, description = "Idea id")),
    responses(
        (status = 200, description = "Idea", body = Idea),
        (status = 404, description = "No such idea", body = Error)
    ),
    tags = ["ideas"],
    operation_id = "getIdea",
    security([])
)]
#[get("/ideas/{id}")]
pub async fn get_idea(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
) -> ApiResult<web::Json<Idea>> {
    let idea = state.ideas.get(IdeaId(path.into_inner())).await?;
    Ok(web::Json(idea))
}

/// Delete an idea the caller owns.
#[utoipa::path(
    delete,
    path = "/api/v1/ideas/{id}",
    params(("id" = i64, Path, description = "Idea id")),
    responses(
        (status = 204, description = "Idea deleted"),
        (status = 401, description = "Not signed in", body = Error),
        (status = 403, description = "Caller does not own this idea", body = Error),
        (status = 404, description = "No such idea", body = Error)
    ),
    tags = ["ideas"],
    operation_id = "deleteIdea"
)]
#[delete("/ideas/{id}")]
pub async fn delete_idea(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    let user_id = session.require_user_id()?;
    state
        .ideas
        .delete(user_id, IdeaId(path.into_inner()))
        .await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Build the canonical share link for an idea.
#[utoipa::path(
    get,
    path = "/api/v1/ideas/{id}/share-url",
    params(("id" = i64, Path, description = "Idea id")),
    responses(
        (status = 200, description = "Share link", body = ShareUrlResponse),
        (status = 404, description = "No such idea", body = Error)
    ),
    tags = ["ideas"],
    operation_id = "shareIdea",
    security([])
)]
#[get("/ideas/{id}/share-url")]
pub async fn share_idea(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
) -> ApiResult<web::Json<ShareUrlResponse>> {
    let link = state
        .ideas
        .share_link(&state.share_base, IdeaId(path.into_inner()))
        .await?;
    Ok(web::Json(ShareUrlResponse {
        url: link.into(),
    }))
}
