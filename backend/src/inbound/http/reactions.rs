//! Favorite and upvote toggle handlers.
//!
//! ```text
//! POST /api/v1/ideas/{id}/favorite
//! POST /api/v1/ideas/{id}/upvote
//! ```
//!
//! Both endpoints respond with the caller's new state and the idea's updated
//! tally so clients can render without a follow-up fetch.

use actix_web::{post, web};

use crate::domain::ports::ReactionKind;
use crate::domain::{Error, IdeaId, ToggleOutcome};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Toggle the caller's favorite on an idea.
#[utoipa::path(
    post,
    path = "/api/v1/ideas/{id}/favorite",
    params(("id" = i64, Path, description = "Idea id")),
    responses(
        (status = 200, description = "New favorite state and count", body = ToggleOutcome),
        (status = 401, description = "Not signed in", body = Error),
        (status = 404, description = "No such idea", body = Error)
    ),
    tags = ["reactions"],
    operation_id = "toggleFavorite"
)]
#[post("/ideas/{id}/favorite")]
pub async fn toggle_favorite(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<i64>,
) -> ApiResult<web::Json<ToggleOutcome>> {
    let user_id = session.require_user_id()?;
    let outcome = state
        .reactions
        .toggle(ReactionKind::Favorite, user_id, IdeaId(path.into_inner()))
        .await?;
    Ok(web::Json(outcome))
}

/// Toggle the caller's upvote on an idea.
#[utoipa::path(
    post,
    path = "/api/v1/ideas/{id}/upvote",
    params(("id" = i64, Path, description = "Idea id")),
    responses(
        (status = 200, description = "New upvote state and count", body = ToggleOutcome),
        (status = 401, description = "Not signed in", body = Error),
        (status = 404, description = "No such idea", body = Error)
    ),
    tags = ["reactions"],
    operation_id = "toggleUpvote"
)]
#[post("/ideas/{id}/upvote")]
pub async fn toggle_upvote(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<i64>,
) -> ApiResult<web::Json<ToggleOutcome>> {
    let user_id = session.require_user_id()?;
    let outcome = state
        .reactions
        .toggle(ReactionKind::Upvote, user_id, IdeaId(path.into_inner()))
        .await?;
    Ok(web::Json(outcome))
}
