//! Comment API handlers.
//!
//! ```text
//! GET    /api/v1/ideas/{id}/comments
//! POST   /api/v1/ideas/{id}/comments {"text":"great idea"}
//! DELETE /api/v1/comments/{id}
//! ```

use actix_web::{HttpResponse, delete, get, post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::domain::{Comment, CommentId, CommentText, Error, IdeaId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Request body for posting a comment.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CommentRequest {
    pub text: String,
}

/// List an idea's comments, oldest first.
#[utoipa::path(
    get,
    path = "/api/v1/ideas/{id}/comments",
    params(("id" = i64, Path, description = "Idea id")),
    responses(
        (status = 200, description = "Comment thread", body = [Comment]),
        (status = 404, description = "No such idea", body = Error)
    ),
    tags = ["comments"],
    operation_id = "listComments",
    security([])
)]
#[get("/ideas/{id}/comments")]
pub async fn list_comments(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
) -> ApiResult<web::Json<Vec<Comment>>> {
    let comments = state.comments.list(IdeaId(path.into_inner())).await?;
    Ok(web::Json(comments))
}

/// Append a comment to an idea's thread.
#[utoipa::path(
    post,
    path = "/api/v1/ideas/{id}/comments",
    params(("id" = i64, Path, description = "Idea id")),
    request_body = CommentRequest,
    responses(
        (status = 201, description = "Stored comment", body = Comment),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Not signed in", body = Error),
        (status = 404, description = "No such idea", body = Error)
    ),
    tags = ["comments"],
    operation_id = "addComment"
)]
#[post("/ideas/{id}/comments")]
pub async fn add_comment(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<i64>,
    payload: web::Json<CommentRequest>,
) -> ApiResult<HttpResponse> {
    let user_id = session.require_user_id()?;
    let text = CommentText::new(payload.into_inner().text).map_err(|err| {
        Error::invalid_request(err.to_string())
            .with_details(json!({ "field": "text", "code": "empty_text" }))
    })?;
    let comment = state
        .comments
        .add(user_id, IdeaId(path.into_inner()), &text)
        .await?;
    Ok(HttpResponse::Created().json(comment))
}

/// Delete a comment the caller authored.
#[utoipa::path(
    delete,
    path = "/api/v1/comments/{id}",
    params(("id" = i64, Path, description = "Comment id")),
    responses(
        (status = 204, description = "Comment deleted"),
        (status = 401, description = "Not signed in", body = Error),
        (status = 403, description = "Caller did not author this comment", body = Error),
        (status = 404, description = "No such comment", body = Error)
    ),
    tags = ["comments"],
    operation_id = "deleteComment"
)]
#[delete("/comments/{id}")]
pub async fn delete_comment(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    let user_id = session.require_user_id()?;
    state
        .comments
        .delete(user_id, CommentId(path.into_inner()))
        .await?;
    Ok(HttpResponse::NoContent().finish())
}
