//! AI idea generation endpoint.
//!
//! ```text
//! OPTIONS /api/v1/generate-idea
//! POST    /api/v1/generate-idea {"promptText":"a gardening robot","systemPrompt":"..."}
//! ```
//!
//! Unlike the rest of the API this endpoint authenticates with a bearer
//! token instead of the session cookie, so native clients can call it
//! directly. It also answers CORS preflights itself for the same reason.

use actix_web::http::header::{self, HeaderValue};
use actix_web::{HttpRequest, HttpResponse, ResponseError, post, route, web};
use serde::{Deserialize, Serialize};

use crate::domain::ports::TokenVerifierError;
use crate::domain::{Error, GeneratedIdea, UserId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;

/// Request body for one generation run.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GenerateIdeaRequest {
    /// Free-form description of the idea to generate.
    #[serde(default)]
    pub prompt_text: Option<String>,
    /// Optional system prompt override for this request.
    #[serde(default)]
    pub system_prompt: Option<String>,
}

fn bearer_token(request: &HttpRequest) -> Result<&str, Error> {
    let header_value = request
        .headers()
        .get(header::AUTHORIZATION)
        .ok_or_else(|| Error::unauthorized("missing bearer token"))?;
    let raw = header_value
        .to_str()
        .map_err(|_| Error::unauthorized("malformed authorization header"))?;
    raw.strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or_else(|| Error::unauthorized("missing bearer token"))
}

fn map_token_error(err: TokenVerifierError) -> Error {
    match err {
        TokenVerifierError::InvalidToken => Error::unauthorized("invalid bearer token"),
        TokenVerifierError::Unavailable { message } => {
            Error::service_unavailable(format!("token verification unavailable: {message}"))
        }
    }
}

// Every response from this endpoint carries these, error statuses included:
// a cross-origin caller cannot read the 401 body asking it to sign in
// unless the browser is allowed to expose it.
fn with_cors(mut response: HttpResponse) -> HttpResponse {
    let headers = response.headers_mut();
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static("*"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static("POST, OPTIONS"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static("Content-Type, Authorization"),
    );
    response
}

/// Answer the CORS preflight for the generation endpoint.
#[utoipa::path(
    options,
    path = "/api/v1/generate-idea",
    responses(
        (status = 204, description = "Preflight accepted")
    ),
    tags = ["generation"],
    operation_id = "generateIdeaPreflight",
    security([])
)]
#[route("/generate-idea", method = "OPTIONS")]
pub async fn generate_idea_preflight() -> HttpResponse {
    with_cors(HttpResponse::NoContent().finish())
}

/// Generate a structured idea from a free-form prompt.
///
/// Provider failures degrade to a local template; the response `source`
/// field says which path answered.
#[utoipa::path(
    post,
    path = "/api/v1/generate-idea",
    request_body = GenerateIdeaRequest,
    responses(
        (status = 200, description = "Generated idea", body = GeneratedIdea),
        (status = 400, description = "Missing prompt text", body = Error),
        (status = 401, description = "Missing or invalid bearer token", body = Error),
        (status = 503, description = "Token verification unavailable", body = Error)
    ),
    tags = ["generation"],
    operation_id = "generateIdea",
    security(("BearerToken" = []))
)]
#[post("/generate-idea")]
pub async fn generate_idea(
    state: web::Data<HttpState>,
    request: HttpRequest,
    payload: web::Json<GenerateIdeaRequest>,
) -> HttpResponse {
    with_cors(match run_generation(state.get_ref(), &request, payload.into_inner()).await {
        Ok(idea) => HttpResponse::Ok().json(idea),
        Err(err) => err.error_response(),
    })
}

async fn run_generation(
    state: &HttpState,
    request: &HttpRequest,
    payload: GenerateIdeaRequest,
) -> ApiResult<GeneratedIdea> {
    let token = bearer_token(request)?;
    let _caller: UserId = state
        .tokens
        .verify(token)
        .await
        .map_err(map_token_error)?;

    let idea = state
        .generation
        .generate(
            payload.prompt_text.as_deref().unwrap_or_default(),
            payload.system_prompt.as_deref(),
        )
        .await?;
    Ok(idea)
}
