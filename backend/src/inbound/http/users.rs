//! Account API handlers: login, signup, logout, and profile access.
//!
//! ```text
//! POST /api/v1/login  {"email":"ada@example.com","password":"hunter2"}
//! POST /api/v1/signup {"email":"ada@example.com","password":"hunter2","displayName":"Ada"}
//! POST /api/v1/logout
//! GET  /api/v1/users/me
//! PUT  /api/v1/users/me {"displayName":"Ada Lovelace","bio":"..."}
//! ```

use actix_web::{HttpResponse, get, post, put, web};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::domain::{
    Credentials, CredentialsValidationError, DisplayName, Error, Profile, UserValidationError,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Login request body for `POST /api/v1/login`.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Signup request body for `POST /api/v1/signup`.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    pub email: String,
    pub password: String,
    pub display_name: String,
}

/// Profile update body for `PUT /api/v1/users/me`.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdateRequest {
    pub display_name: String,
    #[serde(default)]
    pub bio: Option<String>,
}

fn map_credentials_error(err: CredentialsValidationError) -> Error {
    match err {
        CredentialsValidationError::EmptyEmail => Error::invalid_request("email must not be empty")
            .with_details(json!({ "field": "email", "code": "empty_email" })),
        CredentialsValidationError::InvalidEmail => {
            Error::invalid_request("email must be a valid address")
                .with_details(json!({ "field": "email", "code": "invalid_email" }))
        }
        CredentialsValidationError::EmptyPassword => {
            Error::invalid_request("password must not be empty")
                .with_details(json!({ "field": "password", "code": "empty_password" }))
        }
    }
}

fn map_display_name_error(err: UserValidationError) -> Error {
    let (message, code) = match err {
        UserValidationError::EmptyDisplayName => {
            ("display name must not be empty", "empty_display_name")
        }
        UserValidationError::DisplayNameLength { .. } => (
            "display name length is out of bounds",
            "display_name_length",
        ),
        UserValidationError::DisplayNameInvalidCharacters => (
            "display name contains unsupported characters",
            "display_name_invalid_characters",
        ),
        UserValidationError::InvalidId => ("user id must be a valid UUID", "invalid_id"),
    };
    Error::invalid_request(message)
        .with_details(json!({ "field": "displayName", "code": code }))
}

/// Verify credentials and establish a session.
#[utoipa::path(
    post,
    path = "/api/v1/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login success", headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Invalid credentials", body = Error),
        (status = 503, description = "Login backend unavailable", body = Error)
    ),
    tags = ["accounts"],
    operation_id = "login",
    security([])
)]
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<LoginRequest>,
) -> ApiResult<HttpResponse> {
    let payload = payload.into_inner();
    let credentials = Credentials::try_from_parts(&payload.email, &payload.password)
        .map_err(map_credentials_error)?;
    let user_id = state.accounts.login(&credentials).await?;
    session.persist_user(&user_id)?;
    Ok(HttpResponse::Ok().finish())
}

/// Register an account, seed its profile, and establish a session.
#[utoipa::path(
    post,
    path = "/api/v1/signup",
    request_body = SignupRequest,
    responses(
        (status = 201, description = "Account created", headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Invalid request", body = Error),
        (status = 409, description = "Email already registered", body = Error),
        (status = 503, description = "Login backend unavailable", body = Error)
    ),
    tags = ["accounts"],
    operation_id = "signup",
    security([])
)]
#[post("/signup")]
pub async fn signup(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<SignupRequest>,
) -> ApiResult<HttpResponse> {
    let payload = payload.into_inner();
    let credentials = Credentials::try_from_parts(&payload.email, &payload.password)
        .map_err(map_credentials_error)?;
    let display_name = DisplayName::new(payload.display_name).map_err(map_display_name_error)?;
    let user_id = state.accounts.signup(&credentials, &display_name).await?;
    session.persist_user(&user_id)?;
    Ok(HttpResponse::Created().finish())
}

/// End the caller's session.
#[utoipa::path(
    post,
    path = "/api/v1/logout",
    responses(
        (status = 204, description = "Session ended")
    ),
    tags = ["accounts"],
    operation_id = "logout",
    security([])
)]
#[post("/logout")]
pub async fn logout(session: SessionContext) -> HttpResponse {
    session.clear();
    HttpResponse::NoContent().finish()
}

/// Fetch the caller's profile.
#[utoipa::path(
    get,
    path = "/api/v1/users/me",
    responses(
        (status = 200, description = "Profile", body = Profile),
        (status = 401, description = "Not signed in", body = Error),
        (status = 404, description = "No profile for this account", body = Error)
    ),
    tags = ["accounts"],
    operation_id = "currentUser"
)]
#[get("/users/me")]
pub async fn current_user(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Profile>> {
    let user_id = session.require_user_id()?;
    let profile = state.accounts.profile(user_id).await?;
    Ok(web::Json(profile))
}

/// Replace the caller's profile fields.
#[utoipa::path(
    put,
    path = "/api/v1/users/me",
    request_body = ProfileUpdateRequest,
    responses(
        (status = 200, description = "Updated profile", body = Profile),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Not signed in", body = Error)
    ),
    tags = ["accounts"],
    operation_id = "updateProfile"
)]
#[put("/users/me")]
pub async fn update_profile(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<ProfileUpdateRequest>,
) -> ApiResult<web::Json<Profile>> {
    let user_id = session.require_user_id()?;
    let payload = payload.into_inner();
    let display_name = DisplayName::new(payload.display_name).map_err(map_display_name_error)?;
    let profile = state
        .accounts
        .update_profile(user_id, display_name, payload.bio)
        .await?;
    Ok(web::Json(profile))
}
