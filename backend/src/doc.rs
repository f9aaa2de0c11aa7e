//! OpenAPI documentation configuration.
//!
//! Defines the [`ApiDoc`] struct generating the OpenAPI specification for
//! the REST API: every HTTP endpoint from the inbound layer, the domain
//! schemas they reference, and the two authentication schemes (session
//! cookie for the site API, bearer token for generation).
//!
//! The generated specification feeds Swagger UI in debug builds.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::{Comment, Error, ErrorCode, GeneratedIdea, GenerationOrigin, Idea, Profile, ToggleOutcome};
use crate::inbound::http::comments::CommentRequest;
use crate::inbound::http::generate::GenerateIdeaRequest;
use crate::inbound::http::ideas::{CreateIdeaRequest, IdeaCard, ShareUrlResponse};
use crate::inbound::http::users::{LoginRequest, ProfileUpdateRequest, SignupRequest};

/// Enrich the generated document with the authentication schemes.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by POST /api/v1/login or /signup.",
            ))),
        );
        components.add_security_scheme(
            "BearerToken",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .description(Some("Bearer token verified against the auth service."))
                    .build(),
            ),
        );
    }
}

/// OpenAPI document for the REST API.
/// Swagger UI is enabled in debug builds only.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Idea community backend API",
        description = "HTTP interface for browsing, publishing, and reacting to ideas."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::users::login,
        crate::inbound::http::users::signup,
        crate::inbound::http::users::logout,
        crate::inbound::http::users::current_user,
        crate::inbound::http::users::update_profile,
        crate::inbound::http::ideas::list_ideas,
        crate::inbound::http::ideas::create_idea,
        crate::inbound::http::ideas::get_idea,
        crate::inbound::http::ideas::delete_idea,
        crate::inbound::http::ideas::share_idea,
        crate::inbound::http::comments::list_comments,
        crate::inbound::http::comments::add_comment,
        crate::inbound::http::comments::delete_comment,
        crate::inbound::http::reactions::toggle_favorite,
        crate::inbound::http::reactions::toggle_upvote,
        crate::inbound::http::generate::generate_idea,
        crate::inbound::http::generate::generate_idea_preflight,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        Error,
        ErrorCode,
        Idea,
        IdeaCard,
        Profile,
        Comment,
        ToggleOutcome,
        GeneratedIdea,
        GenerationOrigin,
        LoginRequest,
        SignupRequest,
        ProfileUpdateRequest,
        CreateIdeaRequest,
        CommentRequest,
        GenerateIdeaRequest,
        ShareUrlResponse,
    )),
    tags(
        (name = "accounts", description = "Login, signup, and profile operations"),
        (name = "ideas", description = "Browsing and publishing ideas"),
        (name = "comments", description = "Comment threads on ideas"),
        (name = "reactions", description = "Favorite and upvote toggles"),
        (name = "generation", description = "AI-assisted idea generation"),
        (name = "health", description = "Probes for orchestration")
    )
)]
pub struct ApiDoc;
