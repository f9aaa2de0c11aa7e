//! Domain primitives, aggregates, and services.
//!
//! Purpose: Define strongly typed domain entities used by the API and
//! persistence layers, plus the services that implement the community
//! site's behaviour over the ports. Keep types immutable and document
//! invariants and serialisation contracts (serde) in each type's Rustdoc.

pub mod account_service;
pub mod auth;
pub mod comment;
pub mod comment_service;
pub mod error;
pub mod feed;
pub mod generation;
pub mod idea;
pub mod idea_service;
pub mod ports;
pub mod reaction_service;
pub mod share;
pub mod user;

pub use self::account_service::AccountService;
pub use self::auth::{Credentials, CredentialsValidationError};
pub use self::comment::{
    ANONYMOUS_AUTHOR, Comment, CommentId, CommentText, CommentValidationError,
};
pub use self::comment_service::CommentService;
pub use self::error::{Error, ErrorCode};
pub use self::feed::{
    EngagementCounts, FeedFilter, FeedMode, FeedViewer, TRENDING_COMMENT_WEIGHT,
    TRENDING_UPVOTE_WEIGHT, filter_ideas,
};
pub use self::generation::{
    DEFAULT_SYSTEM_PROMPT, FALLBACK_TITLE, GeneratedIdea, GenerationOrigin, GenerationService,
    MAX_GENERATED_TAGS, local_template_idea, parse_provider_text,
};
pub use self::idea::{
    DEFAULT_ICON, Idea, IdeaDraft, IdeaId, IdeaValidationError, MAX_TAGS, MAX_TITLE_CHARS,
};
pub use self::idea_service::{FeedSnapshot, IdeaService};
pub use self::reaction_service::{ReactionService, ToggleOutcome};
pub use self::share::share_url;
pub use self::user::{
    DISPLAY_NAME_MAX, DISPLAY_NAME_MIN, DisplayName, Profile, UserId, UserValidationError,
};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use backend::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::forbidden("nope"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
