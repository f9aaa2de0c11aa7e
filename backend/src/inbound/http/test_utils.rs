//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::Key;
use url::Url;

use crate::domain::ports::{
    FixtureCommentRepository, FixtureGenerationSource, FixtureIdeaRepository,
    FixtureLoginService, FixtureProfileRepository, FixtureReactionRepository,
    FixtureTokenVerifier,
};
use crate::inbound::http::state::{HttpState, HttpStatePorts};

/// Build a session middleware configured for tests.
///
/// - Generates a fresh signing/encryption key per invocation.
/// - Sets the cookie name to `session` and disables the `Secure` flag for
///   local HTTP tests.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

/// Ports bundle backed entirely by fixtures.
///
/// Tests swap individual fields for mocks before calling
/// [`HttpState::new`].
pub fn fixture_ports() -> HttpStatePorts {
    HttpStatePorts {
        ideas: Arc::new(FixtureIdeaRepository),
        comments: Arc::new(FixtureCommentRepository),
        reactions: Arc::new(FixtureReactionRepository),
        profiles: Arc::new(FixtureProfileRepository),
        login: Arc::new(FixtureLoginService),
        tokens: Arc::new(FixtureTokenVerifier),
        generation: Arc::new(FixtureGenerationSource),
        share_base: Url::parse("http://localhost:8080/").expect("fixture base url"),
        system_prompt: None,
    }
}

/// HTTP state backed entirely by fixtures.
pub fn fixture_state() -> HttpState {
    HttpState::new(fixture_ports())
}
