//! Builders translating configuration into shared application state.

use std::io;
use std::sync::Arc;
use std::time::Duration;

use actix_web::web;
use backend::domain::ports::{
    FixtureCommentRepository, FixtureGenerationSource, FixtureIdeaRepository, FixtureLoginService,
    FixtureProfileRepository, FixtureReactionRepository, FixtureTokenVerifier,
};
use backend::inbound::http::state::{HttpState, HttpStatePorts};
use backend::outbound::auth::AuthHttpTokenVerifier;
use backend::outbound::gemini::GeminiHttpSource;
use backend::outbound::persistence::{
    DieselCommentRepository, DieselIdeaRepository, DieselLoginService, DieselProfileRepository,
    DieselReactionRepository,
};
use tracing::warn;

use crate::server::config::ServerConfig;

const PROVIDER_TIMEOUT: Duration = Duration::from_secs(30);
const TOKEN_TIMEOUT: Duration = Duration::from_secs(10);

/// Build the shared HTTP state from the server configuration.
///
/// Ports without configured backing fall back to fixtures so the server
/// still starts for local experiments. Each fallback is logged.
pub fn build_http_state(config: &ServerConfig) -> io::Result<web::Data<HttpState>> {
    let mut ports = HttpStatePorts {
        ideas: Arc::new(FixtureIdeaRepository),
        comments: Arc::new(FixtureCommentRepository),
        reactions: Arc::new(FixtureReactionRepository),
        profiles: Arc::new(FixtureProfileRepository),
        login: Arc::new(FixtureLoginService),
        tokens: Arc::new(FixtureTokenVerifier),
        generation: Arc::new(FixtureGenerationSource),
        share_base: config.share_base.clone(),
        system_prompt: config.system_prompt.clone(),
    };

    match &config.db_pool {
        Some(pool) => {
            ports.ideas = Arc::new(DieselIdeaRepository::new(pool.clone()));
            ports.comments = Arc::new(DieselCommentRepository::new(pool.clone()));
            ports.reactions = Arc::new(DieselReactionRepository::new(pool.clone()));
            ports.profiles = Arc::new(DieselProfileRepository::new(pool.clone()));
            ports.login = Arc::new(DieselLoginService::new(pool.clone()));
        }
        None => {
            warn!("no database configured; persistence uses in-memory fixtures");
        }
    }

    match &config.gemini {
        Some(settings) => {
            let source = GeminiHttpSource::new(
                settings.endpoint.clone(),
                settings.api_key.clone(),
                PROVIDER_TIMEOUT,
            )
            .map_err(io::Error::other)?;
            ports.generation = Arc::new(source);
        }
        None => {
            warn!("no generation provider configured; generation uses the fixture source");
        }
    }

    match &config.user_info_endpoint {
        Some(endpoint) => {
            let verifier = AuthHttpTokenVerifier::new(endpoint.clone(), TOKEN_TIMEOUT)
                .map_err(io::Error::other)?;
            ports.tokens = Arc::new(verifier);
        }
        None => {
            warn!("no token endpoint configured; bearer tokens accept any value");
        }
    }

    Ok(web::Data::new(HttpState::new(ports)))
}
