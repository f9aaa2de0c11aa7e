//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain services over `dyn` ports and remain testable without
//! I/O.

use std::sync::Arc;

use url::Url;

use crate::domain::ports::{
    CommentRepository, GenerationSource, IdeaRepository, LoginService, ProfileRepository,
    ReactionRepository, TokenVerifier,
};
use crate::domain::{
    AccountService, CommentService, GenerationService, IdeaService, ReactionService,
};

/// Idea service over dynamic ports.
pub type DynIdeaService = IdeaService<dyn IdeaRepository, dyn ReactionRepository>;
/// Reaction service over dynamic ports.
pub type DynReactionService = ReactionService<dyn ReactionRepository, dyn IdeaRepository>;
/// Comment service over dynamic ports.
pub type DynCommentService = CommentService<dyn CommentRepository, dyn IdeaRepository>;
/// Account service over dynamic ports.
pub type DynAccountService = AccountService<dyn LoginService, dyn ProfileRepository>;
/// Generation service over a dynamic source.
pub type DynGenerationService = GenerationService<dyn GenerationSource>;

/// Parameter object bundling the port implementations and request-shaping
/// configuration the HTTP layer needs.
#[derive(Clone)]
pub struct HttpStatePorts {
    pub ideas: Arc<dyn IdeaRepository>,
    pub comments: Arc<dyn CommentRepository>,
    pub reactions: Arc<dyn ReactionRepository>,
    pub profiles: Arc<dyn ProfileRepository>,
    pub login: Arc<dyn LoginService>,
    pub tokens: Arc<dyn TokenVerifier>,
    pub generation: Arc<dyn GenerationSource>,
    /// Base URL share links are built from.
    pub share_base: Url,
    /// Configured generation system prompt, if any.
    pub system_prompt: Option<String>,
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub ideas: DynIdeaService,
    pub reactions: DynReactionService,
    pub comments: DynCommentService,
    pub accounts: DynAccountService,
    pub generation: DynGenerationService,
    pub tokens: Arc<dyn TokenVerifier>,
    pub share_base: Url,
}

impl HttpState {
    /// Compose the domain services from a ports bundle.
    ///
    /// # Examples
    /// ```no_run
    /// use std::sync::Arc;
    ///
    /// use backend::domain::ports::{
    ///     FixtureCommentRepository, FixtureGenerationSource, FixtureIdeaRepository,
    ///     FixtureLoginService, FixtureProfileRepository, FixtureReactionRepository,
    ///     FixtureTokenVerifier,
    /// };
    /// use backend::inbound::http::state::{HttpState, HttpStatePorts};
    /// use url::Url;
    ///
    /// let ports = HttpStatePorts {
    ///     ideas: Arc::new(FixtureIdeaRepository),
    ///     comments: Arc::new(FixtureCommentRepository),
    ///     reactions: Arc::new(FixtureReactionRepository),
    ///     profiles: Arc::new(FixtureProfileRepository),
    ///     login: Arc::new(FixtureLoginService),
    ///     tokens: Arc::new(FixtureTokenVerifier),
    ///     generation: Arc::new(FixtureGenerationSource),
    ///     share_base: Url::parse("http://localhost:8080/").unwrap(),
    ///     system_prompt: None,
    /// };
    /// let state = HttpState::new(ports);
    /// let _tokens = state.tokens.clone();
    /// ```
    #[must_use]
    pub fn new(ports: HttpStatePorts) -> Self {
        let HttpStatePorts {
            ideas,
            comments,
            reactions,
            profiles,
            login,
            tokens,
            generation,
            share_base,
            system_prompt,
        } = ports;
        Self {
            ideas: IdeaService::new(Arc::clone(&ideas), Arc::clone(&reactions)),
            reactions: ReactionService::new(reactions, Arc::clone(&ideas)),
            comments: CommentService::new(comments, ideas),
            accounts: AccountService::new(login, profiles),
            generation: GenerationService::new(generation, system_prompt),
            tokens,
            share_base,
        }
    }
}
