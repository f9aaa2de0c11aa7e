//! HTTP server configuration object and helpers.

use std::net::SocketAddr;

use actix_web::cookie::{Key, SameSite};
use backend::outbound::persistence::DbPool;
use url::Url;

/// Connection details for the generative-AI provider.
#[derive(Clone)]
pub struct GeminiSettings {
    pub endpoint: Url,
    pub api_key: String,
}

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) key: Key,
    pub(crate) cookie_secure: bool,
    pub(crate) same_site: SameSite,
    pub(crate) bind_addr: SocketAddr,
    pub(crate) share_base: Url,
    pub(crate) db_pool: Option<DbPool>,
    pub(crate) gemini: Option<GeminiSettings>,
    pub(crate) user_info_endpoint: Option<Url>,
    pub(crate) system_prompt: Option<String>,
}

impl ServerConfig {
    /// Construct a server configuration with the required settings.
    #[must_use]
    pub fn new(
        key: Key,
        cookie_secure: bool,
        same_site: SameSite,
        bind_addr: SocketAddr,
        share_base: Url,
    ) -> Self {
        Self {
            key,
            cookie_secure,
            same_site,
            bind_addr,
            share_base,
            db_pool: None,
            gemini: None,
            user_info_endpoint: None,
            system_prompt: None,
        }
    }

    /// Attach a database connection pool for persistence adapters.
    ///
    /// Without a pool the server falls back to fixture ports, which only
    /// makes sense for local experiments and tests.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    /// Attach generative-AI provider settings.
    #[must_use]
    pub fn with_gemini(mut self, settings: GeminiSettings) -> Self {
        self.gemini = Some(settings);
        self
    }

    /// Attach the user-info endpoint bearer tokens are verified against.
    #[must_use]
    pub fn with_user_info_endpoint(mut self, endpoint: Url) -> Self {
        self.user_info_endpoint = Some(endpoint);
        self
    }

    /// Override the default generation system prompt.
    #[must_use]
    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = Some(prompt.into());
        self
    }

    /// Return the socket address the server will bind to.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}
