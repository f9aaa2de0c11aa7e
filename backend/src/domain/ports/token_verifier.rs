//! Port for bearer token verification.
//!
//! The generation endpoint authenticates with a bearer token rather than the
//! session cookie, so machine callers can use it too. Adapters resolve the
//! token to a user id, typically by asking the auth service's user-info
//! endpoint.

use async_trait::async_trait;

use crate::domain::UserId;

/// Errors raised by token verifier adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TokenVerifierError {
    /// The token is expired, malformed, or unknown.
    #[error("invalid or expired token")]
    InvalidToken,
    /// The verifying service could not be reached.
    #[error("token verification unavailable: {message}")]
    Unavailable { message: String },
}

impl TokenVerifierError {
    /// Build a [`TokenVerifierError::Unavailable`] error.
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }
}

/// Port for resolving bearer tokens to user ids.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TokenVerifier: Send + Sync {
    /// Resolve a bearer token to the account it belongs to.
    async fn verify(&self, token: &str) -> Result<UserId, TokenVerifierError>;
}

/// Fixture implementation that accepts every token.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureTokenVerifier;

#[async_trait]
impl TokenVerifier for FixtureTokenVerifier {
    async fn verify(&self, _token: &str) -> Result<UserId, TokenVerifierError> {
        Ok(UserId::random())
    }
}
