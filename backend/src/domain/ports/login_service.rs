//! Port for credential verification and account registration.
//!
//! Adapters own the credential store and its hashing scheme; the domain only
//! sees opaque success or failure. Authentication failures are deliberately
//! indistinguishable between unknown email and wrong password.

use async_trait::async_trait;

use crate::domain::{Credentials, DisplayName, UserId};

/// Errors raised by login service adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoginServiceError {
    /// The email or password did not match a stored credential.
    #[error("invalid email or password")]
    InvalidCredentials,
    /// An account already exists for this email.
    #[error("an account already exists for this email")]
    EmailTaken,
    /// The credential store could not be reached.
    #[error("login service unavailable: {message}")]
    Unavailable { message: String },
}

impl LoginServiceError {
    /// Build a [`LoginServiceError::Unavailable`] error.
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }
}

/// Port for authenticating and registering accounts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Verify credentials and return the account's user id.
    ///
    /// # Errors
    /// Returns [`LoginServiceError::InvalidCredentials`] whether the email is
    /// unknown or the password is wrong.
    async fn authenticate(&self, credentials: &Credentials)
    -> Result<UserId, LoginServiceError>;

    /// Create an account with the given credentials and initial profile name.
    ///
    /// # Errors
    /// Returns [`LoginServiceError::EmailTaken`] when the email is already
    /// registered.
    async fn register(
        &self,
        credentials: &Credentials,
        display_name: &DisplayName,
    ) -> Result<UserId, LoginServiceError>;
}

/// Fixture implementation for tests that need a permissive login path.
///
/// Accepts every credential pair and mints a fresh user id per call.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureLoginService;

#[async_trait]
impl LoginService for FixtureLoginService {
    async fn authenticate(
        &self,
        _credentials: &Credentials,
    ) -> Result<UserId, LoginServiceError> {
        Ok(UserId::random())
    }

    async fn register(
        &self,
        _credentials: &Credentials,
        _display_name: &DisplayName,
    ) -> Result<UserId, LoginServiceError> {
        Ok(UserId::random())
    }
}
