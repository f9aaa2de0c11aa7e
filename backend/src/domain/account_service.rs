//! Account domain service: login, signup, and profile access.

use std::sync::Arc;

use crate::domain::ports::{
    LoginService, LoginServiceError, ProfileRepository, ProfileRepositoryError,
};
use crate::domain::{Credentials, DisplayName, Error, Profile, UserId};

/// Account service wrapping the login and profile ports.
pub struct AccountService<L: ?Sized, P: ?Sized> {
    login: Arc<L>,
    profiles: Arc<P>,
}

impl<L: ?Sized, P: ?Sized> Clone for AccountService<L, P> {
    fn clone(&self) -> Self {
        Self {
            login: Arc::clone(&self.login),
            profiles: Arc::clone(&self.profiles),
        }
    }
}

impl<L: ?Sized, P: ?Sized> AccountService<L, P> {
    /// Create a new service with the given adapters.
    pub fn new(login: Arc<L>, profiles: Arc<P>) -> Self {
        Self { login, profiles }
    }
}

impl<L, P> AccountService<L, P>
where
    L: LoginService + ?Sized,
    P: ProfileRepository + ?Sized,
{
    fn map_login_error(error: LoginServiceError) -> Error {
        match error {
            LoginServiceError::InvalidCredentials => {
                Error::unauthorized("invalid email or password")
            }
            LoginServiceError::EmailTaken => {
                Error::conflict("an account already exists for this email")
            }
            LoginServiceError::Unavailable { message } => {
                Error::service_unavailable(format!("login service unavailable: {message}"))
            }
        }
    }

    fn map_profile_error(error: ProfileRepositoryError) -> Error {
        match error {
            ProfileRepositoryError::Connection { message } => {
                Error::service_unavailable(format!("profile repository unavailable: {message}"))
            }
            ProfileRepositoryError::Query { message } => {
                Error::internal(format!("profile repository error: {message}"))
            }
        }
    }

    /// Verify credentials and return the signed-in user id.
    ///
    /// # Errors
    /// Returns `unauthorized` for bad credentials; the message never reveals
    /// which field was wrong.
    pub async fn login(&self, credentials: &Credentials) -> Result<UserId, Error> {
        self.login
            .authenticate(credentials)
            .await
            .map_err(Self::map_login_error)
    }

    /// Register an account and seed its profile with the chosen name.
    ///
    /// # Errors
    /// Returns `conflict` when the email is already registered.
    pub async fn signup(
        &self,
        credentials: &Credentials,
        display_name: &DisplayName,
    ) -> Result<UserId, Error> {
        let user_id = self
            .login
            .register(credentials, display_name)
            .await
            .map_err(Self::map_login_error)?;
        let profile = Profile {
            user_id,
            display_name: display_name.clone(),
            bio: None,
        };
        self.profiles
            .upsert(&profile)
            .await
            .map_err(Self::map_profile_error)?;
        Ok(user_id)
    }

    /// Fetch the caller's profile.
    ///
    /// # Errors
    /// Returns `not_found` for accounts without a profile row.
    pub async fn profile(&self, user_id: UserId) -> Result<Profile, Error> {
        self.profiles
            .find_by_user_id(user_id)
            .await
            .map_err(Self::map_profile_error)?
            .ok_or_else(|| Error::not_found("no profile for this account"))
    }

    /// Replace the caller's profile fields.
    ///
    /// # Errors
    /// Propagates repository failures.
    pub async fn update_profile(
        &self,
        user_id: UserId,
        display_name: DisplayName,
        bio: Option<String>,
    ) -> Result<Profile, Error> {
        let profile = Profile {
            user_id,
            display_name,
            bio,
        };
        self.profiles
            .upsert(&profile)
            .await
            .map_err(Self::map_profile_error)?;
        Ok(profile)
    }
}
