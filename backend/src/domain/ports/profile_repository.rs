//! Port for user profile persistence.

use async_trait::async_trait;

use crate::domain::{Profile, UserId};

/// Errors raised by profile repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProfileRepositoryError {
    /// Repository connection could not be established.
    #[error("profile repository connection failed: {message}")]
    Connection { message: String },
    /// Query or mutation failed during execution.
    #[error("profile repository query failed: {message}")]
    Query { message: String },
}

impl ProfileRepositoryError {
    /// Build a [`ProfileRepositoryError::Connection`] error.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Build a [`ProfileRepositoryError::Query`] error.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }
}

/// Port for profile storage and retrieval.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// Fetch the profile for a user.
    ///
    /// Returns `None` for accounts that never completed profile setup.
    async fn find_by_user_id(
        &self,
        user_id: UserId,
    ) -> Result<Option<Profile>, ProfileRepositoryError>;

    /// Insert or replace the profile row for `profile.user_id`.
    async fn upsert(&self, profile: &Profile) -> Result<(), ProfileRepositoryError>;
}

/// Fixture implementation for testing without a real database.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureProfileRepository;

#[async_trait]
impl ProfileRepository for FixtureProfileRepository {
    async fn find_by_user_id(
        &self,
        _user_id: UserId,
    ) -> Result<Option<Profile>, ProfileRepositoryError> {
        Ok(None)
    }

    async fn upsert(&self, _profile: &Profile) -> Result<(), ProfileRepositoryError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DisplayName;

    #[tokio::test]
    async fn fixture_lookup_returns_none() {
        let repo = FixtureProfileRepository;
        let found = repo
            .find_by_user_id(UserId::random())
            .await
            .expect("fixture lookup succeeds");
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn fixture_accepts_upserts() {
        let repo = FixtureProfileRepository;
        let profile = Profile {
            user_id: UserId::random(),
            display_name: DisplayName::try_from("Ada L".to_owned()).expect("valid name"),
            bio: None,
        };
        repo.upsert(&profile)
            .await
            .expect("fixture upsert succeeds");
    }
}
