//! PostgreSQL-backed `ProfileRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::warn;

use crate::domain::ports::{ProfileRepository, ProfileRepositoryError};
use crate::domain::{DisplayName, Profile, UserId};

use super::error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{ProfileRow, ProfileUpsert};
use super::pool::{DbPool, PoolError};
use super::schema::profiles;

/// Diesel-backed implementation of the `ProfileRepository` port.
#[derive(Clone)]
pub struct DieselProfileRepository {
    pool: DbPool,
}

impl DieselProfileRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> ProfileRepositoryError {
    map_basic_pool_error(error, ProfileRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> ProfileRepositoryError {
    map_basic_diesel_error(
        error,
        ProfileRepositoryError::query,
        ProfileRepositoryError::connection,
    )
}

fn row_to_profile(row: ProfileRow) -> Result<Profile, ProfileRepositoryError> {
    let display_name = DisplayName::new(row.display_name).map_err(|err| {
        warn!(user_id = %row.user_id, %err, "stored display name fails validation");
        ProfileRepositoryError::query("stored profile is invalid")
    })?;
    Ok(Profile {
        user_id: UserId::from_uuid(row.user_id),
        display_name,
        bio: row.bio,
    })
}

#[async_trait]
impl ProfileRepository for DieselProfileRepository {
    async fn find_by_user_id(
        &self,
        user_id: UserId,
    ) -> Result<Option<Profile>, ProfileRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<ProfileRow> = profiles::table
            .find(user_id.as_uuid())
            .select(ProfileRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_profile).transpose()
    }

    async fn upsert(&self, profile: &Profile) -> Result<(), ProfileRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let upsert = ProfileUpsert {
            user_id: *profile.user_id.as_uuid(),
            display_name: profile.display_name.as_ref(),
            bio: profile.bio.as_deref(),
        };

        diesel::insert_into(profiles::table)
            .values(&upsert)
            .on_conflict(profiles::user_id)
            .do_update()
            .set(&upsert)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn valid_row_converts_to_profile() {
        let row = ProfileRow {
            user_id: uuid::Uuid::new_v4(),
            display_name: "Ada Lovelace".into(),
            bio: Some("first programmer".into()),
        };
        let profile = row_to_profile(row).expect("valid row converts");
        assert_eq!(profile.display_name.as_ref(), "Ada Lovelace");
        assert_eq!(profile.bio.as_deref(), Some("first programmer"));
    }

    #[rstest]
    fn invalid_stored_name_is_a_query_error() {
        let row = ProfileRow {
            user_id: uuid::Uuid::new_v4(),
            display_name: String::new(),
            bio: None,
        };
        let err = row_to_profile(row).expect_err("blank name must fail");
        assert!(matches!(err, ProfileRepositoryError::Query { .. }));
    }

    #[rstest]
    fn pool_error_maps_to_connection_error() {
        let err = map_pool_error(PoolError::checkout("no connections"));
        assert!(matches!(err, ProfileRepositoryError::Connection { .. }));
    }
}
