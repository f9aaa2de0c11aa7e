//! PostgreSQL-backed `LoginService` adapter.
//!
//! Credentials are stored as a salted SHA-256 digest, both salt and digest
//! hex-encoded. Authentication recomputes the digest and compares; the
//! failure path never reveals whether the email or the password was wrong.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::result::DatabaseErrorKind;
use diesel_async::RunQueryDsl;
use rand::RngCore;
use rand::rngs::OsRng;
use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::domain::ports::{LoginService, LoginServiceError};
use crate::domain::{Credentials, DisplayName, UserId};

use super::models::{CredentialRow, NewCredentialRow};
use super::pool::{DbPool, PoolError};
use super::schema::credentials;

const SALT_BYTES: usize = 16;

/// Diesel-backed implementation of the `LoginService` port.
#[derive(Clone)]
pub struct DieselLoginService {
    pool: DbPool,
}

impl DieselLoginService {
    /// Create a new service with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> LoginServiceError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            LoginServiceError::unavailable(message)
        }
    }
}

fn map_diesel_error(error: diesel::result::Error) -> LoginServiceError {
    use diesel::result::Error as DieselError;

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
            LoginServiceError::EmailTaken
        }
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            LoginServiceError::unavailable("database connection error")
        }
        _ => LoginServiceError::unavailable("database error"),
    }
}

fn hash_password(salt_hex: &str, password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt_hex.as_bytes());
    hasher.update(password.as_bytes());
    hex::encode(hasher.finalize())
}

fn fresh_salt() -> String {
    let mut salt = [0u8; SALT_BYTES];
    OsRng.fill_bytes(&mut salt);
    hex::encode(salt)
}

#[async_trait]
impl LoginService for DieselLoginService {
    async fn authenticate(
        &self,
        creds: &Credentials,
    ) -> Result<UserId, LoginServiceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<CredentialRow> = credentials::table
            .filter(credentials::email.eq(creds.email()))
            .select(CredentialRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        let Some(row) = row else {
            return Err(LoginServiceError::InvalidCredentials);
        };
        if hash_password(&row.salt, creds.password()) != row.password_hash {
            return Err(LoginServiceError::InvalidCredentials);
        }
        Ok(UserId::from_uuid(row.user_id))
    }

    async fn register(
        &self,
        creds: &Credentials,
        _display_name: &DisplayName,
    ) -> Result<UserId, LoginServiceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let user_id = Uuid::new_v4();
        let salt = fresh_salt();
        let password_hash = hash_password(&salt, creds.password());
        let new_row = NewCredentialRow {
            user_id,
            email: creds.email(),
            password_hash: &password_hash,
            salt: &salt,
        };

        diesel::insert_into(credentials::table)
            .values(&new_row)
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(UserId::from_uuid(user_id))
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn hashing_is_deterministic_per_salt() {
        let salt = fresh_salt();
        assert_eq!(
            hash_password(&salt, "hunter2"),
            hash_password(&salt, "hunter2")
        );
    }

    #[rstest]
    fn different_salts_produce_different_digests() {
        let first = fresh_salt();
        let second = fresh_salt();
        assert_ne!(first, second);
        assert_ne!(
            hash_password(&first, "hunter2"),
            hash_password(&second, "hunter2")
        );
    }

    #[rstest]
    fn unique_violation_maps_to_email_taken() {
        let err = diesel::result::Error::DatabaseError(
            DatabaseErrorKind::UniqueViolation,
            Box::new("duplicate key value".to_owned()),
        );
        assert_eq!(map_diesel_error(err), LoginServiceError::EmailTaken);
    }

    #[rstest]
    fn pool_error_maps_to_unavailable() {
        let err = map_pool_error(PoolError::checkout("no connections"));
        assert!(matches!(err, LoginServiceError::Unavailable { .. }));
    }
}
