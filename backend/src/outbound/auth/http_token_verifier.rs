//! Reqwest-backed bearer token verifier.
//!
//! Resolves bearer tokens by asking the auth service's user-info endpoint.
//! A 401 or 403 from the service means the token is bad; anything else that
//! goes wrong means verification was unavailable, never that the token was
//! valid.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde::Deserialize;
use uuid::Uuid;

use crate::domain::UserId;
use crate::domain::ports::{TokenVerifier, TokenVerifierError};

#[derive(Debug, Deserialize)]
struct UserInfoDto {
    id: Uuid,
}

/// Token verifier that performs HTTP GET requests against one user-info
/// endpoint.
pub struct AuthHttpTokenVerifier {
    client: Client,
    endpoint: Url,
}

impl AuthHttpTokenVerifier {
    /// Build a verifier using a reqwest client with an explicit request
    /// timeout.
    ///
    /// # Errors
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(endpoint: Url, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, endpoint })
    }
}

#[async_trait]
impl TokenVerifier for AuthHttpTokenVerifier {
    async fn verify(&self, token: &str) -> Result<UserId, TokenVerifierError> {
        let response = self
            .client
            .get(self.endpoint.clone())
            .bearer_auth(token)
            .send()
            .await
            .map_err(|err| TokenVerifierError::unavailable(err.to_string()))?;

        match response.status() {
            status if status.is_success() => {
                let info: UserInfoDto = response
                    .json()
                    .await
                    .map_err(|err| TokenVerifierError::unavailable(err.to_string()))?;
                Ok(UserId::from_uuid(info.id))
            }
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                Err(TokenVerifierError::InvalidToken)
            }
            status => Err(TokenVerifierError::unavailable(format!(
                "user-info endpoint returned status {}",
                status.as_u16()
            ))),
        }
    }
}
