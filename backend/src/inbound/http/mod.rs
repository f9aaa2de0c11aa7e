//! HTTP inbound adapter exposing the REST endpoints.

pub mod comments;
pub mod error;
pub mod generate;
pub mod health;
pub mod ideas;
pub mod reactions;
pub mod session;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod users;

pub use crate::domain::ApiResult;
