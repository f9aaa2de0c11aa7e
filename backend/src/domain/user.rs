//! User identity and profile types.
//!
//! ## Invariants
//! - `UserId` is always a valid UUID.
//! - `DisplayName` is trimmed-non-empty, length-bounded, and restricted to a
//!   conservative character set.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Validation failures for user-supplied identity fields.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserValidationError {
    #[error("user id must be a valid UUID")]
    InvalidId,
    #[error("display name must not be empty")]
    EmptyDisplayName,
    #[error("display name must be between {min} and {max} characters")]
    DisplayNameLength { min: usize, max: usize },
    #[error("display name may only contain letters, numbers, spaces, or underscores")]
    DisplayNameInvalidCharacters,
}

/// Stable user identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(Uuid);

impl UserId {
    /// Parse a [`UserId`] from string input.
    ///
    /// # Errors
    /// Returns [`UserValidationError::InvalidId`] when the input is not a
    /// UUID.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, UserValidationError> {
        Uuid::parse_str(raw.as_ref())
            .map(Self)
            .map_err(|_| UserValidationError::InvalidId)
    }

    /// Wrap an already-parsed UUID.
    #[must_use]
    pub const fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Generate a fresh random identifier.
    #[must_use]
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Access the underlying UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Minimum display name length.
pub const DISPLAY_NAME_MIN: usize = 3;
/// Maximum display name length.
pub const DISPLAY_NAME_MAX: usize = 32;

static DISPLAY_NAME_RE: OnceLock<Regex> = OnceLock::new();

fn display_name_regex() -> &'static Regex {
    DISPLAY_NAME_RE.get_or_init(|| {
        // Length is enforced separately; this constrains the character set.
        #[expect(clippy::expect_used, reason = "pattern is a compile-time constant")]
        Regex::new("^[A-Za-z0-9_ ]+$").expect("display name pattern compiles")
    })
}

/// Validated display name shown alongside ideas and comments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DisplayName(String);

impl DisplayName {
    /// Validate and construct a [`DisplayName`].
    ///
    /// # Errors
    /// Rejects empty, out-of-bounds, or oddly-charactered names.
    pub fn new(raw: impl Into<String>) -> Result<Self, UserValidationError> {
        let raw = raw.into();
        if raw.trim().is_empty() {
            return Err(UserValidationError::EmptyDisplayName);
        }
        let length = raw.chars().count();
        if !(DISPLAY_NAME_MIN..=DISPLAY_NAME_MAX).contains(&length) {
            return Err(UserValidationError::DisplayNameLength {
                min: DISPLAY_NAME_MIN,
                max: DISPLAY_NAME_MAX,
            });
        }
        if !display_name_regex().is_match(&raw) {
            return Err(UserValidationError::DisplayNameInvalidCharacters);
        }
        Ok(Self(raw))
    }
}

impl AsRef<str> for DisplayName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DisplayName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<DisplayName> for String {
    fn from(value: DisplayName) -> Self {
        value.0
    }
}

impl TryFrom<String> for DisplayName {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Public profile attached to a user account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    /// Owning user.
    #[schema(value_type = String, example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    pub user_id: UserId,
    /// Name shown on cards and comments.
    #[schema(value_type = String, example = "Ada Lovelace")]
    pub display_name: DisplayName,
    /// Optional free-form biography.
    pub bio: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn user_id_parses_uuids() {
        let id = UserId::new("3fa85f64-5717-4562-b3fc-2c963f66afa6").expect("valid uuid");
        assert_eq!(id.to_string(), "3fa85f64-5717-4562-b3fc-2c963f66afa6");
    }

    #[test]
    fn user_id_rejects_garbage() {
        assert_eq!(
            UserId::new("not-a-uuid"),
            Err(UserValidationError::InvalidId)
        );
    }

    #[rstest]
    #[case("Ada Lovelace")]
    #[case("grace_h")]
    #[case("abc")]
    fn display_name_accepts_reasonable_names(#[case] name: &str) {
        assert!(DisplayName::new(name).is_ok());
    }

    #[rstest]
    #[case("", UserValidationError::EmptyDisplayName)]
    #[case("   ", UserValidationError::EmptyDisplayName)]
    #[case("ab", UserValidationError::DisplayNameLength { min: 3, max: 32 })]
    #[case("x".repeat(33), UserValidationError::DisplayNameLength { min: 3, max: 32 })]
    #[case("bad!name", UserValidationError::DisplayNameInvalidCharacters)]
    fn display_name_rejects_invalid_input(
        #[case] name: impl Into<String>,
        #[case] expected: UserValidationError,
    ) {
        assert_eq!(DisplayName::new(name).unwrap_err(), expected);
    }

    #[test]
    fn display_name_serialises_as_plain_string() {
        let name = DisplayName::new("Ada Lovelace").expect("valid");
        let json = serde_json::to_string(&name).expect("serialise");
        assert_eq!(json, "\"Ada Lovelace\"");
    }
}
