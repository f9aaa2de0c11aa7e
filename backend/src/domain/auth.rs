//! Authentication primitives.
//!
//! Handlers validate raw payload strings into these types before touching a
//! port, keeping credential rules out of the HTTP layer.

use std::fmt;

use zeroize::Zeroizing;

/// Validation failures for login payloads.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CredentialsValidationError {
    /// Email was missing or blank once trimmed.
    #[error("email must not be empty")]
    EmptyEmail,
    /// Email lacks the minimal shape of an address.
    #[error("email must be a valid address")]
    InvalidEmail,
    /// Password was blank.
    #[error("password must not be empty")]
    EmptyPassword,
}

/// Validated email/password pair used by login and signup.
///
/// ## Invariants
/// - `email` is trimmed, lower-cased, non-empty, and contains a single `@`
///   with text on both sides.
/// - `password` is non-empty; caller-provided whitespace is preserved so
///   comparisons stay byte-exact.
///
/// # Examples
/// ```
/// use backend::domain::Credentials;
///
/// let creds = Credentials::try_from_parts("Ada@example.com", "hunter2").unwrap();
/// assert_eq!(creds.email(), "ada@example.com");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    email: String,
    password: Zeroizing<String>,
}

impl Credentials {
    /// Construct credentials from raw email/password inputs.
    ///
    /// # Errors
    /// Returns a [`CredentialsValidationError`] describing the first failed
    /// rule.
    pub fn try_from_parts(email: &str, password: &str) -> Result<Self, CredentialsValidationError> {
        let normalized = email.trim().to_lowercase();
        if normalized.is_empty() {
            return Err(CredentialsValidationError::EmptyEmail);
        }
        let mut parts = normalized.split('@');
        let plausible = matches!(
            (parts.next(), parts.next(), parts.next()),
            (Some(local), Some(host), None) if !local.is_empty() && !host.is_empty()
        );
        if !plausible {
            return Err(CredentialsValidationError::InvalidEmail);
        }
        if password.is_empty() {
            return Err(CredentialsValidationError::EmptyPassword);
        }
        Ok(Self {
            email: normalized,
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Normalised email address used for account lookups.
    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Password exactly as provided by the caller.
    #[must_use]
    pub fn password(&self) -> &str {
        &self.password
    }
}

impl fmt::Display for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Never render the password.
        write!(f, "credentials for {}", self.email)
    }
}
