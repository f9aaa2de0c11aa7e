//! Port for the generative-AI text provider.
//!
//! The port deals in plain text: callers pass the system prompt and the user
//! prompt, adapters return the provider's raw reply. Parsing the reply into
//! idea fields is domain logic and lives in [`crate::domain::generation`].

use async_trait::async_trait;

/// Errors raised by generation source adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GenerationSourceError {
    /// The provider could not be reached or timed out.
    #[error("generation provider transport failed: {message}")]
    Transport { message: String },
    /// The provider answered with a non-success status.
    #[error("generation provider returned status {status}: {body_preview}")]
    Status { status: u16, body_preview: String },
    /// The provider's payload could not be decoded.
    #[error("generation provider payload could not be decoded: {message}")]
    Decode { message: String },
    /// The provider answered successfully but with no usable text.
    #[error("generation provider returned an empty response")]
    EmptyResponse,
}

impl GenerationSourceError {
    /// Build a [`GenerationSourceError::Transport`] error.
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    /// Build a [`GenerationSourceError::Status`] error.
    pub fn status(status: u16, body_preview: impl Into<String>) -> Self {
        Self::Status {
            status,
            body_preview: body_preview.into(),
        }
    }

    /// Build a [`GenerationSourceError::Decode`] error.
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }
}

/// Port for one-shot text generation.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GenerationSource: Send + Sync {
    /// Ask the provider for a completion of `prompt` under `system_prompt`.
    async fn generate(
        &self,
        system_prompt: &str,
        prompt: &str,
    ) -> Result<String, GenerationSourceError>;
}

/// Fixture implementation returning a fixed, well-formed reply.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureGenerationSource;

#[async_trait]
impl GenerationSource for FixtureGenerationSource {
    async fn generate(
        &self,
        _system_prompt: &str,
        _prompt: &str,
    ) -> Result<String, GenerationSourceError> {
        Ok("Title: Fixture Idea\n\
            Summary: A placeholder idea from the fixture source.\n\
            Details: Used in tests that do not exercise the provider.\n\
            Tags: Testing, Fixtures"
            .to_owned())
    }
}
