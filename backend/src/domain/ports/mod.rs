//! Domain ports and supporting types for the hexagonal boundary.

mod comment_repository;
mod generation_source;
mod idea_repository;
mod login_service;
mod profile_repository;
mod reaction_repository;
mod token_verifier;

#[cfg(test)]
pub use comment_repository::MockCommentRepository;
pub use comment_repository::{
    CommentRepository, CommentRepositoryError, FixtureCommentRepository,
};
#[cfg(test)]
pub use generation_source::MockGenerationSource;
pub use generation_source::{
    FixtureGenerationSource, GenerationSource, GenerationSourceError,
};
#[cfg(test)]
pub use idea_repository::MockIdeaRepository;
pub use idea_repository::{FixtureIdeaRepository, IdeaRepository, IdeaRepositoryError};
#[cfg(test)]
pub use login_service::MockLoginService;
pub use login_service::{FixtureLoginService, LoginService, LoginServiceError};
#[cfg(test)]
pub use profile_repository::MockProfileRepository;
pub use profile_repository::{
    FixtureProfileRepository, ProfileRepository, ProfileRepositoryError,
};
#[cfg(test)]
pub use reaction_repository::MockReactionRepository;
pub use reaction_repository::{
    FixtureReactionRepository, ReactionKind, ReactionRepository, ReactionRepositoryError,
};
#[cfg(test)]
pub use token_verifier::MockTokenVerifier;
pub use token_verifier::{FixtureTokenVerifier, TokenVerifier, TokenVerifierError};
