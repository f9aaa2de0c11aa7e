//! AI-assisted idea generation.
//!
//! The provider returns loosely structured plain text; [`parse_provider_text`]
//! extracts fields by line position: first line title, second line summary,
//! remaining lines (minus a `Tags:` line) details. Provider or transport
//! failures fall back to a canned local idea so the feature degrades instead
//! of erroring; the `source` marker tells callers which path produced the
//! result.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::warn;
use utoipa::ToSchema;

use crate::domain::ports::GenerationSource;
use crate::domain::{DEFAULT_ICON, Error};

/// System prompt used when neither the request nor the configuration
/// supplies one.
pub const DEFAULT_SYSTEM_PROMPT: &str = "You are an expert product strategist and copywriter. \
     Respond concisely and in a structured format using the following sections: \
     Title:, Summary:, Details:, Tags:. Keep tags to a short comma-separated list.";

/// Title used when the provider response is empty.
pub const FALLBACK_TITLE: &str = "AI Idea";

/// Maximum number of tags taken from the provider response.
pub const MAX_GENERATED_TAGS: usize = 6;

/// Which path produced a generated idea.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum GenerationOrigin {
    /// The generative-AI provider answered.
    Provider,
    /// The provider failed; a local template was substituted.
    Local,
}

/// Structured idea fields extracted from a generation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedIdea {
    pub title: String,
    pub summary: String,
    pub details: String,
    pub tags: Vec<String>,
    pub icon: String,
    /// Marker distinguishing provider output from the local fallback.
    pub source: GenerationOrigin,
}

/// Parse provider plain text into idea fields by line position.
#[must_use]
pub fn parse_provider_text(text: &str) -> GeneratedIdea {
    let lines: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();

    let tags = lines
        .iter()
        .find(|line| line.to_lowercase().starts_with("tags:"))
        .map(|line| {
            line.split_once(':')
                .map(|(_, rest)| rest)
                .unwrap_or_default()
                .split(',')
                .map(str::trim)
                .filter(|tag| !tag.is_empty())
                .take(MAX_GENERATED_TAGS)
                .map(str::to_owned)
                .collect()
        })
        .unwrap_or_default();

    let strip = |line: &str, prefix: &str| -> String {
        line.strip_prefix(prefix).unwrap_or(line).trim().to_owned()
    };

    let title = lines
        .first()
        .map(|line| strip(line, "Title:"))
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| FALLBACK_TITLE.to_owned());
    let summary = lines
        .get(1)
        .map(|line| strip(line, "Summary:"))
        .unwrap_or_default();
    let details = lines
        .iter()
        .skip(2)
        .filter(|line| !line.to_lowercase().starts_with("tags:"))
        .copied()
        .collect::<Vec<_>>()
        .join("\n");
    let details = strip(&details, "Details:");

    GeneratedIdea {
        title,
        summary,
        details,
        tags,
        icon: DEFAULT_ICON.to_owned(),
        source: GenerationOrigin::Provider,
    }
}

/// Canned idea substituted when the provider is unreachable or misbehaves.
#[must_use]
pub fn local_template_idea() -> GeneratedIdea {
    GeneratedIdea {
        title: "AI-Powered Market Research Tool".to_owned(),
        summary: "A SaaS platform that uses AI to analyze market trends and suggest \
                  new business opportunities."
            .to_owned(),
        details: "This tool leverages NLP and ML to scan news, patents, and social \
                  media for emerging trends, providing actionable insights for \
                  entrepreneurs."
            .to_owned(),
        tags: vec!["AI".to_owned(), "SaaS".to_owned(), "Market Research".to_owned()],
        icon: DEFAULT_ICON.to_owned(),
        source: GenerationOrigin::Local,
    }
}

/// Drives one generation run against a [`GenerationSource`].
pub struct GenerationService<S: ?Sized> {
    source: Arc<S>,
    configured_system_prompt: Option<String>,
}

impl<S: ?Sized> Clone for GenerationService<S> {
    fn clone(&self) -> Self {
        Self {
            source: Arc::clone(&self.source),
            configured_system_prompt: self.configured_system_prompt.clone(),
        }
    }
}

impl<S: ?Sized> GenerationService<S> {
    /// Create a service with an optional configured system prompt.
    pub fn new(source: Arc<S>, configured_system_prompt: Option<String>) -> Self {
        Self {
            source,
            configured_system_prompt,
        }
    }
}

impl<S: GenerationSource + ?Sized> GenerationService<S> {
    /// Generate an idea for the given prompt.
    ///
    /// System prompt precedence: request override, then configuration, then
    /// [`DEFAULT_SYSTEM_PROMPT`]. Provider failures are logged and replaced
    /// with [`local_template_idea`]; no retry is attempted.
    ///
    /// # Errors
    /// Returns [`Error`] with code `invalid_request` when the prompt is
    /// blank.
    pub async fn generate(
        &self,
        prompt: &str,
        system_prompt_override: Option<&str>,
    ) -> Result<GeneratedIdea, Error> {
        let prompt = prompt.trim();
        if prompt.is_empty() {
            return Err(Error::invalid_request("missing promptText in request body"));
        }

        let system_prompt = system_prompt_override
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .or(self.configured_system_prompt.as_deref())
            .unwrap_or(DEFAULT_SYSTEM_PROMPT);

        match self.source.generate(system_prompt, prompt).await {
            Ok(text) => Ok(parse_provider_text(&text)),
            Err(error) => {
                warn!(%error, "generation provider failed, substituting local idea");
                Ok(local_template_idea())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::{GenerationSourceError, MockGenerationSource};
    use rstest::rstest;

    const SAMPLE: &str = "Title: Robo Gardener\n\
        Summary: Autonomous balcony gardening.\n\
        Details: A robot arm waters and prunes plants.\n\
        It learns each plant's needs over time.\n\
        Tags: Robotics, IoT, Consumer";

    #[test]
    fn parses_title_summary_details_and_tags_by_position() {
        let idea = parse_provider_text(SAMPLE);
        assert_eq!(idea.title, "Robo Gardener");
        assert_eq!(idea.summary, "Autonomous balcony gardening.");
        assert_eq!(
            idea.details,
            "A robot arm waters and prunes plants.\nIt learns each plant's needs over time."
        );
        assert_eq!(idea.tags, ["Robotics", "IoT", "Consumer"]);
        assert_eq!(idea.icon, DEFAULT_ICON);
        assert_eq!(idea.source, GenerationOrigin::Provider);
    }

    #[test]
    fn empty_text_falls_back_to_placeholder_title() {
        let idea = parse_provider_text("");
        assert_eq!(idea.title, FALLBACK_TITLE);
        assert_eq!(idea.summary, "");
        assert_eq!(idea.details, "");
        assert!(idea.tags.is_empty());
    }

    #[test]
    fn tag_list_is_capped_and_blank_entries_dropped() {
        let text = "T\nS\nTags: a, , b, c, d, e, f, g";
        let idea = parse_provider_text(text);
        assert_eq!(idea.tags.len(), MAX_GENERATED_TAGS);
        assert_eq!(idea.tags, ["a", "b", "c", "d", "e", "f"]);
    }

    #[rstest]
    #[case("TAGS: x, y")]
    #[case("tags: x, y")]
    fn tags_line_match_is_case_insensitive(#[case] line: &str) {
        let text = format!("T\nS\n{line}");
        let idea = parse_provider_text(&text);
        assert_eq!(idea.tags, ["x", "y"]);
    }

    #[tokio::test]
    async fn blank_prompt_is_rejected() {
        let service = GenerationService::new(Arc::new(MockGenerationSource::new()), None);
        let err = service.generate("   ", None).await.expect_err("must fail");
        assert_eq!(err.code(), crate::domain::ErrorCode::InvalidRequest);
    }

    #[tokio::test]
    async fn provider_failure_substitutes_local_template() {
        let mut source = MockGenerationSource::new();
        source
            .expect_generate()
            .returning(|_, _| Err(GenerationSourceError::transport("connection refused")));
        let service = GenerationService::new(Arc::new(source), None);
        let idea = service
            .generate("a gardening robot", None)
            .await
            .expect("fallback succeeds");
        assert_eq!(idea.source, GenerationOrigin::Local);
        assert_eq!(idea, local_template_idea());
    }

    #[tokio::test]
    async fn request_override_takes_precedence_over_configuration() {
        let mut source = MockGenerationSource::new();
        source
            .expect_generate()
            .withf(|system, prompt| system == "override" && prompt == "make one")
            .returning(|_, _| Ok("Title: T\nSummary: S".to_owned()));
        let service =
            GenerationService::new(Arc::new(source), Some("configured".to_owned()));
        let idea = service
            .generate("make one", Some("override"))
            .await
            .expect("generation succeeds");
        assert_eq!(idea.source, GenerationOrigin::Provider);
        assert_eq!(idea.title, "T");
    }

    #[tokio::test]
    async fn default_system_prompt_is_used_when_nothing_configured() {
        let mut source = MockGenerationSource::new();
        source
            .expect_generate()
            .withf(|system, _| system == DEFAULT_SYSTEM_PROMPT)
            .returning(|_, _| Ok("Title: T".to_owned()));
        let service = GenerationService::new(Arc::new(source), None);
        let idea = service.generate("p", None).await.expect("succeeds");
        assert_eq!(idea.title, "T");
    }
}
