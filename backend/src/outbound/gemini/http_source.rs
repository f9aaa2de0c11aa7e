//! Reqwest-backed Gemini source adapter.
//!
//! This adapter owns transport details only: request serialisation, timeout
//! and HTTP error mapping, and JSON decoding into the plain text the domain
//! parses.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};

use super::dto::{GenerateContentRequestDto, GenerateContentResponseDto};
use crate::domain::ports::{GenerationSource, GenerationSourceError};

const API_KEY_HEADER: &str = "x-goog-api-key";

/// Gemini source adapter that performs HTTP POST requests against one
/// generateContent endpoint.
pub struct GeminiHttpSource {
    client: Client,
    endpoint: Url,
    api_key: String,
}

impl GeminiHttpSource {
    /// Build an adapter using a reqwest client with an explicit request
    /// timeout.
    ///
    /// # Errors
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(
        endpoint: Url,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint,
            api_key: api_key.into(),
        })
    }
}

#[async_trait]
impl GenerationSource for GeminiHttpSource {
    async fn generate(
        &self,
        system_prompt: &str,
        prompt: &str,
    ) -> Result<String, GenerationSourceError> {
        let payload = GenerateContentRequestDto::new(system_prompt, prompt);
        let response = self
            .client
            .post(self.endpoint.clone())
            .header(API_KEY_HEADER, self.api_key.as_str())
            .json(&payload)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(map_status_error(status, body.as_ref()));
        }

        parse_text(body.as_ref())
    }
}

fn parse_text(body: &[u8]) -> Result<String, GenerationSourceError> {
    let decoded: GenerateContentResponseDto = serde_json::from_slice(body).map_err(|error| {
        GenerationSourceError::decode(format!("invalid Gemini JSON payload: {error}"))
    })?;
    decoded
        .into_text()
        .ok_or(GenerationSourceError::EmptyResponse)
}

fn map_transport_error(error: reqwest::Error) -> GenerationSourceError {
    GenerationSourceError::transport(error.to_string())
}

fn map_status_error(status: StatusCode, body: &[u8]) -> GenerationSourceError {
    GenerationSourceError::status(status.as_u16(), body_preview(body))
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}
