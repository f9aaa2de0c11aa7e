//! Wire DTOs for the Gemini generateContent API.
//!
//! These types mirror the provider's JSON shapes and never leave this
//! module's parent; the adapter converts them to plain text before the
//! domain sees anything.

use serde::{Deserialize, Serialize};

/// Request payload for one generateContent call.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GenerateContentRequestDto<'a> {
    pub contents: Vec<ContentDto<'a>>,
    pub system_instruction: InstructionDto<'a>,
}

impl<'a> GenerateContentRequestDto<'a> {
    pub fn new(system_prompt: &'a str, prompt: &'a str) -> Self {
        Self {
            contents: vec![ContentDto {
                parts: vec![PartDto { text: prompt }],
            }],
            system_instruction: InstructionDto {
                parts: vec![PartDto {
                    text: system_prompt,
                }],
            },
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct ContentDto<'a> {
    pub parts: Vec<PartDto<'a>>,
}

#[derive(Debug, Serialize)]
pub(crate) struct InstructionDto<'a> {
    pub parts: Vec<PartDto<'a>>,
}

#[derive(Debug, Serialize)]
pub(crate) struct PartDto<'a> {
    pub text: &'a str,
}

/// Response payload of one generateContent call.
#[derive(Debug, Deserialize)]
pub(crate) struct GenerateContentResponseDto {
    #[serde(default)]
    pub candidates: Vec<CandidateDto>,
}

impl GenerateContentResponseDto {
    /// Join the first candidate's text parts, or `None` when nothing usable
    /// came back.
    pub fn into_text(self) -> Option<String> {
        let candidate = self.candidates.into_iter().next()?;
        let text = candidate
            .content
            .parts
            .into_iter()
            .map(|part| part.text)
            .collect::<Vec<_>>()
            .join("");
        if text.trim().is_empty() { None } else { Some(text) }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct CandidateDto {
    #[serde(default)]
    pub content: CandidateContentDto,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct CandidateContentDto {
    #[serde(default)]
    pub parts: Vec<ResponsePartDto>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ResponsePartDto {
    #[serde(default)]
    pub text: String,
}
