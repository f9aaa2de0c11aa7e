//! Gemini generateContent adapter for the `GenerationSource` port.

mod dto;
mod http_source;

pub use http_source::GeminiHttpSource;
