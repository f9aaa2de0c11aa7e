//! Outbound adapters: persistence and third-party HTTP services.

pub mod auth;
pub mod gemini;
pub mod persistence;
