//! HTTP adapter for the `TokenVerifier` port.

mod http_token_verifier;

pub use http_token_verifier::AuthHttpTokenVerifier;
