//! Actix middleware used by the HTTP server.

pub mod trace;

pub use trace::{TRACE_ID_HEADER, Trace, TraceId};
