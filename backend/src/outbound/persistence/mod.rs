//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Concrete implementations of the domain repository ports backed by
//! PostgreSQL via Diesel, with async support through `diesel-async` and
//! `bb8` connection pooling.
//!
//! # Architecture
//!
//! - **Thin adapters**: Repository implementations only translate between
//!   Diesel models and domain types. No business logic resides here.
//! - **Internal models**: Diesel row structs (`models.rs`) and schema
//!   definitions (`schema.rs`) are implementation details, never exposed to
//!   the domain layer.
//! - **Strongly typed errors**: All database errors are mapped to the port
//!   error types.

mod diesel_comment_repository;
mod diesel_idea_repository;
mod diesel_login_service;
mod diesel_profile_repository;
mod diesel_reaction_repository;
mod error_mapping;
mod models;
mod pool;
mod schema;

pub use diesel_comment_repository::DieselCommentRepository;
pub use diesel_idea_repository::DieselIdeaRepository;
pub use diesel_login_service::DieselLoginService;
pub use diesel_profile_repository::DieselProfileRepository;
pub use diesel_reaction_repository::DieselReactionRepository;
pub use pool::{DbPool, PoolConfig, PoolError};
