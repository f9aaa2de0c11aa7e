//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the database migrations exactly. They are
//! used by Diesel for compile-time query validation and type-safe SQL
//! generation. When migrations change the schema, regenerate this file with
//! `diesel print-schema` or update it by hand.

diesel::table! {
    /// Public profiles, one per account.
    profiles (user_id) {
        /// Primary key: the owning account's UUID.
        user_id -> Uuid,
        /// Name shown on cards and comments (max 32 characters).
        display_name -> Varchar,
        /// Optional free-form biography.
        bio -> Nullable<Text>,
        /// Record creation timestamp.
        created_at -> Timestamptz,
        /// Last modification timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Login credentials, one row per registered email.
    credentials (user_id) {
        /// Primary key: the account's UUID.
        user_id -> Uuid,
        /// Normalised (lower-cased) email, unique.
        email -> Varchar,
        /// Hex-encoded salted SHA-256 digest of the password.
        password_hash -> Varchar,
        /// Hex-encoded random salt.
        salt -> Varchar,
        /// Record creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Published ideas.
    ideas (id) {
        /// Primary key: creation-ordered bigserial.
        id -> Int8,
        /// Short headline.
        title -> Varchar,
        /// One-paragraph pitch shown on cards.
        summary -> Text,
        /// Markdown body rendered on the detail view.
        details -> Text,
        /// Ordered tag strings.
        tags -> Array<Text>,
        /// Emoji or short text icon.
        icon -> Varchar,
        /// Owning account.
        user_id -> Uuid,
        /// Record creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Comments on ideas.
    comments (id) {
        /// Primary key: creation-ordered bigserial.
        id -> Int8,
        /// Idea the comment belongs to.
        idea_id -> Int8,
        /// Commenting account.
        user_id -> Uuid,
        /// Comment body.
        body -> Text,
        /// Record creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Favorite reactions; unique per (user_id, idea_id).
    favorites (id) {
        /// Primary key: bigserial.
        id -> Int8,
        /// Reacting account.
        user_id -> Uuid,
        /// Idea the reaction targets.
        idea_id -> Int8,
        /// Record creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Upvote reactions; unique per (user_id, idea_id).
    upvotes (id) {
        /// Primary key: bigserial.
        id -> Int8,
        /// Reacting account.
        user_id -> Uuid,
        /// Idea the reaction targets.
        idea_id -> Int8,
        /// Record creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::allow_tables_to_appear_in_same_query!(
    profiles,
    credentials,
    ideas,
    comments,
    favorites,
    upvotes,
);
