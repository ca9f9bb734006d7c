//! Core data model for the product CRUD service.
//!
//! A single entity type, mapped to its database table via `sqlx::FromRow`
//! and serialized as JSON via `serde`.

pub mod product;
