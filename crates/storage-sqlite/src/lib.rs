//! SQLite storage implementation for Stakelens.
//!
//! This crate provides all database-related functionality using Diesel
//! ORM with SQLite. It implements the storage traits defined in
//! `stakelens-core` and contains:
//!
//! - Database connection pooling and management
//! - Embedded Diesel migrations, including the seeded token universe
//! - Database-specific model types (with Diesel derives)
//! - The [`TokenRepository`] behind `stakelens_core::tokens::TokenStore`
//!
//! # Architecture
//!
//! This is the only crate in the application that depends on Diesel;
//! everything above works against traits.
//!
//! ```text
//!   stakelens-core (domain traits)
//!              │
//!              ▼
//!   stakelens-storage-sqlite (this crate)
//!              │
//!              ▼
//!          SQLite file
//! ```

pub mod db;
pub mod errors;
pub mod schema;
pub mod tokens;

// Re-export commonly used types for convenience
pub use db::{create_pool, get_connection, run_migrations, DbConnection, DbPool};
pub use errors::StorageError;
pub use tokens::TokenRepository;

// Re-export core error types so callers need one import
pub use stakelens_core::errors::{DatabaseError, Error, Result};
