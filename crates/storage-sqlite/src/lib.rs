//! SQLite storage implementation for Marketlens.
//!
//! This crate is the only place in the application where Diesel
//! dependencies exist. All other crates are database-agnostic and work
//! with the traits defined in `marketlens-core`.
//!
//! The whole persistent surface is one table: `kv_entries`, a namespaced
//! string-key / string-value store. Cache entries live under the
//! `cache:` prefix and the watchlist collection under its own key; all
//! structure is client-side JSON text, never queried structurally.
//!
//! ```text
//! core (domain)
//!       │
//!       ▼
//! storage-sqlite (this crate)
//!       │
//!       ▼
//!   SQLite DB
//! ```

pub mod db;
pub mod errors;
pub mod schema;

// Repository implementations
pub mod kv;
pub mod watchlists;

// Re-export database utilities
pub use db::{
    create_pool, get_connection, get_db_path, init, run_migrations, spawn_writer, DbConnection,
    DbPool, WriteHandle,
};

// Re-export storage errors and conversion helpers
pub use errors::{IntoCore, StorageError};

// Re-export from marketlens-core for convenience
pub use marketlens_core::errors::{DatabaseError, Error, Result};
