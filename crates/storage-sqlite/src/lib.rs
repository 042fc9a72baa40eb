//! SQLite storage implementation for Cartera.
//!
//! The only crate in the workspace that knows about Diesel. It
//! implements the repository traits defined in `cartera-core` and
//! contains:
//! - connection pooling and the single-writer actor
//! - embedded Diesel migrations
//! - Diesel model types and conversions to the domain models
//!
//! ```text
//!        core (domain)
//!              │
//!              ▼
//!    storage-sqlite (this crate)
//!              │
//!              ▼
//!          SQLite DB
//! ```

pub mod db;
pub mod errors;
pub mod schema;
pub mod utils;

// Repository implementations
pub mod dividends;
pub mod exchanges;
pub mod fx;
pub mod investments;
pub mod platforms;
pub mod prices;
pub mod tickers;

// Re-export database utilities
pub use db::{
    create_pool, get_connection, init, run_migrations, spawn_writer, DbConnection, DbPool,
    WriteHandle,
};

// Re-export storage errors and conversion helpers
pub use errors::{IntoCore, StorageError};

// Re-export from cartera-core for convenience
pub use cartera_core::errors::{DatabaseError, Error, Result};
