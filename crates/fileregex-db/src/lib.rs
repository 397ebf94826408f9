//! # Fileregex DB
//!
//! Database pool and plugin configuration storage.
//!
//! - [`init_db_pool`]: connection pool from `DATABASE_URL`
//! - [`repository`]: per-assignment instance settings and site-wide plugin settings
//!
//! # Example
//!
//! ```ignore
//! use fileregex_db::{PluginConfigRepository, init_db_pool};
//!
//! let pool = init_db_pool().await;
//! let config = PluginConfigRepository::get_config(&pool, assignment_id, "fileregex", "assignsubmission").await?;
//! ```

use std::env;

pub mod repository;

pub use repository::PluginConfigRepository;

/// Initializes a PostgreSQL connection pool.
///
/// # Panics
///
/// Panics if `DATABASE_URL` is not set or the connection fails. Call once at
/// startup and share the pool through the application state.
pub async fn init_db_pool() -> sqlx::PgPool {
    let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    sqlx::PgPool::connect(&database_url)
        .await
        .expect("Failed to connect to database")
}

// Re-export PgPool for convenience
pub use sqlx::PgPool;
