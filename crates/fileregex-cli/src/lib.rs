//! # Fileregex CLI
//!
//! Install and upgrade hooks for the file regex validator, shared by the
//! `fileregex-cli` binary and the service's tests.
//!
//! ```ignore
//! use fileregex_cli::setup;
//!
//! setup::run_migrations(&pool).await?;
//! setup::install(&pool, &BuiltinMimetypeCatalog).await?;
//! ```

pub mod setup;
