//! # Fileregex API
//!
//! Validates single-file assignment submissions against administrator-defined
//! regular expressions on the file name and content.
//!
//! ## Overview
//!
//! The service sits next to a host learning platform's file submission
//! plugin and is called once per submission attempt. It:
//!
//! - Unwraps zip submissions holding exactly one file
//! - Applies the file name rule, the accepted mimetypes and the content rules in order
//! - Deletes a rejected file from the submission and returns feedback for the learner
//! - Lets the learner bypass validation warnings on the next attempt
//!
//! ## Architecture
//!
//! ```text
//! src/
//! ├── modules/
//! │   ├── settings/      # Rule settings form and save
//! │   ├── submissions/   # Save hook and submission form fields
//! │   └── mimetypes/     # Accepted mimetypes admin setting
//! ├── docs.rs           # OpenAPI documentation
//! ├── router.rs         # Main application router
//! ├── state.rs          # Shared application state
//! └── validator.rs      # Validated JSON extractor
//! ```
//!
//! Each feature module has `controller.rs` (handlers), `service.rs`
//! (business logic), `model.rs` (re-exported DTOs) and `router.rs`. The
//! validation itself lives in the synchronous `fileregex-engine` crate.
//!
//! ## Plugin ordering
//!
//! Validation only runs when the plugin is ordered after the file submission
//! plugin (`FILEREGEX_PLUGIN_SORTORDER` > `FILE_PLUGIN_SORTORDER`). Otherwise
//! every submission is accepted and the settings form shows a warning.
//!
//! ## API Documentation
//!
//! - Swagger UI: `http://localhost:3000/swagger-ui`
//! - Scalar: `http://localhost:3000/scalar`

pub mod docs;
pub mod modules;
pub mod router;
pub mod state;
pub mod validator;

// Re-export workspace crates for convenience
pub use fileregex_config;
pub use fileregex_core;
pub use fileregex_db;
pub use fileregex_engine;
pub use fileregex_models;
