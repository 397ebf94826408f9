//! Mimetype setting models, re-exported from the `fileregex-models` crate.

pub use fileregex_models::mimetypes::*;
