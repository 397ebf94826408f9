//! # Fileregex Core
//!
//! Core types, errors, and host collaborator contracts for the file regex
//! submission validator.
//!
//! This crate provides the foundational types used throughout the workspace:
//!
//! - [`errors`]: Application error type with HTTP response conversion
//! - [`file_storage`]: Access to the file submission plugin's storage area
//! - [`mimetypes`]: The mimetype catalog (known types, inference from file names)
//! - [`strings`]: Localized string lookup for all user-facing feedback
//! - [`plugin`]: Plugin identity constants shared by the service and the CLI
//!
//! # Example
//!
//! ```ignore
//! use fileregex_core::mimetypes::{BuiltinMimetypeCatalog, MimetypeCatalog};
//! use fileregex_core::strings::{EnglishStrings, StringLookup};
//!
//! let catalog = BuiltinMimetypeCatalog;
//! assert_eq!(catalog.mimetype_for_filename("main.c"), "text/plain");
//!
//! let strings = EnglishStrings;
//! let message = strings.get_string("invalidtypesfound", Some("foo/bar"));
//! ```

pub mod errors;
pub mod file_storage;
pub mod mimetypes;
pub mod plugin;
pub mod strings;

// Re-export commonly used types at crate root
pub use errors::AppError;
pub use file_storage::{FileArea, FileStorage, LocalFileStorage, StorageError, StoredFile};
pub use mimetypes::{BuiltinMimetypeCatalog, MimetypeCatalog};
pub use strings::{EnglishStrings, StringLookup};
