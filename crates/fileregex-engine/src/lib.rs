//! # Fileregex Engine
//!
//! Synchronous validation of a single submitted file.
//!
//! - [`regex_rule`]: Match-mode evaluation of one rule, failing open on bad patterns
//! - [`archive`]: Unwrapping of single-entry zip submissions
//! - [`allow_list`]: The accepted mimetypes setting
//! - [`validator`]: The ordered validation pass producing a [`Verdict`]
//!
//! # Example
//!
//! ```ignore
//! use fileregex_engine::{MimetypeAllowList, SubmissionValidator, SubmittedFile};
//!
//! let validator = SubmissionValidator::new(&rules, &allow_list, &catalog, &strings);
//! let file = SubmittedFile::new("main.c", "text/plain", bytes);
//! let verdict = validator.validate(Some(&file), order.is_correctly_ordered(), false);
//! ```

pub mod allow_list;
pub mod archive;
pub mod regex_rule;
pub mod validator;

pub use allow_list::{InvalidMimetypes, MimetypeAllowList};
pub use archive::{ArchiveError, ZipEntry, unzip_single_entry};
pub use validator::{
    AcceptReason, DEFAULT_MAX_ENTRY_SIZE, RejectReason, Rejection, SubmissionValidator,
    SubmittedFile, Verdict, fail_open, single_file,
};
