//! # Fileregex Models
//!
//! Domain models and DTOs for the file regex validator.
//!
//! - [`rules`]: Match modes, rules and the per-instance rule set
//! - [`settings`]: Settings form input and the form contribution
//! - [`submissions`]: Save hook request, outcome and responses
//! - [`mimetypes`]: Accepted mimetypes admin setting

pub mod mimetypes;
pub mod rules;
pub mod settings;
pub mod submissions;

pub use rules::{MatchMode, Rule, RuleSet};
pub use settings::{MAX_CONTENT_FIELDS, RawSettings, SettingsForm, SettingsFormParams};
pub use submissions::{SaveSubmissionDto, SaveSubmissionResponse, ValidationOutcome};
