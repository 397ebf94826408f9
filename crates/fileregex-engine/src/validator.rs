//! The submission validator.
//!
//! Runs the checks of one save attempt in a fixed order and stops at the
//! first failure. The validator performs no I/O: the caller supplies the file
//! and acts on the returned [`Verdict`].

use fileregex_core::mimetypes::MimetypeCatalog;
use fileregex_core::plugin::ZIP_MIMETYPE;
use fileregex_core::strings::StringLookup;
use fileregex_models::{Rule, RuleSet};
use tracing::debug;

use crate::allow_list::MimetypeAllowList;
use crate::archive::unzip_single_entry;
use crate::regex_rule::{RuleTarget, validate_bytes, validate_str};

/// A file as stored by the file submission plugin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmittedFile {
    pub filename: String,
    pub mimetype: String,
    pub content: Vec<u8>,
}

impl SubmittedFile {
    pub fn new(filename: impl Into<String>, mimetype: impl Into<String>, content: Vec<u8>) -> Self {
        Self {
            filename: filename.into(),
            mimetype: mimetype.into(),
            content,
        }
    }
}

/// Why a submission went through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AcceptReason {
    /// Zero or several files were submitted
    NotApplicable,
    /// The plugin runs before the file submission plugin
    Misconfigured,
    Bypassed,
    Passed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    ZipNotSingleFile,
    FilenameRule,
    UnsupportedMimetype,
    ContentRule { index: usize },
}

impl RejectReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ZipNotSingleFile => "zip_not_single_file",
            Self::FilenameRule => "filename_rule",
            Self::UnsupportedMimetype => "unsupported_mimetype",
            Self::ContentRule { .. } => "content_rule",
        }
    }
}

impl AcceptReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NotApplicable => "not_applicable",
            Self::Misconfigured => "misconfigured",
            Self::Bypassed => "bypassed",
            Self::Passed => "passed",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rejection {
    pub reason: RejectReason,
    /// Localized message shown to the learner
    pub feedback: String,
    /// The submitted file must be removed from the file plugin's area
    pub delete_file: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Accepted(AcceptReason),
    Rejected(Rejection),
}

impl Verdict {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted(_))
    }

    /// Metric label for the outcome.
    pub fn reason(&self) -> &'static str {
        match self {
            Self::Accepted(reason) => reason.as_str(),
            Self::Rejected(rejection) => rejection.reason.as_str(),
        }
    }
}

/// The only file of a submission, if there is exactly one.
pub fn single_file<T>(files: &[T]) -> Option<&T> {
    match files {
        [file] => Some(file),
        _ => None,
    }
}

/// Upper bound on the extracted entry of a zip submission.
pub const DEFAULT_MAX_ENTRY_SIZE: usize = 20 * 1024 * 1024;

/// The checks that accept a submission without looking at the file.
///
/// Returns `Some` when the attempt must go through untouched: zero or several
/// files, the plugin ordered before the file submission plugin, or the
/// learner asked to bypass validation. Callers run this before reading any
/// file or loading rules.
pub fn fail_open(file_count: usize, correctly_ordered: bool, bypass: bool) -> Option<AcceptReason> {
    if file_count != 1 {
        Some(AcceptReason::NotApplicable)
    } else if !correctly_ordered {
        Some(AcceptReason::Misconfigured)
    } else if bypass {
        Some(AcceptReason::Bypassed)
    } else {
        None
    }
}

/// Validates one submission against an instance's rules.
pub struct SubmissionValidator<'a> {
    rules: &'a RuleSet,
    allow_list: &'a MimetypeAllowList,
    catalog: &'a dyn MimetypeCatalog,
    strings: &'a dyn StringLookup,
    max_entry_size: usize,
}

impl<'a> SubmissionValidator<'a> {
    pub fn new(
        rules: &'a RuleSet,
        allow_list: &'a MimetypeAllowList,
        catalog: &'a dyn MimetypeCatalog,
        strings: &'a dyn StringLookup,
    ) -> Self {
        Self {
            rules,
            allow_list,
            catalog,
            strings,
            max_entry_size: DEFAULT_MAX_ENTRY_SIZE,
        }
    }

    /// Limit the extracted size of a zip submission's entry.
    pub fn with_max_entry_size(mut self, max_entry_size: usize) -> Self {
        self.max_entry_size = max_entry_size;
        self
    }

    fn reject(&self, reason: RejectReason, key: &str, rule: Option<&Rule>) -> Verdict {
        let feedback = rule
            .and_then(|rule| rule.feedback.clone())
            .unwrap_or_else(|| self.strings.get_string(key, None));

        Verdict::Rejected(Rejection {
            reason,
            feedback,
            delete_file: true,
        })
    }

    /// Decide on one save attempt.
    ///
    /// `file` is `Some` only when exactly one file was submitted (see
    /// [`single_file`]). `correctly_ordered` tells whether this plugin runs
    /// after the file submission plugin.
    pub fn validate(
        &self,
        file: Option<&SubmittedFile>,
        correctly_ordered: bool,
        bypass: bool,
    ) -> Verdict {
        let file_count = usize::from(file.is_some());
        if let Some(reason) = fail_open(file_count, correctly_ordered, bypass) {
            return Verdict::Accepted(reason);
        }
        let Some(file) = file else {
            return Verdict::Accepted(AcceptReason::NotApplicable);
        };

        let unwrapped;
        let (filename, content) = if file.mimetype == ZIP_MIMETYPE {
            match unzip_single_entry(&file.content, self.max_entry_size) {
                Ok(entry) => {
                    unwrapped = entry;
                    (unwrapped.name.as_str(), unwrapped.content.as_slice())
                }
                Err(err) => {
                    debug!(filename = %file.filename, error = %err, "Rejecting zip submission");
                    return self.reject(
                        RejectReason::ZipNotSingleFile,
                        "errorexpectedzipwithsinglefile",
                        None,
                    );
                }
            }
        } else {
            (file.filename.as_str(), file.content.as_slice())
        };

        let filename_rule = &self.rules.filename;
        if !validate_str(filename_rule, filename, RuleTarget::Filename) {
            return self.reject(
                RejectReason::FilenameRule,
                "filenameisnotvalid",
                Some(filename_rule),
            );
        }

        if self.rules.has_content_rules() {
            let mimetype = self.catalog.mimetype_for_filename(filename);
            if !self.allow_list.allows(&mimetype) {
                debug!(filename = %filename, mimetype = %mimetype, "Mimetype not accepted");
                return self.reject(
                    RejectReason::UnsupportedMimetype,
                    "typeoffilenotsupported",
                    None,
                );
            }
        }

        for (index, rule) in self.rules.content.iter().enumerate() {
            if !validate_bytes(rule, content, RuleTarget::Content) {
                return self.reject(
                    RejectReason::ContentRule { index },
                    "filecontentdoesnotpasscontentvalidation",
                    Some(rule),
                );
            }
        }

        Verdict::Accepted(AcceptReason::Passed)
    }
}
