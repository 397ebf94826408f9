//! Accepted mimetypes.

use std::collections::BTreeSet;

use fileregex_core::mimetypes::MimetypeCatalog;
use thiserror::Error;

/// Non-text types seeded into the default list.
const DEFAULT_EXTRA_MIMETYPES: &[&str] = &[
    "application/x-javascript",
    "application/x-latex",
    "application/x-sh",
    "application/xml",
];

/// Entries of a mimetype setting the catalog does not know.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown mimetypes: {}", .unknown.join(", "))]
pub struct InvalidMimetypes {
    pub unknown: Vec<String>,
}

/// Mimetypes allowed when content rules are configured. Empty allows all.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MimetypeAllowList {
    types: BTreeSet<String>,
}

/// Meaningful lines of a stored setting: trimmed, no blanks, no `#` comments.
fn entries(raw: &str) -> impl Iterator<Item = &str> {
    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
}

impl MimetypeAllowList {
    pub fn parse(raw: &str) -> Self {
        Self {
            types: entries(raw).map(str::to_string).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn allows(&self, mimetype: &str) -> bool {
        self.types.is_empty() || self.types.contains(mimetype)
    }

    /// Check an administrator-entered value against the catalog.
    ///
    /// Unknown entries are reported in input order.
    pub fn validate_setting(
        raw: &str,
        catalog: &dyn MimetypeCatalog,
    ) -> Result<(), InvalidMimetypes> {
        let unknown: Vec<String> = entries(raw)
            .filter(|entry| !catalog.is_known(entry))
            .map(str::to_string)
            .collect();

        if unknown.is_empty() {
            Ok(())
        } else {
            Err(InvalidMimetypes { unknown })
        }
    }

    /// Value stored at install: every `text/*` type plus a few common source formats.
    pub fn default_setting(catalog: &dyn MimetypeCatalog) -> String {
        let mut types: BTreeSet<String> = catalog
            .known_mimetypes()
            .into_iter()
            .filter(|t| t.starts_with("text/"))
            .collect();
        types.extend(DEFAULT_EXTRA_MIMETYPES.iter().map(|t| t.to_string()));

        types.into_iter().collect::<Vec<_>>().join("\n")
    }
}
