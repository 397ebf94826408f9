//! Localized strings.
//!
//! Every piece of user-facing feedback goes through [`StringLookup`] so hosts
//! can plug their own translation layer. [`EnglishStrings`] ships the default
//! English pack. Placeholders use the `{$a}` form.

/// Lookup of localized text by key.
pub trait StringLookup: Send + Sync {
    /// Resolve `key`, substituting `{$a}` with `a` when given.
    ///
    /// Unknown keys resolve to `[[key]]` so a missing translation is visible
    /// without failing the request.
    fn get_string(&self, key: &str, a: Option<&str>) -> String;
}

const STRINGS_EN: &[(&str, &str)] = &[
    ("acceptedmimetypes", "Accepted mimetypes"),
    (
        "acceptedmimetypes_help",
        "Submission of files of a different mimetype than the ones listed here will automatically be considered unparseable, and will be rejected. One mimetype per line. Lines starting with _#_ are ignored. Entries must exist in the file types list. Leave empty to accept all types.",
    ),
    ("addmorefields", "Add more fields"),
    ("contentregex", "Content regex"),
    (
        "contentregex_help",
        "The regular expressions to test the file content against. All expressions must be true. The 3rd field is used to display a message when the validation fails. Expressions are case-sensitive and do not support multi-lines.",
    ),
    ("enabled", "Enabled"),
    (
        "enabled_help",
        "When enabled, the file submission of a student will have to match regular expression rules. This requires file submissions to be enabled and limited to a single file.",
    ),
    (
        "errorexpectedzipwithsinglefile",
        "The zip file should not contain more than one file.",
    ),
    ("feedback", "Validation feedback"),
    (
        "filecontentdoesnotpasscontentvalidation",
        "The file content does not pass the content validation rules.",
    ),
    ("filemustendincorcpp", "File must end in .c or .cpp"),
    ("filenameisnotvalid", "The file name is not valid."),
    ("filenameregex", "File name regex"),
    (
        "filenameregex_help",
        "The regular expression that the file name must comply to. Leave empty if not required.",
    ),
    ("functionmainnotfound", "Function main() not found"),
    (
        "ignorevalidationerrors",
        "Ignore file validation warnings and proceed with the submission",
    ),
    ("invalidtypesfound", "Invalid types found: {$a}."),
    ("matchmode", "Match mode"),
    ("mustmatch", "Must match"),
    ("mustnotmatch", "Must NOT match"),
    (
        "pluginimproperlyconfigured",
        "The plugin 'File regex validation' is not configured properly and will not work, it should be ordered after the 'File submissions' plugin. Please notify your administrator.",
    ),
    ("pluginname", "File regex validation"),
    ("regex", "Regex"),
    ("typeoffilenotsupported", "This type of file is not supported."),
];

/// The bundled English string pack.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnglishStrings;

impl StringLookup for EnglishStrings {
    fn get_string(&self, key: &str, a: Option<&str>) -> String {
        match STRINGS_EN.iter().find(|(k, _)| *k == key) {
            Some((_, text)) => match a {
                Some(value) => text.replace("{$a}", value),
                None => (*text).to_string(),
            },
            None => format!("[[{}]]", key),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_key() {
        assert_eq!(
            EnglishStrings.get_string("filenameisnotvalid", None),
            "The file name is not valid."
        );
    }

    #[test]
    fn test_substitutes_argument() {
        assert_eq!(
            EnglishStrings.get_string("invalidtypesfound", Some("foo/bar, baz/qux")),
            "Invalid types found: foo/bar, baz/qux."
        );
    }

    #[test]
    fn test_unknown_key_is_marked() {
        assert_eq!(EnglishStrings.get_string("nope", None), "[[nope]]");
    }
}
