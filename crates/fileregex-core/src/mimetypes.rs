//! Mimetype catalog.
//!
//! The catalog is the host's list of known file types. It is used to infer a
//! file's mimetype from its name and to check administrator-entered mimetype
//! lists against the types the platform actually knows.

use std::collections::BTreeSet;

/// Mimetype reported for names whose extension is not in the catalog.
pub const UNKNOWN_MIMETYPE: &str = "document/unknown";

/// The host's catalog of known file types.
pub trait MimetypeCatalog: Send + Sync {
    /// Infer a mimetype from a file name (or a `/`-separated path).
    fn mimetype_for_filename(&self, filename: &str) -> String;

    /// All distinct mimetypes the catalog knows about.
    fn known_mimetypes(&self) -> BTreeSet<String>;

    fn is_known(&self, mimetype: &str) -> bool {
        self.known_mimetypes().contains(mimetype)
    }
}

/// Extension to mimetype table shipped with the service.
const FILE_TYPES: &[(&str, &str)] = &[
    ("3gp", "video/quicktime"),
    ("7z", "application/x-7z-compressed"),
    ("aac", "audio/aac"),
    ("ai", "application/postscript"),
    ("bmp", "image/bmp"),
    ("c", "text/plain"),
    ("cpp", "text/plain"),
    ("css", "text/css"),
    ("csv", "text/csv"),
    ("doc", "application/msword"),
    (
        "docx",
        "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
    ),
    ("eps", "application/postscript"),
    ("gif", "image/gif"),
    ("gz", "application/g-zip"),
    ("h", "text/plain"),
    ("hpp", "text/plain"),
    ("htc", "text/x-component"),
    ("htm", "text/html"),
    ("html", "text/html"),
    ("ics", "text/calendar"),
    ("java", "text/plain"),
    ("jpe", "image/jpeg"),
    ("jpeg", "image/jpeg"),
    ("jpg", "image/jpeg"),
    ("js", "application/x-javascript"),
    ("json", "application/json"),
    ("latex", "application/x-latex"),
    ("m", "text/plain"),
    ("mp3", "audio/mp3"),
    ("mp4", "video/mp4"),
    ("odt", "application/vnd.oasis.opendocument.text"),
    ("pdf", "application/pdf"),
    ("php", "text/plain"),
    ("pl", "text/plain"),
    ("png", "image/png"),
    ("ppt", "application/vnd.ms-powerpoint"),
    (
        "pptx",
        "application/vnd.openxmlformats-officedocument.presentationml.presentation",
    ),
    ("py", "text/plain"),
    ("rb", "text/plain"),
    ("rtf", "text/rtf"),
    ("rtx", "text/richtext"),
    ("scss", "text/x-scss"),
    ("sh", "application/x-sh"),
    ("svg", "image/svg+xml"),
    ("tar", "application/x-tar"),
    ("tex", "application/x-tex"),
    ("tsv", "text/tab-separated-values"),
    ("txt", "text/plain"),
    ("xhtml", "application/xhtml+xml"),
    ("xls", "application/vnd.ms-excel"),
    (
        "xlsx",
        "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
    ),
    ("xml", "application/xml"),
    ("xsl", "text/xml"),
    ("zip", "application/zip"),
];

/// Catalog backed by the built-in file type table.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinMimetypeCatalog;

impl MimetypeCatalog for BuiltinMimetypeCatalog {
    fn mimetype_for_filename(&self, filename: &str) -> String {
        let basename = filename.rsplit('/').next().unwrap_or(filename);

        let extension = match basename.rsplit_once('.') {
            Some((_, ext)) if !ext.is_empty() => ext.to_lowercase(),
            _ => return UNKNOWN_MIMETYPE.to_string(),
        };

        FILE_TYPES
            .iter()
            .find(|(ext, _)| *ext == extension)
            .map(|(_, mimetype)| (*mimetype).to_string())
            .unwrap_or_else(|| UNKNOWN_MIMETYPE.to_string())
    }

    fn known_mimetypes(&self) -> BTreeSet<String> {
        FILE_TYPES
            .iter()
            .map(|(_, mimetype)| (*mimetype).to_string())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_infers_from_extension() {
        let catalog = BuiltinMimetypeCatalog;
        assert_eq!(catalog.mimetype_for_filename("main.c"), "text/plain");
        assert_eq!(catalog.mimetype_for_filename("page.HTML"), "text/html");
        assert_eq!(catalog.mimetype_for_filename("bundle.zip"), "application/zip");
        assert_eq!(
            catalog.mimetype_for_filename("script.js"),
            "application/x-javascript"
        );
    }

    #[test]
    fn test_uses_last_path_component() {
        let catalog = BuiltinMimetypeCatalog;
        assert_eq!(catalog.mimetype_for_filename("src.d/main.cpp"), "text/plain");
        assert_eq!(catalog.mimetype_for_filename("v1.2/README"), UNKNOWN_MIMETYPE);
    }

    #[test]
    fn test_unknown_extension() {
        let catalog = BuiltinMimetypeCatalog;
        assert_eq!(catalog.mimetype_for_filename("binary.xyz"), UNKNOWN_MIMETYPE);
        assert_eq!(catalog.mimetype_for_filename("Makefile"), UNKNOWN_MIMETYPE);
        assert_eq!(catalog.mimetype_for_filename("trailing."), UNKNOWN_MIMETYPE);
    }

    #[test]
    fn test_known_mimetypes_are_distinct() {
        let catalog = BuiltinMimetypeCatalog;
        let known = catalog.known_mimetypes();
        assert!(known.contains("text/plain"));
        assert!(catalog.is_known("application/xml"));
        assert!(!catalog.is_known("foo/bar"));
        assert!(!catalog.is_known(UNKNOWN_MIMETYPE));
    }
}
