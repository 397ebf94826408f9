//! Plugin identity constants.

/// Plugin type name within the submission subtype.
pub const PLUGIN: &str = "fileregex";

/// Plugin subtype the instance configuration is stored under.
pub const SUBTYPE: &str = "assignsubmission";

/// Full component name, used for global settings and form field prefixes.
pub const COMPONENT: &str = "assignsubmission_fileregex";

/// Component owning the submitted files.
pub const FILE_COMPONENT: &str = "assignsubmission_file";

/// File area of the file submission plugin.
pub const FILE_AREA: &str = "submission_files";

/// Request field carrying the learner's bypass choice.
pub const BYPASS_FIELD: &str = "assignsubmission_fileregex_bypass";

/// Global setting holding the accepted mimetypes.
pub const MIMETYPES_SETTING: &str = "mimetypes";

/// Global setting holding the installed plugin version.
pub const VERSION_SETTING: &str = "version";

/// Current plugin version.
pub const PLUGIN_VERSION: i64 = 2017120601;

/// Mimetype that triggers zip unwrapping.
pub const ZIP_MIMETYPE: &str = "application/zip";
