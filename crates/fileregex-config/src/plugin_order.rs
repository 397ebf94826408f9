//! Submission plugin ordering.
//!
//! The validator must run after the file submission plugin so it can remove a
//! file that plugin already accepted. The host owns the order; this config
//! carries it into the service as plain state so the validation path never
//! reads global host settings itself.

use std::env;

/// Sort positions of the two cooperating submission plugins.
///
/// # Environment Variables
///
/// - `FILE_PLUGIN_SORTORDER`: Position of the file submission plugin (default: `0`)
/// - `FILEREGEX_PLUGIN_SORTORDER`: Position of this plugin (default: `1`)
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PluginOrderConfig {
    pub file_sortorder: i64,
    pub fileregex_sortorder: i64,
}

impl Default for PluginOrderConfig {
    fn default() -> Self {
        Self {
            file_sortorder: 0,
            fileregex_sortorder: 1,
        }
    }
}

impl PluginOrderConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            file_sortorder: env::var("FILE_PLUGIN_SORTORDER")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.file_sortorder),
            fileregex_sortorder: env::var("FILEREGEX_PLUGIN_SORTORDER")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.fileregex_sortorder),
        }
    }

    /// Whether this plugin runs strictly after the file submission plugin.
    pub fn is_correctly_ordered(&self) -> bool {
        self.fileregex_sortorder > self.file_sortorder
    }
}
