//! Submitted files storage configuration.

use std::env;
use std::path::PathBuf;

/// Where the file submission plugin's areas live on disk.
///
/// # Environment Variables
///
/// - `FILE_STORAGE_DIR`: Root directory of the file areas (default: `./storage/files`)
/// - `FILE_MAX_SIZE_BYTES`: Largest file the storage accepts (default: 20MB)
#[derive(Clone, Debug)]
pub struct StorageConfig {
    pub base_dir: PathBuf,
    pub max_file_size: usize,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            base_dir: PathBuf::from("./storage/files"),
            max_file_size: 20 * 1024 * 1024,
        }
    }
}

impl StorageConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            base_dir: env::var("FILE_STORAGE_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.base_dir),
            max_file_size: env::var("FILE_MAX_SIZE_BYTES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.max_file_size),
        }
    }
}
