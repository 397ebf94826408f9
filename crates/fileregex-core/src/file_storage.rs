//! File storage abstraction layer.
//!
//! Submitted files are owned by the file submission plugin. This module gives
//! the validator narrow access to that plugin's storage area: list the files
//! of a submission, read their bytes, and delete a rejected file. Backends
//! can be swapped without changing the validation workflow.
//!
//! # Example
//!
//! ```ignore
//! use fileregex_core::file_storage::{FileArea, FileStorage, LocalFileStorage};
//! use fileregex_core::mimetypes::BuiltinMimetypeCatalog;
//! use std::path::PathBuf;
//! use std::sync::Arc;
//!
//! let storage = LocalFileStorage::new(
//!     PathBuf::from("./storage/files"),
//!     Arc::new(BuiltinMimetypeCatalog),
//! );
//!
//! let area = FileArea::submission_files(assignment_id, submission_id);
//! let files = storage.list_area_files(&area).await?;
//! let content = storage.read(&files[0]).await?;
//! storage.delete(&files[0]).await?;
//! ```

use std::fmt;
use std::future::Future;
use std::path::{Path, PathBuf};
use std::pin::Pin;
use std::sync::Arc;

use tokio::fs;
use uuid::Uuid;

use crate::mimetypes::MimetypeCatalog;
use crate::plugin::{FILE_AREA, FILE_COMPONENT};

/// Boxed future returned by [`FileStorage`] operations.
pub type StorageFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, StorageError>> + Send + 'a>>;

/// Abstract trait for file storage backends.
///
/// Implementations can be swapped without changing business logic.
pub trait FileStorage: Send + Sync {
    /// List every non-directory file stored in an area, ordered by path.
    ///
    /// A missing area is an empty list, not an error.
    fn list_area_files<'a>(&'a self, area: &'a FileArea) -> StorageFuture<'a, Vec<StoredFile>>;

    /// Read the full content of a stored file.
    fn read<'a>(&'a self, file: &'a StoredFile) -> StorageFuture<'a, Vec<u8>>;

    /// Delete a stored file. Deleting a file that no longer exists succeeds.
    fn delete<'a>(&'a self, file: &'a StoredFile) -> StorageFuture<'a, ()>;
}

/// Identifies one storage area: a component's file area for one item
/// within one context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileArea {
    pub context_id: Uuid,
    pub component: String,
    pub filearea: String,
    pub item_id: Uuid,
}

impl FileArea {
    /// The file submission plugin's area for one submission of one assignment.
    pub fn submission_files(assignment_id: Uuid, submission_id: Uuid) -> Self {
        Self {
            context_id: assignment_id,
            component: FILE_COMPONENT.to_string(),
            filearea: FILE_AREA.to_string(),
            item_id: submission_id,
        }
    }
}

/// A file record inside a [`FileArea`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredFile {
    pub area: FileArea,
    /// Path relative to the area root, using `/` separators.
    pub filepath: String,
    /// Last path component of `filepath`.
    pub filename: String,
    pub mimetype: String,
    pub size: u64,
}

/// Error type for file storage operations.
#[derive(Debug)]
pub enum StorageError {
    /// File exceeds maximum allowed size.
    InvalidFileSize { max_bytes: usize },

    /// I/O error (file system or similar).
    IoError(std::io::Error),

    /// File not found.
    NotFound,

    /// Invalid storage key format.
    InvalidKey(String),
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidFileSize { max_bytes } => {
                write!(f, "File exceeds maximum size of {} bytes", max_bytes)
            }
            Self::IoError(e) => write!(f, "I/O error: {}", e),
            Self::NotFound => write!(f, "File not found"),
            Self::InvalidKey(msg) => write!(f, "Invalid storage key: {}", msg),
        }
    }
}

impl std::error::Error for StorageError {}

impl From<std::io::Error> for StorageError {
    fn from(e: std::io::Error) -> Self {
        Self::IoError(e)
    }
}

/// Local filesystem-based storage implementation.
///
/// Areas live at `{base_dir}/{context_id}/{component}/{filearea}/{item_id}/`.
/// Mimetypes are derived from file names through the catalog, the same way
/// the host records them at upload time.
#[derive(Clone)]
pub struct LocalFileStorage {
    /// Base directory where areas are stored
    base_dir: PathBuf,

    /// Maximum file size in bytes accepted by `save`
    max_file_size: usize,

    catalog: Arc<dyn MimetypeCatalog>,
}

impl LocalFileStorage {
    /// Create a new local file storage instance with a 20MB size limit.
    pub fn new(base_dir: PathBuf, catalog: Arc<dyn MimetypeCatalog>) -> Self {
        Self::with_max_size(base_dir, catalog, 20 * 1024 * 1024)
    }

    /// Create a new local file storage with custom max file size.
    pub fn with_max_size(
        base_dir: PathBuf,
        catalog: Arc<dyn MimetypeCatalog>,
        max_file_size: usize,
    ) -> Self {
        Self {
            base_dir,
            max_file_size,
            catalog,
        }
    }

    /// Validate an area component or file area name.
    fn validate_key(key: &str) -> Result<(), StorageError> {
        if key.is_empty() || key.contains("..") || key.starts_with('/') || key.contains('\\') {
            return Err(StorageError::InvalidKey(
                "Key must not be empty, contain '..', or start with '/'".to_string(),
            ));
        }

        if !key
            .chars()
            .all(|c| c.is_alphanumeric() || matches!(c, '-' | '_'))
        {
            return Err(StorageError::InvalidKey(
                "Key contains invalid characters".to_string(),
            ));
        }

        Ok(())
    }

    /// Validate a file path relative to its area.
    ///
    /// Any file name the host accepted is allowed; only paths that would
    /// leave the area are rejected.
    fn validate_filepath(filepath: &str) -> Result<(), StorageError> {
        if filepath.is_empty() || filepath.starts_with('/') || filepath.contains('\\') {
            return Err(StorageError::InvalidKey(
                "File path must be relative and use '/' separators".to_string(),
            ));
        }

        if filepath.split('/').any(|segment| segment.is_empty() || segment == "..") {
            return Err(StorageError::InvalidKey(
                "File path must not contain empty or '..' segments".to_string(),
            ));
        }

        Ok(())
    }

    fn area_dir(&self, area: &FileArea) -> Result<PathBuf, StorageError> {
        Self::validate_key(&area.component)?;
        Self::validate_key(&area.filearea)?;

        Ok(self
            .base_dir
            .join(area.context_id.to_string())
            .join(&area.component)
            .join(&area.filearea)
            .join(area.item_id.to_string()))
    }

    fn file_path(&self, file: &StoredFile) -> Result<PathBuf, StorageError> {
        Self::validate_filepath(&file.filepath)?;
        Ok(self.area_dir(&file.area)?.join(&file.filepath))
    }

    fn record(&self, area: &FileArea, filepath: String, size: u64) -> StoredFile {
        let filename = filepath
            .rsplit('/')
            .next()
            .unwrap_or(filepath.as_str())
            .to_string();
        let mimetype = self.catalog.mimetype_for_filename(&filename);

        StoredFile {
            area: area.clone(),
            filepath,
            filename,
            mimetype,
            size,
        }
    }

    async fn walk(root: &Path) -> Result<Vec<(String, u64)>, StorageError> {
        let mut found = Vec::new();
        let mut pending = vec![PathBuf::new()];

        while let Some(relative) = pending.pop() {
            let mut entries = match fs::read_dir(root.join(&relative)).await {
                Ok(entries) => entries,
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => continue,
                Err(e) => return Err(e.into()),
            };

            while let Some(entry) = entries.next_entry().await? {
                let name = entry.file_name().to_string_lossy().into_owned();
                let child = relative.join(&name);
                let metadata = entry.metadata().await?;

                if metadata.is_dir() {
                    pending.push(child);
                } else {
                    let key = child
                        .components()
                        .map(|c| c.as_os_str().to_string_lossy().into_owned())
                        .collect::<Vec<_>>()
                        .join("/");
                    found.push((key, metadata.len()));
                }
            }
        }

        found.sort();
        Ok(found)
    }
}

impl FileStorage for LocalFileStorage {
    fn list_area_files<'a>(&'a self, area: &'a FileArea) -> StorageFuture<'a, Vec<StoredFile>> {
        Box::pin(async move {
            let root = self.area_dir(area)?;
            let files = Self::walk(&root)
                .await?
                .into_iter()
                .map(|(filepath, size)| self.record(area, filepath, size))
                .collect();

            Ok(files)
        })
    }

    fn read<'a>(&'a self, file: &'a StoredFile) -> StorageFuture<'a, Vec<u8>> {
        Box::pin(async move {
            let path = self.file_path(file)?;

            match fs::read(&path).await {
                Ok(content) => Ok(content),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(StorageError::NotFound),
                Err(e) => Err(e.into()),
            }
        })
    }

    fn delete<'a>(&'a self, file: &'a StoredFile) -> StorageFuture<'a, ()> {
        Box::pin(async move {
            let path = self.file_path(file)?;

            // Delete file, ignore "not found" errors
            match fs::remove_file(&path).await {
                Ok(_) => Ok(()),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
                Err(e) => Err(e.into()),
            }
        })
    }
}

impl LocalFileStorage {
    /// Store content under `filepath` inside an area, as the host's upload
    /// path does. The validator never writes files; this stages areas for
    /// embedders and tests.
    pub async fn save(
        &self,
        area: &FileArea,
        filepath: &str,
        content: &[u8],
    ) -> Result<StoredFile, StorageError> {
        Self::validate_filepath(filepath)?;

        if content.len() > self.max_file_size {
            return Err(StorageError::InvalidFileSize {
                max_bytes: self.max_file_size,
            });
        }

        let path = self.area_dir(area)?.join(filepath);

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }

        fs::write(&path, content).await?;

        Ok(self.record(area, filepath.to_string(), content.len() as u64))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mimetypes::BuiltinMimetypeCatalog;

    fn storage(dir: &Path) -> LocalFileStorage {
        LocalFileStorage::new(dir.to_path_buf(), Arc::new(BuiltinMimetypeCatalog))
    }

    #[test]
    fn test_validate_key_accepts_area_names() {
        assert!(LocalFileStorage::validate_key("assignsubmission_file").is_ok());
        assert!(LocalFileStorage::validate_key("submission_files").is_ok());
    }

    #[test]
    fn test_validate_key_rejects_paths() {
        assert!(LocalFileStorage::validate_key("../../../etc/passwd").is_err());
        assert!(LocalFileStorage::validate_key("a/b").is_err());
        assert!(LocalFileStorage::validate_key("").is_err());
    }

    #[test]
    fn test_validate_filepath_accepts_any_file_name() {
        for path in [
            "main.c",
            "src/main.cpp",
            "main (1).c",
            "c++notes.txt",
            "lab#2.py",
            "v1..2.c",
            "résumé.txt",
        ] {
            assert!(LocalFileStorage::validate_filepath(path).is_ok(), "{}", path);
        }
    }

    #[test]
    fn test_validate_filepath_rejects_traversal() {
        for path in [
            "",
            "/etc/passwd",
            "../secret",
            "src/../../secret",
            "src/..",
            "..\\windows\\system32",
            "src//main.c",
        ] {
            assert!(LocalFileStorage::validate_filepath(path).is_err(), "{}", path);
        }
    }

    #[tokio::test]
    async fn test_save_list_read_delete() {
        let dir = tempfile::tempdir().unwrap();
        let storage = storage(dir.path());
        let area = FileArea::submission_files(Uuid::new_v4(), Uuid::new_v4());

        let saved = storage.save(&area, "main.cpp", b"int main() {}").await.unwrap();
        assert_eq!(saved.filename, "main.cpp");
        assert_eq!(saved.mimetype, "text/plain");
        assert_eq!(saved.size, 13);

        let files = storage.list_area_files(&area).await.unwrap();
        assert_eq!(files, vec![saved.clone()]);

        let content = storage.read(&saved).await.unwrap();
        assert_eq!(content, b"int main() {}");

        storage.delete(&saved).await.unwrap();
        assert!(storage.list_area_files(&area).await.unwrap().is_empty());
        assert!(matches!(
            storage.read(&saved).await,
            Err(StorageError::NotFound)
        ));
    }

    #[tokio::test]
    async fn test_list_includes_nested_files_sorted() {
        let dir = tempfile::tempdir().unwrap();
        let storage = storage(dir.path());
        let area = FileArea::submission_files(Uuid::new_v4(), Uuid::new_v4());

        storage.save(&area, "b.txt", b"b").await.unwrap();
        storage.save(&area, "a/inner.c", b"a").await.unwrap();

        let files = storage.list_area_files(&area).await.unwrap();
        let paths: Vec<_> = files.iter().map(|f| f.filepath.as_str()).collect();
        assert_eq!(paths, vec!["a/inner.c", "b.txt"]);
        assert_eq!(files[0].filename, "inner.c");
    }

    #[tokio::test]
    async fn test_read_and_delete_unusual_file_names() {
        let dir = tempfile::tempdir().unwrap();
        let storage = storage(dir.path());
        let area = FileArea::submission_files(Uuid::new_v4(), Uuid::new_v4());

        for name in ["main (1).c", "c++notes.txt", "lab#2.py", "v1..2.c"] {
            storage.save(&area, name, b"int main").await.unwrap();
        }

        let files = storage.list_area_files(&area).await.unwrap();
        assert_eq!(files.len(), 4);
        for file in &files {
            assert_eq!(storage.read(file).await.unwrap(), b"int main");
            storage.delete(file).await.unwrap();
        }
        assert!(storage.list_area_files(&area).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_list_missing_area_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let storage = storage(dir.path());
        let area = FileArea::submission_files(Uuid::new_v4(), Uuid::new_v4());

        assert!(storage.list_area_files(&area).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_missing_file_succeeds() {
        let dir = tempfile::tempdir().unwrap();
        let storage = storage(dir.path());
        let area = FileArea::submission_files(Uuid::new_v4(), Uuid::new_v4());
        let saved = storage.save(&area, "gone.txt", b"x").await.unwrap();

        storage.delete(&saved).await.unwrap();
        storage.delete(&saved).await.unwrap();
    }

    #[tokio::test]
    async fn test_save_rejects_oversized_content() {
        let dir = tempfile::tempdir().unwrap();
        let storage = LocalFileStorage::with_max_size(
            dir.path().to_path_buf(),
            Arc::new(BuiltinMimetypeCatalog),
            4,
        );
        let area = FileArea::submission_files(Uuid::new_v4(), Uuid::new_v4());

        let result = storage.save(&area, "big.txt", b"12345").await;
        assert!(matches!(
            result,
            Err(StorageError::InvalidFileSize { max_bytes: 4 })
        ));
    }
}
