//! Single-entry zip unwrapping.

use std::io::{Cursor, Read};

use thiserror::Error;
use zip::ZipArchive;

#[derive(Debug, Error)]
pub enum ArchiveError {
    #[error("expected exactly one entry, found {0}")]
    EntryCount(usize),
    #[error("the only entry is a directory: {0}")]
    DirectoryEntry(String),
    #[error("entry exceeds {limit} bytes once extracted")]
    TooLarge { limit: usize },
    #[error("unreadable archive: {0}")]
    Unreadable(#[from] zip::result::ZipError),
    #[error("failed to read archive entry: {0}")]
    Io(#[from] std::io::Error),
}

/// The sole file inside an archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZipEntry {
    /// Path of the entry inside the archive
    pub name: String,
    pub content: Vec<u8>,
}

/// Extract the only entry of a zip archive.
///
/// Fails when the archive holds zero or several entries, when its only
/// entry is a directory, or when it expands past `max_size` bytes. The
/// size recorded in the archive is not trusted.
pub fn unzip_single_entry(data: &[u8], max_size: usize) -> Result<ZipEntry, ArchiveError> {
    let mut archive = ZipArchive::new(Cursor::new(data))?;

    if archive.len() != 1 {
        return Err(ArchiveError::EntryCount(archive.len()));
    }

    let mut entry = archive.by_index(0)?;
    let name = entry.name().to_string();
    if entry.is_dir() {
        return Err(ArchiveError::DirectoryEntry(name));
    }

    let mut content = Vec::new();
    entry
        .by_ref()
        .take(max_size as u64 + 1)
        .read_to_end(&mut content)?;

    if content.len() > max_size {
        return Err(ArchiveError::TooLarge { limit: max_size });
    }

    Ok(ZipEntry { name, content })
}
