//! Source file enumeration

use crate::{Error, Result};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

/// One file scheduled for packing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceEntry {
    /// Path on disk, as supplied by the caller
    pub path: PathBuf,
    /// Entry name inside the archive, '/'-separated
    pub name: String,
    /// Uncompressed size in bytes
    pub size: u64,
}

/// Enumerate all regular files under `root`, depth-first.
///
/// Entry names are relative to `root` with forward slashes regardless of
/// host platform. Symlinks are skipped rather than followed; zip cannot
/// represent them portably. An existing but empty tree yields an empty
/// vector, which is not an error.
pub fn collect_dir<P: AsRef<Path>>(root: P) -> Result<Vec<SourceEntry>> {
    let root = root.as_ref();
    if !root.exists() {
        return Err(Error::NotFound(root.to_path_buf()));
    }

    let mut entries = Vec::new();
    for entry in WalkDir::new(root).follow_links(false).sort_by_file_name() {
        let entry = entry?;
        if entry.path_is_symlink() {
            warn!(path = ?entry.path(), "skipping symlink");
            continue;
        }
        if !entry.file_type().is_file() {
            continue;
        }

        let metadata = entry.metadata()?;
        let name = entry
            .path()
            .strip_prefix(root)
            .unwrap_or(entry.path())
            .to_string_lossy()
            .replace('\\', "/");
        // A file passed as the root strips down to nothing; fall back to
        // its basename
        let name = if name.is_empty() {
            entry.file_name().to_string_lossy().into_owned()
        } else {
            name
        };

        debug!(path = ?entry.path(), size = metadata.len(), "collected");
        entries.push(SourceEntry {
            path: entry.path().to_path_buf(),
            name,
            size: metadata.len(),
        });
    }

    Ok(entries)
}

/// Build entries from an explicit file list.
///
/// No traversal happens; each entry is named by its basename only, so two
/// inputs sharing a file name silently overwrite each other in the
/// resulting archive.
pub fn collect_files<P: AsRef<Path>>(paths: &[P]) -> Result<Vec<SourceEntry>> {
    let mut entries = Vec::new();
    for path in paths {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(Error::NotFound(path.to_path_buf()));
        }

        let name = path
            .file_name()
            .ok_or_else(|| Error::NotFound(path.to_path_buf()))?
            .to_string_lossy()
            .into_owned();
        let metadata = path.metadata()?;

        entries.push(SourceEntry {
            path: path.to_path_buf(),
            name,
            size: metadata.len(),
        });
    }

    Ok(entries)
}
