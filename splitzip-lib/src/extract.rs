//! Reading and extracting zip archives

use crate::progress::{CancelToken, ProgressCallback, ProgressReporter};
use crate::{Error, Result};
use std::fs::{self, File};
use std::io;
use std::path::{Component, Path, PathBuf};
use tracing::{debug, info};
use zip::ZipArchive;

/// Options for an extract operation
#[derive(Debug, Clone, Default)]
pub struct ExtractOptions {
    /// Extract into `<destination>/<archive stem>` instead of `destination`
    pub create_subfolder: bool,
    /// Cooperative cancellation flag, checked between entries
    pub cancel: CancelToken,
}

/// One entry listed from an archive, in container index order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveEntry {
    pub name: String,
    pub is_dir: bool,
    pub size: u64,
    pub compressed_size: u64,
}

/// Outcome of an extract operation
#[derive(Debug, Clone, Default)]
pub struct ExtractResult {
    pub entries_extracted: u64,
    pub bytes_written: u64,
    /// The directory the entries were written to, after any subfolder
    /// rewriting
    pub destination: PathBuf,
}

/// Extract all entries of `archive_path` under `destination`.
///
/// Entries are processed in container index order. Each entry name is
/// validated before any write: a name with parent-directory, absolute, or
/// prefix components aborts the whole operation with
/// [`Error::UnsafePath`]. Intermediate directories are created as needed;
/// identical re-extraction overwrites files rather than erroring.
pub fn extract<P: AsRef<Path>, Q: AsRef<Path>>(
    archive_path: P,
    destination: Q,
    options: ExtractOptions,
    callback: &dyn ProgressCallback,
) -> Result<ExtractResult> {
    let archive_path = archive_path.as_ref();
    let destination = destination.as_ref();

    if !archive_path.exists() {
        return Err(Error::NotFound(archive_path.to_path_buf()));
    }

    let destination = if options.create_subfolder {
        destination.join(archive_stem(archive_path))
    } else {
        destination.to_path_buf()
    };
    fs::create_dir_all(&destination)?;

    info!(archive = ?archive_path, destination = ?destination, "extracting");

    let file = File::open(archive_path)?;
    let mut archive = ZipArchive::new(file)?;

    let mut reporter = ProgressReporter::new(callback);
    reporter.start(archive.len() as u64);
    let mut result = ExtractResult {
        destination: destination.clone(),
        ..Default::default()
    };

    for index in 0..archive.len() {
        if options.cancel.is_cancelled() {
            return Err(Error::Cancelled);
        }

        let mut entry = archive.by_index(index)?;
        let target = sanitize_entry_path(&destination, entry.name())?;
        debug!(entry = entry.name(), "extracting entry");

        if entry.is_dir() {
            fs::create_dir_all(&target)?;
        } else {
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent)?;
            }
            let mut outfile = File::create(&target)?;
            result.bytes_written += io::copy(&mut entry, &mut outfile)?;
        }

        result.entries_extracted += 1;
        reporter.tick();
    }

    reporter.finish();
    info!(
        entries = result.entries_extracted,
        bytes = result.bytes_written,
        "extraction complete"
    );
    Ok(result)
}

/// List archive contents without extracting
pub fn list<P: AsRef<Path>>(archive_path: P) -> Result<Vec<ArchiveEntry>> {
    let archive_path = archive_path.as_ref();
    if !archive_path.exists() {
        return Err(Error::NotFound(archive_path.to_path_buf()));
    }

    let file = File::open(archive_path)?;
    let mut archive = ZipArchive::new(file)?;

    let mut entries = Vec::with_capacity(archive.len());
    for index in 0..archive.len() {
        let entry = archive.by_index(index)?;
        entries.push(ArchiveEntry {
            name: entry.name().to_string(),
            is_dir: entry.is_dir(),
            size: entry.size(),
            compressed_size: entry.compressed_size(),
        });
    }

    Ok(entries)
}

/// Resolve an entry name under `dest`, rejecting anything that would land
/// outside it.
fn sanitize_entry_path(dest: &Path, name: &str) -> Result<PathBuf> {
    let mut resolved = dest.to_path_buf();
    for component in Path::new(name).components() {
        match component {
            Component::Normal(part) => resolved.push(part),
            Component::CurDir => {}
            _ => return Err(Error::UnsafePath(name.to_string())),
        }
    }
    Ok(resolved)
}

fn archive_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "archive".to_string())
}
