//! Writing size-bounded zip volumes

use crate::collect::{collect_dir, collect_files, SourceEntry};
use crate::plan::{ArchivePlan, Batch};
use crate::progress::{CancelToken, ProgressCallback, ProgressReporter};
use crate::{Error, Result};
use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use zip::write::SimpleFileOptions;
use zip::CompressionMethod;
use zip::ZipWriter;

/// Options for a pack operation
#[derive(Debug, Clone, Default)]
pub struct PackOptions {
    /// Maximum cumulative uncompressed bytes per output archive.
    /// `None` packs everything into a single archive.
    pub size_limit: Option<u64>,
    /// Cooperative cancellation flag, checked between entries
    pub cancel: CancelToken,
}

/// Outcome of writing one archive
#[derive(Debug, Clone, Copy, Default)]
pub struct WriteResult {
    pub entries_written: u64,
    pub bytes_written: u64,
}

/// Outcome of a whole pack operation
#[derive(Debug, Clone, Default)]
pub struct PackResult {
    /// Archives created, in creation order
    pub archives: Vec<PathBuf>,
    pub entries_written: u64,
    pub bytes_written: u64,
}

/// Pack every regular file under `root` into archives at `output`.
///
/// Relative paths under `root` are preserved as entry names. Fails with
/// [`Error::EmptySource`] when the tree contains no files; zero archives
/// are created in that case.
pub fn pack_dir<P: AsRef<Path>, Q: AsRef<Path>>(
    root: P,
    output: Q,
    options: PackOptions,
    callback: &dyn ProgressCallback,
) -> Result<PackResult> {
    let entries = collect_dir(root)?;
    pack_entries(entries, output.as_ref(), &options, callback)
}

/// Pack an explicit list of files, flattened to their basenames.
///
/// No directory structure is preserved; name collisions silently overwrite
/// in the resulting archive.
pub fn pack_paths<P: AsRef<Path>, Q: AsRef<Path>>(
    paths: &[P],
    output: Q,
    options: PackOptions,
    callback: &dyn ProgressCallback,
) -> Result<PackResult> {
    let entries = collect_files(paths)?;
    pack_entries(entries, output.as_ref(), &options, callback)
}

fn pack_entries(
    entries: Vec<SourceEntry>,
    output: &Path,
    options: &PackOptions,
    callback: &dyn ProgressCallback,
) -> Result<PackResult> {
    if entries.is_empty() {
        return Err(Error::EmptySource);
    }

    let plan = ArchivePlan::new(entries, options.size_limit, output)?;
    info!(archives = plan.batches.len(), output = ?output, "packing");

    if let Some(parent) = output.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let mut result = PackResult::default();
    let mut reporter = ProgressReporter::new(callback);
    for (batch, path) in plan.batches.iter().zip(&plan.outputs) {
        let written = write_archive(path, batch, &mut reporter, &options.cancel)?;
        result.archives.push(path.clone());
        result.entries_written += written.entries_written;
        result.bytes_written += written.bytes_written;
    }

    info!(
        archives = result.archives.len(),
        entries = result.entries_written,
        bytes = result.bytes_written,
        "pack complete"
    );
    Ok(result)
}

/// Stream one batch of files into a single zip archive.
///
/// Entries are written in batch order with deflate compression and
/// forward-slash names. A read failure aborts immediately and leaves the
/// partially written archive in place; there is no rollback.
pub fn write_archive(
    output: &Path,
    batch: &Batch,
    reporter: &mut ProgressReporter,
    cancel: &CancelToken,
) -> Result<WriteResult> {
    debug!(output = ?output, entries = batch.len(), "writing archive");

    let file = File::create(output)?;
    let mut zip = ZipWriter::new(file);
    let zip_options =
        SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    reporter.start(batch.len() as u64);
    let mut result = WriteResult::default();
    for entry in &batch.entries {
        if cancel.is_cancelled() {
            return Err(Error::Cancelled);
        }

        let mut source = File::open(&entry.path)?;
        zip.start_file(entry.name.as_str(), zip_options)?;
        result.bytes_written += io::copy(&mut source, &mut zip)?;
        result.entries_written += 1;
        reporter.tick();
    }

    zip.finish()?;
    reporter.finish();
    Ok(result)
}
