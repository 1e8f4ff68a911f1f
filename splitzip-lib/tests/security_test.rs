//! Integration tests for path traversal protection on extract

use splitzip_lib::{extract, Error, ExtractOptions, NoProgress};
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;
use tempfile::TempDir;
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

/// Build an archive whose second entry tries to climb out of the
/// destination.
fn create_malicious_zip(path: &Path) -> zip::result::ZipResult<()> {
    let file = File::create(path)?;
    let mut zip = ZipWriter::new(file);
    let options = SimpleFileOptions::default().compression_method(zip::CompressionMethod::Stored);

    zip.start_file("normal.txt", options)?;
    zip.write_all(b"Normal file")?;

    zip.start_file("../../etc/passwd", options)?;
    zip.write_all(b"Evil contents")?;

    zip.start_file("after.txt", options)?;
    zip.write_all(b"Must never be written")?;

    zip.finish()?;
    Ok(())
}

#[test]
fn test_traversal_entry_aborts_extraction() {
    let temp_dir = TempDir::new().unwrap();
    let archive_path = temp_dir.path().join("malicious.zip");
    let extract_dir = temp_dir.path().join("extract");
    fs::create_dir(&extract_dir).unwrap();

    create_malicious_zip(&archive_path).unwrap();

    let result = extract(&archive_path, &extract_dir, ExtractOptions::default(), &NoProgress);
    assert!(matches!(result, Err(Error::UnsafePath(_))));

    // Entries before the malicious one may exist; nothing after it may
    assert!(extract_dir.join("normal.txt").exists());
    assert!(!extract_dir.join("after.txt").exists());

    // And nothing escaped the destination
    assert!(!temp_dir.path().join("etc/passwd").exists());
    assert!(!temp_dir.path().join("passwd").exists());
}

#[test]
fn test_absolute_entry_is_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let archive_path = temp_dir.path().join("absolute.zip");
    let extract_dir = temp_dir.path().join("extract");

    {
        let file = File::create(&archive_path).unwrap();
        let mut zip = ZipWriter::new(file);
        let options =
            SimpleFileOptions::default().compression_method(zip::CompressionMethod::Stored);
        zip.start_file("/etc/passwd", options).unwrap();
        zip.write_all(b"Evil contents").unwrap();
        zip.finish().unwrap();
    }

    let result = extract(&archive_path, &extract_dir, ExtractOptions::default(), &NoProgress);
    assert!(matches!(result, Err(Error::UnsafePath(_))));
}
