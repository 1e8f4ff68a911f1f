use splitzip_lib::{
    extract, list, pack_dir, pack_paths, Error, ExtractOptions, NoProgress, PackOptions,
};
use std::fs;
use tempfile::TempDir;

#[test]
fn test_round_trip_preserves_paths_and_contents() {
    let temp_dir = TempDir::new().unwrap();
    let source_dir = temp_dir.path().join("source");
    let archive_path = temp_dir.path().join("test.zip");
    let extract_dir = temp_dir.path().join("extracted");

    fs::create_dir_all(source_dir.join("subdir/deeper")).unwrap();
    fs::write(source_dir.join("file1.txt"), "Content 1").unwrap();
    fs::write(source_dir.join("file2.txt"), "Content 2").unwrap();
    fs::write(source_dir.join("subdir/file3.txt"), "Content 3").unwrap();
    fs::write(source_dir.join("subdir/deeper/file4.bin"), [0u8, 1, 2, 255]).unwrap();

    let result = pack_dir(&source_dir, &archive_path, PackOptions::default(), &NoProgress).unwrap();
    assert_eq!(result.archives, vec![archive_path.clone()]);
    assert_eq!(result.entries_written, 4);
    assert!(archive_path.exists());

    extract(&archive_path, &extract_dir, ExtractOptions::default(), &NoProgress).unwrap();

    assert_eq!(
        fs::read_to_string(extract_dir.join("file1.txt")).unwrap(),
        "Content 1"
    );
    assert_eq!(
        fs::read_to_string(extract_dir.join("subdir/file3.txt")).unwrap(),
        "Content 3"
    );
    assert_eq!(
        fs::read(extract_dir.join("subdir/deeper/file4.bin")).unwrap(),
        vec![0u8, 1, 2, 255]
    );
}

#[test]
fn test_extract_into_derived_subfolder() {
    let temp_dir = TempDir::new().unwrap();
    let source_dir = temp_dir.path().join("source");
    let archive_path = temp_dir.path().join("bundle.zip");
    let extract_dir = temp_dir.path().join("out");

    fs::create_dir_all(&source_dir).unwrap();
    fs::write(source_dir.join("a.txt"), "A").unwrap();

    pack_dir(&source_dir, &archive_path, PackOptions::default(), &NoProgress).unwrap();

    let options = ExtractOptions {
        create_subfolder: true,
        ..Default::default()
    };
    let result = extract(&archive_path, &extract_dir, options, &NoProgress).unwrap();

    assert_eq!(result.destination, extract_dir.join("bundle"));
    assert!(extract_dir.join("bundle/a.txt").exists());
}

#[test]
fn test_extract_twice_is_idempotent() {
    let temp_dir = TempDir::new().unwrap();
    let source_dir = temp_dir.path().join("source");
    let archive_path = temp_dir.path().join("twice.zip");
    let extract_dir = temp_dir.path().join("out");

    fs::create_dir_all(&source_dir).unwrap();
    fs::write(source_dir.join("a.txt"), "A").unwrap();
    fs::write(source_dir.join("b.txt"), "B").unwrap();

    pack_dir(&source_dir, &archive_path, PackOptions::default(), &NoProgress).unwrap();

    let first = extract(&archive_path, &extract_dir, ExtractOptions::default(), &NoProgress)
        .unwrap();
    let second = extract(&archive_path, &extract_dir, ExtractOptions::default(), &NoProgress)
        .unwrap();

    assert_eq!(first.entries_extracted, second.entries_extracted);
    let names: Vec<String> = fs::read_dir(&extract_dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names.len(), 2);
    assert_eq!(fs::read_to_string(extract_dir.join("a.txt")).unwrap(), "A");
}

#[test]
fn test_pack_selected_files_flattens_structure() {
    let temp_dir = TempDir::new().unwrap();
    let archive_path = temp_dir.path().join("flat.zip");

    fs::create_dir_all(temp_dir.path().join("nested/dir")).unwrap();
    let f1 = temp_dir.path().join("top.txt");
    let f2 = temp_dir.path().join("nested/dir/inner.txt");
    fs::write(&f1, "top").unwrap();
    fs::write(&f2, "inner").unwrap();

    pack_paths(&[&f1, &f2], &archive_path, PackOptions::default(), &NoProgress).unwrap();

    let entries = list(&archive_path).unwrap();
    let names: Vec<&str> = entries.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, vec!["top.txt", "inner.txt"]);
}

#[test]
fn test_empty_source_is_a_distinct_outcome() {
    let temp_dir = TempDir::new().unwrap();
    let source_dir = temp_dir.path().join("empty");
    let archive_path = temp_dir.path().join("never.zip");
    fs::create_dir(&source_dir).unwrap();

    let result = pack_dir(&source_dir, &archive_path, PackOptions::default(), &NoProgress);
    assert!(matches!(result, Err(Error::EmptySource)));
    assert!(!archive_path.exists(), "no archive should be created");
}

#[test]
fn test_missing_source_is_not_found() {
    let temp_dir = TempDir::new().unwrap();
    let result = pack_dir(
        temp_dir.path().join("ghost"),
        temp_dir.path().join("out.zip"),
        PackOptions::default(),
        &NoProgress,
    );
    assert!(matches!(result, Err(Error::NotFound(_))));
}

#[test]
fn test_missing_archive_is_not_found() {
    let temp_dir = TempDir::new().unwrap();
    let result = extract(
        temp_dir.path().join("ghost.zip"),
        temp_dir.path().join("out"),
        ExtractOptions::default(),
        &NoProgress,
    );
    assert!(matches!(result, Err(Error::NotFound(_))));
}

#[test]
fn test_garbage_archive_is_invalid() {
    let temp_dir = TempDir::new().unwrap();
    let bogus = temp_dir.path().join("bogus.zip");
    fs::write(&bogus, b"this is not a zip file").unwrap();

    let result = extract(
        &bogus,
        temp_dir.path().join("out"),
        ExtractOptions::default(),
        &NoProgress,
    );
    assert!(matches!(result, Err(Error::InvalidArchive(_))));
}

#[test]
fn test_list_reports_sizes_in_index_order() {
    let temp_dir = TempDir::new().unwrap();
    let source_dir = temp_dir.path().join("source");
    let archive_path = temp_dir.path().join("listed.zip");

    fs::create_dir_all(&source_dir).unwrap();
    fs::write(source_dir.join("a.txt"), "12345").unwrap();
    fs::write(source_dir.join("b.txt"), "1234567890").unwrap();

    pack_dir(&source_dir, &archive_path, PackOptions::default(), &NoProgress).unwrap();

    let entries = list(&archive_path).unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].name, "a.txt");
    assert_eq!(entries[0].size, 5);
    assert_eq!(entries[1].name, "b.txt");
    assert_eq!(entries[1].size, 10);
    assert!(!entries[0].is_dir);
}
