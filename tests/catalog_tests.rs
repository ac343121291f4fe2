// Integration tests for sample discovery and ordering.
//
// These verify that directory scans produce a reproducible batch: ordinary
// samples in strict lexicographic order, at most one initial utterance, and
// a fatal error when the directory itself is unusable.

use anyhow::Result;
use reco_harness::{Catalog, HarnessError};
use std::fs;
use std::path::Path;
use tempfile::tempdir;

fn touch(dir: &Path, name: &str) {
    fs::write(dir.join(name), b"flac").unwrap();
}

fn ordered_names(catalog: &Catalog) -> Vec<&str> {
    catalog
        .ordered
        .iter()
        .map(|sample| sample.filename.as_str())
        .collect()
}

#[test]
fn scan_sorts_samples_lexicographically() -> Result<()> {
    let dir = tempdir()?;
    touch(dir.path(), "b.flac");
    touch(dir.path(), "a.flac");
    touch(dir.path(), "c.flac");

    let catalog = Catalog::scan(dir.path(), "flac")?;

    assert!(catalog.initial.is_none());
    assert_eq!(ordered_names(&catalog), vec!["a.flac", "b.flac", "c.flac"]);
    Ok(())
}

#[test]
fn scan_separates_the_initial_sample_from_the_ordered_list() -> Result<()> {
    let dir = tempdir()?;
    touch(dir.path(), "_initial_greeting.flac");
    touch(dir.path(), "b.flac");
    touch(dir.path(), "a.flac");

    let catalog = Catalog::scan(dir.path(), "flac")?;

    let initial = catalog.initial.as_ref().expect("initial sample");
    assert_eq!(initial.filename, "_initial_greeting.flac");
    assert!(initial.is_initial);
    assert_eq!(ordered_names(&catalog), vec!["a.flac", "b.flac"]);
    Ok(())
}

#[test]
fn scan_ignores_non_matching_entries() -> Result<()> {
    let dir = tempdir()?;
    touch(dir.path(), "a.flac");
    touch(dir.path(), "notes.txt");
    touch(dir.path(), "extensionless");
    fs::create_dir(dir.path().join("nested.flac"))?;

    let catalog = Catalog::scan(dir.path(), "flac")?;

    assert_eq!(ordered_names(&catalog), vec!["a.flac"]);
    Ok(())
}

#[test]
fn scan_matches_extension_case_insensitively() -> Result<()> {
    let dir = tempdir()?;
    touch(dir.path(), "a.FLAC");

    let catalog = Catalog::scan(dir.path(), "flac")?;

    assert_eq!(ordered_names(&catalog), vec!["a.FLAC"]);
    Ok(())
}

#[test]
fn scan_rejects_a_second_initial_sample() -> Result<()> {
    let dir = tempdir()?;
    touch(dir.path(), "_initial_one.flac");
    touch(dir.path(), "_initial_two.flac");

    let err = Catalog::scan(dir.path(), "flac").unwrap_err();

    assert!(matches!(err, HarnessError::AmbiguousInitial { .. }));
    assert!(err.is_fatal());
    Ok(())
}

#[test]
fn scan_missing_directory_is_fatal() {
    let err = Catalog::scan("/nonexistent/sample/dir", "flac").unwrap_err();

    assert!(matches!(err, HarnessError::DirectoryRead { .. }));
    assert!(err.is_fatal());
}
