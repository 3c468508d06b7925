//! Unit tests for fixture resolution.

use std::fs;
use std::io::Read;

use camino::{Utf8Path, Utf8PathBuf};
use rstest::{fixture, rstest};
use tempfile::TempDir;

use super::*;

fn read_all(mut handle: FileHandle) -> Vec<u8> {
    let mut bytes = Vec::new();
    handle.read_to_end(&mut bytes).expect("read handle");
    bytes
}

#[fixture]
fn fixture_dir() -> (TempDir, Utf8PathBuf) {
    let dir = TempDir::new().expect("temp dir");
    let path = Utf8PathBuf::from_path_buf(dir.path().join("fixture.plist")).expect("utf-8 path");
    fs::write(&path, b"<plist/>").expect("write fixture");
    (dir, path)
}

#[rstest]
fn os_resolver_opens_existing_files(fixture_dir: (TempDir, Utf8PathBuf)) {
    let (_dir, path) = fixture_dir;
    let handle = OsResolver
        .resolve(&path, SourceType::Os)
        .expect("fixture exists");
    assert_eq!(handle.location(), path.as_path());
    assert_eq!(read_all(handle), b"<plist/>");
}

#[rstest]
fn os_resolver_reports_missing_files(fixture_dir: (TempDir, Utf8PathBuf)) {
    let (_dir, path) = fixture_dir;
    let missing = path.with_file_name("missing.plist");
    let error = OsResolver
        .resolve(&missing, SourceType::Os)
        .expect_err("file is missing");
    assert!(
        matches!(error, HarnessError::Resolution { source: Some(_), .. }),
        "unexpected error: {error:?}"
    );
}

#[rstest]
#[case::memory_source(Utf8Path::new("fixture.plist"), SourceType::Memory)]
#[case::no_file_name(Utf8Path::new("/"), SourceType::Os)]
fn os_resolver_rejects_unusable_requests(#[case] location: &Utf8Path, #[case] source: SourceType) {
    let error = OsResolver
        .resolve(location, source)
        .expect_err("request is unusable");
    assert!(matches!(error, HarnessError::Resolution { source: None, .. }));
}

#[test]
fn memory_resolver_serves_registered_fixtures() {
    let resolver = MemoryResolver::new().with_fixture("a.plist", b"first".to_vec());
    let handle = resolver
        .resolve(Utf8Path::new("a.plist"), SourceType::Memory)
        .expect("registered");
    assert_eq!(read_all(handle), b"first");

    let again = resolver
        .resolve(Utf8Path::new("a.plist"), SourceType::Memory)
        .expect("fixtures can be resolved repeatedly");
    assert_eq!(read_all(again), b"first");
}

#[test]
fn memory_resolver_replaces_fixtures() {
    let mut resolver = MemoryResolver::new();
    resolver.insert("a.plist", b"first".to_vec());
    resolver.insert("a.plist", b"second".to_vec());
    let handle = resolver
        .resolve(Utf8Path::new("a.plist"), SourceType::Memory)
        .expect("registered");
    assert_eq!(read_all(handle), b"second");
}

#[rstest]
#[case::unregistered(Utf8Path::new("b.plist"), SourceType::Memory)]
#[case::os_source(Utf8Path::new("a.plist"), SourceType::Os)]
fn memory_resolver_rejects_unserved_requests(
    #[case] location: &Utf8Path,
    #[case] source: SourceType,
) {
    let resolver = MemoryResolver::new().with_fixture("a.plist", Vec::new());
    let error = resolver
        .resolve(location, source)
        .expect_err("not served");
    assert!(matches!(error, HarnessError::Resolution { .. }));
}

#[test]
fn file_handle_debug_names_the_location() {
    let handle = FileHandle::from_bytes("x.plist", Vec::new());
    assert!(format!("{handle:?}").contains("x.plist"));
}
