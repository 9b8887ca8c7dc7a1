//! Registry scan behavior against real directory trees.

use std::fs;

use loam_ensemble::Registry;
use loam_test_utils::{touch_member_dataset, write_member_config};
use tempfile::tempdir;

#[test]
fn scan_finds_numbered_members_sorted() {
    let dir = tempdir().unwrap();
    // Written out of order; the scan must sort by ordinal.
    write_member_config(dir.path(), 3, "TEST");
    write_member_config(dir.path(), 1, "TEST");
    write_member_config(dir.path(), 2, "TEST");
    // A single-run configuration alongside the members is not a member.
    fs::write(dir.path().join("base.in"), "domname = 'TEST'\n").unwrap();

    let registry = Registry::scan(dir.path()).unwrap();
    let ordinals: Vec<u32> = registry.members().iter().map(|m| m.ordinal).collect();
    assert_eq!(ordinals, vec![1, 2, 3]);
    assert_eq!(registry.members()[0].domname, "1TEST");
}

#[test]
fn malformed_member_is_silently_excluded() {
    let dir = tempdir().unwrap();
    write_member_config(dir.path(), 1, "TEST");
    write_member_config(dir.path(), 2, "TEST");
    write_member_config(dir.path(), 3, "TEST");
    // Numbered but without a parsable domname: skipped, not "missing".
    fs::write(dir.path().join("4scratch.in"), "dirter = './4input'\n").unwrap();

    let registry = Registry::scan(dir.path()).unwrap();
    assert_eq!(registry.len(), 3);
    assert!(registry.members().iter().all(|m| m.ordinal <= 3));
}

#[test]
fn all_valid_requires_every_dataset_present() {
    let dir = tempdir().unwrap();
    for n in 1..=3 {
        write_member_config(dir.path(), n, "TEST");
    }
    touch_member_dataset(dir.path(), 1, "TEST");
    touch_member_dataset(dir.path(), 3, "TEST");

    let registry = Registry::scan(dir.path()).unwrap();
    assert!(!registry.all_valid());
    let missing = registry.missing();
    assert_eq!(missing.len(), 1);
    assert!(missing[0].ends_with("2input/2TEST_DOMAIN000.nc"));

    touch_member_dataset(dir.path(), 2, "TEST");
    let registry = Registry::scan(dir.path()).unwrap();
    assert!(registry.all_valid());
    assert!(registry.missing().is_empty());
}

#[test]
fn empty_scan_is_never_valid() {
    let dir = tempdir().unwrap();
    let registry = Registry::scan(dir.path()).unwrap();
    assert!(registry.is_empty());
    assert!(!registry.all_valid());
}

#[test]
fn member_paths_resolve_relative_to_the_config_file() {
    let dir = tempdir().unwrap();
    let sub = dir.path().join("runs");
    fs::create_dir_all(&sub).unwrap();
    write_member_config(&sub, 1, "TEST");

    let registry = Registry::scan(&sub).unwrap();
    let member = &registry.members()[0];
    assert_eq!(member.terrain_dir, sub.join("1input"));
    assert_eq!(
        member.dataset_path,
        sub.join("1input").join("1TEST_DOMAIN000.nc")
    );
}
