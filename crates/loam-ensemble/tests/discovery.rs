//! Configuration discovery against real directory trees.

use std::fs;

use loam_ensemble::{find_config, ConfigError};
use tempfile::tempdir;

#[test]
fn a_single_candidate_is_returned() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("regcm.in"), "domname = 'TEST'\n").unwrap();
    // Neither a stray file nor a directory with the extension counts.
    fs::write(dir.path().join("notes.txt"), "x").unwrap();
    fs::create_dir(dir.path().join("archive.in")).unwrap();

    let found = find_config(dir.path()).unwrap();
    assert_eq!(found, dir.path().join("regcm.in"));
}

#[test]
fn a_directory_without_candidates_is_not_found() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("notes.txt"), "x").unwrap();

    let err = find_config(dir.path()).unwrap_err();
    assert_eq!(
        err,
        ConfigError::NotFound {
            dir: dir.path().to_path_buf()
        }
    );
}

#[test]
fn several_candidates_are_ambiguous() {
    let dir = tempdir().unwrap();
    // Written out of order; the refusal lists them sorted.
    fs::write(dir.path().join("2regcm.in"), "domname = '2TEST'\n").unwrap();
    fs::write(dir.path().join("1regcm.in"), "domname = '1TEST'\n").unwrap();

    let err = find_config(dir.path()).unwrap_err();
    assert_eq!(
        err,
        ConfigError::Ambiguous {
            candidates: vec![dir.path().join("1regcm.in"), dir.path().join("2regcm.in")]
        }
    );
}
