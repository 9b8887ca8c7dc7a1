//! Session lifecycle: open, edit, save, propagate, close.

use loam_core::{ChangeError, ChangeSpec, Grid, Region};
use loam_ensemble::{Registry, Scope, Session, SessionError};
use loam_test_utils::{
    legend_fixture, member_dataset_path, touch_member_dataset, write_member_config, MemStore,
};
use tempfile::{tempdir, TempDir};

fn single_member() -> (TempDir, MemStore, std::path::PathBuf) {
    let dir = tempdir().unwrap();
    let store = MemStore::new();
    let config = write_member_config(dir.path(), 1, "TEST");
    let dataset = member_dataset_path(dir.path(), 1, "TEST");
    store.insert(&dataset, Grid::filled(6, 6, 1), legend_fixture());
    (dir, store, config)
}

#[test]
fn open_loads_grid_and_legend() {
    let (_dir, store, config) = single_member();
    let session = Session::open(&store, &config).unwrap();
    assert_eq!(session.grid().rows(), 6);
    assert_eq!(session.legend().name(7), Some("Urban"));
    assert_eq!(session.config().domname, "1TEST");
    session.close().unwrap();
}

#[test]
fn open_fails_on_unparsable_legend() {
    let dir = tempdir().unwrap();
    let store = MemStore::new();
    let config = write_member_config(dir.path(), 1, "TEST");
    let dataset = member_dataset_path(dir.path(), 1, "TEST");
    store.insert(&dataset, Grid::filled(2, 2, 1), "no legend here");
    let err = Session::open(&store, &config).unwrap_err();
    assert!(matches!(err, SessionError::Legend(_)));
}

#[test]
fn invalid_apply_is_reported_and_the_session_continues() {
    let (_dir, store, config) = single_member();
    let mut session = Session::open(&store, &config).unwrap();
    let before = session.grid().clone();

    let err = session
        .apply(Region::new(0, 0, 5, 5), 99, 50.0, Scope::Single)
        .unwrap_err();
    assert_eq!(
        err,
        SessionError::Change(ChangeError::UnknownCategory { category: 99 })
    );
    assert_eq!(session.grid(), &before);
    assert!(session.ledger().is_empty());

    // The session is still usable after the rejected edit.
    let n = session
        .apply(Region::new(0, 0, 5, 5), 7, 100.0, Scope::Single)
        .unwrap();
    assert_eq!(n, 36);
}

#[test]
fn save_flushes_the_edited_grid() {
    let (dir, store, config) = single_member();
    let mut session = Session::open(&store, &config).unwrap();
    session
        .apply(Region::new(0, 0, 5, 5), 8, 100.0, Scope::Single)
        .unwrap();
    session.save().unwrap();

    let dataset = member_dataset_path(dir.path(), 1, "TEST");
    let stored = store.grid(&dataset).unwrap();
    assert!(stored.cells().iter().all(|&v| v == 8));
}

#[test]
fn close_without_save_leaves_the_dataset_unchanged() {
    let (dir, store, config) = single_member();
    let mut session = Session::open(&store, &config).unwrap();
    session
        .apply(Region::new(0, 0, 5, 5), 8, 100.0, Scope::Single)
        .unwrap();
    session.close().unwrap();

    let dataset = member_dataset_path(dir.path(), 1, "TEST");
    assert_eq!(store.grid(&dataset).unwrap(), Grid::filled(6, 6, 1));
}

#[test]
fn batch_apply_is_fail_fast_with_nothing_mutated() {
    let (_dir, store, config) = single_member();
    let mut session = Session::open(&store, &config).unwrap();
    let before = session.grid().clone();

    let specs = [
        ChangeSpec::parse("0,0,5,5,7,100").unwrap(),
        ChangeSpec::parse("0,0,5,5,99,100").unwrap(), // unknown category
    ];
    let err = session.apply_batch(&specs).unwrap_err();
    assert!(matches!(err, SessionError::Change(_)));
    assert_eq!(session.grid(), &before);
    assert!(session.ledger().is_empty());
}

#[test]
fn batch_apply_records_every_spec() {
    let (_dir, store, config) = single_member();
    let mut session = Session::open(&store, &config).unwrap();
    let specs = [
        ChangeSpec::parse("0,0,2,2,7,100").unwrap(),
        ChangeSpec::parse("3,3,5,5,8,50").unwrap(),
    ];
    let counts = session.apply_batch(&specs).unwrap();
    assert_eq!(counts, vec![9, 4]);
    assert_eq!(session.ledger().entries().len(), 2);
    assert_eq!(
        session.replay_command("loam-edit"),
        "loam-edit <other_config.in> --apply 0,0,2,2,7,100 --apply 3,3,5,5,8,50"
    );
}

#[test]
fn propagate_bulk_saves_current_then_updates_the_others() {
    let dir = tempdir().unwrap();
    let store = MemStore::new();
    for n in 1..=3 {
        write_member_config(dir.path(), n, "TEST");
        let dataset = touch_member_dataset(dir.path(), n, "TEST");
        store.insert(dataset, Grid::filled(6, 6, 1), legend_fixture());
    }
    let registry = Registry::scan(dir.path()).unwrap();
    let config = dir.path().join("1regcm.in");

    let mut session = Session::open(&store, &config).unwrap();
    session
        .apply(Region::new(0, 0, 5, 5), 7, 100.0, Scope::Bulk)
        .unwrap();
    let report = session.propagate_bulk(&store, &registry).unwrap();
    assert!(report.is_complete());
    assert_eq!(report.succeeded.len(), 2);

    for n in 1..=3 {
        let grid = store.grid(member_dataset_path(dir.path(), n, "TEST")).unwrap();
        assert!(grid.cells().iter().all(|&v| v == 7), "member {n} not updated");
    }
}

#[test]
fn propagate_bulk_refuses_without_staged_entries() {
    let dir = tempdir().unwrap();
    let store = MemStore::new();
    for n in 1..=2 {
        write_member_config(dir.path(), n, "TEST");
        let dataset = touch_member_dataset(dir.path(), n, "TEST");
        store.insert(dataset, Grid::filled(4, 4, 1), legend_fixture());
    }
    let registry = Registry::scan(dir.path()).unwrap();
    let config = dir.path().join("1regcm.in");

    let mut session = Session::open(&store, &config).unwrap();
    // A single-scope edit stages nothing for the ensemble.
    session
        .apply(Region::new(0, 0, 3, 3), 7, 100.0, Scope::Single)
        .unwrap();
    let err = session.propagate_bulk(&store, &registry).unwrap_err();
    assert!(matches!(err, SessionError::Propagate(_)));

    // Refusal happens before the save: member 1's dataset is untouched.
    let dataset = member_dataset_path(dir.path(), 1, "TEST");
    assert_eq!(store.grid(&dataset).unwrap(), Grid::filled(4, 4, 1));
}
