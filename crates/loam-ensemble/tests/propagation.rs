//! Bulk propagation engine behavior: gates, isolation, independence.

use loam_core::{ChangeSpec, Grid, Region};
use loam_ensemble::{propagate, PropagateError, Registry};
use loam_test_utils::{
    legend_fixture, member_dataset_path, touch_member_dataset, write_member_config, MemStore,
};
use tempfile::{tempdir, TempDir};

/// Lay out `count` members on disk and seed a MemStore grid for each.
fn ensemble(count: u32) -> (TempDir, MemStore, Registry) {
    let dir = tempdir().unwrap();
    let store = MemStore::new();
    for n in 1..=count {
        write_member_config(dir.path(), n, "TEST");
        let dataset = touch_member_dataset(dir.path(), n, "TEST");
        store.insert(dataset, Grid::filled(10, 10, 1), legend_fixture());
    }
    let registry = Registry::scan(dir.path()).unwrap();
    assert!(registry.all_valid());
    (dir, store, registry)
}

fn full_grid_spec(percent: f64) -> ChangeSpec {
    ChangeSpec::new(Region::new(0, 0, 9, 9), 7, percent)
}

#[test]
fn refuses_when_no_members() {
    let dir = tempdir().unwrap();
    let registry = Registry::scan(dir.path()).unwrap();
    let store = MemStore::new();
    let err = propagate(
        &store,
        &registry,
        dir.path().join("none.nc").as_path(),
        &[full_grid_spec(50.0)],
    )
    .unwrap_err();
    assert_eq!(err, PropagateError::NoMembers);
}

#[test]
fn refuses_when_a_dataset_is_missing_and_touches_nothing() {
    let (dir, store, _) = ensemble(2);
    // A third member with no dataset on disk invalidates the gate.
    write_member_config(dir.path(), 3, "TEST");
    let registry = Registry::scan(dir.path()).unwrap();

    let current = member_dataset_path(dir.path(), 1, "TEST");
    let err = propagate(&store, &registry, &current, &[full_grid_spec(100.0)]).unwrap_err();
    match err {
        PropagateError::MissingDatasets { paths } => {
            assert_eq!(paths.len(), 1);
            assert!(paths[0].ends_with("3input/3TEST_DOMAIN000.nc"));
        }
        other => panic!("expected MissingDatasets, got {other:?}"),
    }
    // No side effects on the refused call.
    let untouched = member_dataset_path(dir.path(), 2, "TEST");
    assert_eq!(store.grid(&untouched).unwrap(), Grid::filled(10, 10, 1));
}

#[test]
fn refuses_when_nothing_staged() {
    let (dir, store, registry) = ensemble(2);
    let current = member_dataset_path(dir.path(), 1, "TEST");
    let err = propagate(&store, &registry, &current, &[]).unwrap_err();
    assert_eq!(err, PropagateError::NothingStaged);
}

#[test]
fn one_failing_member_does_not_abort_the_rest() {
    let (dir, store, registry) = ensemble(4);
    let current = member_dataset_path(dir.path(), 1, "TEST");
    // Member 3's dataset exists on disk (the gate passes) but the store
    // rejects writes to it.
    store.fail_writes(member_dataset_path(dir.path(), 3, "TEST"));

    let report = propagate(&store, &registry, &current, &[full_grid_spec(100.0)]).unwrap();

    assert_eq!(report.succeeded.len(), 2);
    assert_eq!(report.failed.len(), 1);
    assert_eq!(report.failed[0].ordinal, 3);
    assert!(!report.is_complete());
    assert_eq!(report.specs_applied, 1);

    // Succeeding members got the full change; the current member was
    // left to the caller.
    for n in [2u32, 4] {
        let grid = store.grid(member_dataset_path(dir.path(), n, "TEST")).unwrap();
        assert!(grid.cells().iter().all(|&v| v == 7));
    }
    let current_grid = store.grid(&current).unwrap();
    assert!(current_grid.cells().iter().all(|&v| v == 1));
}

#[test]
fn members_receive_independent_draws() {
    let (dir, store, registry) = ensemble(3);
    let current = member_dataset_path(dir.path(), 1, "TEST");

    let report = propagate(&store, &registry, &current, &[full_grid_spec(50.0)]).unwrap();
    assert!(report.is_complete());
    assert_eq!(report.succeeded.len(), 2);

    let a = store.grid(member_dataset_path(dir.path(), 2, "TEST")).unwrap();
    let b = store.grid(member_dataset_path(dir.path(), 3, "TEST")).unwrap();
    let changed = |g: &Grid| g.cells().iter().filter(|&&v| v == 7).count();
    // Same region/category/percentage for every member...
    assert_eq!(changed(&a), 50);
    assert_eq!(changed(&b), 50);
    // ...but a statistically independent cell selection.
    assert_ne!(a, b);
}

#[test]
fn current_member_is_skipped_under_an_unnormalized_path() {
    let (dir, store, registry) = ensemble(3);
    // The same dataset member 1's scan resolved, spelled with redundant
    // path components.
    let dotted = dir
        .path()
        .join(".")
        .join("2input")
        .join("..")
        .join("1input")
        .join("1TEST_DOMAIN000.nc");

    let report = propagate(&store, &registry, &dotted, &[full_grid_spec(100.0)]).unwrap();
    assert!(report.is_complete());
    assert_eq!(report.succeeded.len(), 2);
    assert!(report.succeeded.iter().all(|o| o.ordinal != 1));

    // Member 1 was left to the caller, not perturbed a second time.
    let current = member_dataset_path(dir.path(), 1, "TEST");
    let grid = store.grid(&current).unwrap();
    assert!(grid.cells().iter().all(|&v| v == 1));
}

#[test]
fn specs_apply_in_recorded_order() {
    let (dir, store, registry) = ensemble(2);
    let current = member_dataset_path(dir.path(), 1, "TEST");
    // Second spec overwrites the first everywhere: order matters.
    let specs = [full_grid_spec(100.0), ChangeSpec::new(Region::new(0, 0, 9, 9), 8, 100.0)];

    let report = propagate(&store, &registry, &current, &specs).unwrap();
    assert_eq!(report.specs_applied, 2);
    assert_eq!(report.succeeded[0].cells_changed, 200);

    let grid = store.grid(member_dataset_path(dir.path(), 2, "TEST")).unwrap();
    assert!(grid.cells().iter().all(|&v| v == 8));
}
