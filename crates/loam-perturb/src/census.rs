//! Per-category cell counts over a selection.

use indexmap::IndexMap;
use loam_core::{Grid, Region};

/// Count the cells of each category inside `region`, clamped to the
/// grid.
///
/// Keys are sorted ascending. A region that clamps to nothing yields an
/// empty map. This backs the selection summary shown when a region is
/// picked: which land-use types it covers and how many cells of each.
pub fn census(grid: &Grid, region: Region) -> IndexMap<i32, usize> {
    let mut counts = IndexMap::new();
    let Some(clamped) = region.clamp(grid.rows(), grid.cols()) else {
        return counts;
    };
    for (row, col) in clamped.cells() {
        // In bounds by construction.
        if let Some(value) = grid.get(row, col) {
            *counts.entry(value).or_insert(0) += 1;
        }
    }
    counts.sort_keys();
    counts
}
