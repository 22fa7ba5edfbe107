//! Integration tests for visibility, selection, and sort state flows
//! through the headless `GridView`.
#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

mod common;

use common::{col, ids, sortable, sticky};
use gridview::state::ChangeAction;
use gridview::{GridView, SortDirection};

#[test]
fn host_reorder_preserves_visibility_of_surviving_columns() {
    let mut grid = GridView::new();
    grid.set_columns(vec![col("a", 80.0), col("b", 80.0), col("c", 80.0)])
        .unwrap();
    grid.visibility_mut().toggle("b", 0.0);

    // Host commits a reorder; hidden state rides along.
    grid.set_columns(vec![col("c", 80.0), col("a", 80.0), col("b", 80.0)])
        .unwrap();
    assert_eq!(grid.visibility().visible_keys(), ids(&["c", "a"]));

    // A column the host drops entirely stops being tracked.
    grid.set_columns(vec![col("c", 80.0), col("a", 80.0)]).unwrap();
    assert!(!grid.visibility().is_visible("b"));
    assert!(grid.visibility().leaving_keys().is_empty());
}

#[test]
fn desired_set_diff_reports_each_change_once() {
    let mut grid = GridView::new();
    grid.set_columns(vec![col("a", 80.0), col("b", 80.0), col("c", 80.0)])
        .unwrap();

    let changes = grid.visibility_mut().apply_desired(&ids(&["a", "c"]), 1.0);
    assert_eq!(changes, vec![("b".to_string(), ChangeAction::Removed)]);

    // Re-applying the same set is a no-op.
    assert!(grid
        .visibility_mut()
        .apply_desired(&ids(&["a", "c"]), 2.0)
        .is_empty());
}

#[test]
fn sort_only_responds_to_sortable_columns() {
    let mut grid = GridView::new();
    grid.set_columns(vec![sticky("select", 48.0), sortable("age", 80.0), col("notes", 200.0)])
        .unwrap();

    assert!(grid.toggle_sort("notes").is_none());
    assert!(grid.toggle_sort("missing").is_none());
    assert!(grid.sort_state().is_none());

    let sort = grid.toggle_sort("age").unwrap();
    assert_eq!(sort.column, "age");
    assert_eq!(sort.direction, SortDirection::Descending);

    let sort = grid.toggle_sort("age").unwrap();
    assert_eq!(sort.direction, SortDirection::Ascending);
}

#[test]
fn selection_is_scoped_to_rendered_rows() {
    let mut grid = GridView::new();
    grid.enable_selection(true);
    grid.set_row_ids(ids(&["r1", "r2", "r3"]));

    let selection = grid.selection_mut().unwrap();
    selection.toggle_row("r1");
    selection.toggle_row("r3");
    let rows = grid.row_ids().to_vec();
    let selection = grid.selection().unwrap();
    assert!(selection.is_some_selected(&rows));
    assert!(!selection.is_all_selected(&rows));
    assert_eq!(selection.selected_count(&rows), 2);

    // A page change prunes ids that no longer render.
    grid.set_row_ids(ids(&["r3", "r4"]));
    let rows = grid.row_ids().to_vec();
    let selection = grid.selection().unwrap();
    assert!(!selection.is_selected("r1"));
    assert_eq!(selection.selected_count(&rows), 1);
}

#[test]
fn disabling_selection_discards_state() {
    let mut grid = GridView::new();
    grid.enable_selection(true);
    grid.set_row_ids(ids(&["r1"]));
    grid.selection_mut().unwrap().toggle_row("r1");

    grid.enable_selection(false);
    assert!(grid.selection().is_none());

    // Re-enabling starts clean.
    grid.enable_selection(true);
    assert!(!grid.selection().unwrap().is_selected("r1"));
}
