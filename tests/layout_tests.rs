//! Integration tests for column layout and grid template generation.
#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

mod common;

use common::{col, sticky};
use gridview::layout::{compute_column_offsets, separate_columns};
use gridview::{grid_template_for, GridView};

#[test]
fn template_is_stable_across_repeated_calls() {
    // The header and body each ask for the template independently; any
    // difference between the two strings de-syncs the containers.
    let mut grid = GridView::new();
    grid.set_columns(vec![
        sticky("select", 48.0),
        sticky("name", 200.0),
        col("status", 120.0),
        col("owner", 160.0),
    ])
    .unwrap();

    let template = grid.grid_template();
    assert_eq!(
        template,
        "48px 200px minmax(120px, 1fr) minmax(160px, 1fr)"
    );
    assert_eq!(grid.grid_template(), template);
}

#[test]
fn sticky_offsets_accumulate_over_visible_columns_only() {
    let mut grid = GridView::new();
    grid.set_columns(vec![
        sticky("select", 48.0),
        sticky("name", 200.0),
        col("status", 120.0),
    ])
    .unwrap();

    let computed = grid.computed_columns();
    assert_eq!(computed[0].computed_sticky_left, 0.0);
    assert_eq!(computed[1].computed_sticky_left, 48.0);
    assert_eq!(grid.total_sticky_width(), 248.0);

    // Hiding the first sticky column re-bases the survivors.
    grid.visibility_mut().toggle("select", 0.0);
    let computed = grid.computed_columns();
    assert_eq!(computed[0].key(), "name");
    assert_eq!(computed[0].computed_sticky_left, 0.0);
    assert_eq!(grid.total_sticky_width(), 200.0);
}

#[test]
fn hidden_columns_drop_out_of_the_template() {
    let mut grid = GridView::new();
    grid.set_columns(vec![col("a", 80.0), col("b", 120.0), col("c", 100.0)])
        .unwrap();
    grid.visibility_mut().toggle("b", 0.0);

    assert_eq!(
        grid.grid_template(),
        "minmax(80px, 1fr) minmax(100px, 1fr)"
    );
    // The leaving column is tracked but no longer part of the layout.
    assert_eq!(grid.visibility().leaving_keys(), vec!["b".to_string()]);
}

#[test]
fn sticky_tracks_precede_scrollable_tracks() {
    // Sticky columns render in the pinned region regardless of their
    // position in the host list; the template mirrors that partition.
    let computed = compute_column_offsets(&[
        col("a", 100.0),
        sticky("pin", 48.0),
        col("b", 100.0),
    ]);
    let (sticky_cols, scrollable) = separate_columns(&computed);
    assert_eq!(sticky_cols.len(), 1);
    assert_eq!(sticky_cols[0].key(), "pin");
    assert_eq!(scrollable.len(), 2);
}

#[test]
fn invalid_columns_are_rejected_and_state_is_unchanged() {
    let mut grid = GridView::new();
    assert!(grid
        .set_columns(vec![col("a", 80.0), col("a", 120.0)])
        .is_err());
    assert!(grid.set_columns(vec![col("a", -5.0)]).is_err());
    assert_eq!(grid.grid_template(), "");
}

#[test]
fn json_entry_point_produces_the_same_template() {
    let json = r#"[
        {"key": "select", "width": 48, "isSticky": true},
        {"key": "name", "width": 200, "minWidth": 160, "flexRatio": 2}
    ]"#;
    assert_eq!(
        grid_template_for(json).unwrap(),
        "48px minmax(160px, 2fr)"
    );
}
