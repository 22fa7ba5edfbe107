//! Integration tests for the drag-reorder controller.
//!
//! The scenario throughout: a grid whose sticky selection column occupies
//! the first 80px, followed by three draggable 120px columns measured at
//! b: [80, 200), c: [200, 320), d: [320, 440). Sticky columns never appear
//! in the draggable set, so index 0 is `b`.
#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

mod common;

use common::draggable_row;
use gridview::drag::{DragController, DragMode, DraggableColumn, DropSide};

fn three_columns() -> Vec<DraggableColumn> {
    draggable_row(80.0, &[("b", 120.0), ("c", 120.0), ("d", 120.0)])
}

fn start_drag(key: &str, x: f32, mode: DragMode) -> (DragController, Vec<DraggableColumn>) {
    let columns = three_columns();
    let mut drag = DragController::new(mode);
    assert!(drag.pointer_down(key, x, 10.0, &columns));
    (drag, columns)
}

// ============================================================================
// Inline mode
// ============================================================================

#[test]
fn drag_left_past_threshold_requests_insert_before() {
    // Dragging c leftward. Its visual center starts at 260; b's trigger
    // sits at b.right - 0.5 * b.width = 140.
    let (mut drag, _) = start_drag("c", 260.0, DragMode::Inline);

    // 100px of travel: center 160 has not crossed 140, nothing moves.
    drag.pointer_move(160.0, 10.0);
    assert_eq!(drag.shift_for("b"), 0.0);
    assert!(drag.snapshot().drag_over_key.is_none());

    // 130px of travel: center 130 crosses the trigger. b slides right by
    // one dragged-column width to open the slot.
    drag.pointer_move(130.0, 10.0);
    assert_eq!(drag.shift_for("b"), 120.0);
    assert_eq!(drag.shift_for("d"), 0.0);
    let snapshot = drag.snapshot();
    assert_eq!(snapshot.drag_over_key.as_deref(), Some("b"));
    assert_eq!(snapshot.drop_side, Some(DropSide::Left));

    let request = drag.pointer_up().unwrap();
    assert_eq!(request.dragged_key, "c");
    assert_eq!(request.target_key, "b");
    assert!(!request.insert_after);
    assert!(!drag.is_dragging());
    assert_eq!(drag.recently_dropped(), Some("c"));
}

#[test]
fn release_before_threshold_requests_nothing() {
    let (mut drag, _) = start_drag("c", 260.0, DragMode::Inline);
    drag.pointer_move(160.0, 10.0);
    assert_eq!(drag.pointer_up(), None);
    assert!(drag.recently_dropped().is_none());
}

#[test]
fn rightward_drag_claims_slots_one_neighbor_at_a_time() {
    // Dragging b rightward. Triggers: c at 260, d at 380; b's center
    // starts at 140.
    let (mut drag, _) = start_drag("b", 140.0, DragMode::Inline);

    // Past c's trigger only: c opens the slot, d stays.
    drag.pointer_move(270.0, 10.0);
    assert_eq!(drag.shift_for("c"), -120.0);
    assert_eq!(drag.shift_for("d"), 0.0);
    assert_eq!(drag.snapshot().drop_side, Some(DropSide::Right));

    // Past d's trigger too: both neighbors have shifted left.
    drag.pointer_move(390.0, 10.0);
    assert_eq!(drag.shift_for("c"), -120.0);
    assert_eq!(drag.shift_for("d"), -120.0);

    // Back under d's trigger: d returns, c stays claimed. The same
    // pointer position always resolves the same way.
    drag.pointer_move(270.0, 10.0);
    assert_eq!(drag.shift_for("d"), 0.0);
    assert_eq!(drag.shift_for("c"), -120.0);

    drag.pointer_move(390.0, 10.0);
    let request = drag.pointer_up().unwrap();
    assert_eq!(request.target_key, "d");
    assert!(request.insert_after);
}

#[test]
fn dragged_column_follows_raw_pointer_displacement() {
    let (mut drag, _) = start_drag("c", 250.0, DragMode::Inline);
    drag.pointer_move(205.0, 14.0);
    assert_eq!(drag.dragged_offset(), -45.0);
    drag.pointer_move(301.5, 14.0);
    assert_eq!(drag.dragged_offset(), 51.5);
}

#[test]
fn custom_swap_threshold_moves_the_trigger() {
    let columns = three_columns();
    let mut drag = DragController::new(DragMode::Inline);
    // Trigger for b moving left becomes b.right - 0.25 * 120 = 170.
    drag.set_swap_threshold(0.25);
    assert!(drag.pointer_down("c", 260.0, 10.0, &columns));

    drag.pointer_move(180.0, 10.0);
    assert_eq!(drag.shift_for("b"), 0.0);
    drag.pointer_move(165.0, 10.0);
    assert_eq!(drag.shift_for("b"), 120.0);

    // Out-of-range thresholds are ignored.
    drag.set_swap_threshold(0.0);
    drag.set_swap_threshold(1.5);
    drag.pointer_move(165.0, 10.0);
    assert_eq!(drag.shift_for("b"), 120.0);
}

// ============================================================================
// Floating mode
// ============================================================================

#[test]
fn floating_drop_targets_come_from_hit_testing() {
    let (mut drag, _) = start_drag("c", 260.0, DragMode::Floating);

    // Left half of b: insert before b.
    drag.pointer_move(100.0, 10.0);
    let snapshot = drag.snapshot();
    assert_eq!(snapshot.drag_over_key.as_deref(), Some("b"));
    assert_eq!(snapshot.drop_side, Some(DropSide::Left));

    // Boundary neighbors part by the indicator gap; others hold still.
    assert_eq!(drag.shift_for("b"), 6.0);
    assert_eq!(drag.shift_for("d"), 0.0);

    let request = drag.pointer_up().unwrap();
    assert_eq!(request.target_key, "b");
    assert!(!request.insert_after);
}

#[test]
fn floating_drop_after_far_neighbor() {
    let (mut drag, _) = start_drag("c", 260.0, DragMode::Floating);
    // Right half of d.
    drag.pointer_move(430.0, 10.0);
    assert_eq!(drag.shift_for("d"), -6.0);
    let request = drag.pointer_up().unwrap();
    assert_eq!(request.target_key, "d");
    assert!(request.insert_after);
}

#[test]
fn floating_pointer_outside_every_column_resolves_nothing() {
    let (mut drag, _) = start_drag("c", 260.0, DragMode::Floating);
    drag.pointer_move(900.0, 10.0);
    assert!(drag.snapshot().drag_over_key.is_none());
    assert_eq!(drag.pointer_up(), None);
}

// ============================================================================
// No-op suppression
// ============================================================================

#[test]
fn drop_on_own_left_neighbor_right_half_is_suppressed() {
    // "After b" is where c already sits.
    let (mut drag, _) = start_drag("c", 260.0, DragMode::Floating);
    drag.pointer_move(190.0, 10.0);
    let snapshot = drag.snapshot();
    assert_eq!(snapshot.drag_over_key.as_deref(), Some("b"));
    assert_eq!(snapshot.drop_side, Some(DropSide::Right));
    assert_eq!(drag.pointer_up(), None);
}

#[test]
fn drop_on_own_right_neighbor_left_half_is_suppressed() {
    // "Before d" is where c already sits.
    let (mut drag, _) = start_drag("c", 260.0, DragMode::Floating);
    drag.pointer_move(330.0, 10.0);
    assert_eq!(drag.snapshot().drop_side, Some(DropSide::Left));
    assert_eq!(drag.pointer_up(), None);
}

#[test]
fn drop_on_self_is_suppressed() {
    let (mut drag, _) = start_drag("c", 260.0, DragMode::Floating);
    drag.pointer_move(210.0, 10.0);
    assert_eq!(drag.snapshot().drag_over_key.as_deref(), Some("c"));
    assert_eq!(drag.pointer_up(), None);
}

// ============================================================================
// Lifecycle
// ============================================================================

#[test]
fn cancel_discards_the_drag_entirely() {
    let (mut drag, _) = start_drag("c", 260.0, DragMode::Inline);
    drag.pointer_move(100.0, 10.0);
    drag.pointer_cancel();
    assert!(!drag.is_dragging());
    assert_eq!(drag.shift_for("b"), 0.0);
    assert!(drag.snapshot().dragged_key.is_none());
    assert_eq!(drag.pointer_up(), None);
    assert!(drag.recently_dropped().is_none());
}

#[test]
fn pointer_down_on_unknown_key_stays_idle() {
    let columns = three_columns();
    let mut drag = DragController::default();
    assert!(!drag.pointer_down("nope", 100.0, 10.0, &columns));
    assert!(!drag.is_dragging());
}

#[test]
fn snapshot_carries_the_dragged_column_geometry() {
    let (mut drag, columns) = start_drag("c", 260.0, DragMode::Floating);
    drag.pointer_move(300.0, 22.0);
    let snapshot = drag.snapshot();
    assert!(snapshot.is_dragging);
    assert_eq!(snapshot.dragged_key.as_deref(), Some("c"));
    assert_eq!(snapshot.pointer_x, 300.0);
    assert_eq!(snapshot.pointer_y, 22.0);
    assert_eq!(snapshot.dragged_width, columns[1].rect.width);
    assert_eq!(snapshot.dragged_label, "C");
}

#[test]
fn recently_dropped_clears_on_demand() {
    let (mut drag, _) = start_drag("c", 260.0, DragMode::Inline);
    drag.pointer_move(130.0, 10.0);
    assert!(drag.pointer_up().is_some());
    assert_eq!(drag.recently_dropped(), Some("c"));
    drag.clear_recently_dropped();
    assert!(drag.recently_dropped().is_none());
}
