//! Target-slot and shift computation for the two drag interaction modes.
//!
//! Both modes share one contract: `compute_target` resolves the drop slot
//! from drag-start capture plus the current pointer X, and `compute_shift`
//! gives the translation each non-dragged column should render with. Both
//! are pure functions — nothing here accumulates across pointer-moves, so
//! a given pointer position always resolves the same way.

use serde::Serialize;

use crate::layout::ColumnRect;

/// Fraction of a neighbor's width the dragged column's center must cross
/// (from the neighbor's leading edge in the direction of travel) to claim
/// its slot in inline mode.
pub const DRAG_SWAP_THRESHOLD: f32 = 0.5;

/// Gap opened around the drop boundary in floating mode, making room for
/// the drop-line indicator.
pub const DROP_INDICATOR_GAP: f32 = 6.0;

/// Whether a dragged column inserts before or after the target column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DropSide {
    Left,
    Right,
}

/// A resolved drop target in draggable-column index terms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotTarget {
    /// Index into the captured draggable-column list.
    pub index: usize,
    pub side: DropSide,
}

/// Read-only data captured once at drag start.
///
/// Rects are measured from the live header cells on pointer-down and never
/// re-measured during the drag: inline mode translates those same cells,
/// so live hit-testing against them would chase its own feedback.
#[derive(Debug, Clone)]
pub struct DragCapture {
    /// Ordered keys of the draggable (non-sticky) columns.
    pub keys: Vec<String>,
    /// Header-cell rects, parallel to `keys`.
    pub rects: Vec<ColumnRect>,
    /// Position of the dragged column within `keys`.
    pub dragged_index: usize,
    /// Pointer X at drag start.
    pub start_x: f32,
}

impl DragCapture {
    pub fn index_of(&self, key: &str) -> Option<usize> {
        self.keys.iter().position(|k| k == key)
    }

    fn rect(&self, index: usize) -> Option<&ColumnRect> {
        self.rects.get(index)
    }
}

/// The two drag interaction modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragMode {
    /// A visual clone follows the cursor; targets come from direct
    /// rectangle hit-testing against the captured rects.
    Floating,
    /// The dragged column itself translates and neighbors slide to open a
    /// slot; targets come from threshold crossings, never live hit-testing.
    #[default]
    Inline,
}

impl DragMode {
    /// Resolve the drop slot for the current pointer position.
    pub fn compute_target(
        self,
        capture: &DragCapture,
        pointer_x: f32,
        swap_threshold: f32,
    ) -> Option<SlotTarget> {
        match self {
            DragMode::Floating => floating_target(capture, pointer_x),
            DragMode::Inline => inline_target(capture, pointer_x, swap_threshold),
        }
    }

    /// Translation (px) the column at `index` should render with while the
    /// given target is active. The dragged column itself is excluded; it
    /// renders with `DragController::dragged_offset` instead.
    pub fn compute_shift(self, capture: &DragCapture, index: usize, target: SlotTarget) -> f32 {
        match self {
            DragMode::Floating => floating_shift(capture, index, target),
            DragMode::Inline => inline_shift(capture, index, target),
        }
    }
}

/// Direct hit-test: the hovered column is the target, the pointer's half
/// of its width picks the side.
fn floating_target(capture: &DragCapture, pointer_x: f32) -> Option<SlotTarget> {
    capture
        .rects
        .iter()
        .position(|rect| rect.contains_x(pointer_x))
        .map(|index| {
            let side = match capture.rect(index) {
                Some(rect) if pointer_x < rect.center_x() => DropSide::Left,
                _ => DropSide::Right,
            };
            SlotTarget { index, side }
        })
}

/// Slot-based resolution: walk neighbors in the direction of motion and
/// claim each slot whose trigger point the dragged column's visual center
/// has crossed. The last claimed slot wins; the walk stops at the first
/// uncrossed trigger, so monotonic pointer motion flips the result exactly
/// once per neighbor.
fn inline_target(capture: &DragCapture, pointer_x: f32, swap_threshold: f32) -> Option<SlotTarget> {
    let dragged = capture.rect(capture.dragged_index)?;
    let delta = pointer_x - capture.start_x;
    let center = dragged.center_x() + delta;

    let mut slot = capture.dragged_index;
    if delta > 0.0 {
        for (offset, rect) in capture
            .rects
            .iter()
            .enumerate()
            .skip(capture.dragged_index + 1)
        {
            // Leading edge in the direction of travel is the left edge.
            let trigger = rect.left + swap_threshold * rect.width;
            if center > trigger {
                slot = offset;
            } else {
                break;
            }
        }
    } else if delta < 0.0 {
        for index in (0..capture.dragged_index).rev() {
            let Some(rect) = capture.rect(index) else {
                break;
            };
            // Leading edge in the direction of travel is the right edge.
            let trigger = rect.right() - swap_threshold * rect.width;
            if center < trigger {
                slot = index;
            } else {
                break;
            }
        }
    }

    if slot == capture.dragged_index {
        None
    } else if slot > capture.dragged_index {
        Some(SlotTarget {
            index: slot,
            side: DropSide::Right,
        })
    } else {
        Some(SlotTarget {
            index: slot,
            side: DropSide::Left,
        })
    }
}

/// Only the two columns flanking the drop boundary move, by a fixed gap.
fn floating_shift(capture: &DragCapture, index: usize, target: SlotTarget) -> f32 {
    if index == capture.dragged_index {
        return 0.0;
    }
    // Boundary sits before the target (side Left) or after it (side Right);
    // express both as "gap opens between before_index and before_index + 1".
    let before_index = match target.side {
        DropSide::Left => target.index.checked_sub(1),
        DropSide::Right => Some(target.index),
    };
    match before_index {
        Some(before) if index == before => -DROP_INDICATOR_GAP,
        Some(before) if index == before + 1 => DROP_INDICATOR_GAP,
        None if index == target.index => DROP_INDICATOR_GAP,
        _ => 0.0,
    }
}

/// Every column strictly between the dragged column's original slot and
/// the claimed slot shifts by one full dragged-column width toward the
/// vacated side.
fn inline_shift(capture: &DragCapture, index: usize, target: SlotTarget) -> f32 {
    if index == capture.dragged_index {
        return 0.0;
    }
    let dragged_width = capture
        .rect(capture.dragged_index)
        .map(|r| r.width)
        .unwrap_or(0.0);
    let i = capture.dragged_index;
    let s = target.index;
    if s > i && index > i && index <= s {
        -dragged_width
    } else if s < i && index >= s && index < i {
        dragged_width
    } else {
        0.0
    }
}
