//! Pointer-driven column drag-reorder controller.
//!
//! A small state machine: `Idle → Dragging` on pointer-down over a drag
//! handle, target recomputation on every pointer-move, and back to `Idle`
//! on pointer-up (emitting a reorder request when the target resolves to a
//! real change) or pointer-cancel (emitting nothing).
//!
//! Only non-sticky, non-checkbox columns participate; the viewer filters
//! the column list before handing it to `pointer_down`. All per-move work
//! is a pure recomputation from the drag-start capture plus the current
//! pointer, so high-frequency pointer events cannot accumulate drift.

mod strategy;

pub use strategy::{
    DragCapture, DragMode, DropSide, SlotTarget, DRAG_SWAP_THRESHOLD, DROP_INDICATOR_GAP,
};

use crate::config::Align;
use crate::layout::ColumnRect;

/// A draggable column as captured at drag start.
#[derive(Debug, Clone)]
pub struct DraggableColumn {
    pub key: String,
    pub rect: ColumnRect,
    pub label: String,
    pub align: Align,
}

/// Reorder request emitted on a successful drop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReorderRequest {
    pub dragged_key: String,
    pub target_key: String,
    /// True when the dragged column inserts after the target (`DropSide::Right`).
    pub insert_after: bool,
}

/// Renderer-facing view of the current drag.
#[derive(Debug, Clone, Default, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DragSnapshot {
    pub is_dragging: bool,
    pub dragged_key: Option<String>,
    pub drag_over_key: Option<String>,
    pub drop_side: Option<DropSide>,
    pub pointer_x: f32,
    pub pointer_y: f32,
    pub dragged_width: f32,
    pub dragged_height: f32,
    pub dragged_label: String,
    pub dragged_align: Align,
}

#[derive(Debug)]
struct DragSession {
    capture: DragCapture,
    dragged_key: String,
    dragged_width: f32,
    dragged_height: f32,
    dragged_label: String,
    dragged_align: Align,
    pointer_x: f32,
    pointer_y: f32,
    target: Option<SlotTarget>,
}

#[derive(Debug, Default)]
enum Phase {
    #[default]
    Idle,
    Dragging(DragSession),
}

/// Drag-reorder state machine shared by header and body renderers.
#[derive(Debug)]
pub struct DragController {
    mode: DragMode,
    swap_threshold: f32,
    phase: Phase,
    /// Key of the column just dropped, excluded from the next FLIP pass
    /// because it is already visually in place. Cleared by a timer after
    /// the reorder animation settles.
    recently_dropped: Option<String>,
}

impl Default for DragController {
    fn default() -> Self {
        Self::new(DragMode::default())
    }
}

impl DragController {
    pub fn new(mode: DragMode) -> Self {
        Self {
            mode,
            swap_threshold: DRAG_SWAP_THRESHOLD,
            phase: Phase::Idle,
            recently_dropped: None,
        }
    }

    pub fn mode(&self) -> DragMode {
        self.mode
    }

    /// Switch interaction mode. Takes effect on the next drag.
    pub fn set_mode(&mut self, mode: DragMode) {
        self.mode = mode;
    }

    /// Override the inline-mode slot trigger fraction. Clamped to (0, 1].
    pub fn set_swap_threshold(&mut self, threshold: f32) {
        if threshold > 0.0 && threshold <= 1.0 {
            self.swap_threshold = threshold;
        }
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.phase, Phase::Dragging(_))
    }

    /// Begin a drag over the column with `key`.
    ///
    /// `columns` is the ordered draggable set with rects measured from the
    /// live header cells; it is captured here and read-only for the
    /// drag's duration. Returns false (stays Idle) when `key` is not in
    /// the set — a stale or non-draggable key is not an error.
    pub fn pointer_down(&mut self, key: &str, x: f32, y: f32, columns: &[DraggableColumn]) -> bool {
        let Some(dragged_index) = columns.iter().position(|c| c.key == key) else {
            return false;
        };
        let Some(dragged) = columns.get(dragged_index) else {
            return false;
        };

        let capture = DragCapture {
            keys: columns.iter().map(|c| c.key.clone()).collect(),
            rects: columns.iter().map(|c| c.rect).collect(),
            dragged_index,
            start_x: x,
        };
        self.phase = Phase::Dragging(DragSession {
            dragged_key: dragged.key.clone(),
            dragged_width: dragged.rect.width,
            dragged_height: dragged.rect.height,
            dragged_label: dragged.label.clone(),
            dragged_align: dragged.align,
            pointer_x: x,
            pointer_y: y,
            target: None,
            capture,
        });
        true
    }

    /// Recompute the target slot for the current pointer position.
    /// No-ops when idle.
    pub fn pointer_move(&mut self, x: f32, y: f32) {
        let mode = self.mode;
        let threshold = self.swap_threshold;
        if let Phase::Dragging(session) = &mut self.phase {
            session.pointer_x = x;
            session.pointer_y = y;
            session.target = mode.compute_target(&session.capture, x, threshold);
        }
    }

    /// Finish the drag. Returns the reorder to request, or `None` when the
    /// resolved target is absent or a no-op.
    pub fn pointer_up(&mut self) -> Option<ReorderRequest> {
        let Phase::Dragging(session) = std::mem::take(&mut self.phase) else {
            return None;
        };
        let target = session.target?;
        let request = resolve_drop(&session.capture, &session.dragged_key, target)?;
        self.recently_dropped = Some(request.dragged_key.clone());
        Some(request)
    }

    /// Abort the drag without emitting anything.
    pub fn pointer_cancel(&mut self) {
        self.phase = Phase::Idle;
    }

    /// Current drag state for renderers.
    pub fn snapshot(&self) -> DragSnapshot {
        match &self.phase {
            Phase::Idle => DragSnapshot::default(),
            Phase::Dragging(session) => DragSnapshot {
                is_dragging: true,
                dragged_key: Some(session.dragged_key.clone()),
                drag_over_key: session
                    .target
                    .and_then(|t| session.capture.keys.get(t.index).cloned()),
                drop_side: session.target.map(|t| t.side),
                pointer_x: session.pointer_x,
                pointer_y: session.pointer_y,
                dragged_width: session.dragged_width,
                dragged_height: session.dragged_height,
                dragged_label: session.dragged_label.clone(),
                dragged_align: session.dragged_align,
            },
        }
    }

    /// Translation the column with `key` should render with right now.
    /// Zero when idle, when no target is resolved, or for the dragged
    /// column itself (see `dragged_offset`).
    pub fn shift_for(&self, key: &str) -> f32 {
        let Phase::Dragging(session) = &self.phase else {
            return 0.0;
        };
        let Some(target) = session.target else {
            return 0.0;
        };
        let Some(index) = session.capture.index_of(key) else {
            return 0.0;
        };
        self.mode.compute_shift(&session.capture, index, target)
    }

    /// Raw pointer displacement for the dragged column in inline mode.
    pub fn dragged_offset(&self) -> f32 {
        match &self.phase {
            Phase::Dragging(session) => session.pointer_x - session.capture.start_x,
            Phase::Idle => 0.0,
        }
    }

    /// Key dropped by the most recent successful drag, if not yet cleared.
    pub fn recently_dropped(&self) -> Option<&str> {
        self.recently_dropped.as_deref()
    }

    /// Idempotent clear of the dropped-key marker.
    pub fn clear_recently_dropped(&mut self) {
        self.recently_dropped = None;
    }
}

/// Apply no-op suppression: a drop that would put the dragged column back
/// in its current adjacent position — immediately-before when the side is
/// Left, immediately-after when the side is Right — resolves to nothing,
/// as does a drop onto the dragged column itself.
fn resolve_drop(
    capture: &DragCapture,
    dragged_key: &str,
    target: SlotTarget,
) -> Option<ReorderRequest> {
    let i = capture.dragged_index;
    if target.index == i {
        return None;
    }
    match target.side {
        DropSide::Left if target.index == i + 1 => return None,
        DropSide::Right if target.index + 1 == i => return None,
        _ => {}
    }
    let target_key = capture.keys.get(target.index)?;
    Some(ReorderRequest {
        dragged_key: dragged_key.to_string(),
        target_key: target_key.clone(),
        insert_after: target.side == DropSide::Right,
    })
}
