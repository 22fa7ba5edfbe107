//! FLIP (First-Last-Invert-Play) math for column transitions.
//!
//! Before a column-count or order mutation commits, the viewer captures
//! each visible column's rect ("First"). After the new layout reflows
//! ("Last"), every moved column gets an inverse transform applied with no
//! transition, then cleared on the next frame with the transition back on
//! — a transform-only slide from old to new position. Width and
//! grid-template are never animated.
//!
//! This module holds the platform-neutral capture/delta math; the DOM
//! application lives in `viewer::animate`.

use std::collections::HashMap;

use crate::layout::ColumnRect;

/// Duration of the reorder slide.
pub const REORDER_ANIM_MS: u32 = 200;
/// How long a removed column's overlay stays mounted while fading out.
pub const LEAVE_ANIM_MS: u32 = 200;
/// Duration of the enter fade/scale.
pub const ENTER_ANIM_MS: u32 = 200;
/// Entry animations start after this delay so simultaneous leaves clear
/// first, preventing a layout jump.
pub const ENTER_DELAY_MS: u32 = 60;
/// Margin added when scheduling the dropped-key clear after a reorder.
pub const ANIM_MARGIN_MS: u32 = 50;

/// Deltas below this are treated as "did not move".
const MIN_MOVE_PX: f32 = 0.5;

/// "First" rects, captured per column key immediately before a mutation.
///
/// Ephemeral: lives only between the state commit and the next paint.
#[derive(Debug, Clone, Default)]
pub struct FlipCapture {
    rects: HashMap<String, ColumnRect>,
}

impl FlipCapture {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, key: impl Into<String>, rect: ColumnRect) {
        self.rects.insert(key.into(), rect);
    }

    pub fn get(&self, key: &str) -> Option<&ColumnRect> {
        self.rects.get(key)
    }

    pub fn is_empty(&self) -> bool {
        self.rects.is_empty()
    }
}

/// Inverse transform for one column.
#[derive(Debug, Clone, PartialEq)]
pub struct FlipMove {
    pub key: String,
    /// `first.left - last.left`: applying `translateX(dx)` puts the column
    /// back at its old position.
    pub dx: f32,
}

/// Compute inverse moves for every column whose position changed.
///
/// `exclude` names the just-dropped dragged column, which is already
/// visually in place and must not slide. Columns absent from the capture
/// (newly entering) or from `last` (leaving) are skipped — they go through
/// the enter/leave paths instead.
pub fn compute_moves(
    first: &FlipCapture,
    last: &[(String, ColumnRect)],
    exclude: Option<&str>,
) -> Vec<FlipMove> {
    last.iter()
        .filter(|(key, _)| exclude != Some(key.as_str()))
        .filter_map(|(key, last_rect)| {
            let first_rect = first.get(key)?;
            let dx = first_rect.left - last_rect.left;
            if dx.abs() < MIN_MOVE_PX {
                None
            } else {
                Some(FlipMove {
                    key: key.clone(),
                    dx,
                })
            }
        })
        .collect()
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]
mod tests {
    use super::*;

    fn rect(left: f32) -> ColumnRect {
        ColumnRect::new(left, 0.0, 120.0, 32.0)
    }

    #[test]
    fn moved_columns_get_inverse_deltas() {
        let mut first = FlipCapture::new();
        first.record("b", rect(80.0));
        first.record("c", rect(200.0));
        let last = vec![("b".to_string(), rect(200.0)), ("c".to_string(), rect(80.0))];

        let moves = compute_moves(&first, &last, None);
        assert_eq!(moves.len(), 2);
        assert_eq!(moves[0], FlipMove { key: "b".to_string(), dx: -120.0 });
        assert_eq!(moves[1], FlipMove { key: "c".to_string(), dx: 120.0 });
    }

    #[test]
    fn dropped_column_is_excluded() {
        let mut first = FlipCapture::new();
        first.record("b", rect(80.0));
        first.record("c", rect(200.0));
        let last = vec![("b".to_string(), rect(200.0)), ("c".to_string(), rect(80.0))];

        let moves = compute_moves(&first, &last, Some("c"));
        assert_eq!(moves.len(), 1);
        assert_eq!(moves[0].key, "b");
    }

    #[test]
    fn unmoved_and_unknown_columns_are_skipped() {
        let mut first = FlipCapture::new();
        first.record("a", rect(0.0));
        let last = vec![
            ("a".to_string(), rect(0.2)),       // sub-pixel: unmoved
            ("fresh".to_string(), rect(300.0)), // entering: no First rect
        ];
        assert!(compute_moves(&first, &last, None).is_empty());
    }
}
