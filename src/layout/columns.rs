//! Per-column offset and position-flag computation.
//!
//! Sticky columns accumulate a cumulative left offset (in their relative
//! order) so each can be positioned with `position: sticky; left: Npx`.
//! Non-sticky columns carry an offset of 0.

use serde::Serialize;

use crate::config::ColumnConfig;

/// Axis-aligned rectangle in container coordinates.
///
/// Used for drag-start capture, FLIP first/last rects, and leave overlays.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct ColumnRect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl ColumnRect {
    pub fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Horizontal center of the rect.
    pub fn center_x(&self) -> f32 {
        self.left + self.width / 2.0
    }

    /// Right edge of the rect.
    pub fn right(&self) -> f32 {
        self.left + self.width
    }

    /// True if `x` falls within the horizontal extent `[left, right)`.
    pub fn contains_x(&self, x: f32) -> bool {
        x >= self.left && x < self.right()
    }
}

/// A `ColumnConfig` enriched with derived layout data.
///
/// Pure derivation with no identity of its own — rebuilt wholesale whenever
/// the visible set or order changes.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComputedColumn {
    #[serde(flatten)]
    pub config: ColumnConfig,
    /// Cumulative left offset among sticky columns (0 for non-sticky).
    pub computed_sticky_left: f32,
    /// Index within the visible column list.
    pub index: usize,
    pub is_first: bool,
    pub is_last: bool,
    pub is_first_sticky: bool,
    pub is_last_sticky: bool,
}

impl ComputedColumn {
    /// The column's unique key.
    pub fn key(&self) -> &str {
        &self.config.key
    }
}

/// Assign sticky offsets and position flags to each visible column.
pub fn compute_column_offsets(columns: &[ColumnConfig]) -> Vec<ComputedColumn> {
    let last_index = columns.len().saturating_sub(1);
    let first_sticky = columns.iter().position(|c| c.is_sticky);
    let last_sticky = columns.iter().rposition(|c| c.is_sticky);

    let mut sticky_left: f32 = 0.0;
    columns
        .iter()
        .enumerate()
        .map(|(index, config)| {
            let computed_sticky_left = if config.is_sticky {
                let left = sticky_left;
                sticky_left += config.width;
                left
            } else {
                0.0
            };
            ComputedColumn {
                config: config.clone(),
                computed_sticky_left,
                index,
                is_first: index == 0,
                is_last: index == last_index && !columns.is_empty(),
                is_first_sticky: first_sticky == Some(index),
                is_last_sticky: last_sticky == Some(index),
            }
        })
        .collect()
}

/// Partition into (sticky, scrollable), preserving relative order.
pub fn separate_columns(columns: &[ComputedColumn]) -> (Vec<ComputedColumn>, Vec<ComputedColumn>) {
    columns
        .iter()
        .cloned()
        .partition(|col| col.config.is_sticky)
}

/// Total width of all sticky columns.
///
/// Positions overlays and the scroll-arrow affordance just past the pinned
/// region.
pub fn total_sticky_width(columns: &[ColumnConfig]) -> f32 {
    columns
        .iter()
        .filter(|c| c.is_sticky)
        .map(|c| c.width)
        .sum()
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
    use crate::config::ColumnConfig;

    fn sticky(key: &str, width: f32) -> ColumnConfig {
        let mut c = ColumnConfig::new(key, width);
        c.is_sticky = true;
        c
    }

    #[test]
    fn sticky_offsets_accumulate() {
        let cols = vec![
            sticky("a", 40.0),
            sticky("b", 80.0),
            ColumnConfig::new("c", 120.0),
            sticky("d", 60.0),
        ];
        let computed = compute_column_offsets(&cols);
        assert_eq!(computed[0].computed_sticky_left, 0.0);
        assert_eq!(computed[1].computed_sticky_left, 40.0);
        assert_eq!(computed[2].computed_sticky_left, 0.0);
        assert_eq!(computed[3].computed_sticky_left, 120.0);
        assert_eq!(total_sticky_width(&cols), 180.0);
    }

    #[test]
    fn position_flags() {
        let cols = vec![
            sticky("a", 40.0),
            sticky("b", 80.0),
            ColumnConfig::new("c", 120.0),
        ];
        let computed = compute_column_offsets(&cols);
        assert!(computed[0].is_first);
        assert!(computed[0].is_first_sticky);
        assert!(!computed[0].is_last_sticky);
        assert!(computed[1].is_last_sticky);
        assert!(computed[2].is_last);
        assert!(!computed[2].is_first_sticky);
    }

    #[test]
    fn separate_preserves_order() {
        let cols = compute_column_offsets(&[
            sticky("a", 40.0),
            ColumnConfig::new("b", 120.0),
            sticky("c", 60.0),
            ColumnConfig::new("d", 120.0),
        ]);
        let (sticky_cols, scrollable) = separate_columns(&cols);
        let keys: Vec<&str> = sticky_cols.iter().map(ComputedColumn::key).collect();
        assert_eq!(keys, ["a", "c"]);
        let keys: Vec<&str> = scrollable.iter().map(ComputedColumn::key).collect();
        assert_eq!(keys, ["b", "d"]);
    }

    #[test]
    fn empty_input() {
        assert!(compute_column_offsets(&[]).is_empty());
        assert_eq!(total_sticky_width(&[]), 0.0);
    }
}
