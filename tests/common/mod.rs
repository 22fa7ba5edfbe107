//! Shared builders for grid integration tests.
#![allow(
    dead_code,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

use gridview::drag::DraggableColumn;
use gridview::{Align, ColumnConfig, ColumnRect};

/// A plain scrollable column.
pub fn col(key: &str, width: f32) -> ColumnConfig {
    ColumnConfig::new(key, width)
}

/// A sticky (pinned) column.
pub fn sticky(key: &str, width: f32) -> ColumnConfig {
    let mut c = ColumnConfig::new(key, width);
    c.is_sticky = true;
    c
}

/// A sortable scrollable column.
pub fn sortable(key: &str, width: f32) -> ColumnConfig {
    let mut c = ColumnConfig::new(key, width);
    c.sortable = true;
    c
}

/// Lay draggable columns out left to right starting at `origin`, the way
/// the viewer measures them from rendered header cells.
pub fn draggable_row(origin: f32, cols: &[(&str, f32)]) -> Vec<DraggableColumn> {
    let mut left = origin;
    cols.iter()
        .map(|(key, width)| {
            let rect = ColumnRect::new(left, 0.0, *width, 32.0);
            left += width;
            DraggableColumn {
                key: (*key).to_string(),
                rect,
                label: (*key).to_uppercase(),
                align: Align::Left,
            }
        })
        .collect()
}

pub fn ids(v: &[&str]) -> Vec<String> {
    v.iter().map(|s| (*s).to_string()).collect()
}
