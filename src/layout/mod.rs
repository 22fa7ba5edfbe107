//! Grid layout computation.
//!
//! Pure functions that derive per-column offsets, position flags, and the
//! CSS grid template shared by the header and body grids. Everything here
//! is recomputed from `ColumnConfig`s on every order/visibility change and
//! never mutated in place.

mod columns;
mod grid_template;

pub use columns::{
    compute_column_offsets, separate_columns, total_sticky_width, ColumnRect, ComputedColumn,
};
pub use grid_template::generate_grid_template;
