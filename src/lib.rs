//! gridview - sticky-column data grid core for the web
//!
//! Computes and coordinates the interaction layer of a large tabular grid
//! in the browser via WebAssembly:
//! - Pixel-exact grid layout shared identically between header and body
//! - Horizontal scroll lockstep between two independent containers
//! - Pointer-driven column drag reorder (floating and inline modes)
//! - FLIP enter/leave/reorder animations, transform/opacity only
//! - Column visibility, row selection, and single-column sort state
//!
//! Data fetching, cell rendering, theming, and persistence stay host-side;
//! the engine consumes column configs and row ids and emits callbacks.
//!
//! # Usage (JavaScript)
//!
//! ```javascript
//! import init, { GridView } from 'gridview';
//! await init();
//! const grid = new GridView(headerEl, bodyEl);
//! grid.set_columns(columns);
//! grid.set_reorder_callback((dragged, target, after) => { ... });
//! headerEl.style.gridTemplateColumns = grid.grid_template();
//! ```

// Pure core (builds and tests natively)
pub mod config;
pub mod drag;
pub mod error;
pub mod flip;
pub mod layout;
pub mod scroll;
pub mod state;

// Browser integration
pub mod viewer;

use wasm_bindgen::prelude::*;

pub use config::{validate_columns, Align, ColumnConfig};
pub use drag::{DragController, DragMode, DragSnapshot, DropSide, ReorderRequest};
pub use error::{GridError, Result};
pub use layout::{ComputedColumn, ColumnRect};
pub use state::{SelectionState, SortDirection, SortState, VisibilityState};
pub use viewer::GridView;

/// Compute the grid template string for a JSON-encoded column list.
///
/// Standalone entry point for hosts that need the template before a
/// `GridView` is constructed (server-rendered shells, external toolbars).
///
/// # Errors
/// Returns an error when the JSON is malformed or the configs fail
/// validation.
#[wasm_bindgen]
pub fn grid_template_for(columns_json: &str) -> std::result::Result<String, JsValue> {
    let columns: Vec<ColumnConfig> =
        serde_json::from_str(columns_json).map_err(|e| JsValue::from_str(&e.to_string()))?;
    validate_columns(&columns).map_err(|e| JsValue::from_str(&e.to_string()))?;
    let computed = layout::compute_column_offsets(&columns);
    let (sticky, scrollable) = layout::separate_columns(&computed);
    Ok(layout::generate_grid_template(&sticky, &scrollable))
}

/// Get the library version
#[must_use]
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
