//! Main GridView struct - the primary entry point for the browser grid core.
//!
//! This module provides the WASM-exported `GridView` struct that handles:
//! - Holding column/visibility/selection/sort state for the host
//! - Keeping the header and body containers scroll-locked
//! - Running the drag-reorder controller off pointer events
//! - Coordinating FLIP animations for reorders, leaves, and enters
//!
//! Event handlers are registered when containers are attached - no manual
//! JavaScript wiring required. The host renders cells; every header and
//! body cell carries a `data-col-key` attribute, and drag handles carry
//! `data-drag-handle`.

mod animate;
mod events;
mod scroll;

use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
use js_sys::Function;
#[cfg(target_arch = "wasm32")]
use std::cell::RefCell;
#[cfg(target_arch = "wasm32")]
use std::collections::HashMap;
#[cfg(target_arch = "wasm32")]
use std::rc::Rc;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::closure::Closure;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsCast;
#[cfg(target_arch = "wasm32")]
use web_sys::{Element, HtmlDivElement, PointerEvent, ResizeObserver};

use crate::config::{validate_columns, ColumnConfig};
use crate::drag::DragController;
#[cfg(target_arch = "wasm32")]
use crate::drag::DragMode;
#[cfg(target_arch = "wasm32")]
use crate::error::GridError;
#[cfg(target_arch = "wasm32")]
use crate::flip::FlipCapture;
use crate::layout::{
    compute_column_offsets, generate_grid_template, separate_columns, total_sticky_width,
    ComputedColumn,
};
#[cfg(target_arch = "wasm32")]
use crate::layout::ColumnRect;
#[cfg(target_arch = "wasm32")]
use crate::scroll::ScrollFlags;
use crate::state::{SelectionState, SortState, VisibilityState};

/// Reserved key for the selection-checkbox column; never draggable.
pub const SELECT_COLUMN_KEY: &str = "__select";

/// Narrow DOM floats (f64) to the f32 geometry the core computes with.
/// Values are CSS pixels, far inside f32 range.
#[cfg(target_arch = "wasm32")]
#[allow(clippy::cast_possible_truncation)]
pub(crate) fn px(v: f64) -> f32 {
    v as f32
}

// Timing helper for change timestamps.
#[cfg(target_arch = "wasm32")]
pub(crate) fn now_ms() -> f64 {
    if let Some(window) = web_sys::window() {
        if let Some(perf) = window.performance() {
            return perf.now();
        }
    }
    js_sys::Date::now()
}

#[cfg(target_arch = "wasm32")]
pub(crate) fn schedule_timeout(ms: u32, f: impl FnOnce() + 'static) -> Option<i32> {
    let window = web_sys::window()?;
    let callback = Closure::once_into_js(f);
    window
        .set_timeout_with_callback_and_timeout_and_arguments_0(
            callback.unchecked_ref(),
            i32::try_from(ms).unwrap_or(i32::MAX),
        )
        .ok()
}

/// Idempotent - clearing an already-fired or already-cleared handle is safe.
#[cfg(target_arch = "wasm32")]
pub(crate) fn clear_timeout(id: i32) {
    if let Some(window) = web_sys::window() {
        window.clear_timeout_with_handle(id);
    }
}

#[cfg(target_arch = "wasm32")]
pub(crate) fn request_frame(f: impl FnOnce() + 'static) {
    if let Some(window) = web_sys::window() {
        let callback = Closure::once_into_js(f);
        let _ = window.request_animation_frame(callback.unchecked_ref());
    }
}

/// Shared state that can be accessed by event handlers (wasm32 only)
#[cfg(target_arch = "wasm32")]
pub(crate) struct SharedState {
    /// Host column order, including currently-hidden columns.
    pub(crate) columns: Vec<ColumnConfig>,
    pub(crate) visibility: VisibilityState,
    pub(crate) default_visible: Vec<String>,
    pub(crate) selection: Option<SelectionState>,
    pub(crate) sort: Option<SortState>,
    pub(crate) row_ids: Vec<String>,
    pub(crate) drag: DragController,
    /// FLIP "First" rects, captured just before a committing mutation.
    pub(crate) flip_first: Option<FlipCapture>,
    pub(crate) scroll_flags: ScrollFlags,
    /// One pending flag recomputation per frame.
    pub(crate) raf_ticking: bool,
    /// Bumped when containers are swapped; stale frame/observer callbacks
    /// compare against it and no-op.
    pub(crate) subscription_version: u32,
    pub(crate) header: Option<HtmlDivElement>,
    pub(crate) body: Option<HtmlDivElement>,
    pub(crate) render_callback: Option<Function>,
    pub(crate) reorder_callback: Option<Function>,
    pub(crate) toggle_callback: Option<Function>,
    pub(crate) sort_callback: Option<Function>,
    pub(crate) selection_callback: Option<Function>,
    pub(crate) leave_timers: HashMap<String, i32>,
    pub(crate) enter_timers: HashMap<String, i32>,
    pub(crate) dropped_clear_timer: Option<i32>,
}

#[cfg(target_arch = "wasm32")]
impl SharedState {
    fn new() -> Self {
        Self {
            columns: Vec::new(),
            visibility: VisibilityState::default(),
            default_visible: Vec::new(),
            selection: None,
            sort: None,
            row_ids: Vec::new(),
            drag: DragController::default(),
            flip_first: None,
            scroll_flags: ScrollFlags::default(),
            raf_ticking: false,
            subscription_version: 0,
            header: None,
            body: None,
            render_callback: None,
            reorder_callback: None,
            toggle_callback: None,
            sort_callback: None,
            selection_callback: None,
            leave_timers: HashMap::new(),
            enter_timers: HashMap::new(),
            dropped_clear_timer: None,
        }
    }

    /// Configs of currently-visible columns, in order.
    pub(crate) fn visible_configs(&self) -> Vec<ColumnConfig> {
        self.columns
            .iter()
            .filter(|c| self.visibility.is_visible(&c.key))
            .cloned()
            .collect()
    }

    pub(crate) fn computed_columns(&self) -> Vec<ComputedColumn> {
        compute_column_offsets(&self.visible_configs())
    }
}

/// The main grid engine struct exported to JavaScript
#[wasm_bindgen]
pub struct GridView {
    #[cfg(target_arch = "wasm32")]
    state: Rc<RefCell<SharedState>>,
    #[cfg(target_arch = "wasm32")]
    #[allow(dead_code)]
    pointer_closures: Vec<Closure<dyn FnMut(PointerEvent)>>,
    #[cfg(target_arch = "wasm32")]
    #[allow(dead_code)]
    scroll_closures: Vec<Closure<dyn FnMut(web_sys::Event)>>,
    #[cfg(target_arch = "wasm32")]
    resize_observer: Option<ResizeObserver>,
    #[cfg(target_arch = "wasm32")]
    #[allow(dead_code)]
    resize_closure: Option<Closure<dyn FnMut(js_sys::Array)>>,

    // Non-wasm32 fields: headless state for native hosts and tests
    #[cfg(not(target_arch = "wasm32"))]
    columns: Vec<ColumnConfig>,
    #[cfg(not(target_arch = "wasm32"))]
    visibility: VisibilityState,
    #[cfg(not(target_arch = "wasm32"))]
    default_visible: Vec<String>,
    #[cfg(not(target_arch = "wasm32"))]
    selection: Option<SelectionState>,
    #[cfg(not(target_arch = "wasm32"))]
    sort: Option<SortState>,
    #[cfg(not(target_arch = "wasm32"))]
    row_ids: Vec<String>,
    #[cfg(not(target_arch = "wasm32"))]
    #[allow(dead_code)]
    drag: DragController,
}

// ============================================================================
// WASM32 Implementation
// ============================================================================

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
impl GridView {
    /// Create a grid engine bound to the header and body scroll containers.
    #[wasm_bindgen(constructor)]
    pub fn new(header: HtmlDivElement, body: HtmlDivElement) -> Result<GridView, JsValue> {
        console_error_panic_hook::set_once();

        let state = Rc::new(RefCell::new(SharedState::new()));
        {
            let mut s = state.borrow_mut();
            s.header = Some(header.clone());
            s.body = Some(body.clone());
        }

        let pointer_closures = Self::wire_pointer_events(&state, &header);
        let scroll_closures = Self::wire_scroll_events(&state, &header, &body);
        let (resize_observer, resize_closure) = Self::wire_resize_observer(&state, &header, &body);

        Ok(GridView {
            state,
            pointer_closures,
            scroll_closures,
            resize_observer,
            resize_closure,
        })
    }

    /// Swap in new container nodes after a loading-state remount.
    ///
    /// Bumps the subscription version so callbacks scheduled against the
    /// old nodes no-op, then re-wires listeners and observers.
    pub fn set_containers(&mut self, header: HtmlDivElement, body: HtmlDivElement) {
        if let Some(observer) = self.resize_observer.take() {
            observer.disconnect();
        }
        {
            let mut s = self.state.borrow_mut();
            s.subscription_version = s.subscription_version.wrapping_add(1);
            s.raf_ticking = false;
            s.header = Some(header.clone());
            s.body = Some(body.clone());
        }
        self.pointer_closures = Self::wire_pointer_events(&self.state, &header);
        self.scroll_closures = Self::wire_scroll_events(&self.state, &header, &body);
        let (observer, closure) = Self::wire_resize_observer(&self.state, &header, &body);
        self.resize_observer = observer;
        self.resize_closure = closure;
        Self::resync_scroll(&self.state);
    }

    /// Replace the column configuration (host-owned order).
    ///
    /// When the change reorders existing columns, positions captured
    /// beforehand (or here, as a fallback) feed the FLIP pass scheduled
    /// for after the host re-renders.
    pub fn set_columns(&mut self, columns: JsValue) -> Result<(), JsValue> {
        let configs: Vec<ColumnConfig> = serde_wasm_bindgen::from_value(columns)
            .map_err(|e| GridError::Serde(e.to_string()))?;
        validate_columns(&configs)?;

        let callback = {
            let mut s = self.state.borrow_mut();
            if s.flip_first.is_none() && !s.columns.is_empty() {
                s.flip_first = Some(Self::capture_positions_state(&s));
            }
            let first_load = s.columns.is_empty();
            let keys: Vec<String> = configs.iter().map(|c| c.key.clone()).collect();
            if first_load {
                s.visibility = VisibilityState::new(keys);
                s.default_visible = s.visibility.visible_keys();
            } else {
                s.visibility.set_order(keys);
            }
            s.columns = configs;
            s.render_callback.clone()
        };

        Self::schedule_flip(&self.state);
        Self::invoke_callback0(callback);
        Ok(())
    }

    /// Capture current column positions as the FLIP "First" set.
    ///
    /// Call immediately before committing a mutation that will change
    /// column positions (the engine does this itself for drags/toggles).
    pub fn capture_positions(&self) {
        let mut s = self.state.borrow_mut();
        let capture = Self::capture_positions_state(&s);
        s.flip_first = Some(capture);
    }

    /// The `grid-template-columns` value shared by header and body.
    pub fn grid_template(&self) -> String {
        let s = self.state.borrow();
        let computed = s.computed_columns();
        let (sticky, scrollable) = separate_columns(&computed);
        generate_grid_template(&sticky, &scrollable)
    }

    /// Computed per-column layout (offsets, flags) for external toolbars.
    pub fn computed_columns(&self) -> Result<JsValue, JsValue> {
        let s = self.state.borrow();
        serde_wasm_bindgen::to_value(&s.computed_columns())
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Total width of visible sticky columns.
    pub fn total_sticky_width(&self) -> f32 {
        let s = self.state.borrow();
        total_sticky_width(&s.visible_configs())
    }

    /// Ordered keys of currently-visible columns.
    pub fn visible_columns(&self) -> Result<JsValue, JsValue> {
        let s = self.state.borrow();
        serde_wasm_bindgen::to_value(&s.visibility.visible_keys())
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Toggle one column's visibility, driving the enter/leave animation.
    pub fn toggle_column(&mut self, key: &str) {
        Self::toggle_column_internal(&self.state, key);
    }

    /// Push a desired visible-set (external authority). Diffs against
    /// current state so programmatic and user-driven changes share one
    /// animation path.
    pub fn set_visible_columns(&mut self, keys: JsValue) -> Result<(), JsValue> {
        let desired: Vec<String> = serde_wasm_bindgen::from_value(keys)
            .map_err(|e| GridError::Serde(e.to_string()))?;
        Self::apply_desired_internal(&self.state, &desired);
        Ok(())
    }

    /// Restore the default visible-set through the same diff logic.
    pub fn reset_columns(&mut self) {
        let desired = self.state.borrow().default_visible.clone();
        Self::apply_desired_internal(&self.state, &desired);
    }

    /// Enable or disable row selection. Disabled hosts read a null
    /// sentinel from the selection getters.
    pub fn enable_selection(&mut self, enabled: bool) {
        let mut s = self.state.borrow_mut();
        s.selection = enabled.then(SelectionState::new);
    }

    /// Replace the currently-rendered row-id list. Stale selections are
    /// pruned so derived flags never count unmounted rows.
    pub fn set_row_ids(&mut self, row_ids: JsValue) -> Result<(), JsValue> {
        let ids: Vec<String> = serde_wasm_bindgen::from_value(row_ids)
            .map_err(|e| GridError::Serde(e.to_string()))?;
        let mut s = self.state.borrow_mut();
        if let Some(selection) = &mut s.selection {
            selection.retain_rows(&ids);
        }
        s.row_ids = ids;
        Ok(())
    }

    pub fn toggle_row(&mut self, row_id: &str) {
        let callback = {
            let mut s = self.state.borrow_mut();
            let Some(selection) = &mut s.selection else {
                return;
            };
            selection.toggle_row(row_id);
            s.selection_callback.clone()
        };
        Self::invoke_callback0(callback);
    }

    pub fn select_all_rows(&mut self) {
        let callback = {
            let mut s = self.state.borrow_mut();
            let row_ids = s.row_ids.clone();
            let Some(selection) = &mut s.selection else {
                return;
            };
            selection.select_all(&row_ids);
            s.selection_callback.clone()
        };
        Self::invoke_callback0(callback);
    }

    pub fn deselect_all_rows(&mut self) {
        let callback = {
            let mut s = self.state.borrow_mut();
            let Some(selection) = &mut s.selection else {
                return;
            };
            selection.deselect_all();
            s.selection_callback.clone()
        };
        Self::invoke_callback0(callback);
    }

    /// Selection summary `{isAllSelected, isSomeSelected, selectedCount}`,
    /// or `null` when selection is disabled.
    pub fn selection_summary(&self) -> Result<JsValue, JsValue> {
        let s = self.state.borrow();
        let Some(selection) = &s.selection else {
            return Ok(JsValue::NULL);
        };
        let summary = serde_json::json!({
            "isAllSelected": selection.is_all_selected(&s.row_ids),
            "isSomeSelected": selection.is_some_selected(&s.row_ids),
            "selectedCount": selection.selected_count(&s.row_ids),
        });
        serde_wasm_bindgen::to_value(&summary).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    pub fn is_row_selected(&self, row_id: &str) -> bool {
        let s = self.state.borrow();
        s.selection
            .as_ref()
            .is_some_and(|sel| sel.is_selected(row_id))
    }

    /// Resolve a sort-header click and notify the host.
    pub fn toggle_sort(&mut self, column: &str) {
        let (callback, sort) = {
            let mut s = self.state.borrow_mut();
            if !s
                .columns
                .iter()
                .any(|c| c.key == column && c.sortable)
            {
                return;
            }
            let next = SortState::toggled(s.sort.as_ref(), column);
            s.sort = Some(next.clone());
            (s.sort_callback.clone(), next)
        };
        if let Some(callback) = callback {
            let value = serde_wasm_bindgen::to_value(&sort).unwrap_or(JsValue::NULL);
            let _ = callback.call1(&JsValue::NULL, &value);
        }
    }

    /// Current sort as `{column, direction}`, or `null`.
    pub fn sort_state(&self) -> Result<JsValue, JsValue> {
        let s = self.state.borrow();
        match &s.sort {
            Some(sort) => serde_wasm_bindgen::to_value(sort)
                .map_err(|e| JsValue::from_str(&e.to_string())),
            None => Ok(JsValue::NULL),
        }
    }

    /// Current drag state for renderers (floating clone, drop indicator).
    pub fn drag_state(&self) -> Result<JsValue, JsValue> {
        let s = self.state.borrow();
        serde_wasm_bindgen::to_value(&s.drag.snapshot())
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Select the drag interaction mode: "floating" or "inline".
    pub fn set_drag_mode(&mut self, mode: &str) -> Result<(), JsValue> {
        let mode = match mode {
            "floating" => DragMode::Floating,
            "inline" => DragMode::Inline,
            other => {
                return Err(GridError::Config(format!("unknown drag mode: {other}")).into());
            }
        };
        self.state.borrow_mut().drag.set_mode(mode);
        Ok(())
    }

    /// Override the inline-mode slot trigger fraction (0, 1].
    pub fn set_swap_threshold(&mut self, threshold: f32) {
        self.state.borrow_mut().drag.set_swap_threshold(threshold);
    }

    /// Scroll both containers horizontally by `amount` pixels.
    pub fn scroll_by(&self, amount: f64, smooth: bool) {
        Self::scroll_by_internal(&self.state, amount, smooth);
    }

    /// Latest derived scroll flags
    /// `{canScrollLeft, canScrollRight, showScrollIndicator}`.
    pub fn scroll_flags(&self) -> Result<JsValue, JsValue> {
        let s = self.state.borrow();
        let flags = serde_json::json!({
            "canScrollLeft": s.scroll_flags.can_scroll_left,
            "canScrollRight": s.scroll_flags.can_scroll_right,
            "showScrollIndicator": s.scroll_flags.show_scroll_indicator,
        });
        serde_wasm_bindgen::to_value(&flags).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    pub fn set_render_callback(&mut self, callback: Function) {
        self.state.borrow_mut().render_callback = Some(callback);
    }

    /// `(draggedKey, targetKey, insertAfter) => void`
    pub fn set_reorder_callback(&mut self, callback: Function) {
        self.state.borrow_mut().reorder_callback = Some(callback);
    }

    /// `(columnKey, action) => void` where action is "added" | "removed"
    pub fn set_toggle_callback(&mut self, callback: Function) {
        self.state.borrow_mut().toggle_callback = Some(callback);
    }

    /// `({column, direction}) => void`
    pub fn set_sort_callback(&mut self, callback: Function) {
        self.state.borrow_mut().sort_callback = Some(callback);
    }

    pub fn set_selection_callback(&mut self, callback: Function) {
        self.state.borrow_mut().selection_callback = Some(callback);
    }
}

#[cfg(target_arch = "wasm32")]
impl GridView {
    pub(crate) fn invoke_callback0(callback: Option<Function>) {
        if let Some(callback) = callback {
            let _ = callback.call0(&JsValue::NULL);
        }
    }

    /// Measure header cells into a FLIP capture keyed by column.
    pub(crate) fn capture_positions_state(s: &SharedState) -> FlipCapture {
        let mut capture = FlipCapture::new();
        let Some(header) = &s.header else {
            return capture;
        };
        for (key, rect) in Self::measure_cells(header) {
            capture.record(key, rect);
        }
        capture
    }

    /// All `[data-col-key]` cells of a container with their client rects.
    pub(crate) fn measure_cells(container: &HtmlDivElement) -> Vec<(String, ColumnRect)> {
        let mut out = Vec::new();
        let Ok(nodes) = container.query_selector_all("[data-col-key]") else {
            return out;
        };
        for i in 0..nodes.length() {
            let Some(node) = nodes.get(i) else {
                continue;
            };
            let Ok(el) = node.dyn_into::<Element>() else {
                continue;
            };
            let Some(key) = el.get_attribute("data-col-key") else {
                continue;
            };
            let r = el.get_bounding_client_rect();
            out.push((
                key,
                ColumnRect::new(px(r.left()), px(r.top()), px(r.width()), px(r.height())),
            ));
        }
        out
    }

    /// Elements carrying `data-col-key == key` across header and body.
    pub(crate) fn column_elements(s: &SharedState, key: &str) -> Vec<Element> {
        let mut out = Vec::new();
        let selector = format!("[data-col-key=\"{key}\"]");
        for container in [&s.header, &s.body].into_iter().flatten() {
            let Ok(nodes) = container.query_selector_all(&selector) else {
                continue;
            };
            for i in 0..nodes.length() {
                if let Some(el) = nodes.get(i).and_then(|n| n.dyn_into::<Element>().ok()) {
                    out.push(el);
                }
            }
        }
        out
    }
}

// ============================================================================
// Non-WASM32 Implementation (headless: native hosts and tests)
// ============================================================================

#[cfg(not(target_arch = "wasm32"))]
impl Default for GridView {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl GridView {
    pub fn new() -> Self {
        GridView {
            columns: Vec::new(),
            visibility: VisibilityState::default(),
            default_visible: Vec::new(),
            selection: None,
            sort: None,
            row_ids: Vec::new(),
            drag: DragController::default(),
        }
    }

    /// Replace the column configuration (host-owned order).
    ///
    /// # Errors
    /// Returns `GridError::Config` for invalid configs.
    pub fn set_columns(&mut self, configs: Vec<ColumnConfig>) -> crate::error::Result<()> {
        validate_columns(&configs)?;
        let keys: Vec<String> = configs.iter().map(|c| c.key.clone()).collect();
        if self.columns.is_empty() {
            self.visibility = VisibilityState::new(keys);
            self.default_visible = self.visibility.visible_keys();
        } else {
            self.visibility.set_order(keys);
        }
        self.columns = configs;
        Ok(())
    }

    fn visible_configs(&self) -> Vec<ColumnConfig> {
        self.columns
            .iter()
            .filter(|c| self.visibility.is_visible(&c.key))
            .cloned()
            .collect()
    }

    pub fn grid_template(&self) -> String {
        let computed = compute_column_offsets(&self.visible_configs());
        let (sticky, scrollable) = separate_columns(&computed);
        generate_grid_template(&sticky, &scrollable)
    }

    pub fn computed_columns(&self) -> Vec<ComputedColumn> {
        compute_column_offsets(&self.visible_configs())
    }

    pub fn total_sticky_width(&self) -> f32 {
        total_sticky_width(&self.visible_configs())
    }

    pub fn visibility(&self) -> &VisibilityState {
        &self.visibility
    }

    pub fn visibility_mut(&mut self) -> &mut VisibilityState {
        &mut self.visibility
    }

    pub fn enable_selection(&mut self, enabled: bool) {
        self.selection = enabled.then(SelectionState::new);
    }

    pub fn selection(&self) -> Option<&SelectionState> {
        self.selection.as_ref()
    }

    pub fn selection_mut(&mut self) -> Option<&mut SelectionState> {
        self.selection.as_mut()
    }

    pub fn set_row_ids(&mut self, ids: Vec<String>) {
        if let Some(selection) = &mut self.selection {
            selection.retain_rows(&ids);
        }
        self.row_ids = ids;
    }

    pub fn row_ids(&self) -> &[String] {
        &self.row_ids
    }

    pub fn toggle_sort(&mut self, column: &str) -> Option<&SortState> {
        if !self.columns.iter().any(|c| c.key == column && c.sortable) {
            return None;
        }
        self.sort = Some(SortState::toggled(self.sort.as_ref(), column));
        self.sort.as_ref()
    }

    pub fn sort_state(&self) -> Option<&SortState> {
        self.sort.as_ref()
    }
}
