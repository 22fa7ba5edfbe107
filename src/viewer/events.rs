//! Pointer event handlers for `GridView` drag reorder.
//!
//! All methods here are `pub(crate)` helpers called from the listeners
//! wired up in `mod.rs`. Pointer capture on the header container keeps the
//! drag alive when the cursor leaves the grid.

#[cfg(target_arch = "wasm32")]
use std::cell::RefCell;
#[cfg(target_arch = "wasm32")]
use std::rc::Rc;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::closure::Closure;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsCast;
#[cfg(target_arch = "wasm32")]
use web_sys::{Element, HtmlDivElement, HtmlElement, PointerEvent};

#[cfg(target_arch = "wasm32")]
use super::{clear_timeout, schedule_timeout, GridView, SharedState, SELECT_COLUMN_KEY};
#[cfg(target_arch = "wasm32")]
use crate::drag::{DragMode, DraggableColumn};
#[cfg(target_arch = "wasm32")]
use crate::flip::{ANIM_MARGIN_MS, REORDER_ANIM_MS};

#[cfg(target_arch = "wasm32")]
impl GridView {
    pub(crate) fn wire_pointer_events(
        state: &Rc<RefCell<SharedState>>,
        header: &HtmlDivElement,
    ) -> Vec<Closure<dyn FnMut(PointerEvent)>> {
        let mut closures = Vec::new();

        let st = Rc::clone(state);
        let down = Closure::wrap(Box::new(move |event: PointerEvent| {
            GridView::internal_pointer_down(&st, &event);
        }) as Box<dyn FnMut(PointerEvent)>);
        let _ = header
            .add_event_listener_with_callback("pointerdown", down.as_ref().unchecked_ref());
        closures.push(down);

        let st = Rc::clone(state);
        let moved = Closure::wrap(Box::new(move |event: PointerEvent| {
            GridView::internal_pointer_move(&st, &event);
        }) as Box<dyn FnMut(PointerEvent)>);
        let _ = header
            .add_event_listener_with_callback("pointermove", moved.as_ref().unchecked_ref());
        closures.push(moved);

        let st = Rc::clone(state);
        let up = Closure::wrap(Box::new(move |_event: PointerEvent| {
            GridView::internal_pointer_up(&st);
        }) as Box<dyn FnMut(PointerEvent)>);
        let _ = header.add_event_listener_with_callback("pointerup", up.as_ref().unchecked_ref());
        closures.push(up);

        let st = Rc::clone(state);
        let cancel = Closure::wrap(Box::new(move |_event: PointerEvent| {
            GridView::internal_pointer_cancel(&st);
        }) as Box<dyn FnMut(PointerEvent)>);
        let _ = header
            .add_event_listener_with_callback("pointercancel", cancel.as_ref().unchecked_ref());
        closures.push(cancel);

        closures
    }

    /// The ordered draggable set: visible header cells whose configs are
    /// non-sticky and not the selection-checkbox column.
    pub(crate) fn draggable_columns(
        s: &SharedState,
        header: &HtmlDivElement,
    ) -> Vec<DraggableColumn> {
        Self::measure_cells(header)
            .into_iter()
            .filter_map(|(key, rect)| {
                let config = s.columns.iter().find(|c| c.key == key)?;
                if !config.is_draggable() || config.key == SELECT_COLUMN_KEY {
                    return None;
                }
                Some(DraggableColumn {
                    key,
                    rect,
                    label: config.label.clone(),
                    align: config.align,
                })
            })
            .collect()
    }

    pub(crate) fn internal_pointer_down(state: &Rc<RefCell<SharedState>>, event: &PointerEvent) {
        let Some(target) = event.target().and_then(|t| t.dyn_into::<Element>().ok()) else {
            return;
        };
        let Ok(Some(handle)) = target.closest("[data-drag-handle]") else {
            return;
        };
        let Ok(Some(cell)) = handle.closest("[data-col-key]") else {
            return;
        };
        let Some(key) = cell.get_attribute("data-col-key") else {
            return;
        };

        let callback = {
            let mut s = state.borrow_mut();
            let Some(header) = s.header.clone() else {
                return;
            };
            // Rects are captured once here and stay read-only for the drag.
            let columns = Self::draggable_columns(&s, &header);
            let x = event.client_x() as f32;
            let y = event.client_y() as f32;
            if !s.drag.pointer_down(&key, x, y, &columns) {
                return;
            }
            let _ = header.set_pointer_capture(event.pointer_id());
            event.prevent_default();
            s.render_callback.clone()
        };
        Self::invoke_callback0(callback);
    }

    pub(crate) fn internal_pointer_move(state: &Rc<RefCell<SharedState>>, event: &PointerEvent) {
        let callback = {
            let mut s = state.borrow_mut();
            if !s.drag.is_dragging() {
                return;
            }
            s.drag
                .pointer_move(event.client_x() as f32, event.client_y() as f32);
            Self::apply_drag_transforms(&s);
            s.render_callback.clone()
        };
        Self::invoke_callback0(callback);
    }

    pub(crate) fn internal_pointer_up(state: &Rc<RefCell<SharedState>>) {
        let (request, reorder_callback, render_callback) = {
            let mut s = state.borrow_mut();
            if !s.drag.is_dragging() {
                return;
            }
            let request = s.drag.pointer_up();
            Self::clear_drag_transforms(&s);
            if request.is_some() {
                // First rects for the FLIP pass, captured before the host
                // commits the new order.
                let capture = Self::capture_positions_state(&s);
                s.flip_first = Some(capture);
                Self::schedule_dropped_clear(&mut s, state);
            }
            (request, s.reorder_callback.clone(), s.render_callback.clone())
        };

        if let (Some(request), Some(callback)) = (request, reorder_callback) {
            let _ = callback.call3(
                &JsValue::NULL,
                &JsValue::from_str(&request.dragged_key),
                &JsValue::from_str(&request.target_key),
                &JsValue::from_bool(request.insert_after),
            );
        }
        Self::invoke_callback0(render_callback);
    }

    pub(crate) fn internal_pointer_cancel(state: &Rc<RefCell<SharedState>>) {
        let callback = {
            let mut s = state.borrow_mut();
            if !s.drag.is_dragging() {
                return;
            }
            s.drag.pointer_cancel();
            Self::clear_drag_transforms(&s);
            s.render_callback.clone()
        };
        Self::invoke_callback0(callback);
    }

    /// Keep the dropped-key marker alive for the reorder animation plus a
    /// margin, then clear it so later mutations animate that column again.
    fn schedule_dropped_clear(s: &mut SharedState, state: &Rc<RefCell<SharedState>>) {
        if let Some(id) = s.dropped_clear_timer.take() {
            clear_timeout(id);
        }
        let weak = Rc::downgrade(state);
        s.dropped_clear_timer = schedule_timeout(REORDER_ANIM_MS + ANIM_MARGIN_MS, move || {
            if let Some(state) = weak.upgrade() {
                let mut s = state.borrow_mut();
                s.dropped_clear_timer = None;
                s.drag.clear_recently_dropped();
            }
        });
    }

    /// Recompute every column's translation from the current drag state.
    /// Pure per-move derivation - transforms are overwritten wholesale,
    /// never accumulated.
    pub(crate) fn apply_drag_transforms(s: &SharedState) {
        let snapshot = s.drag.snapshot();
        let dragged_key = snapshot.dragged_key.as_deref();
        for key in s.visibility.visible_keys() {
            let transform = if Some(key.as_str()) == dragged_key {
                match s.drag.mode() {
                    // Inline: the column itself follows the pointer.
                    DragMode::Inline => Some(s.drag.dragged_offset()),
                    // Floating: the host renders a clone from drag_state().
                    DragMode::Floating => None,
                }
            } else {
                let shift = s.drag.shift_for(&key);
                (shift.abs() > f32::EPSILON).then_some(shift)
            };
            for el in Self::column_elements(s, &key) {
                let Some(el) = el.dyn_ref::<HtmlElement>().map(HtmlElement::style) else {
                    continue;
                };
                match transform {
                    Some(dx) => {
                        let _ = el.set_property("transform", &format!("translateX({dx}px)"));
                    }
                    None => {
                        let _ = el.remove_property("transform");
                    }
                }
            }
        }
    }

    pub(crate) fn clear_drag_transforms(s: &SharedState) {
        for key in s.visibility.visible_keys() {
            for el in Self::column_elements(s, &key) {
                if let Some(style) = el.dyn_ref::<HtmlElement>().map(HtmlElement::style) {
                    let _ = style.remove_property("transform");
                }
            }
        }
    }
}
