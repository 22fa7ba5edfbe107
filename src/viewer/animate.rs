//! DOM application of the FLIP math plus enter/leave choreography.
//!
//! The reorder pass runs in two frames: frame one measures the reflowed
//! "Last" rects and applies each moved column's inverse transform with
//! transitions off, frame two turns the transition on and clears the
//! transform, letting the browser play the slide. Leaves mount a fixed
//! overlay at the column's captured rect and fade it out while the real
//! cells disappear immediately; enters hide the freshly rendered cells and
//! fade them in after a short delay so simultaneous leaves clear first.

#[cfg(target_arch = "wasm32")]
use std::cell::RefCell;
#[cfg(target_arch = "wasm32")]
use std::collections::HashMap;
#[cfg(target_arch = "wasm32")]
use std::rc::Rc;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsCast;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;
#[cfg(target_arch = "wasm32")]
use web_sys::HtmlElement;

#[cfg(target_arch = "wasm32")]
use super::{clear_timeout, now_ms, request_frame, schedule_timeout, GridView, SharedState};
#[cfg(target_arch = "wasm32")]
use crate::flip::{
    compute_moves, ANIM_MARGIN_MS, ENTER_ANIM_MS, ENTER_DELAY_MS, LEAVE_ANIM_MS, REORDER_ANIM_MS,
};
#[cfg(target_arch = "wasm32")]
use crate::layout::ColumnRect;
#[cfg(target_arch = "wasm32")]
use crate::state::{ChangeAction, ColumnPhase};

#[cfg(target_arch = "wasm32")]
fn action_name(action: ChangeAction) -> &'static str {
    match action {
        ChangeAction::Added => "added",
        ChangeAction::Removed => "removed",
    }
}

#[cfg(target_arch = "wasm32")]
fn style_of(el: &web_sys::Element) -> Option<web_sys::CssStyleDeclaration> {
    el.dyn_ref::<HtmlElement>().map(HtmlElement::style)
}

#[cfg(target_arch = "wasm32")]
impl GridView {
    /// Run the FLIP pass against the pending "First" capture on the next
    /// frame, after the host has re-rendered the new layout. No-ops when
    /// no capture is pending or nothing moved.
    pub(crate) fn schedule_flip(state: &Rc<RefCell<SharedState>>) {
        let weak = Rc::downgrade(state);
        request_frame(move || {
            let Some(state) = weak.upgrade() else {
                return;
            };
            let moves = {
                let mut s = state.borrow_mut();
                let Some(first) = s.flip_first.take() else {
                    return;
                };
                let Some(header) = s.header.clone() else {
                    return;
                };
                if first.is_empty() {
                    return;
                }
                let last = Self::measure_cells(&header);
                let exclude = s.drag.recently_dropped().map(str::to_string);
                compute_moves(&first, &last, exclude.as_deref())
            };
            if moves.is_empty() {
                return;
            }

            // Invert: jump every moved column back to where it was.
            {
                let s = state.borrow();
                for mv in &moves {
                    for el in Self::column_elements(&s, &mv.key) {
                        let Some(style) = style_of(&el) else {
                            continue;
                        };
                        let _ = style.set_property("transition", "none");
                        let _ =
                            style.set_property("transform", &format!("translateX({}px)", mv.dx));
                    }
                }
            }

            // Play: one frame later, transition back to the natural spot.
            let weak = Rc::downgrade(&state);
            request_frame(move || {
                let Some(state) = weak.upgrade() else {
                    return;
                };
                let keys: Vec<String> = moves.iter().map(|m| m.key.clone()).collect();
                {
                    let s = state.borrow();
                    for key in &keys {
                        for el in Self::column_elements(&s, key) {
                            let Some(style) = style_of(&el) else {
                                continue;
                            };
                            let _ = style.set_property(
                                "transition",
                                &format!("transform {REORDER_ANIM_MS}ms ease"),
                            );
                            let _ = style.remove_property("transform");
                        }
                    }
                }
                // Leave no inline transition behind once the slide settles.
                let weak = Rc::downgrade(&state);
                let _ = schedule_timeout(REORDER_ANIM_MS + ANIM_MARGIN_MS, move || {
                    let Some(state) = weak.upgrade() else {
                        return;
                    };
                    let s = state.borrow();
                    for key in &keys {
                        for el in Self::column_elements(&s, key) {
                            if let Some(style) = style_of(&el) {
                                let _ = style.remove_property("transition");
                            }
                        }
                    }
                });
            });
        });
    }

    /// Toggle one column's visibility and drive the matching animation.
    pub(crate) fn toggle_column_internal(state: &Rc<RefCell<SharedState>>, key: &str) {
        let (action, toggle_callback, render_callback) = {
            let mut s = state.borrow_mut();
            // First rects for the columns that will shift into the gap.
            let capture = Self::capture_positions_state(&s);
            let rect = s.header.as_ref().and_then(|header| {
                Self::measure_cells(header)
                    .into_iter()
                    .find_map(|(k, r)| (k == key).then_some(r))
            });
            let Some(action) = s.visibility.toggle(key, now_ms()) else {
                return;
            };
            s.flip_first = Some(capture);
            match action {
                ChangeAction::Removed => {
                    if let Some(rect) = rect {
                        s.visibility.set_leaving_rect(key, rect);
                    }
                    let label = s
                        .columns
                        .iter()
                        .find_map(|c| (c.key == key).then(|| c.label.clone()))
                        .unwrap_or_default();
                    Self::start_leave(&mut s, state, key, &label);
                }
                ChangeAction::Added => Self::start_enter(&mut s, state, key),
            }
            (action, s.toggle_callback.clone(), s.render_callback.clone())
        };

        Self::schedule_flip(state);
        if let Some(callback) = toggle_callback {
            let _ = callback.call2(
                &JsValue::NULL,
                &JsValue::from_str(key),
                &JsValue::from_str(action_name(action)),
            );
        }
        Self::invoke_callback0(render_callback);
    }

    /// Diff a desired visible-set against current state, animating every
    /// resulting change exactly as a user toggle would.
    pub(crate) fn apply_desired_internal(state: &Rc<RefCell<SharedState>>, desired: &[String]) {
        let (changes, toggle_callback, render_callback) = {
            let mut s = state.borrow_mut();
            let capture = Self::capture_positions_state(&s);
            let rects: HashMap<String, ColumnRect> = s
                .header
                .as_ref()
                .map(|header| Self::measure_cells(header).into_iter().collect())
                .unwrap_or_default();
            let changes = s.visibility.apply_desired(desired, now_ms());
            if changes.is_empty() {
                return;
            }
            s.flip_first = Some(capture);
            for (key, action) in &changes {
                match action {
                    ChangeAction::Removed => {
                        if let Some(rect) = rects.get(key) {
                            s.visibility.set_leaving_rect(key, *rect);
                        }
                        let label = s
                            .columns
                            .iter()
                            .find_map(|c| (&c.key == key).then(|| c.label.clone()))
                            .unwrap_or_default();
                        Self::start_leave(&mut s, state, key, &label);
                    }
                    ChangeAction::Added => Self::start_enter(&mut s, state, key),
                }
            }
            (changes, s.toggle_callback.clone(), s.render_callback.clone())
        };

        Self::schedule_flip(state);
        if let Some(callback) = toggle_callback {
            for (key, action) in &changes {
                let _ = callback.call2(
                    &JsValue::NULL,
                    &JsValue::from_str(key),
                    &JsValue::from_str(action_name(*action)),
                );
            }
        }
        Self::invoke_callback0(render_callback);
    }

    /// Mount the fade-out overlay and schedule the leave commit. Any timer
    /// already running for this key belongs to a superseded transition.
    fn start_leave(s: &mut SharedState, state: &Rc<RefCell<SharedState>>, key: &str, label: &str) {
        if let Some(id) = s.enter_timers.remove(key) {
            clear_timeout(id);
        }
        if let Some(id) = s.leave_timers.remove(key) {
            clear_timeout(id);
        }

        let overlay = s
            .visibility
            .leaving_rect(key)
            .and_then(|rect| mount_leave_overlay(&rect, label));
        if let Some(overlay) = overlay.clone() {
            // The fade starts one frame in, after the mount styles commit.
            request_frame(move || {
                let style = overlay.style();
                let _ = style.set_property("opacity", "0");
                let _ = style.set_property("transform", "scale(0.96)");
            });
        }

        let weak = Rc::downgrade(state);
        let key_owned = key.to_string();
        let timer = schedule_timeout(LEAVE_ANIM_MS, move || {
            if let Some(overlay) = overlay {
                overlay.remove();
            }
            let Some(state) = weak.upgrade() else {
                return;
            };
            let callback = {
                let mut s = state.borrow_mut();
                s.leave_timers.remove(&key_owned);
                s.visibility.finish_leave(&key_owned);
                s.render_callback.clone()
            };
            GridView::invoke_callback0(callback);
        });
        if let Some(id) = timer {
            s.leave_timers.insert(key.to_string(), id);
        }
    }

    /// Hide the freshly rendered cells, fade them in after the entry
    /// delay, and schedule the settle commit.
    fn start_enter(s: &mut SharedState, state: &Rc<RefCell<SharedState>>, key: &str) {
        if let Some(id) = s.leave_timers.remove(key) {
            clear_timeout(id);
        }
        if let Some(id) = s.enter_timers.remove(key) {
            clear_timeout(id);
        }

        let weak = Rc::downgrade(state);
        let key_owned = key.to_string();
        request_frame(move || {
            let Some(state) = weak.upgrade() else {
                return;
            };
            {
                let s = state.borrow();
                if s.visibility.phase(&key_owned) != ColumnPhase::Entering {
                    return;
                }
                for el in GridView::column_elements(&s, &key_owned) {
                    let Some(style) = style_of(&el) else {
                        continue;
                    };
                    let _ = style.set_property("transition", "none");
                    let _ = style.set_property("opacity", "0");
                    let _ = style.set_property("transform", "scale(0.96)");
                }
            }
            let weak = Rc::downgrade(&state);
            request_frame(move || {
                let Some(state) = weak.upgrade() else {
                    return;
                };
                let s = state.borrow();
                for el in GridView::column_elements(&s, &key_owned) {
                    let Some(style) = style_of(&el) else {
                        continue;
                    };
                    // transition-delay holds the cell hidden while
                    // simultaneous leaves clear.
                    let _ = style.set_property(
                        "transition",
                        &format!(
                            "opacity {ENTER_ANIM_MS}ms ease {ENTER_DELAY_MS}ms, \
                             transform {ENTER_ANIM_MS}ms ease {ENTER_DELAY_MS}ms"
                        ),
                    );
                    let _ = style.remove_property("opacity");
                    let _ = style.remove_property("transform");
                }
            });
        });

        let weak = Rc::downgrade(state);
        let key_owned = key.to_string();
        let timer = schedule_timeout(ENTER_DELAY_MS + ENTER_ANIM_MS + ANIM_MARGIN_MS, move || {
            let Some(state) = weak.upgrade() else {
                return;
            };
            let callback = {
                let mut s = state.borrow_mut();
                s.enter_timers.remove(&key_owned);
                s.visibility.finish_enter(&key_owned);
                for el in GridView::column_elements(&s, &key_owned) {
                    if let Some(style) = style_of(&el) {
                        let _ = style.remove_property("transition");
                    }
                }
                s.render_callback.clone()
            };
            GridView::invoke_callback0(callback);
        });
        if let Some(id) = timer {
            s.enter_timers.insert(key.to_string(), id);
        }
    }
}

/// A fixed-position stand-in for a removed column, mounted at its last
/// rendered rect so the fade-out plays while the real cells are already
/// gone from the grid.
#[cfg(target_arch = "wasm32")]
fn mount_leave_overlay(rect: &ColumnRect, label: &str) -> Option<HtmlElement> {
    let document = web_sys::window()?.document()?;
    let el: HtmlElement = document.create_element("div").ok()?.dyn_into().ok()?;
    el.set_text_content(Some(label));
    let style = el.style();
    let _ = style.set_property("position", "fixed");
    let _ = style.set_property("left", &format!("{}px", rect.left));
    let _ = style.set_property("top", &format!("{}px", rect.top));
    let _ = style.set_property("width", &format!("{}px", rect.width));
    let _ = style.set_property("height", &format!("{}px", rect.height));
    let _ = style.set_property("overflow", "hidden");
    let _ = style.set_property("pointer-events", "none");
    let _ = style.set_property("opacity", "1");
    let _ = style.set_property(
        "transition",
        &format!("opacity {LEAVE_ANIM_MS}ms ease, transform {LEAVE_ANIM_MS}ms ease"),
    );
    document.body()?.append_child(&el).ok()?;
    Some(el)
}
