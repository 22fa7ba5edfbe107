//! Scroll lockstep between the header and body containers.
//!
//! Either container can originate a scroll; the position is mirrored to
//! the other only when the difference exceeds the sub-pixel threshold
//! (`crate::scroll::mirror_target`), which breaks the infinite echo loop.
//! Derived flags are recomputed at most once per animation frame behind a
//! ticking guard, and a `ResizeObserver` on both containers re-syncs after
//! column count/width changes - grid `fr` tracks can resolve to slightly
//! different pixel widths after a reorder, and without the re-sync that
//! drift accumulates.

#[cfg(target_arch = "wasm32")]
use std::cell::RefCell;
#[cfg(target_arch = "wasm32")]
use std::rc::Rc;

#[cfg(target_arch = "wasm32")]
use js_sys::Reflect;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::closure::Closure;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsCast;
#[cfg(target_arch = "wasm32")]
use web_sys::{HtmlDivElement, ResizeObserver, ScrollBehavior, ScrollToOptions};

#[cfg(target_arch = "wasm32")]
use super::{request_frame, GridView, SharedState};
#[cfg(target_arch = "wasm32")]
use crate::scroll::{mirror_target, ScrollFlags};

/// Fractional scrollLeft (browser zoom) is invisible through the i32
/// getter; read the raw property like the layout engine sees it.
#[cfg(target_arch = "wasm32")]
pub(crate) fn scroll_left_f64(element: &HtmlDivElement) -> f64 {
    Reflect::get(element.as_ref(), &JsValue::from_str("scrollLeft"))
        .ok()
        .and_then(|value| value.as_f64())
        .unwrap_or(f64::from(element.scroll_left()))
}

#[cfg(target_arch = "wasm32")]
impl GridView {
    pub(crate) fn wire_scroll_events(
        state: &Rc<RefCell<SharedState>>,
        header: &HtmlDivElement,
        body: &HtmlDivElement,
    ) -> Vec<Closure<dyn FnMut(web_sys::Event)>> {
        let mut closures = Vec::new();

        let st = Rc::clone(state);
        let from_body = Closure::wrap(Box::new(move |_event: web_sys::Event| {
            GridView::internal_scroll(&st, ScrollSource::Body);
        }) as Box<dyn FnMut(web_sys::Event)>);
        let _ =
            body.add_event_listener_with_callback("scroll", from_body.as_ref().unchecked_ref());
        closures.push(from_body);

        let st = Rc::clone(state);
        let from_header = Closure::wrap(Box::new(move |_event: web_sys::Event| {
            GridView::internal_scroll(&st, ScrollSource::Header);
        }) as Box<dyn FnMut(web_sys::Event)>);
        let _ = header
            .add_event_listener_with_callback("scroll", from_header.as_ref().unchecked_ref());
        closures.push(from_header);

        closures
    }

    pub(crate) fn wire_resize_observer(
        state: &Rc<RefCell<SharedState>>,
        header: &HtmlDivElement,
        body: &HtmlDivElement,
    ) -> (Option<ResizeObserver>, Option<Closure<dyn FnMut(js_sys::Array)>>) {
        let st = Rc::clone(state);
        let closure = Closure::wrap(Box::new(move |_entries: js_sys::Array| {
            GridView::resync_scroll(&st);
        }) as Box<dyn FnMut(js_sys::Array)>);

        let Ok(observer) = ResizeObserver::new(closure.as_ref().unchecked_ref()) else {
            return (None, Some(closure));
        };
        observer.observe(header);
        observer.observe(body);
        (Some(observer), Some(closure))
    }

    /// Mirror one container's position to the other, then schedule a flag
    /// recomputation. Sub-pixel differences are left alone.
    fn internal_scroll(state: &Rc<RefCell<SharedState>>, source: ScrollSource) {
        {
            let s = state.borrow();
            let (Some(header), Some(body)) = (&s.header, &s.body) else {
                return;
            };
            let (from, to) = match source {
                ScrollSource::Body => (body, header),
                ScrollSource::Header => (header, body),
            };
            if let Some(left) = mirror_target(scroll_left_f64(from), scroll_left_f64(to)) {
                to.scroll_to_with_x_and_y(left, 0.0);
            }
        }
        Self::schedule_flags_update(state);
    }

    /// Force positions back into lockstep and refresh flags - used after
    /// resizes and container swaps, when mirrored positions may have been
    /// clamped differently by the two containers.
    pub(crate) fn resync_scroll(state: &Rc<RefCell<SharedState>>) {
        {
            let s = state.borrow();
            let (Some(header), Some(body)) = (&s.header, &s.body) else {
                return;
            };
            if let Some(left) = mirror_target(scroll_left_f64(body), scroll_left_f64(header)) {
                header.scroll_to_with_x_and_y(left, 0.0);
            }
        }
        Self::schedule_flags_update(state);
    }

    /// RAF-throttled flag recomputation: at most one pending update per
    /// frame, and updates scheduled before a container swap no-op against
    /// the bumped subscription version.
    pub(crate) fn schedule_flags_update(state: &Rc<RefCell<SharedState>>) {
        let version = {
            let mut s = state.borrow_mut();
            if s.raf_ticking {
                return;
            }
            s.raf_ticking = true;
            s.subscription_version
        };

        let weak = Rc::downgrade(state);
        request_frame(move || {
            let Some(state) = weak.upgrade() else {
                return;
            };
            let callback = {
                let mut s = state.borrow_mut();
                s.raf_ticking = false;
                if s.subscription_version != version {
                    return;
                }
                let Some(body) = &s.body else {
                    return;
                };
                let flags = ScrollFlags::compute(
                    scroll_left_f64(body),
                    f64::from(body.client_width()),
                    f64::from(body.scroll_width()),
                );
                if flags == s.scroll_flags {
                    return;
                }
                s.scroll_flags = flags;
                s.render_callback.clone()
            };
            Self::invoke_callback0(callback);
        });
    }

    /// Imperative scroll for arrow-button navigation. Negative amounts
    /// scroll left. The body originates; mirroring keeps the header in
    /// step through the normal scroll path.
    pub(crate) fn scroll_by_internal(state: &Rc<RefCell<SharedState>>, amount: f64, smooth: bool) {
        let s = state.borrow();
        let Some(body) = &s.body else {
            return;
        };
        let options = ScrollToOptions::new();
        options.set_left(amount);
        options.set_top(0.0);
        options.set_behavior(if smooth {
            ScrollBehavior::Smooth
        } else {
            ScrollBehavior::Auto
        });
        body.scroll_by_with_scroll_to_options(&options);
    }
}

#[cfg(target_arch = "wasm32")]
#[derive(Clone, Copy)]
enum ScrollSource {
    Header,
    Body,
}
