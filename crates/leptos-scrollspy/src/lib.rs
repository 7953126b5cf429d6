//! Leptos ScrollSpy Utilities
//!
//! Maps the window scroll position onto a set of named page sections so an
//! in-page navigation rail can highlight the section currently in view.
//! Geometry is a pure function; the browser plumbing is a thin adapter
//! around one global scroll/resize listener.

use leptos::prelude::*;
use wasm_bindgen::JsCast;

/// Visual allowance for the sticky page header, in pixels
pub const HEADER_OFFSET_PX: f64 = 200.0;

/// A registered section: logical key plus the DOM anchor carrying it
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SectionAnchor {
    pub key: String,
    pub anchor_id: String,
}

/// Measured section bounds in document coordinates
#[derive(Clone, Debug, PartialEq)]
pub struct SectionBounds {
    pub key: String,
    pub top: f64,
    pub bottom: f64,
}

/// First section whose `[top - offset, bottom - offset)` interval contains
/// `scroll_y`. `None` means no section qualifies and the caller should keep
/// its previous active key (no flicker mid-scroll).
pub fn compute_active_section<'a>(
    sections: &'a [SectionBounds],
    scroll_y: f64,
    offset_px: f64,
) -> Option<&'a str> {
    sections
        .iter()
        .find(|s| scroll_y >= s.top - offset_px && scroll_y < s.bottom - offset_px)
        .map(|s| s.key.as_str())
}

/// ScrollSpy state signals
#[derive(Clone, Copy)]
pub struct ScrollSpySignals {
    pub anchors_read: ReadSignal<Vec<SectionAnchor>>,
    pub anchors_write: WriteSignal<Vec<SectionAnchor>>,
    pub active_read: ReadSignal<Option<String>>,
    pub active_write: WriteSignal<Option<String>>,
}

pub fn create_scrollspy_signals() -> ScrollSpySignals {
    let (anchors_read, anchors_write) = signal(Vec::<SectionAnchor>::new());
    let (active_read, active_write) = signal(None::<String>);
    ScrollSpySignals {
        anchors_read,
        anchors_write,
        active_read,
        active_write,
    }
}

/// Measure the registered anchors. Anchors missing from the DOM are skipped.
/// Returns the bounds plus the scroll position they were measured at.
fn measure(anchors: &[SectionAnchor]) -> Option<(Vec<SectionBounds>, f64)> {
    let win = web_sys::window()?;
    let doc = win.document()?;
    let scroll_y = win.scroll_y().unwrap_or(0.0);

    let bounds = anchors
        .iter()
        .filter_map(|anchor| {
            doc.get_element_by_id(&anchor.anchor_id).map(|el| {
                let rect = el.get_bounding_client_rect();
                SectionBounds {
                    key: anchor.key.clone(),
                    top: rect.top() + scroll_y,
                    bottom: rect.bottom() + scroll_y,
                }
            })
        })
        .collect();
    Some((bounds, scroll_y))
}

/// Re-evaluate the active section once, against the current DOM geometry
pub fn refresh(spy: &ScrollSpySignals) {
    let anchors = spy.anchors_read.get_untracked();
    if let Some((bounds, scroll_y)) = measure(&anchors) {
        if let Some(key) = compute_active_section(&bounds, scroll_y, HEADER_OFFSET_PX) {
            let key = key.to_string();
            if spy.active_read.get_untracked().as_deref() != Some(&key) {
                spy.active_write.set(Some(key));
            }
        }
        // No qualifying section: leave the previous active key in place
    }
}

/// Replace the registered anchor set wholesale (the old grouping's anchors
/// no longer exist after a filter switch) and re-evaluate immediately.
pub fn register_anchors(spy: &ScrollSpySignals, anchors: Vec<SectionAnchor>) {
    if !anchors.iter().any(|a| Some(a.key.as_str()) == spy.active_read.get_untracked().as_deref()) {
        spy.active_write.set(None);
    }
    spy.anchors_write.set(anchors);
    refresh(spy);
}

/// Bind one window scroll/resize listener for the page lifetime. The
/// listener reads the current anchor set from the signals, so swapping
/// anchors never re-binds.
pub fn bind_global_scroll(spy: ScrollSpySignals) {
    use wasm_bindgen::closure::Closure;

    let on_scroll = Closure::<dyn FnMut(web_sys::Event)>::new(move |_ev: web_sys::Event| {
        refresh(&spy);
    });

    if let Some(win) = web_sys::window() {
        let _ = win.add_event_listener_with_callback("scroll", on_scroll.as_ref().unchecked_ref());
        let _ = win.add_event_listener_with_callback("resize", on_scroll.as_ref().unchecked_ref());
    }
    on_scroll.forget();
}
