//! DOM Helpers
//!
//! Guarded element lookups. Every lookup returns `None` when the page does
//! not carry the element, so sections missing from a page are skipped.

use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, HtmlInputElement};

pub fn document() -> Option<Document> {
    web_sys::window().and_then(|w| w.document())
}

/// Element by id, cast to `T`
pub fn by_id<T: JsCast>(document: &Document, id: &str) -> Option<T> {
    document.get_element_by_id(id).and_then(|el| el.dyn_into::<T>().ok())
}

/// First element matching a CSS selector, cast to `T`
pub fn query<T: JsCast>(document: &Document, selector: &str) -> Option<T> {
    document
        .query_selector(selector)
        .ok()
        .flatten()
        .and_then(|el| el.dyn_into::<T>().ok())
}

/// All elements matching a CSS selector under `scope`
pub fn query_all(scope: &Element, selector: &str) -> Vec<Element> {
    let Ok(nodes) = scope.query_selector_all(selector) else {
        return Vec::new();
    };
    (0..nodes.length())
        .filter_map(|i| nodes.item(i))
        .filter_map(|n| n.dyn_into::<Element>().ok())
        .collect()
}

/// Value of the input with `id`, empty when absent
pub fn input_value(document: &Document, id: &str) -> String {
    by_id::<HtmlInputElement>(document, id).map(|i| i.value()).unwrap_or_default()
}

pub fn set_display(element: &HtmlElement, display: &str) {
    let _ = element.style().set_property("display", display);
}

/// Blocking alert dialog
pub fn alert(message: &str) {
    if let Some(window) = web_sys::window() {
        let _ = window.alert_with_message(message);
    }
}

/// Blocking confirmation dialog; `false` when no window is available
pub fn confirm(message: &str) -> bool {
    web_sys::window()
        .and_then(|w| w.confirm_with_message(message).ok())
        .unwrap_or(false)
}

pub fn navigate(url: &str) {
    if let Some(window) = web_sys::window() {
        if let Err(err) = window.location().set_href(url) {
            log::error!("[DOM] Navigation to {} failed: {:?}", url, err);
        }
    }
}
