//! Status Select Binding
//!
//! Colours every `.status-select` by its value and wires the bulk
//! "set all" / "clear all" buttons of a section.

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlInputElement, HtmlSelectElement};

use crate::dom;
use crate::status::status_color;

const STATUS_SELECT: &str = ".status-select";
const ISSUE_INPUT: &str = ".issue-input";
const SET_ALL: &str = "data-set-all";
const CLEAR_ALL: &str = "data-clear-all";

fn paint(select: &HtmlSelectElement) {
    let _ = select.style().set_property("color", status_color(&select.value()));
}

fn selects_in(scope: &Element) -> Vec<HtmlSelectElement> {
    dom::query_all(scope, STATUS_SELECT)
        .into_iter()
        .filter_map(|el| el.dyn_into::<HtmlSelectElement>().ok())
        .collect()
}

/// What a bulk button does to its section
#[derive(Debug, Clone, PartialEq, Eq)]
enum BulkAction {
    SetAll(String),
    ClearAll,
}

fn apply_to_section(document: &Document, section: &str, action: &BulkAction) -> usize {
    let Some(scope) = document.get_element_by_id(section) else {
        log::warn!("[STATUS] No section #{}", section);
        return 0;
    };
    let selects = selects_in(&scope);
    for select in &selects {
        match action {
            BulkAction::SetAll(value) => select.set_value(value),
            BulkAction::ClearAll => select.set_selected_index(0),
        }
        paint(select);
    }
    if *action == BulkAction::ClearAll {
        for input in dom::query_all(&scope, ISSUE_INPUT)
            .into_iter()
            .filter_map(|el| el.dyn_into::<HtmlInputElement>().ok())
        {
            input.set_value("");
        }
    }
    selects.len()
}

fn bind_bulk_buttons(document: &Document, root: &Element, attr: &'static str) -> usize {
    let buttons = dom::query_all(root, &format!("[{}]", attr));
    for button in &buttons {
        let Some(section) = button.get_attribute(attr) else {
            continue;
        };
        let action = if attr == SET_ALL {
            BulkAction::SetAll(button.get_attribute("data-status").unwrap_or_default())
        } else {
            BulkAction::ClearAll
        };
        let doc = document.clone();
        let on_click = Closure::<dyn FnMut(web_sys::Event)>::new(move |ev: web_sys::Event| {
            ev.prevent_default();
            let changed = apply_to_section(&doc, &section, &action);
            log::debug!("[STATUS] {:?} on {} selects in #{}", action, changed, section);
        });
        let _ = button.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref());
        on_click.forget();
    }
    buttons.len()
}

/// Returns the number of status selects found
pub fn init_status_selects(document: &Document) -> usize {
    let Some(root) = document.document_element() else {
        return 0;
    };
    let selects = selects_in(&root);
    for select in &selects {
        paint(select);
        let target = select.clone();
        let on_change = Closure::<dyn FnMut(web_sys::Event)>::new(move |_: web_sys::Event| paint(&target));
        let _ = select.add_event_listener_with_callback("change", on_change.as_ref().unchecked_ref());
        on_change.forget();
    }
    let buttons = bind_bulk_buttons(document, &root, SET_ALL) + bind_bulk_buttons(document, &root, CLEAR_ALL);
    if buttons > 0 {
        log::debug!("[STATUS] Bound {} bulk buttons", buttons);
    }
    selects.len()
}
