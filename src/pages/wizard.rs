//! Wizard Binding
//!
//! Drives the `step-{n}` panels, their indicators and the Previous/Next/Submit
//! buttons from a single `StepWizard` signal.

use leptos::prelude::*;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlElement};

use crate::dom;
use crate::wizard::{StepWizard, WizardView};

const ACTIVE: &str = "active";
const HIDDEN: &str = "d-none";

fn step_ids(step: u32) -> [String; 2] {
    [format!("step-{}", step), format!("step-indicator-{}", step)]
}

fn apply_view(document: &Document, total: u32, view: WizardView) {
    for step in 1..=total {
        for id in step_ids(step) {
            if let Some(el) = document.get_element_by_id(&id) {
                let _ = el.class_list().toggle_with_force(ACTIVE, view.is_active(step));
            }
        }
    }
    if let Some(prev) = dom::by_id::<HtmlElement>(document, "prevBtn") {
        dom::set_display(&prev, if view.show_previous { "inline-block" } else { "none" });
    }
    if let Some(next) = dom::by_id::<HtmlElement>(document, "nextBtn") {
        dom::set_display(&next, if view.show_next { "inline-block" } else { "none" });
    }
    if let Some(submit) = document.get_element_by_id("submitBtn") {
        let _ = submit.class_list().toggle_with_force(HIDDEN, !view.show_submit);
    }
}

fn on_click(document: &Document, id: &str, wizard: RwSignal<StepWizard>, step: fn(&mut StepWizard) -> bool) {
    let Some(button) = document.get_element_by_id(id) else {
        return;
    };
    let handler = Closure::<dyn FnMut(web_sys::Event)>::new(move |ev: web_sys::Event| {
        ev.prevent_default();
        if !wizard.try_update(step).unwrap_or(false) {
            log::debug!("[WIZARD] Already at the edge, staying on step {}", wizard.get_untracked().current());
        }
    });
    let _ = button.add_event_listener_with_callback("click", handler.as_ref().unchecked_ref());
    handler.forget();
}

/// Bind the step wizard when the page has one
pub fn init_wizard(document: &Document, total: u32) -> bool {
    if document.get_element_by_id("step-1").is_none() {
        return false;
    }
    let wizard = RwSignal::new(StepWizard::new(total));

    let doc = document.clone();
    Effect::new(move |_| {
        let current = wizard.get();
        apply_view(&doc, current.total(), current.view());
        log::debug!("[WIZARD] Showing step {} of {}", current.current(), current.total());
    });

    on_click(document, "nextBtn", wizard, StepWizard::next);
    on_click(document, "prevBtn", wizard, StepWizard::previous);
    true
}
