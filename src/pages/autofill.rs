//! VIN Autofill Binding

use leptos::task::spawn_local;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlInputElement};

use crate::api::{autofill_vin, FieldSink};
use crate::context::AppContext;
use crate::dom;

pub const VIN_INPUT_ID: &str = "id_vin";

/// Writes looked-up values into the inputs of the live document
struct DocumentFields {
    document: Document,
}

impl FieldSink for DocumentFields {
    fn set_field(&self, id: &str, value: &str) {
        match dom::by_id::<HtmlInputElement>(&self.document, id) {
            Some(input) => input.set_value(value),
            None => log::debug!("[AUTOFILL] No #{} on this page", id),
        }
    }
}

pub fn init_autofill(document: &Document, ctx: AppContext) -> bool {
    let Some(vin_input) = dom::by_id::<HtmlInputElement>(document, VIN_INPUT_ID) else {
        return false;
    };
    let doc = document.clone();
    let input = vin_input.clone();
    let on_change = Closure::<dyn FnMut(web_sys::Event)>::new(move |_: web_sys::Event| {
        let vin = input.value();
        let sink = DocumentFields { document: doc.clone() };
        let config = ctx.config();
        let transport = ctx.transport();
        spawn_local(async move {
            for (lookup, err) in autofill_vin(&transport, &config, &sink, &vin).await {
                ctx.notifier.error(format!("Could not load {}: {}", lookup.label(), err));
            }
        });
    });
    let _ = vin_input.add_event_listener_with_callback("change", on_change.as_ref().unchecked_ref());
    on_change.forget();
    true
}
