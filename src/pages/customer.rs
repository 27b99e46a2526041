//! Customer & Bank Forms
//!
//! Asynchronous submission of the customer form and the bank account check.

use leptos::task::spawn_local;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::Document;

use crate::api::{csrf_token, submit_customer, verify_bank, CustomerForm, SubmitOutcome};
use crate::context::AppContext;
use crate::dom;

pub const CUSTOMER_SUBMIT_ID: &str = "btn";
pub const BANK_VERIFY_ID: &str = "verifyBankBtn";

/// Side effects of a finished submission
pub trait PageActions {
    fn alert(&self, message: &str);
    fn navigate(&self, url: &str);
}

/// The live browser page
pub struct BrowserPage;

impl PageActions for BrowserPage {
    fn alert(&self, message: &str) {
        dom::alert(message);
    }

    fn navigate(&self, url: &str) {
        dom::navigate(url);
    }
}

pub fn apply_outcome<P: PageActions>(outcome: SubmitOutcome, page: &P) {
    match outcome {
        SubmitOutcome::Accepted { message, next_url } => {
            if let Some(message) = message.filter(|m| !m.is_empty()) {
                page.alert(&message);
            }
            match next_url.filter(|u| !u.is_empty()) {
                Some(url) => page.navigate(&url),
                None => log::info!("[CUSTOMER] Saved; no next page given"),
            }
        }
        SubmitOutcome::Rejected { message } => page.alert(&message),
    }
}

fn bind_click(document: &Document, id: &str, mut handler: impl FnMut() + 'static) -> bool {
    let Some(button) = document.get_element_by_id(id) else {
        return false;
    };
    let on_click = Closure::<dyn FnMut(web_sys::Event)>::new(move |ev: web_sys::Event| {
        ev.prevent_default();
        handler();
    });
    let _ = button.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref());
    on_click.forget();
    true
}

pub fn init_customer_form(document: &Document, ctx: AppContext) -> bool {
    let doc = document.clone();
    bind_click(document, CUSTOMER_SUBMIT_ID, move || {
        let form = CustomerForm {
            name: dom::input_value(&doc, "name"),
            email: dom::input_value(&doc, "email"),
            phone: dom::input_value(&doc, "phone"),
        };
        let csrf = csrf_token(&doc);
        let endpoint = ctx.config().customer_endpoint;
        let transport = ctx.transport();
        spawn_local(async move {
            match submit_customer(&transport, &endpoint, &form, csrf.as_deref()).await {
                Ok(outcome) => apply_outcome(outcome, &BrowserPage),
                Err(err) => ctx.report("Customer submission", err),
            }
        });
    })
}

pub fn init_bank_verification(document: &Document, ctx: AppContext) -> bool {
    let doc = document.clone();
    bind_click(document, BANK_VERIFY_ID, move || {
        let account = dom::input_value(&doc, "id_bank_account_number");
        let ifsc = dom::input_value(&doc, "id_ifsc_code");
        if account.trim().is_empty() || ifsc.trim().is_empty() {
            dom::alert("Please enter the account number and IFSC code.");
            return;
        }
        let csrf = csrf_token(&doc);
        let endpoint = ctx.config().bank_verify_endpoint;
        let transport = ctx.transport();
        spawn_local(async move {
            match verify_bank(&transport, &endpoint, account.trim(), ifsc.trim(), csrf.as_deref()).await {
                Ok(reply) if reply.success => {
                    log::info!("[BANK] Account verified");
                    ctx.notifier.info(reply.message);
                }
                Ok(reply) => dom::alert(&reply.message),
                Err(err) => ctx.report("Bank verification", err),
            }
        });
    })
}
