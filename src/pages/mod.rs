//! Page Enhancers
//!
//! Each enhancer binds one feature of the server-rendered pages and quietly
//! does nothing when its anchor elements are absent.

mod autofill;
mod customer;
mod extras;
mod sections;
mod status_select;
mod wizard;

use web_sys::Document;

use crate::context::AppContext;

/// Bind everything the current page carries
pub fn init_page(document: &Document, ctx: AppContext) {
    let config = ctx.config();
    let sections = sections::init_sections(document);
    let wizard = wizard::init_wizard(document, config.wizard_steps);
    let customer = customer::init_customer_form(document, ctx);
    let bank = customer::init_bank_verification(document, ctx);
    let autofill = autofill::init_autofill(document, ctx);
    let statuses = status_select::init_status_selects(document);
    extras::init_extras(document);

    log::info!(
        "[APP] Page ready: sections={}, wizard={}, customer={}, bank={}, autofill={}, status selects={}",
        sections,
        wizard,
        customer,
        bank,
        autofill,
        statuses
    );
}
