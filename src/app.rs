//! Carify Forms App
//!
//! Enhances the server-rendered page in place and renders the toast stack.

use leptos::prelude::*;

use crate::components::{Notifications, Notifier};
use crate::config::PageConfig;
use crate::context::AppContext;
use crate::dom;
use crate::pages;

#[component]
pub fn App(config: PageConfig) -> impl IntoView {
    let notifier = Notifier::new(config.toast_timeout_ms);
    let ctx = AppContext::new(config, notifier);

    // Provide context to all children
    provide_context(ctx);

    match dom::document() {
        Some(document) => pages::init_page(&document, ctx),
        None => log::error!("[APP] No document; nothing to enhance"),
    }

    view! { <Notifications notifier=notifier /> }
}
