//! Application Context
//!
//! Shared state provided via Leptos Context API.

use leptos::prelude::*;

use crate::api::FetchTransport;
use crate::components::Notifier;
use crate::config::PageConfig;

/// Page-wide handles provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    /// Configuration read from the `carify-config` island
    pub config: StoredValue<PageConfig>,
    /// Toast notifications
    pub notifier: Notifier,
}

impl AppContext {
    pub fn new(config: PageConfig, notifier: Notifier) -> Self {
        Self {
            config: StoredValue::new(config),
            notifier,
        }
    }

    pub fn config(&self) -> PageConfig {
        self.config.get_value()
    }

    /// Fetch transport using the configured timeout
    pub fn transport(&self) -> FetchTransport {
        FetchTransport::new(self.config.with_value(|c| c.request_timeout_ms))
    }

    /// Surface a failure visibly and log it
    pub fn report(&self, what: &str, err: impl std::fmt::Display) {
        log::error!("[APP] {} failed: {}", what, err);
        self.notifier.error(format!("{} failed: {}", what, err));
    }
}
