//! UI Components
//!
//! Leptos components mounted by the page.

mod notifications;

pub use notifications::{Notifications, Notifier};
