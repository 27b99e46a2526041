//! Carify Forms Entry Point

mod api;
mod app;
mod components;
mod config;
mod context;
mod dom;
mod error;
mod islands;
mod logging;
mod models;
mod pages;
mod status;
mod wizard;

use app::App;
use config::PageConfig;
use leptos::prelude::*;
use log::LevelFilter;

fn main() {
    console_error_panic_hook::set_once();
    logging::init(LevelFilter::Info);

    let config = dom::document().map(|d| PageConfig::load(&d)).unwrap_or_default();
    logging::init(config.level_filter());
    log::info!("[APP] Starting Carify forms (log level {})", config.level_filter());

    mount_to_body(move || view! { <App config=config /> });
}
