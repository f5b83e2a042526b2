//! Desa Prima Admin Entry Point

mod api;
mod app;
mod bulk;
mod components;
mod config;
mod context;
mod error;
mod export;
mod flows;
mod format;
mod listing;
mod models;
mod session;
mod store;

use app::App;
use config::AppConfig;
use leptos::prelude::*;

fn main() {
    console_error_panic_hook::set_once();

    let config = AppConfig::from_env();
    if let Err(e) = console_logger::init(config.log_level) {
        web_sys::console::warn_1(&format!("[Main] Logger already installed: {}", e).into());
    }
    log::info!("[Main] API at {}", config.api_base_url);

    mount_to_body(move || view! { <App config=config.clone() /> });
}
