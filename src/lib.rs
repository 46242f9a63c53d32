//! Employee management front end for the hotel administration system.
//!
//! A client-side single-page application: a fixed sidebar, a path-based
//! router over six pages, and one shared query client that every page
//! reads the backend through.

pub mod app;
pub mod components;
pub mod config;
pub mod core;
pub mod models;
pub mod pages;
pub mod utils;

use leptos::prelude::*;
use wasm_bindgen::JsCast;

/// Initialise logging and mount the application into `#app`.
pub fn start() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(config::LOG_LEVEL).is_err() {
        web_sys::console::warn_1(&"logger already initialised".into());
    }

    let Some(root) = document()
        .get_element_by_id(config::MOUNT_ELEMENT_ID)
        .and_then(|el| el.dyn_into::<web_sys::HtmlElement>().ok())
    else {
        log::error!("mount element #{} not found", config::MOUNT_ELEMENT_ID);
        return;
    };

    mount_to(root, app::App).forget();
}
