//! # review-portal
//!
//! Leptos + WASM front-end for the paper-review portal: role login, the
//! author and reviewer dashboards, per-room chat with optimistic send and
//! in-chat search, and paper upload and acceptance.
//!
//! The crate builds twice: as a WASM library with `hydrate`, and as the
//! `review-portal` host binary with `ssr`, which renders the shell and
//! serves the bundle.

#![recursion_limit = "256"]

pub mod app;
pub mod components;
pub mod config;
pub mod error;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

#[cfg(feature = "ssr")]
pub mod server;

/// WASM entry point: installs logging and hydrates the server-rendered body.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    leptos::mount::hydrate_body(app::App);
}
