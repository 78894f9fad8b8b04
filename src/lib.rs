//! # roster
//!
//! Leptos + WASM single-page front-end for account sign-in and user
//! administration, backed by a hosted authentication + database service.
//!
//! The crate's own logic is the client-side session store, the
//! authorization gate guarding routes, and the profile repository with its
//! confirmed-success local cache; everything durable lives behind
//! [`net::backend::Backend`].

pub mod app;
pub mod components;
pub mod config;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// Browser entry point: initialize logging and panic reporting, read the
/// required backend configuration (fatal when absent), and mount the app.
#[cfg(feature = "csr")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    let config = config::Config::from_build_env()
        .expect("ROSTER_BACKEND_URL and ROSTER_BACKEND_KEY required at build time");
    leptos::mount::mount_to_body(move || {
        use leptos::prelude::*;
        view! { <crate::app::App config=config/> }
    });
}
