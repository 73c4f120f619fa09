//! Avalanche Dashboard
//!
//! Browser front-end of the Avalanche dashboard built with Leptos (WASM).
//!
//! # Features
//!
//! - Login, registration and logout with inline field validation
//! - Incoming connection list, refreshed every second
//! - Live memory, CPU and disk charts rendered with ApexCharts
//!
//! # Architecture
//!
//! This is a client-side rendered (CSR) Leptos application that compiles to
//! WebAssembly. All dashboard logic lives in the `avalanche` crate; this crate
//! plugs it into `fetch`, `sessionStorage`, timers and the DOM.

use leptos::*;

mod api;
mod app;
mod components;
mod pages;
mod state;

fn main() {
    // Set up panic hook for better error messages in WASM
    console_error_panic_hook::set_once();

    mount_to_body(|| view! { <app::App /> });
}
