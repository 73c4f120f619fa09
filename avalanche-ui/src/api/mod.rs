//! Browser API Bindings
//!
//! Implementations of the dashboard's seams on top of browser APIs.

pub mod apex;
pub mod dom;
pub mod storage;
pub mod transport;

pub use apex::ApexSurface;
pub use dom::{ChartNode, InputField, SubmitFlag};
pub use storage::BrowserSessionStorage;
pub use transport::GlooTransport;

/// Log a failure to the browser console
pub fn log_error(context: &str, err: &dyn std::fmt::Display) {
    web_sys::console::error_1(&format!("{}: {}", context, err).into());
}
