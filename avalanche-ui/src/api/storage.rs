//! Session Storage
//!
//! `window.sessionStorage` behind the dashboard's `SessionStore` trait.

use avalanche::{DashboardError, DashboardResult, SessionStore};
use wasm_bindgen::JsValue;

/// The current tab's `sessionStorage`
#[derive(Clone, Copy, Default)]
pub struct BrowserSessionStorage;

impl BrowserSessionStorage {
    fn storage() -> DashboardResult<web_sys::Storage> {
        web_sys::window()
            .and_then(|w| w.session_storage().ok().flatten())
            .ok_or_else(|| DashboardError::Storage("sessionStorage is unavailable".to_string()))
    }
}

fn js_error(err: JsValue) -> DashboardError {
    DashboardError::Storage(format!("{:?}", err))
}

impl SessionStore for BrowserSessionStorage {
    fn get_item(&self, key: &str) -> DashboardResult<Option<String>> {
        Self::storage()?.get_item(key).map_err(js_error)
    }

    fn set_item(&self, key: &str, value: &str) -> DashboardResult<()> {
        Self::storage()?.set_item(key, value).map_err(js_error)
    }

    fn clear(&self) -> DashboardResult<()> {
        Self::storage()?.clear().map_err(js_error)
    }
}
