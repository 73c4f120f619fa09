//! Global Application State
//!
//! Shared dashboard clients plus the reactive bits the header and toasts read.

use avalanche::{AccountButton, AuthClient, Config, Navigation};
use leptos::*;
use leptos_router::NavigateOptions;
use std::rc::Rc;

use crate::api::{BrowserSessionStorage, GlooTransport};

pub type Auth = AuthClient<GlooTransport, BrowserSessionStorage>;

/// Global application state provided to all components
#[derive(Clone)]
pub struct GlobalState {
    pub config: Rc<Config>,
    pub transport: GlooTransport,
    pub auth: Rc<Auth>,
    /// Label and action of the header's account button
    pub account: RwSignal<AccountButton>,
    /// Error message to display
    pub error: RwSignal<Option<String>>,
    /// Success message (for toasts)
    pub success: RwSignal<Option<String>>,
}

/// Provide global state to the component tree
pub fn provide_global_state() {
    let config = Rc::new(Config::browser());
    let transport = GlooTransport::new(config.api.clone());
    let auth = Rc::new(AuthClient::new(
        transport.clone(),
        BrowserSessionStorage,
        &config,
    ));

    let state = GlobalState {
        account: create_rw_signal(auth.account_button()),
        config,
        transport,
        auth,
        error: create_rw_signal(None),
        success: create_rw_signal(None),
    };

    provide_context(state);
}

impl GlobalState {
    /// Re-read the session after it changed
    pub fn refresh_account(&self) {
        self.account.set(self.auth.account_button());
    }

    /// Follow a navigation returned by an account action
    ///
    /// `navigate` comes from `use_navigate`, captured while the component was built.
    pub fn follow(&self, navigation: Navigation, navigate: &dyn Fn(&str, NavigateOptions)) {
        self.refresh_account();
        match navigation {
            Navigation::To(path) => navigate(&path, NavigateOptions::default()),
            Navigation::Reload => {
                if let Some(window) = web_sys::window() {
                    let _ = window.location().reload();
                }
            }
        }
    }

    /// Show a success message (auto-clears after timeout)
    pub fn show_success(&self, message: &str) {
        self.success.set(Some(message.to_string()));

        let success_signal = self.success;
        gloo_timers::callback::Timeout::new(3000, move || {
            success_signal.set(None);
        })
        .forget();
    }

    /// Show an error message (auto-clears after timeout)
    pub fn show_error(&self, message: &str) {
        self.error.set(Some(message.to_string()));

        let error_signal = self.error;
        gloo_timers::callback::Timeout::new(5000, move || {
            error_signal.set(None);
        })
        .forget();
    }
}
