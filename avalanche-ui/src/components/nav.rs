//! Navigation Component
//!
//! Header bar with links and the account button.

use avalanche::{AccountAction, DashboardError};
use leptos::*;
use leptos_router::*;

use crate::api::log_error;
use crate::state::global::GlobalState;

/// Navigation header component
#[component]
pub fn Nav() -> impl IntoView {
    view! {
        <header class="navbar navbar-expand-md navbar-dark">
            <div class="container-xl">
                <A href="/" class="navbar-brand">"Avalanche"</A>
                <div class="navbar-nav flex-row">
                    <NavLink href="/" label="Dashboard" />
                    <NavLink href="/builders" label="Builders" />
                </div>
                <AccountButton />
            </div>
        </header>
    }
}

/// Individual navigation link
#[component]
fn NavLink(href: &'static str, label: &'static str) -> impl IntoView {
    view! {
        <A href=href class="nav-link" active_class="active">
            {label}
        </A>
    }
}

/// "Log in" or "Log out <user>", depending on the stored session
#[component]
pub fn AccountButton() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let navigate = use_navigate();
    let (busy, set_busy) = create_signal(false);

    let label = {
        let state = state.clone();
        move || state.account.get().label
    };

    let on_click = move |ev: web_sys::MouseEvent| {
        ev.prevent_default();
        if state.account.get_untracked().action == AccountAction::Logout {
            set_busy.set(true);
        }

        let state = state.clone();
        let navigate = navigate.clone();
        spawn_local(async move {
            match state.auth.on_account_click().await {
                Ok(nav) => state.follow(nav, &navigate),
                Err(DashboardError::NotLoggedIn) => state.refresh_account(),
                Err(e) => {
                    log_error("Failed to logout", &e);
                    state.show_error(&e.to_string());
                }
            }
            set_busy.set(false);
        });
    };

    view! {
        <button
            type="button"
            id="accountButton"
            class="btn btn-outline-light ms-auto"
            disabled=move || busy.get()
            on:click=on_click
        >
            {label}
        </button>
    }
}
