//! Toast Notifications

use leptos::*;

use crate::state::global::GlobalState;

/// Error and success banners, cleared by their own timers
#[component]
pub fn Toast() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let error = state.error;
    let success = state.success;

    view! {
        <div class="toast-container position-fixed bottom-0 end-0 p-3">
            {move || error.get().map(|msg| view! {
                <div class="alert alert-danger" role="alert">{msg}</div>
            })}
            {move || success.get().map(|msg| view! {
                <div class="alert alert-success" role="alert">{msg}</div>
            })}
        </div>
    }
}
