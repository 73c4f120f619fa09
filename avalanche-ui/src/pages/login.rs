//! Login Page

use avalanche::validation::FieldFeedback;
use avalanche::{LoginForm, DashboardError};
use leptos::*;
use leptos_router::*;

use crate::api::{log_error, SubmitFlag};
use crate::components::ValidatedInput;
use crate::state::global::GlobalState;

#[component]
pub fn Login() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let navigate = use_navigate();

    let username = create_rw_signal(String::new());
    let password = create_rw_signal(String::new());
    let username_feedback = create_rw_signal(FieldFeedback::cleared());
    let password_feedback = create_rw_signal(FieldFeedback::cleared());
    let (disabled, set_disabled) = create_signal(false);

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let form = LoginForm::new(username.get_untracked(), password.get_untracked());
        username_feedback.set(form.username_feedback());
        password_feedback.set(form.password_feedback());

        let state = state.clone();
        let navigate = navigate.clone();
        spawn_local(async move {
            match state.auth.login(&form, &SubmitFlag(set_disabled)).await {
                Ok(nav) => state.follow(nav, &navigate),
                Err(DashboardError::InvalidForm(_)) => {}
                Err(e) => {
                    log_error("Failed to login", &e);
                    state.show_error(&e.to_string());
                }
            }
        });
    };

    view! {
        <div class="container-tight py-4">
            <form id="loginForm" class="card card-md" on:submit=on_submit novalidate=true>
                <div class="card-body">
                    <h2 class="card-title text-center mb-4">"Log in to Avalanche"</h2>
                    <ValidatedInput
                        id="username"
                        label="Username"
                        value=username
                        feedback=username_feedback
                    />
                    <ValidatedInput
                        id="password"
                        label="Password"
                        input_type="password"
                        value=password
                        feedback=password_feedback
                    />
                    <button
                        id="loginButton"
                        type="submit"
                        class="btn btn-primary w-100"
                        disabled=move || disabled.get()
                    >
                        "Log in"
                    </button>
                </div>
            </form>
            <div class="text-center text-muted mt-3">
                "No account yet? " <A href="/ac/register">"Register"</A>
            </div>
        </div>
    }
}
