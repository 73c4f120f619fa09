//! Registration Page

use avalanche::validation::{password_feedback, FieldFeedback};
use avalanche::RegisterForm;
use leptos::*;
use leptos_router::*;

use crate::api::log_error;
use crate::components::ValidatedInput;
use crate::state::global::GlobalState;

#[component]
pub fn Register() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let navigate = use_navigate();

    let username = create_rw_signal(String::new());
    let password = create_rw_signal(String::new());
    let repeat = create_rw_signal(String::new());
    let username_feedback = create_rw_signal(FieldFeedback::cleared());
    let password_fb = create_rw_signal(FieldFeedback::cleared());
    let repeat_feedback = create_rw_signal(FieldFeedback::cleared());
    let (submitting, set_submitting) = create_signal(false);

    // Either password field changing re-checks the pair
    create_effect(move |_| {
        repeat_feedback.set(password_feedback(&password.get(), &repeat.get()));
    });

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let form = RegisterForm::new(
            username.get_untracked(),
            password.get_untracked(),
            repeat.get_untracked(),
        );
        if let Err(e) = form.validate() {
            username_feedback.set(form.username_feedback());
            password_fb.set(form.password_feedback());
            if form.password_repeat.is_empty() {
                repeat_feedback.set(FieldFeedback::invalid(e.to_string()));
            }
            return;
        }

        set_submitting.set(true);
        let state = state.clone();
        let navigate = navigate.clone();
        spawn_local(async move {
            match state.auth.register(&form).await {
                Ok(nav) => {
                    state.show_success("Account created, please log in");
                    state.follow(nav, &navigate);
                }
                Err(e) => {
                    log_error("Failed to register", &e);
                    state.show_error(&e.to_string());
                }
            }
            set_submitting.set(false);
        });
    };

    view! {
        <div class="container-tight py-4">
            <form id="registerForm" class="card card-md" on:submit=on_submit novalidate=true>
                <div class="card-body">
                    <h2 class="card-title text-center mb-4">"Create an account"</h2>
                    <ValidatedInput
                        id="username"
                        label="Username"
                        minlength=4
                        maxlength=64
                        value=username
                        feedback=username_feedback
                    />
                    <ValidatedInput
                        id="password"
                        label="Password"
                        input_type="password"
                        minlength=6
                        maxlength=128
                        value=password
                        feedback=password_fb
                    />
                    <ValidatedInput
                        id="passwordRepeat"
                        label="Repeat password"
                        input_type="password"
                        value=repeat
                        feedback=repeat_feedback
                        self_validate=false
                    />
                    <button
                        type="submit"
                        class="btn btn-primary w-100"
                        disabled=move || submitting.get()
                    >
                        "Register"
                    </button>
                </div>
            </form>
            <div class="text-center text-muted mt-3">
                "Already registered? " <A href="/ac/login">"Log in"</A>
            </div>
        </div>
    }
}
