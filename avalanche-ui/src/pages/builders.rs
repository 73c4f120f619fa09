//! Builders Page
//!
//! "Add builder" form. The host is checked as it is typed against the same rule
//! that gates submission, and the form is only submitted natively once it passes.

use avalanche::validation::FieldFeedback;
use avalanche::BuilderForm;
use leptos::*;

use crate::components::ValidatedInput;

#[component]
pub fn Builders() -> impl IntoView {
    let host = create_rw_signal(String::new());
    let host_feedback = create_rw_signal(FieldFeedback::cleared());
    let form_ref = create_node_ref::<html::Form>();

    // Re-check on every edit, but not before the first one
    create_effect(move |touched: Option<bool>| {
        let value = host.get();
        if touched.is_some() {
            host_feedback.set(BuilderForm { host: value }.host_feedback());
        }
        true
    });

    let on_click = move |ev: web_sys::MouseEvent| {
        ev.prevent_default();
        let form = BuilderForm {
            host: host.get_untracked(),
        };
        if !form.is_valid() {
            host_feedback.set(form.host_feedback());
            return;
        }
        if let Some(el) = form_ref.get_untracked() {
            let _ = el.submit();
        }
    };

    view! {
        <div class="container-tight py-4">
            <form id="addBuilderForm" class="card card-md" method="post" node_ref=form_ref>
                <div class="card-body">
                    <h2 class="card-title mb-4">"Add builder"</h2>
                    <ValidatedInput
                        id="host"
                        label="Host"
                        value=host
                        feedback=host_feedback
                        self_validate=false
                    />
                    <button id="addBuilderButton" type="submit" class="btn btn-primary" on:click=on_click>
                        "Add builder"
                    </button>
                </div>
            </form>
        </div>
    }
}
