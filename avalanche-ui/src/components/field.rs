//! Validated Input
//!
//! Text input that shows the browser's validation message under itself while typing.

use avalanche::validation::{input_feedback, FieldFeedback, INVALID_CLASS};
use leptos::*;
use web_sys::HtmlInputElement;

use crate::api::InputField;

/// Bootstrap-style input with an `invalid-feedback` line
#[component]
pub fn ValidatedInput(
    id: &'static str,
    label: &'static str,
    #[prop(default = "text")] input_type: &'static str,
    #[prop(optional)] minlength: Option<usize>,
    #[prop(optional)] maxlength: Option<usize>,
    value: RwSignal<String>,
    feedback: RwSignal<FieldFeedback>,
    /// When false the caller computes `feedback` itself (repeat password, builder host)
    #[prop(default = true)]
    self_validate: bool,
) -> impl IntoView {
    let on_input = move |ev: ev::Event| {
        let input = event_target::<HtmlInputElement>(&ev);
        value.set(input.value());
        if self_validate {
            feedback.set(input_feedback(&InputField(&input)));
        }
    };

    view! {
        <div class="mb-3">
            <label class="form-label" for=id>{label}</label>
            <input
                id=id
                name=id
                type=input_type
                required=true
                minlength=minlength
                maxlength=maxlength
                prop:value=move || value.get()
                on:input=on_input
                class=move || {
                    if feedback.get().invalid {
                        format!("form-control {}", INVALID_CLASS)
                    } else {
                        "form-control".to_string()
                    }
                }
            />
            <div class="invalid-feedback">{move || feedback.get().message}</div>
        </div>
    }
}
