//! DOM Adapters
//!
//! Newtypes that let elements and signals stand in for the dashboard's traits.

use avalanche::validation::FieldValidity;
use avalanche::{ChartElement, SubmitControl};
use leptos::*;
use web_sys::HtmlInputElement;

/// A chart host element, read through its attributes
pub struct ChartNode<'a>(pub &'a web_sys::Element);

impl ChartElement for ChartNode<'_> {
    fn attribute(&self, name: &str) -> Option<String> {
        self.0.get_attribute(name)
    }
}

/// An `<input>` reporting its own `ValidityState`
pub struct InputField<'a>(pub &'a HtmlInputElement);

impl FieldValidity for InputField<'_> {
    fn is_valid(&self) -> bool {
        self.0.check_validity()
    }

    fn validation_message(&self) -> String {
        self.0.validation_message().unwrap_or_default()
    }
}

/// A submit button's `disabled` state held in a signal
#[derive(Clone, Copy)]
pub struct SubmitFlag(pub WriteSignal<bool>);

impl SubmitControl for SubmitFlag {
    fn set_disabled(&self, disabled: bool) {
        self.0.set(disabled);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use avalanche::charts::{ChartDescriptor, DataSource, ATTR_SOURCE, ATTR_TOTAL};
    use avalanche::validation::input_feedback;
    use avalanche::PollingConfig;
    use wasm_bindgen::JsCast;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn document() -> web_sys::Document {
        web_sys::window().unwrap().document().unwrap()
    }

    #[wasm_bindgen_test]
    fn test_chart_node_reads_attributes() {
        let el = document().create_element("div").unwrap();
        el.set_attribute(ATTR_SOURCE, "memory").unwrap();
        el.set_attribute(ATTR_TOTAL, "1000").unwrap();

        let descriptor =
            ChartDescriptor::from_element(&ChartNode(&el), &PollingConfig::default()).unwrap();
        assert_eq!(descriptor.source, DataSource::Memory);
        assert_eq!(descriptor.total, Some(1000.0));
    }

    #[wasm_bindgen_test]
    fn test_required_input_feedback() {
        let input: HtmlInputElement = document()
            .create_element("input")
            .unwrap()
            .dyn_into()
            .unwrap();
        input.set_required(true);

        let feedback = input_feedback(&InputField(&input));
        assert!(feedback.invalid);
        assert!(!feedback.message.is_empty());

        input.set_value("ikey");
        assert!(!input_feedback(&InputField(&input)).invalid);
    }
}
