//! ApexCharts Binding
//!
//! Renders [`ChartOptions`] with the page's global `ApexCharts` constructor.

use avalanche::{ChartOptions, ChartSurface, LabelContext, LabelFormat};
use js_sys::{Object, Reflect, JSON};
use wasm_bindgen::prelude::*;

use super::log_error;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_name = ApexCharts)]
    type ApexChart;

    #[wasm_bindgen(constructor, js_class = "ApexCharts")]
    fn new(element: &web_sys::Element, options: &JsValue) -> ApexChart;

    #[wasm_bindgen(method)]
    fn render(this: &ApexChart) -> js_sys::Promise;

    #[wasm_bindgen(method, js_name = updateOptions)]
    fn update_options(this: &ApexChart, options: &JsValue);

    #[wasm_bindgen(method)]
    fn destroy(this: &ApexChart);
}

type Formatter = Closure<dyn Fn(f64, JsValue) -> String>;

/// One ApexCharts instance mounted on an element
pub struct ApexSurface {
    element: web_sys::Element,
    chart: Option<ApexChart>,
    formatter: Option<Formatter>,
}

impl ApexSurface {
    pub fn new(element: web_sys::Element) -> Self {
        Self {
            element,
            chart: None,
            formatter: None,
        }
    }

    /// Tear the chart down; the element is left empty
    pub fn destroy(&mut self) {
        if let Some(chart) = self.chart.take() {
            chart.destroy();
        }
        self.formatter = None;
    }

    /// Axis labels are formatted on our side. ApexCharts passes the tick index as
    /// the second argument for ticks and an options object for tooltips.
    fn formatter(&mut self, format: LabelFormat) -> &Formatter {
        self.formatter.get_or_insert_with(|| {
            Closure::wrap(Box::new(move |value: f64, second: JsValue| {
                let context = match second.as_f64() {
                    Some(idx) => LabelContext::Tick(idx as usize),
                    None => LabelContext::DataPoint,
                };
                format.format(value, context)
            }) as Box<dyn Fn(f64, JsValue) -> String>)
        })
    }

    fn to_js(&mut self, options: &ChartOptions) -> Result<JsValue, JsValue> {
        let json = serde_json::to_string(options).map_err(|e| JsValue::from_str(&e.to_string()))?;
        let value = JSON::parse(&json)?;

        let yaxis = Reflect::get(&value, &JsValue::from_str("yaxis"))?;
        if yaxis.is_object() {
            let labels = Object::new();
            let formatter = self.formatter(options.label_format());
            Reflect::set(&labels, &JsValue::from_str("formatter"), formatter.as_ref())?;
            Reflect::set(&yaxis, &JsValue::from_str("labels"), &labels)?;
        }

        Ok(value)
    }
}

impl ChartSurface for ApexSurface {
    fn render(&mut self, options: &ChartOptions) {
        match self.to_js(options) {
            Ok(js) => {
                let chart = ApexChart::new(&self.element, &js);
                let _ = chart.render();
                self.chart = Some(chart);
            }
            Err(e) => log_error("Charts: cannot build options", &format!("{:?}", e)),
        }
    }

    fn update_options(&mut self, options: &ChartOptions) {
        if self.chart.is_none() {
            return;
        }
        match self.to_js(options) {
            Ok(js) => {
                if let Some(chart) = &self.chart {
                    chart.update_options(&js);
                }
            }
            Err(e) => log_error("Charts: cannot build options", &format!("{:?}", e)),
        }
    }
}
