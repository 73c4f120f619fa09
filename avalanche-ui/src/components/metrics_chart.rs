//! Metrics Chart Component
//!
//! A `.chart` element described by `avalanche:data-*` attributes. On mount the
//! attributes are read back, the chart is rendered empty, then polled at its own
//! frequency until the component goes away.

use avalanche::charts::{ATTR_FORM, ATTR_FREQUENCY, ATTR_SOURCE, ATTR_TOTAL, CHART_CLASS};
use avalanche::{AttachedChart, ChartController, ChartSurface};
use gloo_timers::callback::Interval;
use leptos::*;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::api::{log_error, ApexSurface, ChartNode, GlooTransport};
use crate::state::global::GlobalState;

/// Everything a running chart owns
struct LiveChart {
    controller: ChartController<GlooTransport>,
    chart: RefCell<AttachedChart>,
    surface: RefCell<ApexSurface>,
    in_flight: Cell<bool>,
}

impl LiveChart {
    fn poll(self: &Rc<Self>) {
        if self.in_flight.replace(true) {
            return;
        }
        let live = Rc::clone(self);
        spawn_local(async move {
            let source = live.chart.borrow().descriptor().source;
            match live.controller.fetch_update(source).await {
                Ok(update) => {
                    let mut chart = live.chart.borrow_mut();
                    chart.apply_update(&update);
                    live.surface.borrow_mut().update_options(chart.options());
                }
                Err(e) => log_error(&format!("Charts: failed to fetch {}", source), &e),
            }
            live.in_flight.set(false);
        });
    }
}

/// Live system metrics chart
#[component]
pub fn MetricsChart(
    /// `memory`, `cpu` or `disk`
    source: &'static str,
    #[prop(optional)] form: Option<&'static str>,
    /// Poll period in milliseconds
    #[prop(optional)]
    frequency: Option<u32>,
    /// Fixed value axis maximum
    #[prop(optional)]
    total: Option<f64>,
) -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let node_ref = create_node_ref::<html::Div>();
    let running: Rc<RefCell<Option<(Interval, Rc<LiveChart>)>>> = Rc::new(RefCell::new(None));

    let slot = running.clone();
    node_ref.on_load(move |div| {
        let element: &web_sys::Element = &div;
        let mut attrs = vec![(ATTR_SOURCE, source.to_string())];
        attrs.extend(form.map(|f| (ATTR_FORM, f.to_string())));
        attrs.extend(frequency.map(|ms| (ATTR_FREQUENCY, ms.to_string())));
        attrs.extend(total.map(|t| (ATTR_TOTAL, t.to_string())));
        for (name, value) in attrs {
            let _ = element.set_attribute(name, &value);
        }

        let controller = ChartController::new(state.transport.clone(), &state.config);
        let mut surface = ApexSurface::new(element.clone());
        let Some(chart) = controller.attach(&ChartNode(element), &mut surface) else {
            log_error("Charts", &format!("cannot configure chart for source {:?}", source));
            return;
        };

        let period = chart.descriptor().frequency.as_millis() as u32;
        let live = Rc::new(LiveChart {
            controller,
            chart: RefCell::new(chart),
            surface: RefCell::new(surface),
            in_flight: Cell::new(false),
        });

        live.poll();
        let ticking = live.clone();
        let interval = Interval::new(period, move || ticking.poll());
        *slot.borrow_mut() = Some((interval, live));
    });

    on_cleanup(move || {
        if let Some((interval, live)) = running.borrow_mut().take() {
            drop(interval);
            live.surface.borrow_mut().destroy();
        }
    });

    view! {
        <div class=CHART_CLASS node_ref=node_ref></div>
    }
}
