//! Connection List Component
//!
//! Incoming connection requests, re-fetched every polling interval. A failed poll
//! leaves the previous rows in place.

use avalanche::connections::LIST_HEADER;
use avalanche::{ConnectionPoller, ConnectionRecord, ConnectionView};
use gloo_timers::callback::Interval;
use leptos::*;
use std::cell::Cell;
use std::rc::Rc;

use crate::api::GlooTransport;
use crate::state::global::GlobalState;

/// Rows held in a signal so the list re-renders on replace
struct SignalView(RwSignal<Vec<ConnectionRecord>>);

impl ConnectionView for SignalView {
    fn replace(&mut self, records: &[ConnectionRecord]) {
        self.0.set(records.to_vec());
    }
}

fn poll(
    poller: Rc<ConnectionPoller<GlooTransport>>,
    rows: RwSignal<Vec<ConnectionRecord>>,
    in_flight: Rc<Cell<bool>>,
) {
    if in_flight.replace(true) {
        return;
    }
    spawn_local(async move {
        if !poller.poll_once(&mut SignalView(rows)).await {
            web_sys::console::error_1(&"Failed to fetch connections".into());
        }
        in_flight.set(false);
    });
}

/// Position plus id, so repeated ids still get a row each
fn row_key((index, record): &(usize, ConnectionRecord)) -> (usize, String) {
    (*index, record.id.to_string())
}

/// Pending connection list
#[component]
pub fn ConnectionList() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let poller = Rc::new(ConnectionPoller::new(state.transport.clone(), &state.config));
    let rows = create_rw_signal(Vec::<ConnectionRecord>::new());
    let in_flight = Rc::new(Cell::new(false));

    poll(poller.clone(), rows, in_flight.clone());
    let period = poller.interval().as_millis() as u32;
    let interval = Interval::new(period, move || poll(poller.clone(), rows, in_flight.clone()));
    on_cleanup(move || drop(interval));

    view! {
        <div id="connectionList" class="list-group list-group-flush">
            <div class="list-group-header">{LIST_HEADER}</div>
            <For
                each=move || rows.get().into_iter().enumerate()
                key=row_key
                children=move |(_, record)| view! { <ConnectionRow record=record /> }
            />
        </div>
    }
}

#[component]
fn ConnectionRow(record: ConnectionRecord) -> impl IntoView {
    view! {
        <div class="list-group-item gb-3 align-items-center">
            <div class="row">
                <div class="col">{record.id.to_string()}</div>
                <div class="col-auto">
                    <a href="" class="btn btn-primary">"Accept"</a>
                </div>
                <div class="col-auto">
                    <a href="" class="btn btn-danger">"Decline"</a>
                </div>
            </div>
        </div>
    }
}
