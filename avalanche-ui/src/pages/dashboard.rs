//! Dashboard Page
//!
//! Landing page: incoming connections next to live system charts.

use leptos::*;

use crate::components::{ConnectionList, MetricsChart};

#[component]
pub fn Dashboard() -> impl IntoView {
    view! {
        <div class="row row-cards">
            <div class="col-lg-4">
                <div class="card">
                    <ConnectionList />
                </div>
            </div>
            <div class="col-lg-8">
                <ChartCard title="Memory">
                    <MetricsChart source="memory" />
                </ChartCard>
                <ChartCard title="CPU">
                    <MetricsChart source="cpu" form="line" frequency=2000 />
                </ChartCard>
                <ChartCard title="Disk">
                    <MetricsChart source="disk" form="donut" frequency=5000 />
                </ChartCard>
            </div>
        </div>
    }
}

#[component]
fn ChartCard(title: &'static str, children: Children) -> impl IntoView {
    view! {
        <div class="card mb-3">
            <div class="card-header">
                <h3 class="card-title">{title}</h3>
            </div>
            <div class="card-body">{children()}</div>
        </div>
    }
}
