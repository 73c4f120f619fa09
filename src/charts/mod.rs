//! Metrics Charts
//!
//! Elements marked with the `chart` class describe a data source through
//! `avalanche:data-*` attributes. The controller renders each one empty and then
//! replaces its series from `/api/v1/stats/{domain}` at the element's frequency.

pub mod controller;
pub mod descriptor;
pub mod options;
pub mod payload;

pub use controller::{AttachedChart, ChartController, ChartPhase, ChartSurface};
pub use descriptor::{
    ChartDescriptor, ChartElement, ChartForm, DataSource, ATTR_FORM, ATTR_FREQUENCY, ATTR_SOURCE,
    ATTR_TOTAL, CHART_CLASS,
};
pub use options::{ChartOptions, LabelContext, LabelFormat};
pub use payload::{ChartSeries, ChartUpdate, MetricsPayload, SamplePoint, Series, SeriesPoint};
