//! Chart Controller
//!
//! Discovers what a chart element wants, renders it once empty, then replaces its
//! series wholesale on every poll.

use super::descriptor::{ChartDescriptor, ChartElement, DataSource};
use super::options::ChartOptions;
use super::payload::{ChartUpdate, MetricsPayload};
use crate::config::{ApiConfig, ChartsConfig, Config, PollingConfig};
use crate::error::DashboardResult;
use crate::transport::{ApiRequest, Transport};

/// Lifecycle of an attached chart. Nothing leaves `Polling`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartPhase {
    /// Options built and rendered empty
    Configured,
    /// At least one update applied
    Polling,
}

/// Whatever draws the chart (ApexCharts in the browser)
pub trait ChartSurface {
    /// First render with the initial options
    fn render(&mut self, options: &ChartOptions);
    /// Replace the options of an already rendered chart
    fn update_options(&mut self, options: &ChartOptions);
}

/// A configured chart and its current options
#[derive(Debug, Clone, PartialEq)]
pub struct AttachedChart {
    descriptor: ChartDescriptor,
    options: ChartOptions,
    phase: ChartPhase,
}

impl AttachedChart {
    pub fn new(descriptor: ChartDescriptor, config: &ChartsConfig) -> Self {
        let options = ChartOptions::for_source(descriptor.form, descriptor.source, config);
        Self {
            descriptor,
            options,
            phase: ChartPhase::Configured,
        }
    }

    pub fn descriptor(&self) -> &ChartDescriptor {
        &self.descriptor
    }

    pub fn options(&self) -> &ChartOptions {
        &self.options
    }

    pub fn phase(&self) -> ChartPhase {
        self.phase
    }

    /// Replace series and labels with the update's
    ///
    /// Idempotent: applying the same update twice leaves the same options.
    /// The element's own total wins over the one reported by the backend.
    pub fn apply_update(&mut self, update: &ChartUpdate) {
        self.options.series = update.series.clone();
        self.options.labels = update.labels.clone();
        let max = self.descriptor.total.or(update.total);
        if let Some(yaxis) = self.options.yaxis.as_mut() {
            yaxis.max = max;
        }
        self.phase = ChartPhase::Polling;
    }
}

/// Builds charts from elements and feeds them from the stats API
pub struct ChartController<T> {
    transport: T,
    api: ApiConfig,
    charts: ChartsConfig,
    polling: PollingConfig,
}

impl<T: Transport> ChartController<T> {
    pub fn new(transport: T, config: &Config) -> Self {
        Self {
            transport,
            api: config.api.clone(),
            charts: config.charts.clone(),
            polling: config.polling.clone(),
        }
    }

    /// Read the element's descriptor and build its options
    pub fn configure<E: ChartElement + ?Sized>(&self, element: &E) -> DashboardResult<AttachedChart> {
        let descriptor = ChartDescriptor::from_element(element, &self.polling)?;
        Ok(AttachedChart::new(descriptor, &self.charts))
    }

    /// Configure the element and render it empty onto `surface`
    ///
    /// Elements we cannot configure are logged and skipped: nothing is rendered and
    /// the caller gets no chart to poll.
    pub fn attach<E, S>(&self, element: &E, surface: &mut S) -> Option<AttachedChart>
    where
        E: ChartElement + ?Sized,
        S: ChartSurface + ?Sized,
    {
        match self.configure(element) {
            Ok(chart) => {
                tracing::debug!(
                    source = %chart.descriptor.source,
                    form = chart.descriptor.form.as_str(),
                    frequency_ms = chart.descriptor.frequency.as_millis() as u64,
                    "Attached chart"
                );
                surface.render(chart.options());
                Some(chart)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Skipping chart element");
                None
            }
        }
    }

    /// Fetch the latest series for a data source
    pub async fn fetch_update(&self, source: DataSource) -> DashboardResult<ChartUpdate> {
        let request = ApiRequest::get(self.api.stats_path(source.as_str())).accept_json();
        let response = self.transport.send(request).await?.error_for_status()?;
        let payload: MetricsPayload = response.json()?;
        Ok(payload.into())
    }

    /// One poll: fetch, apply and repaint. Failures leave the chart as it was.
    pub async fn poll<S: ChartSurface + ?Sized>(
        &self,
        chart: &mut AttachedChart,
        surface: &mut S,
    ) -> DashboardResult<()> {
        let source = chart.descriptor.source;
        match self.fetch_update(source).await {
            Ok(update) => {
                chart.apply_update(&update);
                surface.update_options(chart.options());
                Ok(())
            }
            Err(e) => {
                tracing::warn!(%source, error = %e, "Charts: failed to fetch stats");
                Err(e)
            }
        }
    }
}
