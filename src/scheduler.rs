//! Poll Scheduling
//!
//! Drives connection and chart polls on tokio timers. Polls run on the calling task,
//! one at a time, so a slow response delays the next tick instead of overlapping it.

use std::time::Duration;
use tokio::time::{Interval, MissedTickBehavior};

use crate::charts::{AttachedChart, ChartController, ChartElement, ChartSurface};
use crate::connections::{ConnectionPoller, ConnectionView};
use crate::transport::Transport;

/// Interval whose first tick fires immediately and which never bursts to catch up
pub fn ticker(period: Duration) -> Interval {
    let mut interval = tokio::time::interval(period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    interval
}

/// Poll connections every configured interval, `max_ticks` times or forever
///
/// Returns the number of polls that updated the view.
pub async fn watch_connections<T, V>(
    poller: &ConnectionPoller<T>,
    view: &mut V,
    max_ticks: Option<usize>,
) -> usize
where
    T: Transport,
    V: ConnectionView + ?Sized,
{
    let mut interval = ticker(poller.interval());
    let mut ticks = 0;
    let mut updated = 0;

    while max_ticks.map_or(true, |max| ticks < max) {
        interval.tick().await;
        ticks += 1;
        if poller.poll_once(view).await {
            updated += 1;
        }
    }

    updated
}

/// Attach a chart and poll it at its own frequency
///
/// Elements that cannot be configured return `None` without starting a timer.
pub async fn watch_chart<T, E, S>(
    controller: &ChartController<T>,
    element: &E,
    surface: &mut S,
    max_ticks: Option<usize>,
) -> Option<AttachedChart>
where
    T: Transport,
    E: ChartElement + ?Sized,
    S: ChartSurface + ?Sized,
{
    let mut chart = controller.attach(element, surface)?;
    let mut interval = ticker(chart.descriptor().frequency);
    let mut ticks = 0;

    while max_ticks.map_or(true, |max| ticks < max) {
        interval.tick().await;
        ticks += 1;
        // Failures are logged by the controller; the chart keeps its last series
        let _ = controller.poll(&mut chart, surface).await;
    }

    Some(chart)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charts::{ChartOptions, ChartPhase, ATTR_FREQUENCY, ATTR_SOURCE};
    use crate::config::Config;
    use crate::connections::ConnectionRecord;
    use crate::transport::fake::FakeTransport;
    use std::rc::Rc;

    #[derive(Default)]
    struct CountingSurface {
        renders: usize,
        updates: usize,
    }

    impl ChartSurface for CountingSurface {
        fn render(&mut self, _options: &ChartOptions) {
            self.renders += 1;
        }

        fn update_options(&mut self, _options: &ChartOptions) {
            self.updates += 1;
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_first_tick_is_immediate() {
        let start = tokio::time::Instant::now();
        let mut interval = ticker(Duration::from_secs(5));
        interval.tick().await;
        assert!(start.elapsed() < Duration::from_secs(1));
        interval.tick().await;
        assert!(start.elapsed() >= Duration::from_secs(5));
    }

    #[tokio::test(start_paused = true)]
    async fn test_watch_connections_counts_successful_polls() {
        let transport = Rc::new(FakeTransport::new());
        transport.respond("/api/v1/services/enumerate", 200, r#"[{"id":"a"}]"#);
        transport.respond("/api/v1/services/enumerate", 500, "");
        let poller = ConnectionPoller::new(Rc::clone(&transport), &Config::default());

        let mut view: Vec<ConnectionRecord> = Vec::new();
        let updated = watch_connections(&poller, &mut view, Some(3)).await;

        assert_eq!(updated, 1);
        assert_eq!(transport.request_count(), 3);
        assert_eq!(view.len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_watch_chart_uses_element_frequency() {
        let transport = Rc::new(FakeTransport::new());
        transport.respond(
            "/api/v1/stats/disk",
            200,
            r#"{"series":[{"name":"Read","data":[{"x":0,"y":1.0}]}]}"#,
        );
        let controller = ChartController::new(Rc::clone(&transport), &Config::default());
        let attrs: &[(&str, &str)] = &[(ATTR_SOURCE, "disk"), (ATTR_FREQUENCY, "250")];
        let mut surface = CountingSurface::default();

        let start = tokio::time::Instant::now();
        let chart = watch_chart(&controller, attrs, &mut surface, Some(4))
            .await
            .unwrap();

        assert_eq!(chart.phase(), ChartPhase::Polling);
        assert_eq!(surface.renders, 1);
        assert_eq!(surface.updates, 4);
        assert!(start.elapsed() >= Duration::from_millis(750));
        assert!(start.elapsed() < Duration::from_millis(1000));
    }

    #[tokio::test(start_paused = true)]
    async fn test_watch_chart_skips_unknown_source() {
        let transport = Rc::new(FakeTransport::new());
        let controller = ChartController::new(Rc::clone(&transport), &Config::default());
        let attrs: &[(&str, &str)] = &[(ATTR_SOURCE, "gpu")];
        let mut surface = CountingSurface::default();

        assert!(watch_chart(&controller, attrs, &mut surface, None).await.is_none());
        assert_eq!(surface.renders, 0);
        assert_eq!(transport.request_count(), 0);
    }
}
