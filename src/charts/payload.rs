//! Stats API payloads and the chart updates built from them

use serde::{Deserialize, Serialize};

/// One `(x, y)` point as the charting library expects it; `x` is epoch milliseconds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    pub x: i64,
    pub y: f64,
}

/// A named series of points
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    pub name: String,
    pub data: Vec<SeriesPoint>,
}

impl Series {
    pub fn latest(&self) -> Option<&SeriesPoint> {
        self.data.last()
    }
}

/// Series in either of the shapes the charting library takes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ChartSeries {
    /// Named x/y series (area, line, bar)
    Named(Vec<Series>),
    /// Plain values, paired with labels (pie, donut, radial)
    Values(Vec<f64>),
}

impl Default for ChartSeries {
    fn default() -> Self {
        ChartSeries::Named(Vec::new())
    }
}

impl ChartSeries {
    pub fn is_empty(&self) -> bool {
        match self {
            ChartSeries::Named(series) => series.is_empty(),
            ChartSeries::Values(values) => values.is_empty(),
        }
    }

    pub fn named(&self, name: &str) -> Option<&Series> {
        match self {
            ChartSeries::Named(series) => series.iter().find(|s| s.name == name),
            ChartSeries::Values(_) => None,
        }
    }
}

/// A raw `(timestamp, value)` sample; timestamps are epoch seconds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SamplePoint {
    pub timestamp: f64,
    pub value: f64,
}

impl SamplePoint {
    pub fn to_point(self) -> SeriesPoint {
        SeriesPoint {
            x: (self.timestamp * 1000.0).round() as i64,
            y: self.value,
        }
    }
}

fn to_series(name: &str, samples: &[SamplePoint]) -> Series {
    Series {
        name: name.to_string(),
        data: samples.iter().map(|s| s.to_point()).collect(),
    }
}

/// Body of `GET /api/v1/stats/{domain}`
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum MetricsPayload {
    /// Ready-made series, optionally with labels
    Generic {
        series: ChartSeries,
        #[serde(default)]
        labels: Option<Vec<String>>,
        #[serde(default)]
        total: Option<f64>,
    },
    /// Memory-style free / available / used samples
    Legacy {
        free: Vec<SamplePoint>,
        available: Vec<SamplePoint>,
        used: Vec<SamplePoint>,
        #[serde(default)]
        total: Option<f64>,
    },
}

/// Everything one poll replaces on a chart
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChartUpdate {
    pub series: ChartSeries,
    pub labels: Option<Vec<String>>,
    /// Axis maximum reported by the backend
    pub total: Option<f64>,
}

impl From<MetricsPayload> for ChartUpdate {
    fn from(payload: MetricsPayload) -> Self {
        match payload {
            MetricsPayload::Generic {
                series,
                labels,
                total,
            } => ChartUpdate {
                series,
                labels,
                total,
            },
            MetricsPayload::Legacy {
                free,
                available,
                used,
                total,
            } => ChartUpdate {
                series: ChartSeries::Named(vec![
                    to_series("Free", &free),
                    to_series("Available", &available),
                    to_series("Used", &used),
                ]),
                labels: None,
                total,
            },
        }
    }
}
