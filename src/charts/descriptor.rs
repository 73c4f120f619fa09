//! Chart descriptors
//!
//! A chart element declares what it shows through `avalanche:data-*` attributes.
//! They are read once, when the chart is attached.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use crate::config::PollingConfig;
use crate::error::{DashboardError, DashboardResult};

/// Class that marks an element as a chart
pub const CHART_CLASS: &str = "chart";

pub const ATTR_SOURCE: &str = "avalanche:data-source";
pub const ATTR_FORM: &str = "avalanche:data-form";
pub const ATTR_FREQUENCY: &str = "avalanche:data-frequency";
pub const ATTR_TOTAL: &str = "avalanche:data-total";

/// Attribute access on whatever hosts the chart
pub trait ChartElement {
    fn attribute(&self, name: &str) -> Option<String>;
}

impl ChartElement for HashMap<String, String> {
    fn attribute(&self, name: &str) -> Option<String> {
        self.get(name).cloned()
    }
}

impl ChartElement for [(&str, &str)] {
    fn attribute(&self, name: &str) -> Option<String> {
        self.iter()
            .find(|(k, _)| *k == name)
            .map(|(_, v)| v.to_string())
    }
}

/// Metrics domain served under `/api/v1/stats/{domain}`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataSource {
    Memory,
    Cpu,
    Disk,
}

impl DataSource {
    pub const ALL: [DataSource; 3] = [DataSource::Memory, DataSource::Cpu, DataSource::Disk];

    pub fn as_str(&self) -> &'static str {
        match self {
            DataSource::Memory => "memory",
            DataSource::Cpu => "cpu",
            DataSource::Disk => "disk",
        }
    }
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DataSource {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "memory" => Ok(DataSource::Memory),
            "cpu" => Ok(DataSource::Cpu),
            "disk" => Ok(DataSource::Disk),
            _ => Err(DashboardError::UnknownDataSource(s.to_string())),
        }
    }
}

/// Chart type handed to the charting library
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChartForm {
    #[default]
    Area,
    Line,
    Bar,
    Pie,
    Donut,
    RadialBar,
}

impl ChartForm {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChartForm::Area => "area",
            ChartForm::Line => "line",
            ChartForm::Bar => "bar",
            ChartForm::Pie => "pie",
            ChartForm::Donut => "donut",
            ChartForm::RadialBar => "radialBar",
        }
    }

    /// Circular charts take plain values + labels instead of named x/y series
    pub fn is_circular(&self) -> bool {
        matches!(self, ChartForm::Pie | ChartForm::Donut | ChartForm::RadialBar)
    }
}

impl FromStr for ChartForm {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "area" => Ok(ChartForm::Area),
            "line" => Ok(ChartForm::Line),
            "bar" => Ok(ChartForm::Bar),
            "pie" => Ok(ChartForm::Pie),
            "donut" => Ok(ChartForm::Donut),
            "radialbar" => Ok(ChartForm::RadialBar),
            _ => Err(DashboardError::UnknownChartForm(s.to_string())),
        }
    }
}

/// How one chart is configured and polled
#[derive(Debug, Clone, PartialEq)]
pub struct ChartDescriptor {
    pub source: DataSource,
    pub form: ChartForm,
    pub frequency: Duration,
    /// Caps the value axis when present
    pub total: Option<f64>,
}

impl ChartDescriptor {
    /// Read the descriptor from an element's attributes
    ///
    /// Only the data source is mandatory. A bad form, frequency or total is
    /// logged and replaced by its default.
    pub fn from_element<E: ChartElement + ?Sized>(
        element: &E,
        polling: &PollingConfig,
    ) -> DashboardResult<Self> {
        let source = match element.attribute(ATTR_SOURCE) {
            Some(value) => value.parse::<DataSource>()?,
            None => {
                return Err(DashboardError::InvalidAttribute {
                    name: ATTR_SOURCE.to_string(),
                    value: String::new(),
                })
            }
        };

        let form = match element.attribute(ATTR_FORM) {
            Some(value) => value.parse().unwrap_or_else(|e| {
                tracing::warn!(%source, error = %e, "Falling back to area chart");
                ChartForm::Area
            }),
            None => ChartForm::Area,
        };

        let frequency = element
            .attribute(ATTR_FREQUENCY)
            .and_then(|value| match value.trim().parse::<u64>() {
                Ok(ms) if ms > 0 => Some(Duration::from_millis(ms)),
                _ => {
                    tracing::warn!(%source, %value, "Ignoring invalid chart frequency");
                    None
                }
            })
            .unwrap_or_else(|| polling.default_chart_frequency());

        let total = element
            .attribute(ATTR_TOTAL)
            .filter(|value| !value.trim().is_empty())
            .and_then(|value| match value.trim().parse::<f64>() {
                Ok(total) if total.is_finite() && total > 0.0 => Some(total),
                _ => {
                    tracing::warn!(%source, %value, "Ignoring invalid chart total");
                    None
                }
            });

        Ok(Self {
            source,
            form,
            frequency,
            total,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn polling() -> PollingConfig {
        PollingConfig::default()
    }

    #[test]
    fn test_full_descriptor() {
        let attrs: &[(&str, &str)] = &[
            (ATTR_SOURCE, "memory"),
            (ATTR_FORM, "line"),
            (ATTR_FREQUENCY, "2500"),
            (ATTR_TOTAL, "17179869184"),
        ];
        let descriptor = ChartDescriptor::from_element(attrs, &polling()).unwrap();
        assert_eq!(descriptor.source, DataSource::Memory);
        assert_eq!(descriptor.form, ChartForm::Line);
        assert_eq!(descriptor.frequency, Duration::from_millis(2500));
        assert_eq!(descriptor.total, Some(17179869184.0));
    }

    #[test]
    fn test_defaults_for_optional_attributes() {
        let attrs: &[(&str, &str)] = &[(ATTR_SOURCE, "CPU")];
        let descriptor = ChartDescriptor::from_element(attrs, &polling()).unwrap();
        assert_eq!(descriptor.source, DataSource::Cpu);
        assert_eq!(descriptor.form, ChartForm::Area);
        assert_eq!(descriptor.frequency, Duration::from_millis(1000));
        assert_eq!(descriptor.total, None);
    }

    #[test]
    fn test_bad_optional_attributes_fall_back() {
        let attrs: &[(&str, &str)] = &[
            (ATTR_SOURCE, "disk"),
            (ATTR_FORM, "sparkle"),
            (ATTR_FREQUENCY, "0"),
            (ATTR_TOTAL, "lots"),
        ];
        let descriptor = ChartDescriptor::from_element(attrs, &polling()).unwrap();
        assert_eq!(descriptor.form, ChartForm::Area);
        assert_eq!(descriptor.frequency, Duration::from_millis(1000));
        assert_eq!(descriptor.total, None);
    }

    #[test]
    fn test_unknown_source_rejected() {
        let attrs: &[(&str, &str)] = &[(ATTR_SOURCE, "unknown")];
        let err = ChartDescriptor::from_element(attrs, &polling()).unwrap_err();
        assert_eq!(err, DashboardError::UnknownDataSource("unknown".to_string()));

        let mut map = HashMap::new();
        map.insert(ATTR_FORM.to_string(), "pie".to_string());
        assert!(matches!(
            ChartDescriptor::from_element(&map, &polling()),
            Err(DashboardError::InvalidAttribute { .. })
        ));
    }

    #[test]
    fn test_form_names() {
        assert_eq!("radialBar".parse::<ChartForm>().unwrap(), ChartForm::RadialBar);
        assert_eq!(ChartForm::RadialBar.as_str(), "radialBar");
        assert!(ChartForm::Donut.is_circular());
        assert!(!ChartForm::Bar.is_circular());
    }
}
