//! Chart Options
//!
//! Typed option tree for the ApexCharts library. Every chart starts from the same
//! base set; each data source then layers its own axis, palette and fill rules on top.

use serde::Serialize;

use super::descriptor::{ChartForm, DataSource};
use super::payload::ChartSeries;
use crate::config::ChartsConfig;

/// Fractions shown on the five memory axis ticks
const PERCENT_LABELS: [f64; 5] = [0.0, 0.25, 0.5, 0.75, 1.0];

const GIB: f64 = 1024.0 * 1024.0 * 1024.0;

/// Where a label is rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelContext {
    /// The n-th tick of the value axis
    Tick(usize),
    /// A tooltip / data point label
    DataPoint,
}

/// Value axis label formatting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LabelFormat {
    #[default]
    Raw,
    /// Ticks as a share of the axis (0%..100%), data points in GiB
    MemoryShare,
    /// Bytes as GiB
    GibiBytes,
    /// MHz as GHz
    GigaHertz,
}

impl LabelFormat {
    pub fn format(&self, value: f64, context: LabelContext) -> String {
        match (self, context) {
            (LabelFormat::MemoryShare, LabelContext::Tick(idx)) => match PERCENT_LABELS.get(idx) {
                Some(fraction) => format!("{:.0}%", fraction * 100.0),
                None => format_gib(value),
            },
            (LabelFormat::MemoryShare, LabelContext::DataPoint) | (LabelFormat::GibiBytes, _) => {
                format_gib(value)
            }
            (LabelFormat::GigaHertz, _) => format!("{:.1}GHz", value / 1000.0),
            (LabelFormat::Raw, _) => format!("{}", value),
        }
    }
}

fn format_gib(bytes: f64) -> String {
    format!("{:.1}GiB", bytes.trunc() / GIB)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Visibility {
    pub show: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Toggle {
    pub enabled: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Speed {
    pub speed: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Animations {
    pub enabled: bool,
    pub animate_gradually: Toggle,
    pub easing: String,
    pub speed: u32,
    pub dynamic_animation: Speed,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Tooltip {
    pub theme: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartSettings {
    #[serde(rename = "type")]
    pub kind: String,
    pub parent_height_offset: u32,
    pub font_family: String,
    pub height: u32,
    pub toolbar: Visibility,
    pub animations: Animations,
    pub tooltip: Tooltip,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Stroke {
    pub width: u32,
    pub curve: String,
    pub line_cap: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Fill {
    pub opacity: f64,
    #[serde(rename = "type")]
    pub kind: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NoData {
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct XAxis {
    #[serde(rename = "type")]
    pub kind: String,
    pub labels: Visibility,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct YAxis {
    #[serde(rename = "type")]
    pub kind: String,
    pub tick_amount: u32,
    pub min: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    /// Applied by the renderer as the label formatter
    #[serde(skip)]
    pub label_format: LabelFormat,
}

impl YAxis {
    fn numeric(label_format: LabelFormat) -> Self {
        Self {
            kind: "numeric".to_string(),
            tick_amount: 4,
            min: 0.0,
            max: None,
            label_format,
        }
    }
}

/// The full option set of one chart
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartOptions {
    pub chart: ChartSettings,
    /// `None` keeps the library's default palette
    #[serde(skip_serializing_if = "Option::is_none")]
    pub colors: Option<Vec<String>>,
    pub data_labels: Toggle,
    pub grid: Visibility,
    pub legend: Visibility,
    pub series: ChartSeries,
    pub stroke: Stroke,
    /// `None` keeps the library's default fill
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill: Option<Fill>,
    pub no_data: NoData,
    pub xaxis: XAxis,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub yaxis: Option<YAxis>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub labels: Option<Vec<String>>,
}

impl ChartOptions {
    /// Shared defaults: empty series and a loading placeholder
    pub fn base(form: ChartForm, config: &ChartsConfig) -> Self {
        Self {
            chart: ChartSettings {
                kind: form.as_str().to_string(),
                parent_height_offset: 0,
                font_family: "inherit".to_string(),
                height: config.height,
                toolbar: Visibility { show: false },
                animations: Animations {
                    enabled: true,
                    animate_gradually: Toggle { enabled: false },
                    easing: "easein".to_string(),
                    speed: 150,
                    dynamic_animation: Speed { speed: 150 },
                },
                tooltip: Tooltip {
                    theme: "dark".to_string(),
                },
            },
            colors: Some(config.palette.clone()),
            data_labels: Toggle { enabled: false },
            grid: Visibility { show: false },
            legend: Visibility { show: true },
            series: if form.is_circular() {
                ChartSeries::Values(Vec::new())
            } else {
                ChartSeries::default()
            },
            stroke: Stroke {
                width: 2,
                curve: "smooth".to_string(),
                line_cap: "round".to_string(),
            },
            fill: Some(Fill {
                opacity: 0.16,
                kind: "solid".to_string(),
            }),
            no_data: NoData {
                text: config.loading_text.clone(),
            },
            xaxis: XAxis {
                kind: "datetime".to_string(),
                labels: Visibility { show: false },
            },
            yaxis: None,
            labels: None,
        }
    }

    /// Base options with the rules of `source` applied
    pub fn for_source(form: ChartForm, source: DataSource, config: &ChartsConfig) -> Self {
        let mut options = Self::base(form, config);
        options.apply_source_rules(source, config);
        options
    }

    /// Layer the per-source axis, palette and fill rules
    pub fn apply_source_rules(&mut self, source: DataSource, config: &ChartsConfig) {
        match source {
            DataSource::Memory => {
                self.yaxis = Some(YAxis::numeric(LabelFormat::MemoryShare));
            }
            DataSource::Cpu => {
                self.yaxis = Some(YAxis::numeric(LabelFormat::GigaHertz));
            }
            DataSource::Disk => {
                self.colors = Some(config.disk_palette.clone());
                self.fill = Some(Fill {
                    opacity: 0.0,
                    kind: "solid".to_string(),
                });
                self.chart.animations.enabled = false;
                self.yaxis = Some(YAxis::numeric(LabelFormat::GibiBytes));
            }
        }
    }

    /// Label formatter of the value axis
    pub fn label_format(&self) -> LabelFormat {
        self.yaxis
            .as_ref()
            .map(|y| y.label_format)
            .unwrap_or_default()
    }

    /// Current value axis maximum
    pub fn axis_max(&self) -> Option<f64> {
        self.yaxis.as_ref().and_then(|y| y.max)
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> ChartsConfig {
        ChartsConfig::default()
    }

    #[test]
    fn test_base_options_serialize_like_apex() {
        let json = ChartOptions::base(ChartForm::Area, &config()).to_json();
        assert_eq!(json["chart"]["type"], "area");
        assert_eq!(json["chart"]["height"], 240);
        assert_eq!(json["chart"]["parentHeightOffset"], 0);
        assert_eq!(json["chart"]["animations"]["dynamicAnimation"]["speed"], 150);
        assert_eq!(json["dataLabels"]["enabled"], false);
        assert_eq!(json["noData"]["text"], "Loading graph");
        assert_eq!(json["stroke"]["lineCap"], "round");
        assert_eq!(json["fill"]["type"], "solid");
        assert_eq!(json["series"], serde_json::json!([]));
        assert_eq!(json["xaxis"]["type"], "datetime");
        assert!(json.get("yaxis").is_none());
    }

    #[test]
    fn test_memory_rules() {
        let options = ChartOptions::for_source(ChartForm::Area, DataSource::Memory, &config());
        let yaxis = options.yaxis.as_ref().unwrap();
        assert_eq!(yaxis.tick_amount, 4);
        assert_eq!(yaxis.min, 0.0);
        assert_eq!(options.label_format(), LabelFormat::MemoryShare);
        assert_eq!(options.colors.as_ref().unwrap().len(), 3);
        assert!(options.chart.animations.enabled);
    }

    #[test]
    fn test_cpu_rules_leave_palette_and_fill_alone() {
        let base = ChartOptions::base(ChartForm::Line, &config());
        let cpu = ChartOptions::for_source(ChartForm::Line, DataSource::Cpu, &config());
        assert_eq!(cpu.colors, base.colors);
        assert_eq!(cpu.fill, base.fill);
        assert_eq!(cpu.chart.animations.enabled, base.chart.animations.enabled);
        assert_eq!(cpu.label_format(), LabelFormat::GigaHertz);

        let json = cpu.to_json();
        assert_eq!(json["fill"]["type"], "solid");
        assert_eq!(json["yaxis"]["type"], "numeric");
        assert!(json["yaxis"].get("max").is_none());
    }

    #[test]
    fn test_disk_rules() {
        let options = ChartOptions::for_source(ChartForm::Area, DataSource::Disk, &config());
        assert_eq!(options.colors.as_ref().unwrap().len(), 2);
        assert_eq!(options.fill.as_ref().unwrap().opacity, 0.0);
        assert!(!options.chart.animations.enabled);
        assert_eq!(options.label_format(), LabelFormat::GibiBytes);
    }

    #[test]
    fn test_circular_form_starts_with_values() {
        let options = ChartOptions::base(ChartForm::Pie, &config());
        assert_eq!(options.series, ChartSeries::Values(Vec::new()));
        assert_eq!(options.chart.kind, "pie");
    }

    #[test]
    fn test_label_formats() {
        let memory = LabelFormat::MemoryShare;
        assert_eq!(memory.format(0.0, LabelContext::Tick(0)), "0%");
        assert_eq!(memory.format(4.0e9, LabelContext::Tick(2)), "50%");
        assert_eq!(memory.format(0.0, LabelContext::Tick(4)), "100%");
        assert_eq!(memory.format(8589934592.0, LabelContext::DataPoint), "8.0GiB");
        assert_eq!(
            LabelFormat::GibiBytes.format(1610612736.0, LabelContext::Tick(1)),
            "1.5GiB"
        );
        assert_eq!(LabelFormat::GigaHertz.format(2400.0, LabelContext::DataPoint), "2.4GHz");
        assert_eq!(LabelFormat::Raw.format(12.5, LabelContext::DataPoint), "12.5");
    }
}
