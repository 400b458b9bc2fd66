//! Chart kind selection from a type string.

use crate::chart::Chart;
use crate::kinds::{AreaOptions, BarOptions, ChartKind, LineOptions, PieOptions, ScatterOptions};
use crate::normalize::{normalize, NormalizeOptions, Shape};
use serde_json::Value;

/// Type names accepted by [`FlexiChart::from_type`].
pub const CHART_TYPES: [&str; 10] = [
    "bar",
    "stacked-bar",
    "pie",
    "donut",
    "area",
    "stacked-area",
    "line",
    "scatter",
    "histogram",
    "timeseries",
];

/// Kind plus the input shape the type implies.
#[derive(Debug, Clone)]
pub struct Dispatch {
    /// Chart kind with default options
    pub kind: ChartKind,
    /// Shape forced onto the normalizer, if any
    pub shape: Option<Shape>,
}

/// Map a type string to a kind. Unknown types fall back to `bar`.
#[must_use]
pub fn resolve_type(type_name: &str) -> Dispatch {
    let (kind, shape) = match type_name.trim().to_ascii_lowercase().as_str() {
        "bar" => (ChartKind::Bar(BarOptions::default()), None),
        "stacked-bar" => (ChartKind::Bar(BarOptions::stacked()), None),
        "pie" => (ChartKind::Pie(PieOptions::default()), None),
        "donut" => (ChartKind::Pie(PieOptions::donut()), None),
        "area" => (ChartKind::Area(AreaOptions::default()), None),
        "stacked-area" => (ChartKind::Area(AreaOptions::stacked()), None),
        "line" => (ChartKind::Line(LineOptions::default()), None),
        "scatter" => (ChartKind::Scatter(ScatterOptions::default()), Some(Shape::Scatter)),
        "histogram" => (ChartKind::Bar(BarOptions::default()), Some(Shape::Histogram)),
        "timeseries" => (ChartKind::Line(LineOptions::default()), Some(Shape::TimeSeries)),
        other => {
            tracing::warn!(chart_type = other, "unknown chart type, falling back to bar");
            (ChartKind::Bar(BarOptions::default()), None)
        }
    };
    Dispatch { kind, shape }
}

/// Builds charts from loosely typed input.
#[derive(Debug, Clone, Copy, Default)]
pub struct FlexiChart;

impl FlexiChart {
    /// Pick a kind from `type_name`, normalize `raw`, and construct the chart.
    ///
    /// A shape already forced in `options` wins over the one the type implies.
    #[must_use]
    pub fn from_type(type_name: &str, raw: &Value, options: &NormalizeOptions) -> Chart {
        let Dispatch { kind, shape } = resolve_type(type_name);
        let mut options = options.clone();
        if options.shape.is_none() {
            options.shape = shape;
        }
        let data = normalize(raw, &options);
        tracing::debug!(
            chart_type = type_name,
            kind = kind.name(),
            series = data.series.len(),
            labels = data.labels.len(),
            "dispatched flexi chart"
        );
        Chart::new(kind, data)
    }
}
