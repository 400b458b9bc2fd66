//! Chart spec files.
//!
//! A [`ChartSpec`] is the serde form of a chart: kind, data and presentation
//! options. Specs load from YAML or JSON and turn into a [`Chart`] with
//! [`ChartSpec::build`].
//!
//! ```yaml
//! type: bar
//! legend: right
//! width: auto
//! data:
//!   labels: [Q1, Q2]
//!   series:
//!     - name: Revenue
//!       values: [10, 20]
//! ```

use crate::chart::{Chart, Dimension};
use crate::error::ConfigError;
use crate::flexi::{resolve_type, Dispatch, CHART_TYPES};
use crate::kinds::ChartKind;
use crate::legend::LegendPosition;
use crate::normalize::{normalize, NormalizeOptions};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::Path;
use vellum_core::theme::{SizePreset, ThemeSpec};
use vellum_core::{ChartTheme, Margin, Palette};

/// Serializable chart description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ChartSpec {
    /// Chart type, e.g. `bar`, `donut`, `timeseries`
    #[serde(rename = "type")]
    pub chart_type: String,
    /// Raw data in any shape the normalizer understands
    pub data: Value,
    /// Theme variant
    pub variant: Option<String>,
    /// Width in pixels or `auto`
    pub width: Option<Dimension>,
    /// Height in pixels or `auto`
    pub height: Option<Dimension>,
    /// Margins around the plotting area
    pub margin: Option<Margin>,
    /// Legend placement
    pub legend: Option<LegendPosition>,
    /// Draw grid lines
    pub grid: Option<bool>,
    /// Palette name
    pub palette: Option<String>,
    /// Theme name
    pub theme: Option<String>,
    /// Size preset
    pub size: Option<SizePreset>,
    /// Entry animation classes
    pub animation: Option<bool>,
    /// Title above the plot
    pub title: Option<String>,

    /// Record field holding category labels
    pub key: Option<String>,
    /// Record field holding values
    pub value: Option<String>,
    /// Name for the series produced from records
    pub series_name: Option<String>,

    /// Bar: fraction of each slot left empty
    pub bar_gap: Option<f64>,
    /// Bar: fraction of each category left empty
    pub group_gap: Option<f64>,
    /// Pie: hole radius as a fraction of the outer radius
    pub inner_radius: Option<f64>,
    /// Pie: first segment angle in degrees
    pub start_angle: Option<f64>,
    /// Scatter: draw regression lines
    pub trend_line: Option<bool>,
    /// Scatter, line and area marker radius
    pub point_radius: Option<f64>,
}

impl Default for ChartSpec {
    fn default() -> Self {
        Self {
            chart_type: "bar".to_string(),
            data: Value::Null,
            variant: None,
            width: None,
            height: None,
            margin: None,
            legend: None,
            grid: None,
            palette: None,
            theme: None,
            size: None,
            animation: None,
            title: None,
            key: None,
            value: None,
            series_name: None,
            bar_gap: None,
            group_gap: None,
            inner_radius: None,
            start_angle: None,
            trend_line: None,
            point_radius: None,
        }
    }
}

fn unit_interval(field: &str, value: Option<f64>) -> Result<(), ConfigError> {
    match value {
        Some(v) if !(0.0..1.0).contains(&v) => {
            Err(ConfigError::invalid(field, format!("{v} is outside [0, 1)")))
        }
        _ => Ok(()),
    }
}

impl ChartSpec {
    /// Parse a YAML spec.
    pub fn from_yaml(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml_ng::from_str(text)?)
    }

    /// Parse a JSON spec.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Load a spec file; `.json` files parse as JSON, anything else as YAML.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let is_json = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("json"));
        tracing::debug!(path = %path.display(), json = is_json, "loading chart spec");
        if is_json {
            Self::from_json(&text)
        } else {
            Self::from_yaml(&text)
        }
    }

    /// Check names and numeric ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let chart_type = self.chart_type.trim().to_ascii_lowercase();
        if !CHART_TYPES.contains(&chart_type.as_str()) {
            return Err(ConfigError::invalid(
                "type",
                format!("`{}` is not one of {}", self.chart_type, CHART_TYPES.join(", ")),
            ));
        }
        if let Some(name) = &self.palette {
            if Palette::named(name).is_none() {
                return Err(ConfigError::UnknownPalette(name.clone()));
            }
        }
        if let Some(name) = &self.theme {
            if ChartTheme::named(name).is_none() {
                return Err(ConfigError::invalid(
                    "theme",
                    format!("`{name}` is not `light` or `dark`"),
                ));
            }
        }
        unit_interval("bar_gap", self.bar_gap)?;
        unit_interval("group_gap", self.group_gap)?;
        unit_interval("inner_radius", self.inner_radius)?;
        if let Some(r) = self.point_radius.filter(|r| !r.is_finite() || *r < 0.0) {
            return Err(ConfigError::invalid("point_radius", format!("{r} is negative")));
        }
        if let Some(m) = self.margin {
            if [m.top, m.right, m.bottom, m.left].iter().any(|v| *v < 0.0) {
                return Err(ConfigError::invalid("margin", "margins must be non-negative"));
            }
            let too_small = |dim: Option<Dimension>, needed: f64| {
                matches!(dim, Some(Dimension::Pixels(px)) if px < needed)
            };
            if too_small(self.width, m.horizontal()) || too_small(self.height, m.vertical()) {
                return Err(ConfigError::invalid("margin", "margins exceed the chart size"));
            }
        }
        if self.key.is_some() != self.value.is_some() {
            return Err(ConfigError::invalid(
                if self.key.is_some() { "value" } else { "key" },
                "`key` and `value` must be given together",
            ));
        }
        Ok(())
    }

    /// Theming input derived from the spec.
    #[must_use]
    pub fn theme_spec(&self) -> ThemeSpec {
        ThemeSpec {
            variant: self.variant.clone(),
            size: self.size,
            palette: self.palette.clone(),
            theme: self.theme.clone(),
            grid: self.grid,
            legend: self.legend.map(LegendPosition::is_visible),
            animation: self.animation,
        }
    }

    /// Normalizer options derived from the spec.
    #[must_use]
    pub fn normalize_options(&self) -> NormalizeOptions {
        let mut options = NormalizeOptions::default();
        if let (Some(key), Some(value)) = (&self.key, &self.value) {
            options = options.mapping(key.clone(), value.clone());
        }
        if let Some(name) = &self.series_name {
            options = options.series_name(name.clone());
        }
        options
    }

    fn apply_kind_options(&self, kind: &mut ChartKind) {
        match kind {
            ChartKind::Bar(o) => {
                if let Some(v) = self.bar_gap {
                    o.bar_gap = v;
                }
                if let Some(v) = self.group_gap {
                    o.group_gap = v;
                }
            }
            ChartKind::Pie(o) => {
                if let Some(v) = self.inner_radius {
                    o.inner_radius = v;
                }
                if let Some(v) = self.start_angle {
                    o.start_angle = v;
                }
            }
            ChartKind::Scatter(o) => {
                if let Some(v) = self.trend_line {
                    o.trend_line = v;
                }
                if let Some(v) = self.point_radius {
                    o.point_radius = v;
                }
            }
            ChartKind::Line(o) => {
                if let Some(v) = self.point_radius {
                    o.point_radius = v;
                }
            }
            ChartKind::Area(o) => {
                if let Some(v) = self.point_radius {
                    o.point_radius = v;
                }
            }
            ChartKind::Function(_) => {}
        }
    }

    /// Validate and construct the chart.
    pub fn build(&self) -> Result<Chart, ConfigError> {
        self.validate()?;
        let Dispatch { mut kind, shape } = resolve_type(&self.chart_type);
        self.apply_kind_options(&mut kind);

        let mut options = self.normalize_options();
        options.shape = shape;
        let data = normalize(&self.data, &options);

        let mut chart = Chart::new(kind, data).theme(&self.theme_spec());
        if let Some(width) = self.width {
            chart = chart.width(width);
        }
        if let Some(height) = self.height {
            chart = chart.height(height);
        }
        if let Some(margin) = self.margin {
            chart = chart.margin(margin);
        }
        if let Some(legend) = self.legend {
            chart = chart.legend(legend);
        }
        if let Some(title) = &self.title {
            chart = chart.title(title.clone());
        }
        tracing::debug!(chart_type = %self.chart_type, "built chart from spec");
        Ok(chart)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BAR_YAML: &str = r"
type: bar
legend: right
palette: vibrant
bar_gap: 0.2
data:
  labels: [A, B]
  series:
    - name: S
      values: [10, 20]
";

    #[test]
    fn test_yaml_roundtrip_into_chart() {
        let spec = ChartSpec::from_yaml(BAR_YAML).unwrap();
        assert_eq!(spec.legend, Some(LegendPosition::Right));
        assert_eq!(spec.bar_gap, Some(0.2));
        let mut chart = spec.build().unwrap();
        assert_eq!(chart.legend_position(), LegendPosition::Right);
        assert_eq!(chart.params().palette.name, "vibrant");
        let svg = chart.to_svg_string();
        assert_eq!(svg.matches("<rect").count(), 2);
    }

    #[test]
    fn test_json_spec_with_records() {
        let spec = ChartSpec::from_json(
            r#"{"type": "donut", "width": "auto", "data": [{"label": "a", "value": 1}, {"label": "b", "value": 3}]}"#,
        )
        .unwrap();
        assert_eq!(spec.width, Some(Dimension::Auto));
        let chart = spec.build().unwrap();
        assert_eq!(chart.kind().name(), "donut");
        assert_eq!(chart.pie_total(), 4.0);
    }

    #[test]
    fn test_legend_flag_forms() {
        let spec = ChartSpec::from_yaml("legend: false").unwrap();
        assert_eq!(spec.legend, Some(LegendPosition::None));
        let spec = ChartSpec::from_yaml("legend: none").unwrap();
        assert_eq!(spec.legend, Some(LegendPosition::None));
        let spec = ChartSpec::from_yaml("legend: true").unwrap();
        assert_eq!(spec.legend, Some(LegendPosition::Bottom));
    }

    #[test]
    fn test_unknown_palette() {
        let spec = ChartSpec {
            palette: Some("neon".into()),
            ..ChartSpec::default()
        };
        assert!(matches!(spec.validate(), Err(ConfigError::UnknownPalette(p)) if p == "neon"));
    }

    #[test]
    fn test_out_of_range_values() {
        let spec = ChartSpec {
            inner_radius: Some(1.5),
            ..ChartSpec::default()
        };
        let err = spec.validate().unwrap_err();
        assert!(err.to_string().contains("inner_radius"));

        let spec = ChartSpec {
            width: Some(Dimension::Pixels(40.0)),
            ..ChartSpec::default()
        };
        assert!(spec.validate().is_ok());
        let spec = ChartSpec {
            margin: Some(Margin::uniform(30.0)),
            ..spec
        };
        assert!(matches!(spec.validate(), Err(ConfigError::InvalidValue { field, .. }) if field == "margin"));
    }

    #[test]
    fn test_unknown_type_rejected() {
        let spec = ChartSpec {
            chart_type: "radar".into(),
            ..ChartSpec::default()
        };
        assert!(matches!(spec.validate(), Err(ConfigError::InvalidValue { field, .. }) if field == "type"));
    }

    #[test]
    fn test_unknown_field_rejected() {
        assert!(matches!(
            ChartSpec::from_yaml("colour: red"),
            Err(ConfigError::Yaml(_))
        ));
    }

    #[test]
    fn test_from_path_by_extension() {
        let dir = tempfile::tempdir().unwrap();
        let yaml = dir.path().join("chart.yaml");
        std::fs::write(&yaml, BAR_YAML).unwrap();
        assert_eq!(ChartSpec::from_path(&yaml).unwrap().chart_type, "bar");

        let json = dir.path().join("chart.json");
        std::fs::write(&json, r#"{"type": "line"}"#).unwrap();
        assert_eq!(ChartSpec::from_path(&json).unwrap().chart_type, "line");

        assert!(matches!(
            ChartSpec::from_path(dir.path().join("missing.yaml")),
            Err(ConfigError::Io(_))
        ));
    }
}
