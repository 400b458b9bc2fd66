//! Chart kinds and the shared render dispatcher.
//!
//! Each kind owns its layout algorithm. [`ChartKind::render`] turns a
//! [`RenderContext`] into SVG elements; the orchestrator draws grid and axes
//! around them from [`ChartKind::frame`].

pub mod area;
pub mod bar;
pub mod function;
pub mod line;
pub mod pie;
pub mod scatter;

pub use area::{AreaMode, AreaOptions};
pub use bar::{BarMode, BarOptions};
pub use function::{FunctionOptions, PlotFn};
pub use line::LineOptions;
pub use pie::PieOptions;
pub use scatter::ScatterOptions;

use crate::data::{ChartData, Series};
use crate::scale::{stacked_range, Scale, Scale2D, ValueRange};
use std::collections::BTreeSet;
use vellum_core::{fmt_exact, ChartTheme, Element, Palette, Rect};

/// Closed set of chart kinds with their options.
#[derive(Debug, Clone)]
pub enum ChartKind {
    /// Grouped or stacked bars
    Bar(BarOptions),
    /// Pie or donut
    Pie(PieOptions),
    /// Overlapping or stacked filled areas
    Area(AreaOptions),
    /// Stroke-only lines with markers
    Line(LineOptions),
    /// Free x/y points
    Scatter(ScatterOptions),
    /// Sampled function plot
    Function(FunctionOptions),
}

impl Default for ChartKind {
    fn default() -> Self {
        Self::Bar(BarOptions::default())
    }
}

/// Axis layout a kind wants drawn behind its series.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Frame {
    /// No grid or axes (pie)
    None,
    /// Category labels on x, values on y
    Category {
        /// Value scale
        scale: Scale,
        /// Labels sit at bucket centers instead of endpoints
        centered: bool,
    },
    /// Two numeric axes
    Numeric(Scale2D),
}

/// A visible series with its resolved color.
#[derive(Debug, Clone, PartialEq)]
pub struct ActiveSeries<'a> {
    /// Position in the full series list; drives palette assignment
    pub index: usize,
    /// The series
    pub series: &'a Series,
    /// Resolved fill/stroke color
    pub color: String,
}

/// Everything a generator needs to lay out one render.
#[derive(Debug, Clone)]
pub struct RenderContext<'a> {
    /// Canonical data
    pub data: &'a ChartData,
    /// Visible series in draw order
    pub active: Vec<ActiveSeries<'a>>,
    /// Hidden names (series names, or labels for pie)
    pub hidden: &'a BTreeSet<String>,
    /// Plotting area
    pub area: Rect,
    /// Value range for category kinds
    pub range: ValueRange,
    /// Palette for unset colors
    pub palette: &'static Palette,
    /// Chrome colors
    pub theme: &'a ChartTheme,
}

impl<'a> RenderContext<'a> {
    /// Build a context, resolving active series and their colors.
    pub fn new(
        kind: &ChartKind,
        data: &'a ChartData,
        hidden: &'a BTreeSet<String>,
        area: Rect,
        palette: &'static Palette,
        theme: &'a ChartTheme,
    ) -> Self {
        let active = active_series(kind, data, hidden, palette);
        let range = kind.value_range(data, &active);
        Self {
            data,
            active,
            hidden,
            area,
            range,
            palette,
            theme,
        }
    }

    /// Category scale over the context's area and range.
    #[must_use]
    pub const fn scale(&self) -> Scale {
        Scale::new(self.area, self.range)
    }

    /// Number of categories.
    #[must_use]
    pub fn categories(&self) -> usize {
        self.data.labels.len()
    }

    /// Label at a category index.
    #[must_use]
    pub fn label(&self, index: usize) -> Option<&str> {
        self.data.labels.get(index).map(String::as_str)
    }
}

/// Series that are not hidden, with resolved colors.
///
/// Pie charts hide labels rather than series, so every series is active.
pub fn active_series<'a>(
    kind: &ChartKind,
    data: &'a ChartData,
    hidden: &BTreeSet<String>,
    palette: &Palette,
) -> Vec<ActiveSeries<'a>> {
    data.series
        .iter()
        .enumerate()
        .filter(|(_, s)| kind.hides_labels() || !hidden.contains(&s.name))
        .map(|(index, series)| ActiveSeries {
            index,
            series,
            color: series
                .color
                .clone()
                .unwrap_or_else(|| palette.color(index).to_string()),
        })
        .collect()
}

impl ChartKind {
    /// Short kind name used in classes and logs.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Bar(o) => match o.mode {
                BarMode::Grouped => "bar",
                BarMode::Stacked => "stacked-bar",
            },
            Self::Pie(o) => {
                if o.inner_radius > 0.0 {
                    "donut"
                } else {
                    "pie"
                }
            }
            Self::Area(o) => match o.mode {
                AreaMode::Overlap => "area",
                AreaMode::Stacked => "stacked-area",
            },
            Self::Line(_) => "line",
            Self::Scatter(_) => "scatter",
            Self::Function(_) => "function",
        }
    }

    /// Whether the legend and hidden set refer to category labels.
    #[must_use]
    pub const fn hides_labels(&self) -> bool {
        matches!(self, Self::Pie(_))
    }

    /// Whether the kind plots data series at all.
    #[must_use]
    pub const fn needs_data(&self) -> bool {
        !matches!(self, Self::Function(_))
    }

    /// Value range for the active series.
    pub fn value_range(&self, data: &ChartData, active: &[ActiveSeries<'_>]) -> ValueRange {
        let categories = data.labels.len();
        let series = active.iter().map(|a| a.series);
        match self {
            Self::Bar(BarOptions {
                mode: BarMode::Stacked,
                ..
            })
            | Self::Area(AreaOptions {
                mode: AreaMode::Stacked,
                ..
            }) => stacked_range(series, categories),
            Self::Bar(_) | Self::Area(_) | Self::Line(_) => {
                ValueRange::from_values(series.flat_map(|s| s.ys().take(categories)))
            }
            Self::Pie(_) => ValueRange::from_values(series.flat_map(Series::ys)),
            Self::Scatter(_) => scatter::domains(active).1,
            Self::Function(o) => o.y_domain(),
        }
    }

    /// Axis layout for this kind.
    #[must_use]
    pub fn frame(&self, ctx: &RenderContext<'_>) -> Frame {
        match self {
            Self::Pie(_) => Frame::None,
            Self::Bar(_) => Frame::Category {
                scale: ctx.scale(),
                centered: true,
            },
            Self::Area(_) | Self::Line(_) => Frame::Category {
                scale: ctx.scale(),
                centered: false,
            },
            Self::Scatter(_) => {
                let (x, y) = scatter::domains(&ctx.active);
                Frame::Numeric(Scale2D::new(ctx.area, x, y))
            }
            Self::Function(o) => Frame::Numeric(Scale2D::new(ctx.area, o.x_domain(), ctx.range)),
        }
    }

    /// Generate the series geometry.
    #[must_use]
    pub fn render(&self, ctx: &RenderContext<'_>) -> Vec<Element> {
        let elements = match self {
            Self::Bar(o) => bar::render(o, ctx),
            Self::Pie(o) => pie::render(o, ctx),
            Self::Area(o) => area::render(o, ctx),
            Self::Line(o) => line::render(o, ctx),
            Self::Scatter(o) => scatter::render(o, ctx),
            Self::Function(o) => function::render(o, ctx),
        };
        tracing::trace!(
            kind = self.name(),
            elements = elements.len(),
            active = ctx.active.len(),
            "generated series geometry"
        );
        elements
    }
}

/// Stamp the interaction attributes shared by every data mark.
pub(crate) fn data_mark(
    element: Element,
    id: String,
    series: &str,
    category: Option<&str>,
    value: f64,
) -> Element {
    let mut element = element
        .attr("id", id)
        .attr("data-series", series)
        .attr("data-value", fmt_exact(value));
    if let Some(category) = category {
        element.set_attr("data-category", category);
    }
    element
}

/// Series group wrapper.
pub(crate) fn series_group(class: &str, active: &ActiveSeries<'_>) -> Element {
    Element::new("g")
        .class(class)
        .attr("data-series", &active.series.name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use vellum_core::theme::PALETTES;

    #[test]
    fn test_active_series_keeps_palette_index() {
        let data = ChartData::new(
            ["A"],
            [
                Series::new("a", [1.0]),
                Series::new("b", [2.0]),
                Series::new("c", [3.0]).color("#000000"),
            ],
        );
        let hidden: BTreeSet<String> = ["a".to_string()].into();
        let kind = ChartKind::default();
        let active = active_series(&kind, &data, &hidden, &PALETTES[0]);
        assert_eq!(active.len(), 2);
        assert_eq!(active[0].index, 1);
        assert_eq!(active[0].color, PALETTES[0].color(1));
        assert_eq!(active[1].color, "#000000");
    }

    #[test]
    fn test_pie_ignores_series_hiding() {
        let data = ChartData::new(["A"], [Series::new("a", [1.0])]);
        let hidden: BTreeSet<String> = ["a".to_string()].into();
        let kind = ChartKind::Pie(PieOptions::default());
        assert_eq!(active_series(&kind, &data, &hidden, &PALETTES[0]).len(), 1);
    }

    #[test]
    fn test_kind_names() {
        assert_eq!(ChartKind::default().name(), "bar");
        assert_eq!(ChartKind::Pie(PieOptions::donut()).name(), "donut");
        assert_eq!(
            ChartKind::Area(AreaOptions {
                mode: AreaMode::Stacked,
                ..AreaOptions::default()
            })
            .name(),
            "stacked-area"
        );
    }

    #[test]
    fn test_value_range_truncates_to_labels() {
        let data = ChartData::new(["A", "B"], [Series::new("s", [10.0, 20.0, 1000.0])]);
        let hidden = BTreeSet::new();
        let kind = ChartKind::default();
        let active = active_series(&kind, &data, &hidden, &PALETTES[0]);
        assert_eq!(kind.value_range(&data, &active), ValueRange::new(9.0, 21.0));
    }
}
