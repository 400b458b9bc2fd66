//! Bar geometry: grouped and stacked layouts.

use super::{data_mark, series_group, RenderContext};
use serde::{Deserialize, Serialize};
use vellum_core::Element;

/// Bar layout mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BarMode {
    /// Series side by side within each category
    #[default]
    Grouped,
    /// Series stacked on top of each other
    Stacked,
}

/// Bar options.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BarOptions {
    /// Layout mode
    pub mode: BarMode,
    /// Fraction of each bar slot left empty
    pub bar_gap: f64,
    /// Fraction of each category left empty between groups
    pub group_gap: f64,
}

impl Default for BarOptions {
    fn default() -> Self {
        Self {
            mode: BarMode::Grouped,
            bar_gap: 0.1,
            group_gap: 0.2,
        }
    }
}

impl BarOptions {
    /// Stacked bars with default gaps.
    #[must_use]
    pub fn stacked() -> Self {
        Self {
            mode: BarMode::Stacked,
            ..Self::default()
        }
    }
}

/// A laid-out bar in pixel space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BarRect {
    /// Series position among active series
    pub series: usize,
    /// Category index
    pub category: usize,
    /// Left edge
    pub x: f64,
    /// Top edge
    pub y: f64,
    /// Width
    pub width: f64,
    /// Height
    pub height: f64,
    /// Data value
    pub value: f64,
}

/// Compute bar rectangles without building elements.
#[must_use]
pub fn layout(options: &BarOptions, ctx: &RenderContext<'_>) -> Vec<BarRect> {
    let categories = ctx.categories();
    let series_count = ctx.active.len();
    if categories == 0 || series_count == 0 {
        return Vec::new();
    }

    let scale = ctx.scale();
    let area = ctx.area;
    let category_width = area.width / categories as f64;
    let group_width = category_width * (1.0 - options.group_gap);
    let group_offset = category_width * options.group_gap / 2.0;
    let mut bars = Vec::new();

    match options.mode {
        BarMode::Grouped => {
            let slot = group_width / series_count as f64;
            let width = slot * (1.0 - options.bar_gap);
            for (s, active) in ctx.active.iter().enumerate() {
                for category in 0..categories {
                    let Some(value) = active.series.value_at(category).filter(|v| v.is_finite())
                    else {
                        continue;
                    };
                    let height = scale.value_to_height(value).max(0.0);
                    bars.push(BarRect {
                        series: s,
                        category,
                        x: area.x
                            + category as f64 * category_width
                            + group_offset
                            + s as f64 * slot
                            + slot * options.bar_gap / 2.0,
                        y: area.bottom() - height,
                        width,
                        height,
                        value,
                    });
                }
            }
        }
        BarMode::Stacked => {
            let mut cumulative = vec![0.0; categories];
            for (s, active) in ctx.active.iter().enumerate() {
                for (category, stacked) in cumulative.iter_mut().enumerate() {
                    let Some(value) = active.series.value_at(category).filter(|v| v.is_finite())
                    else {
                        continue;
                    };
                    let height = scale.magnitude_to_height(value.max(0.0));
                    *stacked += height;
                    bars.push(BarRect {
                        series: s,
                        category,
                        x: area.x + category as f64 * category_width + group_offset,
                        y: area.bottom() - *stacked,
                        width: group_width,
                        height,
                        value,
                    });
                }
            }
        }
    }
    bars
}

pub(crate) fn render(options: &BarOptions, ctx: &RenderContext<'_>) -> Vec<Element> {
    let bars = layout(options, ctx);
    let mut groups: Vec<Element> = ctx
        .active
        .iter()
        .map(|active| series_group("bar-series", active))
        .collect();

    for bar in bars {
        let active = &ctx.active[bar.series];
        let rect = Element::new("rect")
            .class("bar")
            .attr("x", bar.x)
            .attr("y", bar.y)
            .attr("width", bar.width)
            .attr("height", bar.height)
            .attr("fill", &active.color);
        groups[bar.series].add(data_mark(
            rect,
            format!("bar-{}-{}", active.index, bar.category),
            &active.series.name,
            ctx.label(bar.category),
            bar.value,
        ));
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{ChartData, Series};
    use crate::kinds::ChartKind;
    use std::collections::BTreeSet;
    use vellum_core::{theme::PALETTES, ChartTheme, Rect};

    fn ctx<'a>(
        kind: &ChartKind,
        data: &'a ChartData,
        hidden: &'a BTreeSet<String>,
        theme: &'a ChartTheme,
    ) -> RenderContext<'a> {
        RenderContext::new(
            kind,
            data,
            hidden,
            Rect::new(50.0, 20.0, 430.0, 240.0),
            &PALETTES[0],
            theme,
        )
    }

    #[test]
    fn test_grouped_two_bars_taller_for_larger_value() {
        let data = ChartData::new(["A", "B"], [Series::new("S", [10.0, 20.0])]);
        let (hidden, theme) = (BTreeSet::new(), ChartTheme::light());
        let options = BarOptions::default();
        let kind = ChartKind::Bar(options);
        let bars = layout(&options, &ctx(&kind, &data, &hidden, &theme));
        assert_eq!(bars.len(), 2);
        assert!(bars[1].height > bars[0].height);
        // range 9..21 over 240px
        assert!((bars[0].height - 20.0).abs() < 1e-9);
        assert!((bars[1].height - 220.0).abs() < 1e-9);
        assert!((bars[1].y - 40.0).abs() < 1e-9);
    }

    #[test]
    fn test_grouped_bars_share_category_without_overlap() {
        let data = ChartData::new(
            ["A"],
            [Series::new("a", [1.0]), Series::new("b", [2.0])],
        );
        let (hidden, theme) = (BTreeSet::new(), ChartTheme::light());
        let options = BarOptions::default();
        let kind = ChartKind::Bar(options);
        let bars = layout(&options, &ctx(&kind, &data, &hidden, &theme));
        assert_eq!(bars.len(), 2);
        assert!(bars[0].x + bars[0].width < bars[1].x);
        assert!(bars[1].x + bars[1].width <= 50.0 + 430.0);
    }

    #[test]
    fn test_stacked_top_equals_sum() {
        let data = ChartData::new(
            ["A", "B"],
            [Series::new("a", [10.0, 5.0]), Series::new("b", [20.0, 15.0])],
        );
        let (hidden, theme) = (BTreeSet::new(), ChartTheme::light());
        let options = BarOptions::stacked();
        let kind = ChartKind::Bar(options);
        let c = ctx(&kind, &data, &hidden, &theme);
        let bars = layout(&options, &c);
        let scale = c.scale();
        for (category, sum) in [(0, 30.0), (1, 20.0)] {
            let top = bars
                .iter()
                .filter(|b| b.category == category)
                .map(|b| b.y)
                .fold(f64::INFINITY, f64::min);
            assert!((top - scale.value_to_y(sum)).abs() < 1e-9);
        }
    }

    #[test]
    fn test_short_series_skips_missing_categories() {
        let data = ChartData::new(["A", "B", "C"], [Series::new("S", [1.0])]);
        let (hidden, theme) = (BTreeSet::new(), ChartTheme::light());
        let options = BarOptions::default();
        let kind = ChartKind::Bar(options);
        assert_eq!(layout(&options, &ctx(&kind, &data, &hidden, &theme)).len(), 1);
    }

    #[test]
    fn test_long_series_truncated() {
        let data = ChartData::new(["A"], [Series::new("S", [1.0, 2.0, 3.0])]);
        let (hidden, theme) = (BTreeSet::new(), ChartTheme::light());
        let options = BarOptions::stacked();
        let kind = ChartKind::Bar(options);
        assert_eq!(layout(&options, &ctx(&kind, &data, &hidden, &theme)).len(), 1);
    }

    #[test]
    fn test_no_categories_renders_nothing() {
        let data = ChartData::new(Vec::<String>::new(), [Series::new("S", [1.0])]);
        let (hidden, theme) = (BTreeSet::new(), ChartTheme::light());
        let kind = ChartKind::default();
        let elements = kind.render(&ctx(&kind, &data, &hidden, &theme));
        assert!(elements.iter().all(|g| g.find_all("rect").is_empty()));
    }

    #[test]
    fn test_render_marks_carry_interaction_attrs() {
        let data = ChartData::new(["A"], [Series::new("S", [4.0])]);
        let (hidden, theme) = (BTreeSet::new(), ChartTheme::light());
        let kind = ChartKind::default();
        let groups = kind.render(&ctx(&kind, &data, &hidden, &theme));
        let rect = groups[0].find_all("rect")[0];
        assert_eq!(rect.get_attr("id"), Some("bar-0-0"));
        assert_eq!(rect.get_attr("data-series"), Some("S"));
        assert_eq!(rect.get_attr("data-category"), Some("A"));
        assert_eq!(rect.num_attr("data-value"), Some(4.0));
    }
}
