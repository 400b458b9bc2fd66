//! Scatter geometry with optional least-squares trend lines.

use super::{data_mark, series_group, ActiveSeries, RenderContext};
use crate::scale::{Scale2D, ValueRange};
use serde::{Deserialize, Serialize};
use vellum_core::Element;

/// Scatter options.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScatterOptions {
    /// Point radius
    pub point_radius: f64,
    /// Draw a per-series regression line
    pub trend_line: bool,
}

impl Default for ScatterOptions {
    fn default() -> Self {
        Self {
            point_radius: 4.0,
            trend_line: false,
        }
    }
}

/// Independently padded x and y domains over all active points.
#[must_use]
pub fn domains(active: &[ActiveSeries<'_>]) -> (ValueRange, ValueRange) {
    let points: Vec<_> = active.iter().flat_map(|a| a.series.xy()).collect();
    (
        ValueRange::from_values(points.iter().map(|p| p.x)),
        ValueRange::from_values(points.iter().map(|p| p.y)),
    )
}

/// Closed-form least squares fit. Returns `(slope, intercept)`.
///
/// `None` for fewer than two points or when every x is equal.
#[must_use]
pub fn linear_regression(points: &[(f64, f64)]) -> Option<(f64, f64)> {
    if points.len() < 2 {
        return None;
    }
    let n = points.len() as f64;
    let (sx, sy, sxy, sxx) = points.iter().fold((0.0, 0.0, 0.0, 0.0), |acc, (x, y)| {
        (acc.0 + x, acc.1 + y, x.mul_add(*y, acc.2), x.mul_add(*x, acc.3))
    });
    let denom = n.mul_add(sxx, -(sx * sx));
    if denom.abs() < f64::EPSILON {
        return None;
    }
    let slope = n.mul_add(sxy, -(sx * sy)) / denom;
    let intercept = slope.mul_add(-sx, sy) / n;
    Some((slope, intercept))
}

pub(crate) fn render(options: &ScatterOptions, ctx: &RenderContext<'_>) -> Vec<Element> {
    let (x, y) = domains(&ctx.active);
    let scale = Scale2D::new(ctx.area, x, y);

    ctx.active
        .iter()
        .filter(|a| !a.series.is_empty())
        .map(|active| {
            let mut group = series_group("scatter-series", active);
            let points: Vec<_> = active
                .series
                .xy()
                .into_iter()
                .filter(|p| p.x.is_finite() && p.y.is_finite())
                .collect();

            for (i, point) in points.iter().enumerate() {
                let at = scale.map(point.x, point.y);
                let mut circle = Element::new("circle")
                    .class("point")
                    .attr("cx", at.x)
                    .attr("cy", at.y)
                    .attr("r", options.point_radius)
                    .attr("fill", &active.color)
                    .attr("data-x", point.x);
                if let Some(label) = &point.label {
                    circle.set_attr("data-label", label);
                }
                group.add(data_mark(
                    circle,
                    format!("point-{}-{i}", active.index),
                    &active.series.name,
                    point.label.as_deref(),
                    point.y,
                ));
            }

            if options.trend_line {
                let xy: Vec<(f64, f64)> = points.iter().map(|p| (p.x, p.y)).collect();
                if let Some((slope, intercept)) = linear_regression(&xy) {
                    let lo = xy.iter().map(|p| p.0).fold(f64::INFINITY, f64::min);
                    let hi = xy.iter().map(|p| p.0).fold(f64::NEG_INFINITY, f64::max);
                    let a = scale.map(lo, slope.mul_add(lo, intercept));
                    let b = scale.map(hi, slope.mul_add(hi, intercept));
                    group.add(
                        Element::new("line")
                            .class("trend-line")
                            .attr("x1", a.x)
                            .attr("y1", a.y)
                            .attr("x2", b.x)
                            .attr("y2", b.y)
                            .attr("stroke", &active.color)
                            .attr("stroke-dasharray", "4 4")
                            .attr("data-slope", slope),
                    );
                }
            }
            group
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{ChartData, DataPoint, Series};
    use crate::kinds::ChartKind;
    use std::collections::BTreeSet;
    use vellum_core::{theme::PALETTES, ChartTheme, Rect};

    #[test]
    fn test_regression_exact_line() {
        let pts = [(0.0, 1.0), (1.0, 3.0), (2.0, 5.0)];
        let (m, b) = linear_regression(&pts).unwrap();
        assert!((m - 2.0).abs() < 1e-9);
        assert!((b - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_regression_degenerate() {
        assert_eq!(linear_regression(&[(1.0, 1.0)]), None);
        assert_eq!(linear_regression(&[(1.0, 1.0), (1.0, 5.0)]), None);
    }

    #[test]
    fn test_render_points_and_trend() {
        let data = ChartData {
            labels: Vec::new(),
            series: vec![Series::points(
                "S",
                [
                    DataPoint::new(1.0, 2.0).label("first"),
                    DataPoint::new(2.0, 4.0),
                    DataPoint::new(3.0, 6.5),
                ],
            )],
        };
        let hidden = BTreeSet::new();
        let theme = ChartTheme::light();
        let kind = ChartKind::Scatter(ScatterOptions {
            trend_line: true,
            ..ScatterOptions::default()
        });
        let ctx = RenderContext::new(
            &kind,
            &data,
            &hidden,
            Rect::new(0.0, 0.0, 100.0, 100.0),
            &PALETTES[0],
            &theme,
        );
        let groups = kind.render(&ctx);
        assert_eq!(groups[0].find_all("circle").len(), 3);
        assert_eq!(groups[0].find_by_class("trend-line").len(), 1);
        let first = groups[0].find_all("circle")[0];
        assert_eq!(first.get_attr("data-category"), Some("first"));
    }

    #[test]
    fn test_domains_are_independent() {
        let s = Series::points("S", [DataPoint::new(100.0, 1.0), DataPoint::new(200.0, 2.0)]);
        let active = vec![ActiveSeries {
            index: 0,
            series: &s,
            color: "#000".to_string(),
        }];
        let (x, y) = domains(&active);
        assert_eq!(x, ValueRange::new(90.0, 210.0));
        assert_eq!(y, ValueRange::new(0.0, 3.0));
    }
}
