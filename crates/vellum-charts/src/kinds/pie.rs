//! Pie and donut geometry.
//!
//! Segments are walked clockwise from `start_angle` (degrees, -90 is 12
//! o'clock). Shares are taken of the visible total only; hidden labels are
//! removed from the total rather than drawn as zero-width wedges.

use super::{data_mark, RenderContext};
use crate::data::ChartData;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt::Write as _;
use vellum_core::{fmt_num, Color, Element, Point};

/// Sweeps at or above this are drawn as a full ring.
const FULL_CIRCLE: f64 = 360.0 - 1e-9;
/// Radial position of segment labels between inner and outer radius.
const LABEL_POSITION: f64 = 0.65;

/// Pie options.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PieOptions {
    /// Inner radius as a fraction of the outer radius; 0 is a full pie
    pub inner_radius: f64,
    /// Angle of the first segment's leading edge, in degrees
    pub start_angle: f64,
    /// Draw percentage labels
    pub show_labels: bool,
    /// Minimum percentage that gets a label
    pub label_threshold: f64,
}

impl Default for PieOptions {
    fn default() -> Self {
        Self {
            inner_radius: 0.0,
            start_angle: -90.0,
            show_labels: true,
            label_threshold: 5.0,
        }
    }
}

impl PieOptions {
    /// Donut with a half-radius hole.
    #[must_use]
    pub fn donut() -> Self {
        Self {
            inner_radius: 0.5,
            ..Self::default()
        }
    }
}

/// One laid-out segment.
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    /// Position in the value list; drives palette assignment
    pub index: usize,
    /// Segment label
    pub label: String,
    /// Raw value
    pub value: f64,
    /// Leading edge angle in degrees
    pub start: f64,
    /// Sweep in degrees
    pub sweep: f64,
    /// Share of the visible total, 0..=100
    pub percent: f64,
}

/// Label for the value at `index`; unlabeled values use their 1-based position.
fn segment_label(data: &ChartData, index: usize) -> String {
    data.labels
        .get(index)
        .cloned()
        .unwrap_or_else(|| (index + 1).to_string())
}

/// `(index, label, value)` for each visible, positive value of the first series.
fn visible(data: &ChartData, hidden: &BTreeSet<String>) -> Vec<(usize, String, f64)> {
    let Some(series) = data.series.first() else {
        return Vec::new();
    };
    series
        .ys()
        .enumerate()
        .filter(|(_, v)| v.is_finite() && *v > 0.0)
        .map(|(i, v)| (i, segment_label(data, i), v))
        .filter(|(_, label, _)| !hidden.contains(label))
        .collect()
}

/// Sum of visible values.
#[must_use]
pub fn total(data: &ChartData, hidden: &BTreeSet<String>) -> f64 {
    visible(data, hidden).iter().map(|(_, _, v)| v).sum()
}

/// Segment labels in value order; these are the pie's legend entries.
#[must_use]
pub fn labels(data: &ChartData) -> Vec<String> {
    data.series
        .first()
        .map(|s| (0..s.len()).map(|i| segment_label(data, i)).collect())
        .unwrap_or_default()
}

/// Lay out segments. Empty when the visible total is zero.
#[must_use]
pub fn segments(data: &ChartData, hidden: &BTreeSet<String>, start_angle: f64) -> Vec<Segment> {
    let values = visible(data, hidden);
    let total: f64 = values.iter().map(|(_, _, v)| v).sum();
    if total <= 0.0 {
        return Vec::new();
    }
    let mut current = start_angle;
    values
        .into_iter()
        .map(|(index, label, value)| {
            let sweep = value / total * 360.0;
            let segment = Segment {
                index,
                label,
                value,
                start: current,
                sweep,
                percent: value / total * 100.0,
            };
            current += sweep;
            segment
        })
        .collect()
}

/// SVG path for a wedge (`inner == 0`) or ring segment.
///
/// The large-arc flag is set for sweeps over 180 degrees. A full sweep is
/// drawn as two half arcs, since a single arc with equal endpoints renders
/// nothing.
#[must_use]
pub fn arc_path(center: Point, outer: f64, inner: f64, start: f64, sweep: f64) -> String {
    let mut d = String::new();
    let p = |r: f64, angle: f64| {
        let pt = Point::on_circle(center, r, angle);
        format!("{} {}", fmt_num(pt.x), fmt_num(pt.y))
    };
    let (ro, ri) = (fmt_num(outer), fmt_num(inner));

    if sweep >= FULL_CIRCLE {
        let _ = write!(
            d,
            "M {a} A {ro} {ro} 0 1 1 {b} A {ro} {ro} 0 1 1 {a} Z",
            a = p(outer, start),
            b = p(outer, start + 180.0),
        );
        if inner > 0.0 {
            let _ = write!(
                d,
                " M {a} A {ri} {ri} 0 1 0 {b} A {ri} {ri} 0 1 0 {a} Z",
                a = p(inner, start),
                b = p(inner, start + 180.0),
            );
        }
        return d;
    }

    let end = start + sweep;
    let large = u8::from(sweep > 180.0);
    if inner > 0.0 {
        let _ = write!(
            d,
            "M {o0} A {ro} {ro} 0 {large} 1 {o1} L {i1} A {ri} {ri} 0 {large} 0 {i0} Z",
            o0 = p(outer, start),
            o1 = p(outer, end),
            i1 = p(inner, end),
            i0 = p(inner, start),
        );
    } else {
        let _ = write!(
            d,
            "M {c} L {o0} A {ro} {ro} 0 {large} 1 {o1} Z",
            c = format_args!("{} {}", fmt_num(center.x), fmt_num(center.y)),
            o0 = p(outer, start),
            o1 = p(outer, end),
        );
    }
    d
}

pub(crate) fn render(options: &PieOptions, ctx: &RenderContext<'_>) -> Vec<Element> {
    let segments = segments(ctx.data, ctx.hidden, options.start_angle);
    if segments.is_empty() {
        return Vec::new();
    }
    let series_name = ctx.data.series.first().map_or("", |s| s.name.as_str());
    let center = ctx.area.center();
    let outer = (ctx.area.width.min(ctx.area.height) / 2.0).max(0.0);
    let inner = outer * options.inner_radius.clamp(0.0, 0.95);

    let mut group = Element::new("g").class("pie").attr("data-series", series_name);
    let mut labels = Element::new("g").class("pie-labels");
    for seg in &segments {
        let color = ctx.palette.color(seg.index);
        let mut path = Element::new("path")
            .class("pie-segment")
            .attr("d", arc_path(center, outer, inner, seg.start, seg.sweep))
            .attr("fill", color)
            .attr("data-label", &seg.label)
            .attr("data-percent", seg.percent)
            .attr("data-start-angle", seg.start)
            .attr("data-sweep", seg.sweep)
            .attr("data-cx", center.x)
            .attr("data-cy", center.y)
            .attr("data-r", outer)
            .attr("data-inner", inner);
        if inner > 0.0 && seg.sweep >= FULL_CIRCLE {
            path.set_attr("fill-rule", "evenodd");
        }
        group.add(data_mark(
            path,
            format!("pie-{}", seg.index),
            series_name,
            Some(seg.label.as_str()),
            seg.value,
        ));

        if options.show_labels && seg.percent > options.label_threshold {
            let radius = (outer - inner).mul_add(LABEL_POSITION, inner);
            let at = Point::on_circle(center, radius, seg.sweep.mul_add(0.5, seg.start));
            let text_color = Color::from_hex(color)
                .map_or(Color::WHITE, |c| c.readable_text())
                .to_hex();
            labels.add(
                Element::new("text")
                    .class("pie-label")
                    .attr("x", at.x)
                    .attr("y", at.y)
                    .attr("text-anchor", "middle")
                    .attr("dominant-baseline", "middle")
                    .attr("font-size", ctx.theme.font_size)
                    .attr("fill", text_color)
                    .text(format!("{:.0}%", seg.percent)),
            );
        }
    }
    vec![group, labels]
}
