//! Filled area geometry: overlapping and stacked bands.

use super::{data_mark, series_group, RenderContext};
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;
use vellum_core::{fmt_num, Element, Point};

/// Area layout mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AreaMode {
    /// Each series filled down to the baseline
    #[default]
    Overlap,
    /// Each series filled down to the band below it
    Stacked,
}

/// Area options.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AreaOptions {
    /// Layout mode
    pub mode: AreaMode,
    /// Fill opacity
    pub fill_opacity: f64,
    /// Outline width
    pub stroke_width: f64,
    /// Marker radius for hover targets
    pub point_radius: f64,
}

impl Default for AreaOptions {
    fn default() -> Self {
        Self {
            mode: AreaMode::Overlap,
            fill_opacity: 0.35,
            stroke_width: 2.0,
            point_radius: 3.0,
        }
    }
}

impl AreaOptions {
    /// Stacked areas with default styling.
    #[must_use]
    pub fn stacked() -> Self {
        Self {
            mode: AreaMode::Stacked,
            ..Self::default()
        }
    }
}

/// A filled band between a top edge and a bottom edge.
#[derive(Debug, Clone, PartialEq)]
pub struct Band {
    /// Series position among active series
    pub series: usize,
    /// Top edge, left to right
    pub top: Vec<Point>,
    /// Bottom edge, left to right
    pub bottom: Vec<Point>,
    /// Raw value at each top point
    pub values: Vec<f64>,
}

impl Band {
    /// Closed outline: top edge forward, bottom edge back.
    #[must_use]
    pub fn fill_path(&self) -> String {
        let mut d = polyline(&self.top);
        for p in self.bottom.iter().rev() {
            let _ = write!(d, " L {} {}", fmt_num(p.x), fmt_num(p.y));
        }
        d.push_str(" Z");
        d
    }

    /// Open path along the top edge.
    #[must_use]
    pub fn line_path(&self) -> String {
        polyline(&self.top)
    }
}

/// `M x y L x y ...` through the given points.
pub(crate) fn polyline(points: &[Point]) -> String {
    let mut d = String::new();
    for (i, p) in points.iter().enumerate() {
        let cmd = if i == 0 { "M" } else { " L" };
        let _ = write!(d, "{cmd} {} {}", fmt_num(p.x), fmt_num(p.y));
    }
    d
}

/// Compute bands for the active series.
#[must_use]
pub fn bands(options: &AreaOptions, ctx: &RenderContext<'_>) -> Vec<Band> {
    let n = ctx.categories();
    if n == 0 {
        return Vec::new();
    }
    let scale = ctx.scale();
    let x = |i: usize| scale.index_to_x(i, n);

    match options.mode {
        AreaMode::Overlap => {
            let base = scale.baseline_y();
            ctx.active
                .iter()
                .enumerate()
                .filter_map(|(s, active)| {
                    let values: Vec<f64> = (0..n)
                        .map_while(|i| active.series.value_at(i).filter(|v| v.is_finite()))
                        .collect();
                    if values.is_empty() {
                        return None;
                    }
                    Some(Band {
                        series: s,
                        top: values
                            .iter()
                            .enumerate()
                            .map(|(i, v)| Point::new(x(i), scale.value_to_y(*v)))
                            .collect(),
                        bottom: (0..values.len()).map(|i| Point::new(x(i), base)).collect(),
                        values,
                    })
                })
                .collect()
        }
        AreaMode::Stacked => {
            let mut cumulative = vec![0.0; n];
            let mut bands = Vec::with_capacity(ctx.active.len());
            for (s, active) in ctx.active.iter().enumerate() {
                let values: Vec<f64> = (0..n)
                    .map(|i| {
                        active
                            .series
                            .value_at(i)
                            .filter(|v| v.is_finite())
                            .unwrap_or(0.0)
                    })
                    .collect();
                let bottom: Vec<Point> = cumulative
                    .iter()
                    .enumerate()
                    .map(|(i, c)| Point::new(x(i), scale.value_to_y(*c)))
                    .collect();
                for (c, v) in cumulative.iter_mut().zip(&values) {
                    *c += v.max(0.0);
                }
                let top = cumulative
                    .iter()
                    .enumerate()
                    .map(|(i, c)| Point::new(x(i), scale.value_to_y(*c)))
                    .collect();
                bands.push(Band {
                    series: s,
                    top,
                    bottom,
                    values,
                });
            }
            bands
        }
    }
}

pub(crate) fn render(options: &AreaOptions, ctx: &RenderContext<'_>) -> Vec<Element> {
    bands(options, ctx)
        .into_iter()
        .map(|band| {
            let active = &ctx.active[band.series];
            let mut group = series_group("area-series", active);
            group.add(
                Element::new("path")
                    .class("area")
                    .attr("d", band.fill_path())
                    .attr("fill", &active.color)
                    .attr("fill-opacity", options.fill_opacity)
                    .attr("stroke", "none"),
            );
            group.add(
                Element::new("path")
                    .class("area-line")
                    .attr("d", band.line_path())
                    .attr("fill", "none")
                    .attr("stroke", &active.color)
                    .attr("stroke-width", options.stroke_width),
            );
            for (i, (p, v)) in band.top.iter().zip(&band.values).enumerate() {
                let marker = Element::new("circle")
                    .class("area-point")
                    .attr("cx", p.x)
                    .attr("cy", p.y)
                    .attr("r", options.point_radius)
                    .attr("fill", &active.color);
                group.add(data_mark(
                    marker,
                    format!("area-{}-{i}", active.index),
                    &active.series.name,
                    ctx.label(i),
                    *v,
                ));
            }
            group
        })
        .collect()
}
