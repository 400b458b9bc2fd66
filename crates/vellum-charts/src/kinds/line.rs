//! Line geometry: one stroked polyline per series with point markers.

use super::area::polyline;
use super::{data_mark, series_group, RenderContext};
use serde::{Deserialize, Serialize};
use vellum_core::{Element, Point};

/// Line options.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LineOptions {
    /// Stroke width
    pub stroke_width: f64,
    /// Draw a marker at each value
    pub show_points: bool,
    /// Marker radius
    pub point_radius: f64,
}

impl Default for LineOptions {
    fn default() -> Self {
        Self {
            stroke_width: 2.0,
            show_points: true,
            point_radius: 3.5,
        }
    }
}

pub(crate) fn render(options: &LineOptions, ctx: &RenderContext<'_>) -> Vec<Element> {
    let n = ctx.categories();
    if n == 0 {
        return Vec::new();
    }
    let scale = ctx.scale();
    ctx.active
        .iter()
        .filter_map(|active| {
            let points: Vec<(usize, f64, Point)> = (0..n)
                .map_while(|i| {
                    let v = active.series.value_at(i).filter(|v| v.is_finite())?;
                    Some((i, v, Point::new(scale.index_to_x(i, n), scale.value_to_y(v))))
                })
                .collect();
            if points.is_empty() {
                return None;
            }
            let mut group = series_group("line-series", active);
            let path: Vec<Point> = points.iter().map(|(_, _, p)| *p).collect();
            group.add(
                Element::new("path")
                    .class("line")
                    .attr("d", polyline(&path))
                    .attr("fill", "none")
                    .attr("stroke", &active.color)
                    .attr("stroke-width", options.stroke_width)
                    .attr("stroke-linejoin", "round"),
            );
            if options.show_points {
                for (i, v, p) in points {
                    let marker = Element::new("circle")
                        .class("line-point")
                        .attr("cx", p.x)
                        .attr("cy", p.y)
                        .attr("r", options.point_radius)
                        .attr("fill", &active.color);
                    group.add(data_mark(
                        marker,
                        format!("line-{}-{i}", active.index),
                        &active.series.name,
                        ctx.label(i),
                        v,
                    ));
                }
            }
            Some(group)
        })
        .collect()
}
