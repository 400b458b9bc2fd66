//! Grid lines and axes drawn behind series geometry.

use crate::kinds::Frame;
use crate::scale::Scale;
use vellum_core::{fmt_num, ChartTheme, Element};

/// Number of value intervals on each numeric axis.
pub const TICKS: usize = 5;
/// Gap between an axis and its tick labels.
const LABEL_GAP: f64 = 8.0;

fn line(classes: &str, x1: f64, y1: f64, x2: f64, y2: f64, stroke: &str) -> Element {
    let mut line = Element::new("line");
    for class in classes.split_whitespace() {
        line.add_class(class);
    }
    line.attr("x1", x1)
        .attr("y1", y1)
        .attr("x2", x2)
        .attr("y2", y2)
        .attr("stroke", stroke)
}

fn tick_label(class: &str, x: f64, y: f64, anchor: &str, text: String, theme: &ChartTheme) -> Element {
    Element::new("text")
        .class("tick-label")
        .class(class)
        .attr("x", x)
        .attr("y", y)
        .attr("text-anchor", anchor)
        .attr("font-size", theme.font_size)
        .attr("fill", theme.text.to_hex())
        .text(text)
}

/// X position of category `index`.
fn category_x(scale: &Scale, index: usize, count: usize, centered: bool) -> f64 {
    if centered {
        let width = scale.area.width / count.max(1) as f64;
        (index as f64 + 0.5).mul_add(width, scale.area.x)
    } else {
        scale.index_to_x(index, count)
    }
}

/// Horizontal (and for numeric frames, vertical) grid lines.
#[must_use]
pub fn grid(frame: &Frame, theme: &ChartTheme) -> Option<Element> {
    let stroke = theme.grid.to_hex();
    let mut g = Element::new("g").class("grid");
    match frame {
        Frame::None => return None,
        Frame::Category { scale, .. } => {
            for t in scale.range.ticks(TICKS) {
                let y = scale.value_to_y(t);
                g.add(line("grid-line", scale.area.x, y, scale.area.right(), y, &stroke));
            }
        }
        Frame::Numeric(s) => {
            for t in s.y.ticks(TICKS) {
                let y = s.y_to_px(t);
                g.add(line("grid-line", s.area.x, y, s.area.right(), y, &stroke));
            }
            for t in s.x.ticks(TICKS) {
                let x = s.x_to_px(t);
                g.add(line("grid-line", x, s.area.y, x, s.area.bottom(), &stroke));
            }
        }
    }
    Some(g)
}

/// Axis lines with tick labels.
#[must_use]
pub fn axes(frame: &Frame, labels: &[String], theme: &ChartTheme) -> Option<Element> {
    let stroke = theme.axis.to_hex();
    let mut g = Element::new("g").class("axes");
    match frame {
        Frame::None => return None,
        Frame::Category { scale, centered } => {
            let area = scale.area;
            let base = scale.baseline_y();
            g.add(line("axis x-axis", area.x, base, area.right(), base, &stroke));
            g.add(line("axis y-axis", area.x, area.y, area.x, area.bottom(), &stroke));
            for t in scale.range.ticks(TICKS) {
                g.add(tick_label(
                    "y-tick",
                    area.x - LABEL_GAP,
                    scale.value_to_y(t),
                    "end",
                    fmt_num(t),
                    theme,
                ));
            }
            for (i, label) in labels.iter().enumerate() {
                g.add(tick_label(
                    "x-tick",
                    category_x(scale, i, labels.len(), *centered),
                    area.bottom() + LABEL_GAP + theme.font_size,
                    "middle",
                    label.clone(),
                    theme,
                ));
            }
        }
        Frame::Numeric(s) => {
            let area = s.area;
            let x_axis_y = if s.y.straddles_zero() {
                s.y_to_px(0.0)
            } else {
                area.bottom()
            };
            let y_axis_x = if s.x.straddles_zero() {
                s.x_to_px(0.0)
            } else {
                area.x
            };
            g.add(line("axis x-axis", area.x, x_axis_y, area.right(), x_axis_y, &stroke));
            g.add(line("axis y-axis", y_axis_x, area.y, y_axis_x, area.bottom(), &stroke));
            for t in s.x.ticks(TICKS) {
                g.add(tick_label(
                    "x-tick",
                    s.x_to_px(t),
                    area.bottom() + LABEL_GAP + theme.font_size,
                    "middle",
                    fmt_num(t),
                    theme,
                ));
            }
            for t in s.y.ticks(TICKS) {
                g.add(tick_label(
                    "y-tick",
                    area.x - LABEL_GAP,
                    s.y_to_px(t),
                    "end",
                    fmt_num(t),
                    theme,
                ));
            }
        }
    }
    Some(g)
}
