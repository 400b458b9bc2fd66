//! Sampled function plots with discontinuity handling.
//!
//! A sample that is non-finite or panics becomes a gap. Two finite neighbours
//! of opposite sign are also split when the function at their midpoint is
//! missing or falls outside the bracket they form, so poles such as `1/x`
//! split into separate segments even when no sample lands exactly on the
//! singularity. Continuous curves stay whole however coarse the sampling.

use super::area::polyline;
use super::RenderContext;
use crate::scale::{Scale2D, ValueRange};
use std::fmt;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::rc::Rc;
use vellum_core::{Element, Point};

/// Default number of samples.
pub const DEFAULT_SAMPLES: usize = 200;

/// A plotted function `f(x) -> y`.
///
/// Panics inside the function are caught and treated as gaps, but the
/// process panic hook still runs for each one. Callers that plot functions
/// which panic over whole regions and want quiet output should install their
/// own hook with [`std::panic::set_hook`].
#[derive(Clone)]
pub struct PlotFn(Rc<dyn Fn(f64) -> f64>);

impl PlotFn {
    /// Wrap a function.
    pub fn new(f: impl Fn(f64) -> f64 + 'static) -> Self {
        Self(Rc::new(f))
    }

    /// Evaluate at `x`. Panics and non-finite results yield `None`.
    #[must_use]
    pub fn eval(&self, x: f64) -> Option<f64> {
        catch_unwind(AssertUnwindSafe(|| (self.0)(x)))
            .ok()
            .filter(|y| y.is_finite())
    }
}

impl fmt::Debug for PlotFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PlotFn(..)")
    }
}

/// Function plot options.
#[derive(Debug, Clone)]
pub struct FunctionOptions {
    /// The function
    pub function: PlotFn,
    /// Legend label
    pub label: String,
    /// Sampled x interval
    pub x_range: (f64, f64),
    /// Number of evenly spaced samples
    pub samples: usize,
    /// Fixed y interval; computed from samples when absent
    pub y_range: Option<(f64, f64)>,
    /// Stroke color; palette color 0 when absent
    pub color: Option<String>,
    /// Stroke width
    pub stroke_width: f64,
}

impl FunctionOptions {
    /// Plot `f` over `[-10, 10]` with default sampling.
    pub fn new(label: impl Into<String>, f: impl Fn(f64) -> f64 + 'static) -> Self {
        Self {
            function: PlotFn::new(f),
            label: label.into(),
            x_range: (-10.0, 10.0),
            samples: DEFAULT_SAMPLES,
            y_range: None,
            color: None,
            stroke_width: 2.0,
        }
    }

    /// Builder: x interval.
    #[must_use]
    pub const fn x_range(mut self, lo: f64, hi: f64) -> Self {
        self.x_range = (lo, hi);
        self
    }

    /// Builder: sample count.
    #[must_use]
    pub const fn samples(mut self, samples: usize) -> Self {
        self.samples = samples;
        self
    }

    /// Builder: fixed y interval.
    #[must_use]
    pub const fn y_range(mut self, lo: f64, hi: f64) -> Self {
        self.y_range = Some((lo, hi));
        self
    }

    /// `(x, f(x))` at evenly spaced points, endpoints included.
    #[must_use]
    pub fn sample(&self) -> Vec<(f64, Option<f64>)> {
        let (lo, hi) = self.x_range;
        let n = self.samples.max(2);
        let last = (n - 1) as f64;
        (0..n)
            .map(|i| {
                let x = (hi - lo).mul_add(i as f64 / last, lo);
                (x, self.function.eval(x))
            })
            .collect()
    }

    /// Sampled x domain.
    #[must_use]
    pub fn x_domain(&self) -> ValueRange {
        let (lo, hi) = self.x_range;
        if hi > lo {
            ValueRange::new(lo, hi)
        } else {
            ValueRange::new(lo, lo + 1.0)
        }
    }

    /// Visible y domain.
    ///
    /// The supplied range wins; otherwise the finite sample extrema are used,
    /// widened to be symmetric about zero when they straddle it.
    #[must_use]
    pub fn y_domain(&self) -> ValueRange {
        if let Some((lo, hi)) = self.y_range.filter(|(lo, hi)| hi > lo) {
            return ValueRange::new(lo, hi);
        }
        let ys = self.sample().into_iter().filter_map(|(_, y)| y);
        let mut extent: Option<(f64, f64)> = None;
        for y in ys {
            extent = Some(extent.map_or((y, y), |(lo, hi)| (lo.min(y), hi.max(y))));
        }
        let range = match extent {
            Some((lo, hi)) if hi > lo => ValueRange::new(lo, hi),
            Some((v, _)) => ValueRange::new(v - 1.0, v + 1.0),
            None => ValueRange::new(-1.0, 1.0),
        };
        if range.straddles_zero() {
            range.symmetric()
        } else {
            range
        }
    }

    /// Split samples into continuous runs.
    #[must_use]
    pub fn segments(&self) -> Vec<Vec<(f64, f64)>> {
        split_segments(&self.sample(), |a, b| self.pole_between(a, b))
    }

    /// Whether a pole separates two adjacent finite samples.
    fn pole_between(&self, (x0, y0): (f64, f64), (x1, y1): (f64, f64)) -> bool {
        if y0 * y1 >= 0.0 {
            return false;
        }
        let (lo, hi) = if y0 < y1 { (y0, y1) } else { (y1, y0) };
        !matches!(
            self.function.eval((x0 + x1) / 2.0),
            Some(mid) if (lo..=hi).contains(&mid)
        )
    }
}

/// Split samples at gaps and wherever `breaks(prev, next)` holds.
#[must_use]
pub fn split_segments<F>(samples: &[(f64, Option<f64>)], mut breaks: F) -> Vec<Vec<(f64, f64)>>
where
    F: FnMut((f64, f64), (f64, f64)) -> bool,
{
    let mut segments = Vec::new();
    let mut current: Vec<(f64, f64)> = Vec::new();
    for &(x, y) in samples {
        match y {
            Some(y) => {
                if let Some(&prev) = current.last() {
                    if breaks(prev, (x, y)) {
                        segments.push(std::mem::take(&mut current));
                    }
                }
                current.push((x, y));
            }
            None => {
                if !current.is_empty() {
                    segments.push(std::mem::take(&mut current));
                }
            }
        }
    }
    if !current.is_empty() {
        segments.push(current);
    }
    segments
}

pub(crate) fn render(options: &FunctionOptions, ctx: &RenderContext<'_>) -> Vec<Element> {
    let scale = Scale2D::new(ctx.area, options.x_domain(), ctx.range);
    let color = options
        .color
        .clone()
        .unwrap_or_else(|| ctx.palette.color(0).to_string());
    let segments = options.segments();

    let mut group = Element::new("g")
        .class("function")
        .attr("data-series", &options.label);
    for (i, segment) in segments.iter().enumerate() {
        let points: Vec<Point> = segment.iter().map(|(x, y)| scale.map(*x, *y)).collect();
        group.add(
            Element::new("path")
                .class("function-line")
                .attr("id", format!("function-{i}"))
                .attr("d", polyline(&points))
                .attr("fill", "none")
                .attr("stroke", &color)
                .attr("stroke-width", options.stroke_width),
        );
    }
    tracing::trace!(
        function = %options.label,
        segments = segments.len(),
        "sampled function"
    );
    vec![group]
}
