//! Value ranges and pixel mapping.
//!
//! A [`ValueRange`] is always padded and non-degenerate (`max > min`).
//! [`Scale`] maps a range onto a chart area for category-axis charts;
//! [`Scale2D`] maps two independent domains for scatter and function plots.

use crate::data::Series;
use serde::{Deserialize, Serialize};
use vellum_core::{Point, Rect};

/// Fraction of the raw span added on each side.
const PADDING: f64 = 0.1;
/// A positive minimum below this fraction of the maximum snaps to zero.
const ZERO_SNAP: f64 = 0.2;
/// Span forced onto flat data.
const FLAT_SPAN: f64 = 10.0;

/// A closed numeric interval with `max > min`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValueRange {
    /// Lower bound
    pub min: f64,
    /// Upper bound
    pub max: f64,
}

impl Default for ValueRange {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl ValueRange {
    /// Range used when there is nothing to measure.
    pub const DEFAULT: Self = Self {
        min: 0.0,
        max: 100.0,
    };

    /// Create a range. Swaps the bounds if given backwards.
    #[must_use]
    pub fn new(a: f64, b: f64) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    /// Padded range over raw values.
    ///
    /// Non-finite values are ignored. The raw span is padded by 10% on each
    /// side and rounded outward to integers. Non-negative data never pads
    /// below zero, and a positive minimum under 20% of the maximum snaps to
    /// zero so the baseline stays visible. Flat data gets a span of 10.
    pub fn from_values(values: impl IntoIterator<Item = f64>) -> Self {
        let mut raw: Option<(f64, f64)> = None;
        for v in values.into_iter().filter(|v| v.is_finite()) {
            raw = Some(match raw {
                Some((lo, hi)) => (lo.min(v), hi.max(v)),
                None => (v, v),
            });
        }
        let Some((raw_min, raw_max)) = raw else {
            return Self::DEFAULT;
        };

        if raw_min == raw_max {
            let min = raw_min.floor();
            return Self {
                min,
                max: min + FLAT_SPAN,
            };
        }

        let pad = (raw_max - raw_min) * PADDING;
        let mut min = (raw_min - pad).floor();
        let mut max = (raw_max + pad).ceil();

        if raw_min >= 0.0 && min < 0.0 {
            min = 0.0;
        }
        if raw_max <= 0.0 && max > 0.0 {
            max = 0.0;
        }
        if min > 0.0 && min < ZERO_SNAP * max {
            min = 0.0;
        }
        Self { min, max }
    }

    /// Width of the range.
    #[must_use]
    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    /// Position of `value` within the range, 0 at `min` and 1 at `max`.
    #[must_use]
    pub fn fraction(&self, value: f64) -> f64 {
        (value - self.min) / self.span()
    }

    /// Whether the range includes zero strictly inside.
    #[must_use]
    pub fn straddles_zero(&self) -> bool {
        self.min < 0.0 && self.max > 0.0
    }

    /// Widen to be symmetric about zero.
    #[must_use]
    pub fn symmetric(&self) -> Self {
        let m = self.min.abs().max(self.max.abs());
        Self { min: -m, max: m }
    }

    /// `count + 1` evenly spaced tick values from `min` to `max`.
    #[must_use]
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        let count = count.max(1);
        (0..=count)
            .map(|i| self.span().mul_add(i as f64 / count as f64, self.min))
            .collect()
    }
}

/// Padded range over every value of the given series.
pub fn value_range<'a>(series: impl IntoIterator<Item = &'a Series>) -> ValueRange {
    ValueRange::from_values(series.into_iter().flat_map(Series::ys))
}

/// Range over per-category sums, anchored at zero.
///
/// Only the first `categories` values of each series count, and negative
/// values contribute nothing.
pub fn stacked_range<'a>(
    series: impl IntoIterator<Item = &'a Series>,
    categories: usize,
) -> ValueRange {
    let mut sums = vec![0.0; categories];
    for s in series {
        for (i, sum) in sums.iter_mut().enumerate() {
            if let Some(v) = s.value_at(i).filter(|v| v.is_finite()) {
                *sum += v.max(0.0);
            }
        }
    }
    ValueRange::from_values(sums.into_iter().chain(std::iter::once(0.0)))
}

/// Category-axis scale: value range on y, category index on x.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scale {
    /// Plotting area
    pub area: Rect,
    /// Y value range
    pub range: ValueRange,
}

impl Scale {
    /// Create a scale.
    #[must_use]
    pub const fn new(area: Rect, range: ValueRange) -> Self {
        Self { area, range }
    }

    /// Map a value to a pixel y; larger values sit higher.
    #[must_use]
    pub fn value_to_y(&self, value: f64) -> f64 {
        self.area.bottom() - self.range.fraction(value) * self.area.height
    }

    /// Pixel height of a value measured from the range minimum.
    #[must_use]
    pub fn value_to_height(&self, value: f64) -> f64 {
        self.range.fraction(value) * self.area.height
    }

    /// Pixel height of a magnitude, independent of the range origin.
    #[must_use]
    pub fn magnitude_to_height(&self, magnitude: f64) -> f64 {
        magnitude / self.range.span() * self.area.height
    }

    /// Map a category index to a pixel x, endpoints inclusive.
    #[must_use]
    pub fn index_to_x(&self, index: usize, count: usize) -> f64 {
        let steps = if count <= 1 { 1 } else { count - 1 };
        self.area.x + index as f64 * self.area.width / steps as f64
    }

    /// Pixel y of the baseline: zero when visible, otherwise the nearer edge.
    #[must_use]
    pub fn baseline_y(&self) -> f64 {
        self.value_to_y(0.0_f64.clamp(self.range.min, self.range.max))
    }
}

/// Independent x and y linear domains.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scale2D {
    /// Plotting area
    pub area: Rect,
    /// X domain
    pub x: ValueRange,
    /// Y domain
    pub y: ValueRange,
}

impl Scale2D {
    /// Create a 2D scale.
    #[must_use]
    pub const fn new(area: Rect, x: ValueRange, y: ValueRange) -> Self {
        Self { area, x, y }
    }

    /// Map an x value to pixels.
    #[must_use]
    pub fn x_to_px(&self, x: f64) -> f64 {
        self.x.fraction(x).mul_add(self.area.width, self.area.x)
    }

    /// Map a y value to pixels.
    #[must_use]
    pub fn y_to_px(&self, y: f64) -> f64 {
        self.area.bottom() - self.y.fraction(y) * self.area.height
    }

    /// Map a data point to pixels.
    #[must_use]
    pub fn map(&self, x: f64, y: f64) -> Point {
        Point::new(self.x_to_px(x), self.y_to_px(y))
    }
}
