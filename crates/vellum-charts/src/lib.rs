//! Chart geometry engine for Vellum.
//!
//! Raw input flows through the pipeline
//!
//! ```text
//! raw JSON ─▶ normalize ─▶ ChartData ─▶ ValueRange/Scale ─▶ ChartKind::render ─▶ Element tree
//! ```
//!
//! and [`Chart`] ties it together with a legend, axes, a data model, events
//! and resize handling.
//!
//! # Quick start
//!
//! ```
//! use vellum_charts::{Chart, ChartData, ChartKind, Series};
//!
//! let data = ChartData::new(["A", "B"], [Series::new("Sales", [10.0, 20.0])]);
//! let mut chart = Chart::new(ChartKind::default(), data);
//! let svg = chart.to_svg_string();
//! assert_eq!(svg.matches("<rect").count(), 2);
//! ```

pub mod axes;
pub mod chart;
pub mod config;
pub mod data;
pub mod error;
pub mod flexi;
pub mod kinds;
pub mod legend;
pub mod normalize;
pub mod scale;

pub use chart::{Chart, ChartModel, ChartState, Dimension};
pub use config::ChartSpec;
pub use data::{ChartData, DataPoint, Series, SeriesValues};
pub use error::ConfigError;
pub use flexi::{resolve_type, FlexiChart};
pub use kinds::{
    ActiveSeries, AreaMode, AreaOptions, BarMode, BarOptions, ChartKind, FunctionOptions,
    LineOptions, PieOptions, PlotFn, ScatterOptions,
};
pub use legend::{LegendItem, LegendPosition};
pub use normalize::{normalize, normalize_typed, NormalizeOptions, RawData, Shape};
pub use scale::{Scale, Scale2D, ValueRange};
pub use vellum_core;
