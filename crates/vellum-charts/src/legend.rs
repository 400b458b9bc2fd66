//! Legend placement and markup.
//!
//! The legend lives outside the SVG as plain HTML so swatches never mix with
//! series geometry. For pie charts the entries are category labels.

use crate::data::ChartData;
use crate::kinds::{pie, ChartKind};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;
use vellum_core::{Element, Palette, Size};

/// Height reserved for a top or bottom legend.
pub const LEGEND_HEIGHT: f64 = 30.0;
/// Width reserved for a left or right legend.
pub const LEGEND_WIDTH: f64 = 120.0;

/// Where the legend sits relative to the plot.
///
/// Deserializes from `true` (bottom), `false`, or one of
/// `"none" | "top" | "bottom" | "left" | "right"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "LegendRepr")]
pub enum LegendPosition {
    /// No legend
    None,
    /// Above the plot
    Top,
    /// Below the plot
    #[default]
    Bottom,
    /// Left of the plot
    Left,
    /// Right of the plot
    Right,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum LegendRepr {
    Flag(bool),
    Name(String),
}

impl TryFrom<LegendRepr> for LegendPosition {
    type Error = String;

    fn try_from(repr: LegendRepr) -> Result<Self, Self::Error> {
        match repr {
            LegendRepr::Flag(true) => Ok(Self::Bottom),
            LegendRepr::Flag(false) => Ok(Self::None),
            LegendRepr::Name(name) => name.parse(),
        }
    }
}

impl FromStr for LegendPosition {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "none" | "false" => Ok(Self::None),
            "top" => Ok(Self::Top),
            "bottom" | "true" => Ok(Self::Bottom),
            "left" => Ok(Self::Left),
            "right" => Ok(Self::Right),
            other => Err(format!(
                "unknown legend position `{other}` (expected none, top, bottom, left or right)"
            )),
        }
    }
}

impl fmt::Display for LegendPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl LegendPosition {
    /// Lowercase name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Top => "top",
            Self::Bottom => "bottom",
            Self::Left => "left",
            Self::Right => "right",
        }
    }

    /// Whether a legend is drawn at all.
    #[must_use]
    pub const fn is_visible(self) -> bool {
        !matches!(self, Self::None)
    }

    /// Whether the legend precedes the plot in document order.
    #[must_use]
    pub const fn is_leading(self) -> bool {
        matches!(self, Self::Top | Self::Left)
    }

    /// Space the legend takes from the container.
    #[must_use]
    pub const fn reserved(self) -> Size {
        match self {
            Self::None => Size::ZERO,
            Self::Top | Self::Bottom => Size::new(0.0, LEGEND_HEIGHT),
            Self::Left | Self::Right => Size::new(LEGEND_WIDTH, 0.0),
        }
    }
}

/// One legend entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegendItem {
    /// Series name, or category label for pie charts
    pub name: String,
    /// Swatch color
    pub color: String,
    /// Whether the entry is currently hidden
    pub hidden: bool,
}

/// Legend entries for a chart.
#[must_use]
pub fn items(
    kind: &ChartKind,
    data: &ChartData,
    hidden: &BTreeSet<String>,
    palette: &Palette,
) -> Vec<LegendItem> {
    match kind {
        ChartKind::Pie(_) => pie::labels(data)
            .into_iter()
            .enumerate()
            .map(|(i, name)| LegendItem {
                hidden: hidden.contains(&name),
                color: palette.color(i).to_string(),
                name,
            })
            .collect(),
        ChartKind::Function(f) => vec![LegendItem {
            name: f.label.clone(),
            color: f
                .color
                .clone()
                .unwrap_or_else(|| palette.color(0).to_string()),
            hidden: false,
        }],
        _ => data
            .series
            .iter()
            .enumerate()
            .map(|(i, s)| LegendItem {
                name: s.name.clone(),
                color: s.color.clone().unwrap_or_else(|| palette.color(i).to_string()),
                hidden: hidden.contains(&s.name),
            })
            .collect(),
    }
}

/// Legend container for the given entries.
#[must_use]
pub fn render(items: &[LegendItem], position: LegendPosition) -> Element {
    let mut legend = Element::new("div")
        .class("legend")
        .class(format!("legend--{position}"));
    for item in items {
        let mut swatch = Element::new("span").class("legend-swatch");
        swatch.set_style("background-color", item.color.clone());
        let mut entry = Element::new("div")
            .class("legend-item")
            .attr("data-series", &item.name)
            .child(swatch)
            .child(Element::new("span").class("legend-label").text(item.name.clone()));
        entry.set_class("hidden", item.hidden);
        legend.add(entry);
    }
    legend
}
