//! Chart orchestrator.
//!
//! A [`Chart`] owns its data model, hidden-series set, event bus and resize
//! observer, and keeps an element tree of the form
//!
//! ```text
//! div.chart
//!   [div.legend]          (top | left)
//!   div.chart-content
//!     svg
//!       g.grid  g.axes  <series geometry>
//!   [div.legend]          (bottom | right)
//! ```
//!
//! Lifecycle: constructed, composed, activated, disposed. Data changes,
//! series toggles and resizes re-render the SVG in place.

use crate::axes;
use crate::data::ChartData;
use crate::kinds::{pie, ActiveSeries, ChartKind, RenderContext};
use crate::legend::{self, LegendItem, LegendPosition};
use crate::scale::ValueRange;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use vellum_core::binding::Change;
use vellum_core::theme::{self, ChartParams, ThemeHooks, ThemeSpec};
use vellum_core::{
    fmt_num, ChartEvent, Element, EventBus, EventKind, ListenerId, Margin, Model, Point, PointPayload,
    Rect, ResizeObserver, Size, SubscriptionId,
};

/// The chart's data model.
pub type ChartModel = Model<ChartData>;

const SVG_NS: &str = "http://www.w3.org/2000/svg";
const NO_DATA: &str = "No Data";

/// A width or height: fixed pixels, or follow the container.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(try_from = "DimensionRepr", into = "DimensionRepr")]
pub enum Dimension {
    /// Track the observed container size
    #[default]
    Auto,
    /// Fixed pixel size
    Pixels(f64),
}

#[derive(Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum DimensionRepr {
    Pixels(f64),
    Keyword(String),
}

impl TryFrom<DimensionRepr> for Dimension {
    type Error = String;

    fn try_from(repr: DimensionRepr) -> Result<Self, Self::Error> {
        match repr {
            DimensionRepr::Pixels(px) if px.is_finite() && px >= 0.0 => Ok(Self::Pixels(px)),
            DimensionRepr::Pixels(px) => Err(format!("dimension must be non-negative, got {px}")),
            DimensionRepr::Keyword(k) if k.eq_ignore_ascii_case("auto") => Ok(Self::Auto),
            DimensionRepr::Keyword(k) => Err(format!("expected a number or \"auto\", got `{k}`")),
        }
    }
}

impl From<Dimension> for DimensionRepr {
    fn from(dim: Dimension) -> Self {
        match dim {
            Dimension::Auto => Self::Keyword("auto".to_string()),
            Dimension::Pixels(px) => Self::Pixels(px),
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Auto => f.write_str("auto"),
            Self::Pixels(px) => write!(f, "{px}px"),
        }
    }
}

/// Lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartState {
    /// Built but not yet composed
    Constructed,
    /// Element tree exists
    Composed,
    /// Listening for interaction and resize
    Activated,
    /// Torn down; further notifications are ignored
    Disposed,
}

/// A chart control.
#[derive(Debug)]
pub struct Chart {
    kind: ChartKind,
    model: ChartModel,
    hidden: BTreeSet<String>,
    width: Option<Dimension>,
    height: Option<Dimension>,
    container: Option<Size>,
    margin: Margin,
    legend: Option<LegendPosition>,
    title: Option<String>,
    params: ChartParams,
    hooks: ThemeHooks,
    root: Element,
    events: EventBus,
    observer: ResizeObserver,
    state: ChartState,
}

impl Chart {
    /// Create a chart of the given kind over canonical data.
    #[must_use]
    pub fn new(kind: ChartKind, data: ChartData) -> Self {
        let resolved = theme::resolve(&control_type(&kind), &ThemeSpec::default());
        Self {
            kind,
            model: Model::new("data", data),
            hidden: BTreeSet::new(),
            width: None,
            height: None,
            container: None,
            margin: Margin::default(),
            legend: None,
            title: None,
            params: resolved.params,
            hooks: resolved.hooks,
            root: Element::new("div"),
            events: EventBus::new(),
            observer: ResizeObserver::default(),
            state: ChartState::Constructed,
        }
    }

    // =========================================================================
    // Builders
    // =========================================================================

    /// Builder: fixed pixel size.
    #[must_use]
    pub fn size(mut self, width: f64, height: f64) -> Self {
        self.width = Some(Dimension::Pixels(width));
        self.height = Some(Dimension::Pixels(height));
        self
    }

    /// Builder: width.
    #[must_use]
    pub fn width(mut self, width: Dimension) -> Self {
        self.width = Some(width);
        self
    }

    /// Builder: height.
    #[must_use]
    pub fn height(mut self, height: Dimension) -> Self {
        self.height = Some(height);
        self
    }

    /// Builder: margins around the plotting area.
    #[must_use]
    pub fn margin(mut self, margin: Margin) -> Self {
        self.margin = margin;
        self
    }

    /// Builder: legend placement, overriding the theme's legend flag.
    #[must_use]
    pub fn legend(mut self, position: LegendPosition) -> Self {
        self.legend = Some(position);
        self
    }

    /// Builder: title shown above the plot.
    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Builder: theming.
    #[must_use]
    pub fn theme(mut self, spec: &ThemeSpec) -> Self {
        let resolved = theme::resolve(&control_type(&self.kind), spec);
        self.params = resolved.params;
        self.hooks = resolved.hooks;
        self
    }

    /// Builder: grid lines on or off.
    #[must_use]
    pub fn grid(mut self, grid: bool) -> Self {
        self.params.grid = grid;
        self
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Chart kind.
    #[must_use]
    pub const fn kind(&self) -> &ChartKind {
        &self.kind
    }

    /// Current data.
    #[must_use]
    pub const fn data(&self) -> &ChartData {
        self.model.get()
    }

    /// Data model.
    #[must_use]
    pub const fn model(&self) -> &ChartModel {
        &self.model
    }

    /// Hidden series names (labels for pie charts).
    #[must_use]
    pub const fn hidden(&self) -> &BTreeSet<String> {
        &self.hidden
    }

    /// Resolved theming parameters.
    #[must_use]
    pub const fn params(&self) -> &ChartParams {
        &self.params
    }

    /// Lifecycle state.
    #[must_use]
    pub const fn state(&self) -> ChartState {
        self.state
    }

    /// Effective legend placement.
    #[must_use]
    pub fn legend_position(&self) -> LegendPosition {
        self.legend.unwrap_or(if self.params.legend {
            LegendPosition::Bottom
        } else {
            LegendPosition::None
        })
    }

    /// Pixel size of the SVG.
    #[must_use]
    pub fn pixel_size(&self) -> Size {
        let preset = self.params.size.dimensions();
        let pick = |dim: Option<Dimension>, preset: f64, auto: Option<f64>| match dim {
            Some(Dimension::Pixels(px)) => px,
            Some(Dimension::Auto) => auto.unwrap_or(preset),
            None => preset,
        };
        Size::new(
            pick(self.width, preset.width, self.container.map(|c| c.width)),
            pick(self.height, preset.height, self.container.map(|c| c.height)),
        )
    }

    /// Plotting area: pixel size minus margins.
    #[must_use]
    pub fn chart_area(&self) -> Rect {
        Rect::from_size(self.pixel_size()).inset_by(&self.margin)
    }

    /// Visible series with their resolved colors.
    #[must_use]
    pub fn active_series(&self) -> Vec<ActiveSeries<'_>> {
        crate::kinds::active_series(&self.kind, self.model.get(), &self.hidden, self.params.palette)
    }

    /// Value range of the active series.
    #[must_use]
    pub fn value_range(&self) -> ValueRange {
        self.kind.value_range(self.model.get(), &self.active_series())
    }

    /// Legend entries with their current visibility.
    #[must_use]
    pub fn legend_items(&self) -> Vec<LegendItem> {
        legend::items(&self.kind, self.model.get(), &self.hidden, self.params.palette)
    }

    /// Sum of visible pie values.
    #[must_use]
    pub fn pie_total(&self) -> f64 {
        pie::total(self.model.get(), &self.hidden)
    }

    /// Root element.
    #[must_use]
    pub const fn root(&self) -> &Element {
        &self.root
    }

    /// The SVG element, once composed.
    #[must_use]
    pub fn svg(&self) -> Option<&Element> {
        self.root.descendants().find(|e| e.tag() == "svg")
    }

    // =========================================================================
    // Composition and rendering
    // =========================================================================

    /// Build the element tree and render the plot.
    pub fn compose(&mut self) -> &Element {
        let size = self.pixel_size();
        let position = self.legend_position();

        let mut root = Element::new("div").class("chart");
        self.hooks.apply(&mut root);
        root.set_style("width", format!("{}px", fmt_num(size.width)));
        root.set_style("background-color", self.params.theme.background.to_hex());
        if let Some(title) = &self.title {
            root.add(Element::new("div").class("chart-title").text(title.clone()));
        }

        let svg = Element::new("svg")
            .class("chart-svg")
            .attr("xmlns", SVG_NS)
            .attr("width", size.width)
            .attr("height", size.height)
            .attr(
                "viewBox",
                format!(
                    "0 0 {} {}",
                    fmt_num(size.width),
                    fmt_num(size.height)
                ),
            );
        let content = Element::new("div").class("chart-content").child(svg);

        let legend = position
            .is_visible()
            .then(|| legend::render(&self.legend_items(), position));
        match legend {
            Some(legend) if position.is_leading() => {
                root.add(legend);
                root.add(content);
            }
            Some(legend) => {
                root.add(content);
                root.add(legend);
            }
            None => {
                root.add(content);
            }
        }

        self.root = root;
        if self.state == ChartState::Constructed {
            self.state = ChartState::Composed;
        }
        tracing::debug!(
            kind = self.kind.name(),
            width = size.width,
            height = size.height,
            legend = %position,
            "composed chart"
        );
        self.render_content();
        &self.root
    }

    /// Mark the chart interactive. Composes first if needed.
    pub fn activate(&mut self) {
        match self.state {
            ChartState::Constructed => {
                self.compose();
            }
            ChartState::Disposed => return,
            ChartState::Composed | ChartState::Activated => {}
        }
        self.state = ChartState::Activated;
        tracing::debug!(kind = self.kind.name(), "activated chart");
    }

    fn ensure_composed(&mut self) {
        if self.state == ChartState::Constructed {
            self.compose();
        }
    }

    /// Clear and redraw the SVG subtree.
    pub fn render_content(&mut self) {
        let area = self.chart_area();
        debug_assert!(
            area.width >= 0.0 && area.height >= 0.0,
            "margins exceed chart size: {area:?}"
        );

        let data = self.model.get();
        if matches!(
            self.kind,
            ChartKind::Bar(_) | ChartKind::Area(_) | ChartKind::Line(_)
        ) {
            for (series, values, labels) in data.length_mismatches() {
                tracing::warn!(
                    series,
                    values,
                    labels,
                    "series length differs from label count"
                );
            }
        }

        let ctx = RenderContext::new(
            &self.kind,
            data,
            &self.hidden,
            area,
            self.params.palette,
            &self.params.theme,
        );
        let mut children = Vec::new();
        if self.kind.needs_data() && ctx.active.iter().all(|a| a.series.is_empty()) {
            let center = Rect::from_size(self.pixel_size()).center();
            children.push(
                Element::new("text")
                    .class("no-data")
                    .attr("x", center.x)
                    .attr("y", center.y)
                    .attr("text-anchor", "middle")
                    .attr("dominant-baseline", "middle")
                    .attr("font-size", self.params.theme.font_size)
                    .attr("fill", self.params.theme.text.to_hex())
                    .text(NO_DATA),
            );
        } else {
            let frame = self.kind.frame(&ctx);
            if self.params.grid {
                children.extend(axes::grid(&frame, &self.params.theme));
            }
            let labels: &[String] = if self.kind.needs_data() {
                data.labels.as_slice()
            } else {
                &[]
            };
            children.extend(axes::axes(&frame, labels, &self.params.theme));
            children.extend(self.kind.render(&ctx));
        }
        tracing::trace!(
            kind = self.kind.name(),
            active = ctx.active.len(),
            hidden = self.hidden.len(),
            "rendered content"
        );

        if let Some(svg) = self.root.find_mut(|e| e.tag() == "svg") {
            svg.clear();
            svg.extend(children);
        }
    }

    /// Markup of the SVG alone.
    pub fn to_svg_string(&mut self) -> String {
        self.ensure_composed();
        self.svg().map(Element::to_markup).unwrap_or_default()
    }

    /// Markup of the whole control.
    pub fn to_html(&mut self) -> String {
        self.ensure_composed();
        self.root.to_markup()
    }

    // =========================================================================
    // Data binding
    // =========================================================================

    /// Replace the data. No-op (returns false) if structurally equal.
    pub fn set_data(&mut self, data: ChartData) -> bool {
        if self.state == ChartState::Disposed || !self.model.set(data) {
            return false;
        }
        let series_count = self.model.get().series.len();
        tracing::debug!(series_count, "chart data changed");
        if self.state != ChartState::Constructed {
            self.compose();
        }
        self.raise_event(&ChartEvent::DataChange { series_count });
        true
    }

    /// Listen for data model changes.
    pub fn on_data_change<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(&Change<'_, ChartData>) + 'static,
    {
        self.model.on_change(listener)
    }

    /// Flip a series (or pie label) between shown and hidden.
    ///
    /// Returns the new visibility. A disposed chart is left untouched and
    /// reports the current visibility.
    pub fn toggle_series(&mut self, name: &str) -> bool {
        if self.state == ChartState::Disposed {
            return !self.hidden.contains(name);
        }
        let visible = if self.hidden.remove(name) {
            true
        } else {
            self.hidden.insert(name.to_string());
            false
        };
        tracing::debug!(series = name, visible, "toggled series");

        if self.state != ChartState::Constructed {
            self.render_content();
            let item = self
                .root
                .find_mut(|e| e.has_class("legend-item") && e.get_attr("data-series") == Some(name));
            if let Some(item) = item {
                item.set_class("hidden", !visible);
            }
        }
        self.raise_event(&ChartEvent::SeriesToggle {
            series: name.to_string(),
            visible,
        });
        visible
    }

    // =========================================================================
    // Resize
    // =========================================================================

    /// Record an observed container size at `now_ms`.
    pub fn observe_resize(&mut self, container: Size, now_ms: u64) {
        self.observer.notify(container, now_ms);
    }

    /// Apply a debounced resize if one is due. Returns whether the chart
    /// re-rendered.
    pub fn poll_resize(&mut self, now_ms: u64) -> bool {
        match self.observer.poll(now_ms) {
            Some(container) => self.handle_resize(container),
            None => false,
        }
    }

    /// Fit auto dimensions to a container, leaving room for the legend.
    ///
    /// Fixed dimensions are untouched. Returns whether the size changed.
    pub fn handle_resize(&mut self, container: Size) -> bool {
        if self.state == ChartState::Disposed {
            return false;
        }
        let reserved = self.legend_position().reserved();
        let target = Size::new(
            (container.width - reserved.width).max(self.margin.horizontal()),
            (container.height - reserved.height).max(self.margin.vertical()),
        );
        let before = self.pixel_size();
        self.container = Some(target);
        let after = self.pixel_size();
        if after == before {
            return false;
        }
        tracing::debug!(width = after.width, height = after.height, "resized chart");
        if self.state != ChartState::Constructed {
            self.compose();
        }
        self.raise_event(&ChartEvent::Resize {
            width: after.width,
            height: after.height,
        });
        true
    }

    // =========================================================================
    // Events
    // =========================================================================

    /// Register an event handler.
    pub fn on<F>(&mut self, kind: EventKind, handler: F) -> ListenerId
    where
        F: FnMut(&ChartEvent) + 'static,
    {
        self.events.on(kind, handler)
    }

    /// Remove an event handler.
    pub fn off(&mut self, id: ListenerId) -> bool {
        self.events.off(id)
    }

    /// Deliver an event to handlers. Returns how many ran.
    pub fn raise_event(&mut self, event: &ChartEvent) -> usize {
        if self.state == ChartState::Disposed {
            return 0;
        }
        self.events.raise(event)
    }

    /// The data mark under an SVG-local point, topmost first.
    #[must_use]
    pub fn hit_test(&self, point: Point) -> Option<PointPayload> {
        let svg = self.svg()?;
        let marks: Vec<&Element> = svg
            .descendants()
            .filter(|e| e.get_attr("data-series").is_some() && e.get_attr("data-value").is_some())
            .collect();
        marks
            .into_iter()
            .rev()
            .find(|e| mark_contains(e, point))
            .map(|e| PointPayload {
                series: e.get_attr("data-series").unwrap_or_default().to_string(),
                category: e.get_attr("data-category").map(str::to_string),
                value: e.num_attr("data-value").unwrap_or_default(),
                element: e.get_attr("id").map(str::to_string),
            })
    }

    /// Hover at a point; raises `point-hover` when over a mark.
    pub fn pointer_move(&mut self, point: Point) -> Option<PointPayload> {
        let payload = self.hit_test(point)?;
        self.raise_event(&ChartEvent::PointHover(payload.clone()));
        Some(payload)
    }

    /// Click at a point; raises `point-click` when over a mark.
    pub fn click(&mut self, point: Point) -> Option<PointPayload> {
        let payload = self.hit_test(point)?;
        self.raise_event(&ChartEvent::PointClick(payload.clone()));
        Some(payload)
    }

    // =========================================================================
    // Teardown
    // =========================================================================

    /// Disconnect the resize observer and drop every listener.
    pub fn dispose(&mut self) {
        if self.state == ChartState::Disposed {
            return;
        }
        self.observer.disconnect();
        self.model.clear_listeners();
        self.events.clear();
        self.state = ChartState::Disposed;
        tracing::debug!(kind = self.kind.name(), "disposed chart");
    }

    /// Whether the resize observer is still attached.
    #[must_use]
    pub const fn is_observing(&self) -> bool {
        self.observer.is_connected()
    }
}

impl Drop for Chart {
    fn drop(&mut self) {
        self.dispose();
    }
}

fn control_type(kind: &ChartKind) -> String {
    format!("{}-chart", kind.name())
}

/// Geometry test for a rendered data mark.
fn mark_contains(mark: &Element, p: Point) -> bool {
    let num = |name: &str| mark.num_attr(name);
    match mark.tag() {
        "rect" => match (num("x"), num("y"), num("width"), num("height")) {
            (Some(x), Some(y), Some(w), Some(h)) => Rect::new(x, y, w, h).contains_point(&p),
            _ => false,
        },
        "circle" => match (num("cx"), num("cy"), num("r")) {
            (Some(cx), Some(cy), Some(r)) => Point::new(cx, cy).distance(&p) <= r,
            _ => false,
        },
        "path" if mark.has_class("pie-segment") => {
            let (Some(cx), Some(cy), Some(r), Some(start), Some(sweep)) = (
                num("data-cx"),
                num("data-cy"),
                num("data-r"),
                num("data-start-angle"),
                num("data-sweep"),
            ) else {
                return false;
            };
            let inner = num("data-inner").unwrap_or(0.0);
            let dist = Point::new(cx, cy).distance(&p);
            if dist > r || dist < inner {
                return false;
            }
            let angle = (p.y - cy).atan2(p.x - cx).to_degrees();
            (angle - start).rem_euclid(360.0) <= sweep
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Series;
    use crate::kinds::{BarOptions, PieOptions};
    use std::cell::RefCell;
    use std::rc::Rc;

    fn bar_chart() -> Chart {
        Chart::new(
            ChartKind::Bar(BarOptions::default()),
            ChartData::new(["A", "B"], [Series::new("S", [10.0, 20.0])]),
        )
    }

    // =========================================================================
    // Composition
    // =========================================================================

    #[test]
    fn test_default_area() {
        let chart = bar_chart();
        assert_eq!(chart.chart_area(), Rect::new(50.0, 20.0, 430.0, 240.0));
    }

    #[test]
    fn test_compose_structure() {
        let mut chart = bar_chart();
        chart.compose();
        let root = chart.root();
        assert!(root.has_class("chart"));
        assert!(root.has_class("bar-chart"));
        assert_eq!(root.get_attr("data-theme"), Some("light"));
        // default legend sits below the content
        let classes: Vec<&str> = root.children().iter().map(|c| c.classes()[0].as_str()).collect();
        assert_eq!(classes, vec!["chart-content", "legend"]);
        assert_eq!(chart.state(), ChartState::Composed);
    }

    #[test]
    fn test_leading_legend() {
        let mut chart = bar_chart().legend(LegendPosition::Left);
        chart.compose();
        assert!(chart.root().children()[0].has_class("legend--left"));
    }

    #[test]
    fn test_no_data_placeholder() {
        let mut chart = Chart::new(ChartKind::default(), ChartData::empty());
        let svg = chart.to_svg_string();
        assert!(svg.contains("No Data"));
        assert!(!svg.contains("<rect"));
    }

    #[test]
    fn test_grid_toggle() {
        let mut chart = bar_chart().grid(false);
        chart.compose();
        assert!(chart.svg().unwrap().find_by_class("grid").is_empty());
        assert_eq!(chart.svg().unwrap().find_by_class("axes").len(), 1);
    }

    // =========================================================================
    // Interaction
    // =========================================================================

    #[test]
    fn test_toggle_updates_legend_and_events() {
        let mut chart = bar_chart();
        chart.compose();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        chart.on(EventKind::SeriesToggle, move |e| sink.borrow_mut().push(e.clone()));

        assert!(!chart.toggle_series("S"));
        assert!(chart.root().find_by_class("legend-item")[0].has_class("hidden"));
        assert!(chart.svg().unwrap().find_all("rect").is_empty());
        assert!(chart.to_svg_string().contains("No Data"));

        assert!(chart.toggle_series("S"));
        assert!(!chart.root().find_by_class("legend-item")[0].has_class("hidden"));
        assert_eq!(chart.svg().unwrap().find_all("rect").len(), 2);
        assert_eq!(seen.borrow().len(), 2);
    }

    #[test]
    fn test_set_data_short_circuits() {
        let mut chart = bar_chart();
        chart.compose();
        let calls = Rc::new(RefCell::new(0));
        let counter = Rc::clone(&calls);
        chart.on_data_change(move |_| *counter.borrow_mut() += 1);

        let same = chart.data().clone();
        assert!(!chart.set_data(same));
        assert_eq!(*calls.borrow(), 0);

        let next = ChartData::new(["A", "B", "C"], [Series::new("S", [1.0, 2.0, 3.0])]);
        assert!(chart.set_data(next));
        assert_eq!(*calls.borrow(), 1);
        assert_eq!(chart.svg().unwrap().find_all("rect").len(), 3);
    }

    #[test]
    fn test_hit_test_bar() {
        let mut chart = bar_chart();
        chart.compose();
        // second bar spans most of the right half of the area
        let hit = chart.click(Point::new(365.0, 200.0)).unwrap();
        assert_eq!(hit.series, "S");
        assert_eq!(hit.category.as_deref(), Some("B"));
        assert_eq!(hit.value, 20.0);
        assert!(chart.hit_test(Point::new(1.0, 1.0)).is_none());
    }

    #[test]
    fn test_click_reports_unrounded_value() {
        let mut chart = Chart::new(
            ChartKind::Bar(BarOptions::default()),
            ChartData::new(["A", "B"], [Series::new("S", [10.0, 19.987_654])]),
        );
        chart.compose();
        let hit = chart.click(Point::new(365.0, 200.0)).unwrap();
        assert_eq!(hit.category.as_deref(), Some("B"));
        assert_eq!(hit.value, 19.987_654);
    }

    #[test]
    fn test_hit_test_pie() {
        let mut chart = Chart::new(
            ChartKind::Pie(PieOptions::default()),
            ChartData::new(["a", "b"], [Series::new("S", [50.0, 50.0])]),
        );
        chart.compose();
        let area = chart.chart_area();
        let c = area.center();
        // first half sweeps clockwise from 12 o'clock, covering the right side
        let right = chart.hit_test(Point::new(c.x + 20.0, c.y)).unwrap();
        assert_eq!(right.category.as_deref(), Some("a"));
        let left = chart.hit_test(Point::new(c.x - 20.0, c.y)).unwrap();
        assert_eq!(left.category.as_deref(), Some("b"));
    }

    // =========================================================================
    // Resize and teardown
    // =========================================================================

    #[test]
    fn test_auto_resize_reserves_legend_space() {
        let mut chart = bar_chart()
            .width(Dimension::Auto)
            .height(Dimension::Auto)
            .legend(LegendPosition::Right);
        chart.compose();
        chart.observe_resize(Size::new(900.0, 400.0), 0);
        assert!(!chart.poll_resize(50));
        assert!(chart.poll_resize(100));
        assert_eq!(chart.pixel_size(), Size::new(900.0 - legend::LEGEND_WIDTH, 400.0));
        assert_eq!(chart.svg().unwrap().num_attr("width"), Some(780.0));
    }

    #[test]
    fn test_fixed_size_ignores_resize() {
        let mut chart = bar_chart().size(400.0, 300.0);
        assert!(!chart.handle_resize(Size::new(1000.0, 1000.0)));
        assert_eq!(chart.pixel_size(), Size::new(400.0, 300.0));
    }

    #[test]
    fn test_dispose_stops_observer() {
        let mut chart = bar_chart().width(Dimension::Auto);
        chart.compose();
        chart.observe_resize(Size::new(700.0, 300.0), 0);
        chart.dispose();
        assert!(!chart.is_observing());
        assert!(!chart.poll_resize(1_000));
        chart.observe_resize(Size::new(800.0, 300.0), 2_000);
        assert!(!chart.poll_resize(3_000));
        assert_eq!(chart.model().listener_count(), 0);
        assert_eq!(chart.state(), ChartState::Disposed);
    }

    #[test]
    fn test_toggle_after_dispose_is_ignored() {
        let mut chart = bar_chart();
        chart.compose();
        chart.dispose();
        let markup = chart.to_svg_string();
        assert!(chart.toggle_series("S"));
        assert!(chart.toggle_series("S"));
        assert_eq!(chart.to_svg_string(), markup);
        assert!(chart.root().find_by_class("legend-item").iter().all(|e| !e.has_class("hidden")));
    }

    #[test]
    fn test_dimension_serde() {
        let d: Dimension = serde_json::from_str("\"auto\"").unwrap();
        assert_eq!(d, Dimension::Auto);
        let d: Dimension = serde_json::from_str("640").unwrap();
        assert_eq!(d, Dimension::Pixels(640.0));
        assert!(serde_json::from_str::<Dimension>("\"wide\"").is_err());
        assert!(serde_json::from_str::<Dimension>("-5").is_err());
    }
}
