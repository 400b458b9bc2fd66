//! End-to-end tests driving charts through their public surface.

use serde_json::json;
use std::cell::RefCell;
use std::rc::Rc;
use vellum_charts::{
    normalize, BarOptions, Chart, ChartData, ChartKind, ChartSpec, Dimension, FlexiChart,
    FunctionOptions, LegendPosition, NormalizeOptions, PieOptions, Series,
};
use vellum_core::{ChartEvent, EventKind, Point, Rect, Size};

fn sweeps(chart: &Chart) -> Vec<f64> {
    chart
        .svg()
        .unwrap()
        .find_by_class("pie-segment")
        .iter()
        .filter_map(|e| e.num_attr("data-sweep"))
        .collect()
}

// =============================================================================
// Reference renders
// =============================================================================

#[test]
fn test_bar_two_rects_taller_for_larger_value() {
    let data = ChartData::new(["A", "B"], [Series::new("S", [10.0, 20.0])]);
    let mut chart = Chart::new(ChartKind::Bar(BarOptions::default()), data).size(500.0, 300.0);
    chart.compose();

    assert_eq!(chart.chart_area(), Rect::new(50.0, 20.0, 430.0, 240.0));
    let svg = chart.svg().unwrap();
    let rects = svg.find_all("rect");
    assert_eq!(rects.len(), 2);
    let h10 = rects[0].num_attr("height").unwrap();
    let h20 = rects[1].num_attr("height").unwrap();
    assert!(h20 > h10);
    assert_eq!(chart.to_svg_string().matches("<rect").count(), 2);
}

#[test]
fn test_pie_quarter_quarter_half() {
    let data: ChartData = serde_json::from_value(json!({"series": [{"values": [25, 25, 50]}]})).unwrap();
    let mut chart = Chart::new(ChartKind::Pie(PieOptions::default()), data);
    chart.compose();

    assert_eq!(chart.svg().unwrap().find_all("path").len(), 3);
    assert_eq!(sweeps(&chart), vec![90.0, 90.0, 180.0]);
    let starts: Vec<f64> = chart
        .svg()
        .unwrap()
        .find_by_class("pie-segment")
        .iter()
        .filter_map(|e| e.num_attr("data-start-angle"))
        .collect();
    assert_eq!(starts, vec![-90.0, 0.0, 90.0]);
}

// =============================================================================
// Invariants through the chart
// =============================================================================

#[test]
fn test_pie_hiding_reduces_total() {
    let data = ChartData::new(["a", "b", "c"], [Series::new("S", [25.0, 25.0, 50.0])]);
    let mut chart = Chart::new(ChartKind::Pie(PieOptions::donut()), data);
    chart.compose();
    assert_eq!(chart.pie_total(), 100.0);

    assert!(!chart.toggle_series("c"));
    assert_eq!(chart.pie_total(), 50.0);
    assert_eq!(sweeps(&chart), vec![180.0, 180.0]);
    let hidden_items: Vec<String> = chart
        .legend_items()
        .into_iter()
        .filter(|i| i.hidden)
        .map(|i| i.name)
        .collect();
    assert_eq!(hidden_items, vec!["c"]);

    assert!(chart.toggle_series("c"));
    assert_eq!(chart.pie_total(), 100.0);
}

#[test]
fn test_stacked_top_equals_sum() {
    let data = ChartData::new(
        ["A", "B"],
        [Series::new("lo", [10.0, 20.0]), Series::new("hi", [30.0, 5.0])],
    );
    let mut chart = Chart::new(ChartKind::Bar(BarOptions::stacked()), data);
    chart.compose();

    let area = chart.chart_area();
    let range = chart.value_range();
    let svg = chart.svg().unwrap();
    for (category, sum) in [("A", 40.0), ("B", 25.0)] {
        let top = svg
            .find_all("rect")
            .iter()
            .filter(|r| r.get_attr("data-category") == Some(category))
            .filter_map(|r| r.num_attr("y"))
            .fold(f64::INFINITY, f64::min);
        let expected = area.bottom() - range.fraction(sum) * area.height;
        assert!((top - expected).abs() < 0.01, "{category}: {top} vs {expected}");
    }
}

#[test]
fn test_normalizer_idempotent_through_chart() {
    let raw = json!([{"label": "x", "value": 3}, {"label": "y", "value": 4}]);
    let chart = FlexiChart::from_type("bar", &raw, &NormalizeOptions::default());
    let once = chart.data().clone();
    let again = normalize(&serde_json::to_value(&once).unwrap(), &NormalizeOptions::default());
    assert_eq!(once, again);
}

#[test]
fn test_function_pole_splits_path() {
    let kind = ChartKind::Function(FunctionOptions::new("1/x", |x| 1.0 / x));
    let mut chart = Chart::new(kind, ChartData::empty());
    chart.compose();
    let svg = chart.svg().unwrap();
    assert_eq!(svg.find_by_class("function-line").len(), 2);
    assert!(svg.find_by_class("no-data").is_empty());
}

#[test]
fn test_overlong_series_truncated() {
    let data = ChartData::new(["A", "B"], [Series::new("S", [10.0, 20.0, 5000.0])]);
    let mut chart = Chart::new(ChartKind::default(), data);
    chart.compose();
    assert_eq!(chart.svg().unwrap().find_all("rect").len(), 2);
    assert!(chart.value_range().max < 100.0);
}

#[test]
fn test_short_series_leaves_gaps() {
    let data = ChartData::new(
        ["A", "B", "C"],
        [Series::new("full", [1.0, 2.0, 3.0]), Series::new("short", [4.0])],
    );
    let mut chart = Chart::new(ChartKind::default(), data);
    chart.compose();
    assert_eq!(chart.svg().unwrap().find_all("rect").len(), 4);
}

// =============================================================================
// Interaction lifecycle
// =============================================================================

#[test]
fn test_click_raises_point_event() {
    let data = ChartData::new(["A", "B"], [Series::new("S", [10.0, 20.0])]);
    let mut chart = Chart::new(ChartKind::default(), data);
    chart.activate();

    let clicks = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&clicks);
    chart.on(EventKind::PointClick, move |e| {
        if let ChartEvent::PointClick(p) = e {
            sink.borrow_mut().push(p.clone());
        }
    });

    let bar = chart.svg().unwrap().find_all("rect")[0].clone();
    let center = Point::new(
        bar.num_attr("x").unwrap() + bar.num_attr("width").unwrap() / 2.0,
        bar.num_attr("y").unwrap() + bar.num_attr("height").unwrap() / 2.0,
    );
    chart.click(center);
    chart.pointer_move(center);

    let clicks = clicks.borrow();
    assert_eq!(clicks.len(), 1);
    assert_eq!(clicks[0].series, "S");
    assert_eq!(clicks[0].category.as_deref(), Some("A"));
    assert_eq!(clicks[0].value, 10.0);
    assert_eq!(clicks[0].element.as_deref(), Some("bar-0-0"));
}

#[test]
fn test_data_change_event_and_model_listener() {
    let mut chart = Chart::new(ChartKind::default(), ChartData::empty());
    chart.compose();
    assert!(chart.to_svg_string().contains("No Data"));

    let events = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&events);
    chart.on(EventKind::DataChange, move |e| sink.borrow_mut().push(e.clone()));
    let olds = Rc::new(RefCell::new(0usize));
    let seen = Rc::clone(&olds);
    chart.on_data_change(move |change| *seen.borrow_mut() = change.old.series.len());

    let data = ChartData::new(["A"], [Series::new("a", [1.0]), Series::new("b", [2.0])]);
    assert!(chart.set_data(data.clone()));
    assert!(!chart.set_data(data));

    assert_eq!(*events.borrow(), vec![ChartEvent::DataChange { series_count: 2 }]);
    assert_eq!(*olds.borrow(), 0);
    assert_eq!(chart.legend_items().len(), 2);
    assert!(!chart.to_svg_string().contains("No Data"));
}

#[test]
fn test_resize_burst_then_dispose() {
    let data = ChartData::new(["A", "B"], [Series::new("S", [1.0, 2.0])]);
    let mut chart = Chart::new(ChartKind::default(), data)
        .width(Dimension::Auto)
        .legend(LegendPosition::Top);
    chart.activate();

    let resizes = Rc::new(RefCell::new(0));
    let counter = Rc::clone(&resizes);
    chart.on(EventKind::Resize, move |_| *counter.borrow_mut() += 1);

    for (i, width) in [600.0, 650.0, 700.0].into_iter().enumerate() {
        chart.observe_resize(Size::new(width, 400.0), i as u64 * 30);
    }
    assert!(!chart.poll_resize(100));
    assert!(chart.poll_resize(160));
    assert_eq!(*resizes.borrow(), 1);
    // height stays fixed by the preset; width tracks the container
    assert_eq!(chart.pixel_size(), Size::new(700.0, 300.0));

    // same container again is not a change
    assert!(!chart.handle_resize(Size::new(700.0, 400.0)));

    chart.dispose();
    chart.observe_resize(Size::new(300.0, 400.0), 1_000);
    assert!(!chart.poll_resize(2_000));
    assert_eq!(chart.pixel_size(), Size::new(700.0, 300.0));
    assert_eq!(chart.raise_event(&ChartEvent::Resize { width: 1.0, height: 1.0 }), 0);
}

// =============================================================================
// Specs
// =============================================================================

#[test]
fn test_spec_to_html() {
    let spec = ChartSpec::from_yaml(
        r"
type: stacked-area
variant: dashboard
legend: left
title: Traffic
data:
  - {day: Mon, count: 3}
  - {day: Tue, count: 5}
  - {day: Wed, count: 4}
",
    )
    .unwrap();
    let mut chart = spec.build().unwrap();
    let html = chart.to_html();
    assert!(html.starts_with("<div"));
    assert!(html.contains("stacked-area-chart--dashboard"));
    assert!(html.contains("size-large"));
    assert!(html.contains("legend--left"));
    assert!(html.contains("Traffic"));
    let legend_at = html.find("legend--left").unwrap();
    let svg_at = html.find("<svg").unwrap();
    assert!(legend_at < svg_at);
    assert_eq!(chart.svg().unwrap().find_by_class("area").len(), 1);
}
