//! Raw input shapes to canonical [`ChartData`].
//!
//! JSON input is inspected by the keys of its first record. Detectors run in
//! a fixed priority order and the first match wins:
//!
//! 1. explicit `key`/`value` mapping from [`NormalizeOptions`]
//! 2. time series: `day`, `date` or `time` plus `count`
//! 3. categorical: `label` plus `value`
//! 4. histogram: `min`, `max` and `count`
//! 5. scatter: `x` plus `y`
//!
//! Objects that already carry `labels` and `series` pass through. Anything
//! else normalizes to empty data; this module never fails.

use crate::data::{ChartData, DataPoint, Series};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use vellum_core::fmt_exact;

const TIME_KEYS: [&str; 3] = ["day", "date", "time"];

/// Record shapes the normalizer understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Shape {
    /// `{day|date|time, count}`
    TimeSeries,
    /// `{label, value}`
    Categorical,
    /// `{min, max, count}`
    Histogram,
    /// `{x, y, label?}`
    Scatter,
}

/// Normalizer options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizeOptions {
    /// Field holding the category label
    pub key: Option<String>,
    /// Field holding the value
    pub value: Option<String>,
    /// Name of the produced series
    pub series_name: String,
    /// Force a detector instead of inspecting keys
    pub shape: Option<Shape>,
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        Self {
            key: None,
            value: None,
            series_name: "Series 1".to_string(),
            shape: None,
        }
    }
}

impl NormalizeOptions {
    /// Builder: explicit key/value field mapping.
    #[must_use]
    pub fn mapping(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self.value = Some(value.into());
        self
    }

    /// Builder: series name.
    #[must_use]
    pub fn series_name(mut self, name: impl Into<String>) -> Self {
        self.series_name = name.into();
        self
    }

    /// Builder: force a shape.
    #[must_use]
    pub const fn shape(mut self, shape: Shape) -> Self {
        self.shape = Some(shape);
        self
    }
}

/// One histogram bucket.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HistogramBucket {
    /// Inclusive lower edge
    pub min: f64,
    /// Upper edge
    pub max: f64,
    /// Number of samples in the bucket
    pub count: f64,
}

/// Already-typed input for Rust callers.
#[derive(Debug, Clone, PartialEq)]
pub enum RawData {
    /// Already canonical
    Canonical(ChartData),
    /// `(label, value)` pairs
    Categorical(Vec<(String, f64)>),
    /// `(time label, count)` pairs
    TimeSeries(Vec<(String, f64)>),
    /// Histogram buckets
    Histogram(Vec<HistogramBucket>),
    /// Free x/y points
    Scatter(Vec<DataPoint>),
    /// Bare values, labeled by 1-based position
    Values(Vec<f64>),
}

/// Normalize JSON input.
#[must_use]
pub fn normalize(raw: &Value, options: &NormalizeOptions) -> ChartData {
    match detect(raw, options) {
        Some(typed) => normalize_typed(typed, options),
        None => ChartData::empty(),
    }
}

/// Normalize typed input.
#[must_use]
pub fn normalize_typed(raw: RawData, options: &NormalizeOptions) -> ChartData {
    let name = options.series_name.clone();
    match raw {
        RawData::Canonical(data) => data,
        RawData::Categorical(pairs) | RawData::TimeSeries(pairs) => {
            let (labels, values): (Vec<_>, Vec<_>) = pairs.into_iter().unzip();
            single(labels, Series::new(name, values))
        }
        RawData::Histogram(buckets) => {
            let labels = buckets
                .iter()
                .map(|b| format!("{}-{}", fmt_exact(b.min), fmt_exact(b.max)))
                .collect();
            single(labels, Series::new(name, buckets.iter().map(|b| b.count)))
        }
        RawData::Scatter(points) => single(Vec::new(), Series::points(name, points)),
        RawData::Values(values) => {
            let labels = (1..=values.len()).map(|i| i.to_string()).collect();
            single(labels, Series::new(name, values))
        }
    }
}

fn single(labels: Vec<String>, series: Series) -> ChartData {
    if series.is_empty() {
        return ChartData::empty();
    }
    ChartData {
        labels,
        series: vec![series],
    }
}

/// Bin raw samples into `bins` equal-width buckets.
///
/// Non-finite samples are dropped. The last bucket includes its upper edge.
#[must_use]
pub fn histogram_from_samples(samples: &[f64], bins: usize) -> Vec<HistogramBucket> {
    let finite: Vec<f64> = samples.iter().copied().filter(|v| v.is_finite()).collect();
    if finite.is_empty() || bins == 0 {
        return Vec::new();
    }
    let lo = finite.iter().copied().fold(f64::INFINITY, f64::min);
    let hi = finite.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let width = if hi > lo { (hi - lo) / bins as f64 } else { 1.0 };

    let mut buckets: Vec<HistogramBucket> = (0..bins)
        .map(|i| HistogramBucket {
            min: width.mul_add(i as f64, lo),
            max: width.mul_add((i + 1) as f64, lo),
            count: 0.0,
        })
        .collect();
    for v in finite {
        let index = (((v - lo) / width).floor() as usize).min(bins - 1);
        buckets[index].count += 1.0;
    }
    buckets
}

fn detect(raw: &Value, options: &NormalizeOptions) -> Option<RawData> {
    match raw {
        Value::Object(obj) if obj.contains_key("labels") && obj.contains_key("series") => {
            match serde_json::from_value::<ChartData>(raw.clone()) {
                Ok(data) => Some(RawData::Canonical(data)),
                Err(err) => {
                    tracing::warn!(%err, "canonical chart data did not deserialize");
                    None
                }
            }
        }
        Value::Array(items) => detect_records(items, options),
        Value::Null => None,
        other => {
            tracing::warn!(kind = json_kind(other), "unrecognized chart data");
            None
        }
    }
}

fn detect_records(items: &[Value], options: &NormalizeOptions) -> Option<RawData> {
    let first = items.first()?;
    if first.is_number() {
        return Some(RawData::Values(items.iter().filter_map(number).collect()));
    }
    let keys = first.as_object()?;
    let records = items.iter().filter_map(Value::as_object);

    if let (Some(key), Some(value)) = (&options.key, &options.value) {
        return Some(RawData::Categorical(pairs(records, key, value)));
    }

    let time_key = TIME_KEYS.into_iter().find(|k| keys.contains_key(*k));
    let shape = options.shape.or_else(|| {
        if time_key.is_some() && keys.contains_key("count") {
            Some(Shape::TimeSeries)
        } else if has_all(keys, &["label", "value"]) {
            Some(Shape::Categorical)
        } else if has_all(keys, &["min", "max", "count"]) {
            Some(Shape::Histogram)
        } else if has_all(keys, &["x", "y"]) {
            Some(Shape::Scatter)
        } else {
            None
        }
    });

    let Some(shape) = shape else {
        tracing::warn!(keys = ?keys.keys().collect::<Vec<_>>(), "no detector matched chart records");
        return None;
    };
    tracing::debug!(?shape, records = items.len(), "detected record shape");

    let typed = match shape {
        Shape::TimeSeries => RawData::TimeSeries(pairs(records, time_key?, "count")),
        Shape::Categorical => RawData::Categorical(pairs(records, "label", "value")),
        Shape::Histogram => RawData::Histogram(
            records
                .filter_map(|r| {
                    Some(HistogramBucket {
                        min: number(r.get("min")?)?,
                        max: number(r.get("max")?)?,
                        count: number(r.get("count")?)?,
                    })
                })
                .collect(),
        ),
        Shape::Scatter => RawData::Scatter(
            records
                .filter_map(|r| {
                    Some(DataPoint {
                        x: number(r.get("x")?)?,
                        y: number(r.get("y")?)?,
                        label: r.get("label").map(label_text),
                    })
                })
                .collect(),
        ),
    };
    Some(typed)
}

fn pairs<'a>(
    records: impl Iterator<Item = &'a Map<String, Value>>,
    key: &str,
    value: &str,
) -> Vec<(String, f64)> {
    records
        .filter_map(|r| Some((label_text(r.get(key)?), number(r.get(value)?)?)))
        .collect()
}

fn has_all(keys: &Map<String, Value>, wanted: &[&str]) -> bool {
    wanted.iter().all(|k| keys.contains_key(*k))
}

/// Finite number from a JSON number or numeric string.
fn number(v: &Value) -> Option<f64> {
    let n = match v {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse().ok()?,
        _ => return None,
    };
    n.is_finite().then_some(n)
}

fn label_text(v: &Value) -> String {
    match v {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

const fn json_kind(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    fn opts() -> NormalizeOptions {
        NormalizeOptions::default()
    }

    #[test]
    fn test_passthrough() {
        let raw = json!({"labels": ["A", "B"], "series": [{"name": "S", "values": [10, 20]}]});
        let data = normalize(&raw, &opts());
        assert_eq!(data.labels, vec!["A", "B"]);
        assert_eq!(data.series[0].value_at(1), Some(20.0));
    }

    #[test]
    fn test_categorical() {
        let raw = json!([{"label": "A", "value": 1}, {"label": "B", "value": "2.5"}]);
        let data = normalize(&raw, &opts());
        assert_eq!(data.labels, vec!["A", "B"]);
        assert_eq!(data.series.len(), 1);
        assert_eq!(data.series[0].name, "Series 1");
        assert_eq!(data.series[0].value_at(1), Some(2.5));
    }

    #[test]
    fn test_time_series_beats_categorical() {
        let raw = json!([{"date": "2024-01-01", "count": 3, "label": "x", "value": 9}]);
        let data = normalize(&raw, &opts());
        assert_eq!(data.labels, vec!["2024-01-01"]);
        assert_eq!(data.series[0].value_at(0), Some(3.0));
    }

    #[test]
    fn test_explicit_mapping_wins() {
        let raw = json!([{"day": "Mon", "count": 3, "region": "EU", "sales": 7}]);
        let o = opts().mapping("region", "sales").series_name("Sales");
        let data = normalize(&raw, &o);
        assert_eq!(data.labels, vec!["EU"]);
        assert_eq!(data.series[0].name, "Sales");
        assert_eq!(data.series[0].value_at(0), Some(7.0));
    }

    #[test]
    fn test_histogram_labels() {
        let raw = json!([{"min": 0, "max": 10, "count": 4}, {"min": 10, "max": 20.5, "count": 1}]);
        let data = normalize(&raw, &opts());
        assert_eq!(data.labels, vec!["0-10", "10-20.5"]);
    }

    #[test]
    fn test_histogram_labels_keep_small_edges_distinct() {
        let raw = json!([
            {"min": 0.001, "max": 0.002, "count": 3},
            {"min": 0.002, "max": 0.003, "count": 5}
        ]);
        let data = normalize(&raw, &opts());
        assert_eq!(data.labels, vec!["0.001-0.002", "0.002-0.003"]);
    }

    #[test]
    fn test_scatter() {
        let raw = json!([{"x": 1, "y": 2, "label": "p"}, {"x": 3, "y": 4}]);
        let data = normalize(&raw, &opts());
        let points = data.series[0].xy();
        assert_eq!(points[0], DataPoint::new(1.0, 2.0).label("p"));
        assert_eq!(points[1].label, None);
    }

    #[test]
    fn test_forced_shape() {
        let raw = json!([{"label": "A", "value": 1, "x": 5, "y": 6}]);
        let data = normalize(&raw, &opts().shape(Shape::Scatter));
        assert_eq!(data.series[0].xy()[0], DataPoint::new(5.0, 6.0));
    }

    #[test]
    fn test_bare_numbers() {
        let data = normalize(&json!([3, 4]), &opts());
        assert_eq!(data.labels, vec!["1", "2"]);
    }

    #[test]
    fn test_unrecognized_is_empty() {
        for raw in [json!(null), json!("x"), json!([]), json!([{"foo": 1}]), json!({"labels": []})] {
            assert_eq!(normalize(&raw, &opts()), ChartData::empty(), "{raw}");
        }
    }

    #[test]
    fn test_records_with_bad_values_are_skipped() {
        let raw = json!([{"label": "A", "value": null}, {"label": "B", "value": 2}]);
        let data = normalize(&raw, &opts());
        assert_eq!(data.labels, vec!["B"]);
    }

    #[test]
    fn test_histogram_from_samples() {
        let buckets = histogram_from_samples(&[0.0, 1.0, 2.0, 3.0, 4.0, f64::NAN], 2);
        assert_eq!(buckets.len(), 2);
        assert_eq!(buckets[0].min, 0.0);
        assert_eq!(buckets[1].max, 4.0);
        assert_eq!(buckets[0].count + buckets[1].count, 5.0);
        assert_eq!(buckets[1].count, 3.0);
        assert!(histogram_from_samples(&[], 4).is_empty());
        assert_eq!(histogram_from_samples(&[2.0, 2.0], 3)[0].count, 2.0);
    }

    #[test]
    fn test_typed_histogram_matches_json() {
        let typed = normalize_typed(
            RawData::Histogram(histogram_from_samples(&[1.0, 2.0, 3.0], 2)),
            &opts(),
        );
        let json = normalize(
            &json!([{"min": 1, "max": 2, "count": 1}, {"min": 2, "max": 3, "count": 2}]),
            &opts(),
        );
        assert_eq!(typed, json);
    }

    proptest! {
        #[test]
        fn prop_normalize_is_idempotent(
            rows in prop::collection::vec(("[a-z]{1,6}", -1e6f64..1e6), 0..20)
        ) {
            let raw = Value::Array(
                rows.iter().map(|(l, v)| json!({"label": l, "value": v})).collect()
            );
            let once = normalize(&raw, &NormalizeOptions::default());
            let again = normalize(&serde_json::to_value(&once).unwrap(), &NormalizeOptions::default());
            prop_assert_eq!(once, again);
        }
    }
}
