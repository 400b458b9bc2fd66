//! Canonical chart data: labels plus named series.

use serde::{Deserialize, Serialize};

/// A single x/y point, used by scatter series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataPoint {
    /// X value
    pub x: f64,
    /// Y value
    pub y: f64,
    /// Optional point label
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl DataPoint {
    /// Create an unlabeled point.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y, label: None }
    }

    /// Builder: attach a label.
    #[must_use]
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

/// Series values: flat numbers on a category axis, or free x/y points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SeriesValues {
    /// One value per category label
    Numbers(Vec<f64>),
    /// Independent x/y points
    Points(Vec<DataPoint>),
}

impl Default for SeriesValues {
    fn default() -> Self {
        Self::Numbers(Vec::new())
    }
}

/// A named data series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    /// Series name; also the legend label and hidden-set key
    #[serde(default)]
    pub name: String,
    /// Values
    #[serde(default)]
    pub values: SeriesValues,
    /// Explicit color; falls back to the palette
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl Series {
    /// Numeric series.
    pub fn new(name: impl Into<String>, values: impl IntoIterator<Item = f64>) -> Self {
        Self {
            name: name.into(),
            values: SeriesValues::Numbers(values.into_iter().collect()),
            color: None,
        }
    }

    /// Point series.
    pub fn points(name: impl Into<String>, points: impl IntoIterator<Item = DataPoint>) -> Self {
        Self {
            name: name.into(),
            values: SeriesValues::Points(points.into_iter().collect()),
            color: None,
        }
    }

    /// Builder: explicit color.
    #[must_use]
    pub fn color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    /// Value at a category index. Point series yield the point's y.
    #[must_use]
    pub fn value_at(&self, index: usize) -> Option<f64> {
        match &self.values {
            SeriesValues::Numbers(v) => v.get(index).copied(),
            SeriesValues::Points(p) => p.get(index).map(|p| p.y),
        }
    }

    /// All y values in order.
    pub fn ys(&self) -> Box<dyn Iterator<Item = f64> + '_> {
        match &self.values {
            SeriesValues::Numbers(v) => Box::new(v.iter().copied()),
            SeriesValues::Points(p) => Box::new(p.iter().map(|p| p.y)),
        }
    }

    /// Values as x/y points. Numeric series use the index as x.
    #[must_use]
    pub fn xy(&self) -> Vec<DataPoint> {
        match &self.values {
            SeriesValues::Numbers(v) => v
                .iter()
                .enumerate()
                .map(|(i, y)| DataPoint::new(i as f64, *y))
                .collect(),
            SeriesValues::Points(p) => p.clone(),
        }
    }

    /// Number of values.
    #[must_use]
    pub fn len(&self) -> usize {
        match &self.values {
            SeriesValues::Numbers(v) => v.len(),
            SeriesValues::Points(p) => p.len(),
        }
    }

    /// Whether the series has no values.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Canonical `{labels, series}` shape consumed by every generator.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChartData {
    /// Category labels
    #[serde(default)]
    pub labels: Vec<String>,
    /// Series in draw order
    #[serde(default)]
    pub series: Vec<Series>,
}

impl ChartData {
    /// Create chart data.
    pub fn new<L, S>(labels: impl IntoIterator<Item = L>, series: S) -> Self
    where
        L: Into<String>,
        S: IntoIterator<Item = Series>,
    {
        Self {
            labels: labels.into_iter().map(Into::into).collect(),
            series: series.into_iter().collect(),
        }
    }

    /// Empty data: no labels and no series.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Whether there is nothing to plot.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.series.iter().all(Series::is_empty)
    }

    /// Look up a series by name.
    #[must_use]
    pub fn series_named(&self, name: &str) -> Option<&Series> {
        self.series.iter().find(|s| s.name == name)
    }

    /// Numeric series whose length differs from the label count.
    ///
    /// Returns `(name, values, labels)` triples.
    #[must_use]
    pub fn length_mismatches(&self) -> Vec<(&str, usize, usize)> {
        let labels = self.labels.len();
        self.series
            .iter()
            .filter(|s| matches!(s.values, SeriesValues::Numbers(_)) && s.len() != labels)
            .map(|s| (s.name.as_str(), s.len(), labels))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_series_value_at() {
        let s = Series::new("S", [1.0, 2.0]);
        assert_eq!(s.value_at(1), Some(2.0));
        assert_eq!(s.value_at(2), None);

        let p = Series::points("P", [DataPoint::new(3.0, 4.0)]);
        assert_eq!(p.value_at(0), Some(4.0));
    }

    #[test]
    fn test_series_deserializes_numbers_and_points() {
        let nums: Series = serde_json::from_str(r#"{"name":"a","values":[1,2.5]}"#).unwrap();
        assert_eq!(nums.values, SeriesValues::Numbers(vec![1.0, 2.5]));

        let pts: Series =
            serde_json::from_str(r#"{"name":"b","values":[{"x":1,"y":2,"label":"p"}]}"#).unwrap();
        assert_eq!(
            pts.values,
            SeriesValues::Points(vec![DataPoint::new(1.0, 2.0).label("p")])
        );
    }

    #[test]
    fn test_chart_data_serialization_skips_absent_color() {
        let data = ChartData::new(["A"], [Series::new("S", [1.0])]);
        let json = serde_json::to_string(&data).unwrap();
        assert_eq!(json, r#"{"labels":["A"],"series":[{"name":"S","values":[1.0]}]}"#);
    }

    #[test]
    fn test_length_mismatches() {
        let data = ChartData::new(
            ["A", "B", "C"],
            [
                Series::new("ok", [1.0, 2.0, 3.0]),
                Series::new("short", [1.0]),
                Series::new("long", [1.0, 2.0, 3.0, 4.0]),
            ],
        );
        assert_eq!(
            data.length_mismatches(),
            vec![("short", 1, 3), ("long", 4, 3)]
        );
    }

    #[test]
    fn test_is_empty() {
        assert!(ChartData::empty().is_empty());
        assert!(ChartData::new(["A"], [Series::new("S", [])]).is_empty());
        assert!(!ChartData::new(["A"], [Series::new("S", [1.0])]).is_empty());
    }
}
