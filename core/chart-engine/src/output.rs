//! FILENAME: core/chart-engine/src/output.rs
//! Chart Output - The renderable data shapes.
//!
//! Chart components are pure consumers of these structures. Wide rows keep
//! their field order so the first key is always the category.

use records::{FieldValue, Record};
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

// ============================================================================
// WIDE ROW
// ============================================================================

/// An ordered set of key/value pairs; serializes as a JSON object.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ChartRow {
    fields: Vec<(String, FieldValue)>,
}

impl ChartRow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copies every field of a record, in declaration order.
    pub fn from_record<R: Record>(record: &R) -> Self {
        ChartRow {
            fields: record
                .entries()
                .into_iter()
                .map(|(k, v)| (k.to_string(), v))
                .collect(),
        }
    }

    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.fields.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Numeric value of a key; absent keys read as `None`, not zero.
    pub fn number(&self, key: &str) -> Option<f64> {
        self.get(key).and_then(FieldValue::number)
    }

    /// Inserts or replaces a field, keeping the original position on replace.
    pub fn set(&mut self, key: &str, value: impl Into<FieldValue>) {
        let value = value.into();
        match self.fields.iter_mut().find(|(k, _)| k == key) {
            Some(slot) => slot.1 = value,
            None => self.fields.push((key.to_string(), value)),
        }
    }

    pub fn with(mut self, key: &str, value: impl Into<FieldValue>) -> Self {
        self.set(key, value);
        self
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&str, &mut FieldValue)> {
        self.fields.iter_mut().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Keeps only the listed keys, in the listed order. Unknown keys are skipped.
    pub fn project(&self, keys: &[String]) -> ChartRow {
        ChartRow {
            fields: keys
                .iter()
                .filter_map(|k| self.get(k).map(|v| (k.clone(), v.clone())))
                .collect(),
        }
    }
}

impl Serialize for ChartRow {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (k, v) in &self.fields {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

// ============================================================================
// SHAPED OUTPUTS
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PieSlice {
    pub name: String,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TreemapNode {
    pub name: String,
    pub size: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color_metric: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeatCell {
    pub x: String,
    pub y: String,
    pub value: f64,
}

/// Heatmap cells plus the axis labels and value range for the color scale.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HeatmapData {
    pub x_labels: Vec<String>,
    pub y_labels: Vec<String>,
    pub cells: Vec<HeatCell>,
    pub min: f64,
    pub max: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeoPoint {
    pub name: String,
    pub lat: f64,
    pub lng: f64,
    pub value: f64,
}

/// Cross-tab with per-row totals and a grand-total row.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatrixData {
    pub row_key: String,
    pub columns: Vec<String>,
    pub rows: Vec<ChartRow>,
    pub totals: ChartRow,
}

/// Label used for matrix total rows and columns.
pub const TOTAL_LABEL: &str = "Total";

/// Everything the pipeline can produce.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "shape", content = "data", rename_all = "camelCase")]
pub enum ChartData {
    Empty,
    Rows(Vec<ChartRow>),
    Slices(Vec<PieSlice>),
    Treemap(Vec<TreemapNode>),
    Matrix(MatrixData),
    Heatmap(HeatmapData),
    GeoPoints(Vec<GeoPoint>),
}

impl ChartData {
    /// Number of top-level items (rows, slices, nodes, cells, points).
    pub fn len(&self) -> usize {
        match self {
            ChartData::Empty => 0,
            ChartData::Rows(rows) => rows.len(),
            ChartData::Slices(slices) => slices.len(),
            ChartData::Treemap(nodes) => nodes.len(),
            ChartData::Matrix(matrix) => matrix.rows.len(),
            ChartData::Heatmap(heatmap) => heatmap.cells.len(),
            ChartData::GeoPoints(points) => points.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn rows(&self) -> &[ChartRow] {
        match self {
            ChartData::Rows(rows) => rows,
            _ => &[],
        }
    }
}
