//! FILENAME: core/chart-engine/src/widget.rs
//! PURPOSE: The closed set of dashboard widget kinds.
//! CONTEXT: Tagged by `"component"` in JSON. Unknown tags deserialize to
//! `Unsupported` so one misconfigured widget cannot break a whole dashboard.

use serde::{Deserialize, Serialize};

use crate::definition::{ChartConfig, WellConfig};

/// Which in-memory dataset a widget reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SourceDataKey {
    #[default]
    Sales,
    Waterfall,
    Funnel,
}

/// Scalar reductions shown on KPI cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum KpiMetric {
    TotalSales,
    TotalProfit,
    TotalCustomers,
    AverageTicket,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ValueFormat {
    #[default]
    Number,
    Currency,
    Percent,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KpiWidget {
    pub id: String,
    pub title: String,
    pub metric: KpiMetric,
    #[serde(default)]
    pub format: ValueFormat,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartWidget {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub source: SourceDataKey,
    pub chart: ChartConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableWidget {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub source: SourceDataKey,
    /// Columns to show, in order. All fields when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub columns: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_rows: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatrixWidget {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub source: SourceDataKey,
    pub rows: Option<WellConfig>,
    pub columns: Option<WellConfig>,
    pub value: Option<WellConfig>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeatmapWidget {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub source: SourceDataKey,
    pub x: Option<WellConfig>,
    pub y: Option<WellConfig>,
    pub value: Option<WellConfig>,
}

fn default_lat_field() -> String {
    "lat".to_string()
}

fn default_lng_field() -> String {
    "lng".to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeoMapWidget {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub source: SourceDataKey,
    pub location: Option<WellConfig>,
    pub value: Option<WellConfig>,
    #[serde(default = "default_lat_field")]
    pub lat_field: String,
    #[serde(default = "default_lng_field")]
    pub lng_field: String,
}

/// One dashboard widget.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "component", rename_all = "camelCase")]
pub enum WidgetConfig {
    Kpi(KpiWidget),
    Chart(ChartWidget),
    DataTable(TableWidget),
    Matrix(MatrixWidget),
    GeoMap(GeoMapWidget),
    Heatmap(HeatmapWidget),
    #[serde(other)]
    Unsupported,
}

impl WidgetConfig {
    /// The widget id; `Unsupported` widgets have none.
    pub fn id(&self) -> Option<&str> {
        match self {
            WidgetConfig::Kpi(w) => Some(&w.id),
            WidgetConfig::Chart(w) => Some(&w.id),
            WidgetConfig::DataTable(w) => Some(&w.id),
            WidgetConfig::Matrix(w) => Some(&w.id),
            WidgetConfig::GeoMap(w) => Some(&w.id),
            WidgetConfig::Heatmap(w) => Some(&w.id),
            WidgetConfig::Unsupported => None,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            WidgetConfig::Kpi(w) => &w.title,
            WidgetConfig::Chart(w) => &w.title,
            WidgetConfig::DataTable(w) => &w.title,
            WidgetConfig::Matrix(w) => &w.title,
            WidgetConfig::GeoMap(w) => &w.title,
            WidgetConfig::Heatmap(w) => &w.title,
            WidgetConfig::Unsupported => "",
        }
    }

    /// KPIs always read the (filtered) sales data.
    pub fn source(&self) -> SourceDataKey {
        match self {
            WidgetConfig::Kpi(_) | WidgetConfig::Unsupported => SourceDataKey::Sales,
            WidgetConfig::Chart(w) => w.source,
            WidgetConfig::DataTable(w) => w.source,
            WidgetConfig::Matrix(w) => w.source,
            WidgetConfig::GeoMap(w) => w.source,
            WidgetConfig::Heatmap(w) => w.source,
        }
    }
}
