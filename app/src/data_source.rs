//! FILENAME: app/src/data_source.rs
//! PURPOSE: The three dashboard datasets and the collaborator that fetches them.
//! CONTEXT: The console has no backend. `MockDataSource` serves deterministic
//! in-memory data asynchronously; tests can make any one fetch fail.

use std::future::Future;

use chrono::{Datelike, NaiveDate};
use chart_engine::SourceDataKey;
use records::{FieldValue, Record, RecordId};
use serde::{Deserialize, Serialize};

use crate::error::ConsoleError;

/// Calendar month labels in canonical order.
pub const MONTH_ORDER: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

// ============================================================================
// RECORD SHAPES
// ============================================================================

/// One detailed sales row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesRecord {
    pub id: RecordId,
    pub month: String,
    pub region: String,
    pub category: String,
    pub sales_amount: f64,
    pub profit: f64,
    pub customer_count: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lat: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lng: Option<f64>,
}

impl Record for SalesRecord {
    fn id(&self) -> RecordId {
        self.id
    }

    fn field(&self, key: &str) -> FieldValue {
        match key {
            "id" => FieldValue::Number(self.id as f64),
            "month" => self.month.as_str().into(),
            "region" => self.region.as_str().into(),
            "category" => self.category.as_str().into(),
            "salesAmount" => self.sales_amount.into(),
            "profit" => self.profit.into(),
            "customerCount" => self.customer_count.into(),
            "lat" => self.lat.into(),
            "lng" => self.lng.into(),
            _ => FieldValue::Empty,
        }
    }

    fn entries(&self) -> Vec<(&str, FieldValue)> {
        ["id", "month", "region", "category", "salesAmount", "profit", "customerCount", "lat", "lng"]
            .into_iter()
            .map(|k| (k, self.field(k)))
            .collect()
    }
}

/// One bar of the revenue bridge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaterfallStep {
    pub id: RecordId,
    pub category: String,
    pub value: f64,
}

impl Record for WaterfallStep {
    fn id(&self) -> RecordId {
        self.id
    }

    fn field(&self, key: &str) -> FieldValue {
        match key {
            "id" => FieldValue::Number(self.id as f64),
            "category" => self.category.as_str().into(),
            "value" => self.value.into(),
            _ => FieldValue::Empty,
        }
    }

    fn entries(&self) -> Vec<(&str, FieldValue)> {
        vec![
            ("id", self.field("id")),
            ("category", self.field("category")),
            ("value", self.field("value")),
        ]
    }
}

/// One stage of the sales funnel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunnelStage {
    pub id: RecordId,
    pub stage: String,
    pub value: f64,
}

impl Record for FunnelStage {
    fn id(&self) -> RecordId {
        self.id
    }

    fn field(&self, key: &str) -> FieldValue {
        match key {
            "id" => FieldValue::Number(self.id as f64),
            "stage" => self.stage.as_str().into(),
            "value" => self.value.into(),
            _ => FieldValue::Empty,
        }
    }

    fn entries(&self) -> Vec<(&str, FieldValue)> {
        vec![
            ("id", self.field("id")),
            ("stage", self.field("stage")),
            ("value", self.field("value")),
        ]
    }
}

// ============================================================================
// DATA SOURCE
// ============================================================================

/// The fetching collaborator. Each call resolves independently; the dashboard
/// treats any error as a single load failure.
pub trait DataSource {
    fn fetch_sales(&self) -> impl Future<Output = Result<Vec<SalesRecord>, ConsoleError>> + Send;

    fn fetch_waterfall(&self) -> impl Future<Output = Result<Vec<WaterfallStep>, ConsoleError>> + Send;

    fn fetch_funnel(&self) -> impl Future<Output = Result<Vec<FunnelStage>, ConsoleError>> + Send;
}

/// In-memory data source.
#[derive(Debug, Clone)]
pub struct MockDataSource {
    sales: Vec<SalesRecord>,
    waterfall: Vec<WaterfallStep>,
    funnel: Vec<FunnelStage>,
    failing: Option<SourceDataKey>,
}

impl MockDataSource {
    /// The shipped demo datasets.
    pub fn new() -> Self {
        MockDataSource {
            sales: demo_sales(),
            waterfall: demo_waterfall(),
            funnel: demo_funnel(),
            failing: None,
        }
    }

    pub fn with_data(
        sales: Vec<SalesRecord>,
        waterfall: Vec<WaterfallStep>,
        funnel: Vec<FunnelStage>,
    ) -> Self {
        MockDataSource {
            sales,
            waterfall,
            funnel,
            failing: None,
        }
    }

    /// Makes the fetch of one dataset fail.
    pub fn failing(mut self, dataset: SourceDataKey) -> Self {
        self.failing = Some(dataset);
        self
    }

    fn resolve<T: Clone>(&self, dataset: SourceDataKey, data: &[T]) -> Result<Vec<T>, ConsoleError> {
        if self.failing == Some(dataset) {
            return Err(ConsoleError::DataSource {
                dataset: dataset_name(dataset).to_string(),
                reason: "service unavailable".to_string(),
            });
        }
        Ok(data.to_vec())
    }
}

impl Default for MockDataSource {
    fn default() -> Self {
        Self::new()
    }
}

pub fn dataset_name(dataset: SourceDataKey) -> &'static str {
    match dataset {
        SourceDataKey::Sales => "sales",
        SourceDataKey::Waterfall => "waterfall",
        SourceDataKey::Funnel => "funnel",
    }
}

impl DataSource for MockDataSource {
    fn fetch_sales(&self) -> impl Future<Output = Result<Vec<SalesRecord>, ConsoleError>> + Send {
        let result = self.resolve(SourceDataKey::Sales, &self.sales);
        async move {
            tokio::task::yield_now().await;
            result
        }
    }

    fn fetch_waterfall(&self) -> impl Future<Output = Result<Vec<WaterfallStep>, ConsoleError>> + Send {
        let result = self.resolve(SourceDataKey::Waterfall, &self.waterfall);
        async move {
            tokio::task::yield_now().await;
            result
        }
    }

    fn fetch_funnel(&self) -> impl Future<Output = Result<Vec<FunnelStage>, ConsoleError>> + Send {
        let result = self.resolve(SourceDataKey::Funnel, &self.funnel);
        async move {
            tokio::task::yield_now().await;
            result
        }
    }
}

// ============================================================================
// DEMO DATA
// ============================================================================

struct RegionInfo {
    name: &'static str,
    lat: f64,
    lng: f64,
    weight: f64,
}

const REGIONS: [RegionInfo; 4] = [
    RegionInfo { name: "North", lat: 47.61, lng: -122.33, weight: 1.10 },
    RegionInfo { name: "South", lat: 29.76, lng: -95.37, weight: 0.95 },
    RegionInfo { name: "East", lat: 40.71, lng: -74.01, weight: 1.25 },
    RegionInfo { name: "West", lat: 34.05, lng: -118.24, weight: 0.85 },
];

const CATEGORIES: [(&str, f64, f64); 3] = [
    ("Electronics", 4200.0, 0.18),
    ("Furniture", 3100.0, 0.12),
    ("Office Supplies", 1600.0, 0.27),
];

/// Six months of sales per region and category. Deterministic.
pub fn demo_sales() -> Vec<SalesRecord> {
    let mut rows = Vec::new();
    let mut id: RecordId = 1;
    let months = (1..=6).filter_map(|m| NaiveDate::from_ymd_opt(2024, m, 1));
    for date in months {
        let month = date.format("%b").to_string();
        let season = 1.0 + 0.08 * date.month0() as f64;
        for region in &REGIONS {
            for (category, base, margin) in CATEGORIES {
                let sales_amount = (base * region.weight * season).round();
                let customer_count = (sales_amount / 85.0).round() as u32;
                rows.push(SalesRecord {
                    id,
                    month: month.clone(),
                    region: region.name.to_string(),
                    category: category.to_string(),
                    sales_amount,
                    profit: (sales_amount * margin).round(),
                    customer_count,
                    lat: Some(region.lat),
                    lng: Some(region.lng),
                });
                id += 1;
            }
        }
    }
    rows
}

pub fn demo_waterfall() -> Vec<WaterfallStep> {
    [
        ("Starting Revenue", 120_000.0),
        ("New Customers", 45_000.0),
        ("Upsell", 18_000.0),
        ("Churn", -22_000.0),
        ("Discounts", -9_000.0),
    ]
    .into_iter()
    .enumerate()
    .map(|(i, (category, value))| WaterfallStep {
        id: i as RecordId + 1,
        category: category.to_string(),
        value,
    })
    .collect()
}

pub fn demo_funnel() -> Vec<FunnelStage> {
    [
        ("Visitors", 12_000.0),
        ("Leads", 4_800.0),
        ("Qualified", 2_100.0),
        ("Proposals", 900.0),
        ("Closed", 380.0),
    ]
    .into_iter()
    .enumerate()
    .map(|(i, (stage, value))| FunnelStage {
        id: i as RecordId + 1,
        stage: stage.to_string(),
        value,
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_sales_shape() {
        let sales = demo_sales();
        assert_eq!(sales.len(), 6 * 4 * 3);
        assert_eq!(sales[0].month, "Jan");
        assert_eq!(sales.last().map(|s| s.month.as_str()), Some("Jun"));
        assert!(sales.iter().all(|s| s.customer_count > 0));
    }

    #[test]
    fn sales_fields_by_wire_name() {
        let row = &demo_sales()[0];
        assert_eq!(row.field("salesAmount"), FieldValue::Number(row.sales_amount));
        assert_eq!(row.field("region"), FieldValue::from("North"));
        assert_eq!(row.field("nope"), FieldValue::Empty);
        assert_eq!(row.entries().len(), 9);
    }

    #[test]
    fn missing_coordinates_read_empty() {
        let mut row = demo_sales()[0].clone();
        row.lat = None;
        assert!(row.field("lat").is_empty());
    }
}
