//! FILENAME: app/src/dashboard/config.rs
//! PURPOSE: The static dashboard configuration and the shipped layout.

use chart_engine::{
    AggregationKind, ChartConfig, ChartKind, ChartWidget, GeoMapWidget, HeatmapWidget,
    KpiMetric, KpiWidget, MatrixWidget, SourceDataKey, StackMode, TableWidget, ValueFormat,
    WellConfig, WidgetConfig,
};
use serde::{Deserialize, Serialize};

use crate::dashboard::filters::FilterDimension;
use crate::data_source::MONTH_ORDER;
use crate::error::ConsoleError;

/// Ordered widgets plus the enabled global filter dimensions.
/// Read-only once loaded. Both lists may be omitted in JSON and then start
/// empty; only a missing `dashboard` section falls back to the shipped layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardConfig {
    #[serde(default)]
    pub widgets: Vec<WidgetConfig>,
    #[serde(default)]
    pub filters: Vec<FilterDimension>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self::default_layout()
    }
}

impl DashboardConfig {
    pub fn from_json(text: &str) -> Result<Self, ConsoleError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn widget(&self, id: &str) -> Option<&WidgetConfig> {
        self.widgets.iter().find(|w| w.id() == Some(id))
    }

    /// The dashboard shipped with the console.
    pub fn default_layout() -> Self {
        let sales = WellConfig::new("salesAmount", AggregationKind::Sum).with_label("Sales");
        let profit = WellConfig::new("profit", AggregationKind::Sum).with_label("Profit");

        let widgets = vec![
            kpi("kpi-sales", "Total Sales", KpiMetric::TotalSales, ValueFormat::Currency),
            kpi("kpi-profit", "Total Profit", KpiMetric::TotalProfit, ValueFormat::Currency),
            kpi("kpi-customers", "Customers", KpiMetric::TotalCustomers, ValueFormat::Number),
            kpi("kpi-ticket", "Average Ticket", KpiMetric::AverageTicket, ValueFormat::Currency),
            chart(
                "sales-by-month",
                "Sales by Month",
                SourceDataKey::Sales,
                ChartConfig::new(ChartKind::Bar)
                    .with_category(WellConfig::dimension("month"))
                    .with_value(sales.clone())
                    .with_legend(WellConfig::dimension("region"))
                    .with_stack(StackMode::Stacked),
            ),
            chart(
                "category-mix",
                "Category Mix",
                SourceDataKey::Sales,
                ChartConfig::new(ChartKind::Area)
                    .with_category(WellConfig::dimension("month"))
                    .with_value(sales.clone())
                    .with_legend(WellConfig::dimension("category"))
                    .with_stack(StackMode::Percent),
            ),
            chart(
                "sales-by-region",
                "Sales by Region",
                SourceDataKey::Sales,
                ChartConfig::new(ChartKind::Pie)
                    .with_category(WellConfig::dimension("region"))
                    .with_value(sales.clone()),
            ),
            chart(
                "category-treemap",
                "Sales by Category",
                SourceDataKey::Sales,
                ChartConfig::new(ChartKind::Treemap)
                    .with_category(WellConfig::dimension("category"))
                    .with_value(sales.clone())
                    .with_color(WellConfig::new("profit", AggregationKind::Average)),
            ),
            chart(
                "sales-vs-profit",
                "Sales vs Profit",
                SourceDataKey::Sales,
                ChartConfig::new(ChartKind::Combo)
                    .with_category(WellConfig::dimension("month"))
                    .with_value(sales.clone())
                    .with_line(profit)
                    .with_category_order(MONTH_ORDER),
            ),
            chart(
                "revenue-bridge",
                "Revenue Bridge",
                SourceDataKey::Waterfall,
                ChartConfig::new(ChartKind::Waterfall),
            ),
            chart(
                "pipeline",
                "Sales Pipeline",
                SourceDataKey::Funnel,
                ChartConfig::new(ChartKind::Funnel),
            ),
            WidgetConfig::Matrix(MatrixWidget {
                id: "region-category".to_string(),
                title: "Region x Category".to_string(),
                source: SourceDataKey::Sales,
                rows: Some(WellConfig::dimension("region")),
                columns: Some(WellConfig::dimension("category")),
                value: Some(sales.clone()),
            }),
            WidgetConfig::Heatmap(HeatmapWidget {
                id: "month-region-heat".to_string(),
                title: "Monthly Sales Heatmap".to_string(),
                source: SourceDataKey::Sales,
                x: Some(WellConfig::dimension("month")),
                y: Some(WellConfig::dimension("region")),
                value: Some(sales.clone()),
            }),
            WidgetConfig::GeoMap(GeoMapWidget {
                id: "sales-map".to_string(),
                title: "Sales by Location".to_string(),
                source: SourceDataKey::Sales,
                location: Some(WellConfig::dimension("region")),
                value: Some(sales),
                lat_field: "lat".to_string(),
                lng_field: "lng".to_string(),
            }),
            WidgetConfig::DataTable(TableWidget {
                id: "sales-detail".to_string(),
                title: "Sales Detail".to_string(),
                source: SourceDataKey::Sales,
                columns: Some(
                    ["month", "region", "category", "salesAmount", "profit", "customerCount"]
                        .iter()
                        .map(|c| c.to_string())
                        .collect(),
                ),
                max_rows: Some(25),
            }),
        ];

        DashboardConfig {
            widgets,
            filters: FilterDimension::ALL.to_vec(),
        }
    }
}

fn kpi(id: &str, title: &str, metric: KpiMetric, format: ValueFormat) -> WidgetConfig {
    WidgetConfig::Kpi(KpiWidget {
        id: id.to_string(),
        title: title.to_string(),
        metric,
        format,
    })
}

fn chart(id: &str, title: &str, source: SourceDataKey, chart: ChartConfig) -> WidgetConfig {
    WidgetConfig::Chart(ChartWidget {
        id: id.to_string(),
        title: title.to_string(),
        source,
        chart,
    })
}
