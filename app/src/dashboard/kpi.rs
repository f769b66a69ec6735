//! FILENAME: app/src/dashboard/kpi.rs
//! PURPOSE: Scalar reductions over the filtered sales rows, shown on KPI cards.

use chart_engine::{KpiMetric, ValueFormat};
use records::{format_currency, format_number, format_percent};
use serde::Serialize;

use crate::data_source::SalesRecord;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KpiSummary {
    pub total_sales: f64,
    pub total_profit: f64,
    pub total_customers: f64,
    /// Sales per customer; 0 when there are no customers.
    pub average_ticket: f64,
}

impl KpiSummary {
    pub fn from_sales(rows: &[&SalesRecord]) -> Self {
        let total_sales = total(rows, |r| r.sales_amount);
        let total_profit = total(rows, |r| r.profit);
        let total_customers = total(rows, |r| f64::from(r.customer_count));
        let average_ticket = if total_customers > 0.0 {
            total_sales / total_customers
        } else {
            0.0
        };
        KpiSummary {
            total_sales,
            total_profit,
            total_customers,
            average_ticket,
        }
    }

    pub fn value(&self, metric: KpiMetric) -> f64 {
        match metric {
            KpiMetric::TotalSales => self.total_sales,
            KpiMetric::TotalProfit => self.total_profit,
            KpiMetric::TotalCustomers => self.total_customers,
            KpiMetric::AverageTicket => self.average_ticket,
        }
    }

    /// Display string of a metric. Percent treats the value as a ratio.
    pub fn formatted(&self, metric: KpiMetric, format: ValueFormat) -> String {
        let value = self.value(metric);
        match format {
            ValueFormat::Number => format_number(value, 0),
            ValueFormat::Currency => format_currency(value, 2),
            ValueFormat::Percent => format_percent(value, 1),
        }
    }
}

/// Sum that starts from positive zero, so an empty selection reads as 0, not -0.
fn total(rows: &[&SalesRecord], value: impl Fn(&SalesRecord) -> f64) -> f64 {
    rows.iter().fold(0.0, |acc, r| acc + value(r))
}
