//! FILENAME: app/src/dashboard/props.rs
//! PURPOSE: Maps (widget kind, derived data) to the prop bag its renderer takes.
//! CONTEXT: Pure and total over `WidgetConfig`. Unsupported widgets get `{}`.

use chart_engine::{ChartData, ChartKind, ChartRow, ChartWidget, StackMode, WidgetConfig};
use serde_json::{json, Value};

use crate::dashboard::kpi::KpiSummary;

pub fn widget_props(widget: &WidgetConfig, data: &ChartData, kpis: &KpiSummary) -> Value {
    match widget {
        WidgetConfig::Kpi(w) => json!({
            "title": w.title,
            "value": kpis.value(w.metric),
            "formatted": kpis.formatted(w.metric, w.format),
            "format": w.format,
        }),
        WidgetConfig::Chart(w) => chart_props(w, data),
        WidgetConfig::DataTable(w) => {
            let rows = data.rows();
            let columns: Vec<String> = match &w.columns {
                Some(columns) => columns.clone(),
                None => rows
                    .first()
                    .map(|r| r.keys().map(str::to_string).collect())
                    .unwrap_or_default(),
            };
            json!({
                "title": w.title,
                "columns": columns,
                "rows": rows,
            })
        }
        WidgetConfig::Matrix(w) => match data {
            ChartData::Matrix(matrix) => json!({
                "title": w.title,
                "rowKey": matrix.row_key,
                "columns": matrix.columns,
                "rows": matrix.rows,
                "totals": matrix.totals,
            }),
            _ => json!({ "title": w.title, "rowKey": "", "columns": [], "rows": [], "totals": {} }),
        },
        WidgetConfig::Heatmap(w) => match data {
            ChartData::Heatmap(heat) => json!({
                "title": w.title,
                "xLabels": heat.x_labels,
                "yLabels": heat.y_labels,
                "cells": heat.cells,
                "min": heat.min,
                "max": heat.max,
            }),
            _ => json!({ "title": w.title, "xLabels": [], "yLabels": [], "cells": [], "min": 0.0, "max": 0.0 }),
        },
        WidgetConfig::GeoMap(w) => {
            let points = match data {
                ChartData::GeoPoints(points) => json!(points),
                _ => json!([]),
            };
            json!({ "title": w.title, "points": points })
        }
        WidgetConfig::Unsupported => json!({}),
    }
}

fn chart_props(widget: &ChartWidget, data: &ChartData) -> Value {
    let chart = &widget.chart;
    let kind = chart.kind();
    let category_key = chart.category.as_ref().map(|c| c.field.clone()).unwrap_or_default();
    let value_key = chart
        .value
        .as_ref()
        .map(|v| v.output_key().to_string())
        .unwrap_or_default();

    let mut props = json!({
        "title": widget.title,
        "chartType": kind,
        "data": data_value(data),
    });

    let extra = match kind {
        ChartKind::Bar | ChartKind::Line | ChartKind::Area => {
            let series = if chart.legend.is_some() {
                series_keys(data.rows(), &category_key)
            } else {
                vec![value_key]
            };
            json!({
                "xKey": category_key,
                "series": series,
                "stacked": chart.stack != StackMode::None,
                "percent": chart.stack == StackMode::Percent,
            })
        }
        ChartKind::Pie => json!({ "nameKey": "name", "valueKey": "value" }),
        ChartKind::Treemap => json!({
            "nameKey": "name",
            "dataKey": "size",
            "colorKey": chart.color.as_ref().map(|_| "colorMetric"),
        }),
        ChartKind::Combo => json!({
            "xKey": category_key,
            "barKey": value_key,
            "lineKey": chart.line_output_key(),
        }),
        ChartKind::Scatter => json!({
            "xKey": category_key,
            "yKey": value_key,
        }),
        ChartKind::Waterfall => json!({ "categoryKey": "category", "valueKey": "value" }),
        ChartKind::Funnel => json!({ "nameKey": "stage", "valueKey": "value" }),
    };

    if let (Value::Object(props), Value::Object(extra)) = (&mut props, extra) {
        props.extend(extra);
    }
    props
}

/// The bare payload a chart renderer iterates over.
fn data_value(data: &ChartData) -> Value {
    match data {
        ChartData::Empty => json!([]),
        ChartData::Rows(rows) => json!(rows),
        ChartData::Slices(slices) => json!(slices),
        ChartData::Treemap(nodes) => json!(nodes),
        ChartData::Matrix(matrix) => json!(matrix),
        ChartData::Heatmap(heat) => json!(heat),
        ChartData::GeoPoints(points) => json!(points),
    }
}

/// Legend series present in pivoted rows, in first-appearance order.
fn series_keys(rows: &[ChartRow], category_key: &str) -> Vec<String> {
    let mut keys: Vec<String> = Vec::new();
    for row in rows {
        for key in row.keys() {
            if key != category_key && !keys.iter().any(|k| k == key) {
                keys.push(key.to_string());
            }
        }
    }
    keys
}
