//! FILENAME: core/chart-engine/src/engine.rs
//! Chart Engine - Transforms a flat record set into chart-ready data.
//!
//! Takes a widget configuration (wells) and the widget's dataset and produces
//! the exact shape the widget's renderer expects.
//!
//! Categorical algorithm (bar/line/area/pie):
//! 1. Group by (category, legend-or-"default")
//! 2. Aggregate the value well per group
//! 3. Pie: emit name/value slices
//! 4. Legend configured: pivot into one wide row per category
//! 5. Percent stacking: normalize each wide row to sum to 1
//! 6. Otherwise: one row per category with a single value field
//!
//! Configuration gaps (missing wells) produce empty output, never a panic.

use records::Record;
use rustc_hash::FxHashMap;
use smallvec::smallvec;

use crate::aggregate::aggregate_well;
use crate::definition::{ChartConfig, ChartKind, StackMode, WellConfig};
use crate::group::{group_by, GroupKey};
use crate::output::{
    ChartData, ChartRow, GeoPoint, HeatCell, HeatmapData, MatrixData, PieSlice, TreemapNode,
    TOTAL_LABEL,
};
use crate::widget::{GeoMapWidget, HeatmapWidget, MatrixWidget, TableWidget, WidgetConfig};

/// Legend value used when no legend well is configured.
const DEFAULT_SERIES: &str = "default";

// ============================================================================
// ENTRY POINTS
// ============================================================================

/// Computes the data for any widget kind.
/// KPIs are scalar reductions owned by the dashboard, so they yield `Empty` here.
pub fn process_widget_data<R: Record>(records: &[R], widget: &WidgetConfig) -> ChartData {
    match widget {
        WidgetConfig::Kpi(_) => ChartData::Empty,
        WidgetConfig::Chart(w) => process_chart_data(records, &w.chart),
        WidgetConfig::DataTable(w) => table_rows(records, w),
        WidgetConfig::Matrix(w) => matrix(records, w),
        WidgetConfig::GeoMap(w) => geo_points(records, w),
        WidgetConfig::Heatmap(w) => heatmap(records, w),
        WidgetConfig::Unsupported => ChartData::Empty,
    }
}

/// Computes chart data for one chart configuration.
pub fn process_chart_data<R: Record>(records: &[R], config: &ChartConfig) -> ChartData {
    let kind = config.kind();

    if kind.is_passthrough() {
        if records.is_empty() {
            return ChartData::Empty;
        }
        return ChartData::Rows(records.iter().map(ChartRow::from_record).collect());
    }

    let (Some(category), Some(value)) = (&config.category, &config.value) else {
        return ChartData::Empty;
    };
    if records.is_empty() {
        return ChartData::Empty;
    }

    match kind {
        ChartKind::Treemap => treemap(records, category, value, config.color.as_ref()),
        ChartKind::Combo => combo(records, config, category, value),
        ChartKind::Pie => pie(records, category, value),
        _ => categorical(records, config, category, value),
    }
}

// ============================================================================
// CATEGORICAL
// ============================================================================

fn categorical<R: Record>(
    records: &[R],
    config: &ChartConfig,
    category: &WellConfig,
    value: &WellConfig,
) -> ChartData {
    let category_key = category.field.as_str();

    let Some(legend) = &config.legend else {
        let groups = group_by(records, &[category_key]);
        let rows = groups
            .iter()
            .map(|(_, items)| {
                ChartRow::new()
                    .with(category_key, items[0].field(category_key))
                    .with(value.output_key(), aggregate_well(items, value))
            })
            .collect();
        return ChartData::Rows(rows);
    };

    let groups = group_by(records, &[category_key, legend.field.as_str()]);

    // Pivot: one wide row per category, one column per legend value present.
    let mut row_index: FxHashMap<&str, usize> = FxHashMap::default();
    let mut rows: Vec<ChartRow> = Vec::new();
    for (key, items) in groups.iter() {
        let series = series_name(&key[1]);
        let aggregated = aggregate_well(items, value);
        let index = *row_index.entry(key[0].as_str()).or_insert_with(|| {
            rows.push(ChartRow::new().with(category_key, items[0].field(category_key)));
            rows.len() - 1
        });
        rows[index].set(series, aggregated);
    }

    if config.stack == StackMode::Percent {
        for row in &mut rows {
            normalize_row(row, category_key);
        }
    }

    ChartData::Rows(rows)
}

fn series_name(legend_value: &str) -> &str {
    if legend_value.is_empty() {
        DEFAULT_SERIES
    } else {
        legend_value
    }
}

/// Divides every numeric field except the category by the row's sum.
/// Rows summing to zero or less keep their raw values.
fn normalize_row(row: &mut ChartRow, category_key: &str) {
    let total: f64 = row
        .iter()
        .filter(|(k, _)| *k != category_key)
        .filter_map(|(_, v)| v.number())
        .fold(0.0, |acc, v| acc + v);
    if total <= 0.0 {
        return;
    }
    for (key, value) in row.iter_mut() {
        if key == category_key {
            continue;
        }
        if let Some(n) = value.number() {
            *value = (n / total).into();
        }
    }
}

fn pie<R: Record>(records: &[R], category: &WellConfig, value: &WellConfig) -> ChartData {
    let groups = group_by(records, &[category.field.as_str()]);
    let slices = groups
        .iter()
        .map(|(key, items)| PieSlice {
            name: key[0].clone(),
            value: aggregate_well(items, value),
        })
        .collect();
    ChartData::Slices(slices)
}

// ============================================================================
// TREEMAP / COMBO
// ============================================================================

fn treemap<R: Record>(
    records: &[R],
    category: &WellConfig,
    value: &WellConfig,
    color: Option<&WellConfig>,
) -> ChartData {
    let groups = group_by(records, &[category.field.as_str()]);
    let nodes = groups
        .iter()
        .map(|(key, items)| TreemapNode {
            name: key[0].clone(),
            size: aggregate_well(items, value),
            color_metric: color.map(|c| aggregate_well(items, c)),
        })
        .collect();
    ChartData::Treemap(nodes)
}

fn combo<R: Record>(
    records: &[R],
    config: &ChartConfig,
    category: &WellConfig,
    value: &WellConfig,
) -> ChartData {
    let category_key = category.field.as_str();
    let groups = group_by(records, &[category_key]);

    let line_key = config.line_output_key();

    let mut rows: Vec<(String, ChartRow)> = groups
        .iter()
        .map(|(key, items)| {
            let mut row = ChartRow::new()
                .with(category_key, items[0].field(category_key))
                .with(value.output_key(), aggregate_well(items, value));
            if let (Some(line), Some(line_key)) = (&config.line, &line_key) {
                row.set(line_key, aggregate_well(items, line));
            }
            (key[0].clone(), row)
        })
        .collect();

    if let Some(order) = &config.category_order {
        // Stable: categories missing from the order keep their relative order at the end.
        rows.sort_by_key(|(name, _)| order.iter().position(|o| o == name).unwrap_or(usize::MAX));
    }

    ChartData::Rows(rows.into_iter().map(|(_, row)| row).collect())
}

// ============================================================================
// NON-CHART WIDGETS
// ============================================================================

fn table_rows<R: Record>(records: &[R], widget: &TableWidget) -> ChartData {
    let limit = widget.max_rows.unwrap_or(usize::MAX);
    let rows: Vec<ChartRow> = records
        .iter()
        .take(limit)
        .map(|r| {
            let row = ChartRow::from_record(r);
            match &widget.columns {
                Some(columns) => row.project(columns),
                None => row,
            }
        })
        .collect();
    if rows.is_empty() {
        ChartData::Empty
    } else {
        ChartData::Rows(rows)
    }
}

fn matrix<R: Record>(records: &[R], widget: &MatrixWidget) -> ChartData {
    let (Some(row_well), Some(col_well), Some(value)) = (&widget.rows, &widget.columns, &widget.value)
    else {
        return ChartData::Empty;
    };
    if records.is_empty() {
        return ChartData::Empty;
    }

    let row_key = row_well.field.as_str();
    let cells = group_by(records, &[row_key, col_well.field.as_str()]);
    let by_row = group_by(records, &[row_key]);
    let by_col = group_by(records, &[col_well.field.as_str()]);
    let columns = cells.distinct_at(1);

    let mut rows = Vec::with_capacity(by_row.len());
    for (key, items) in by_row.iter() {
        let mut row = ChartRow::new().with(row_key, items[0].field(row_key));
        for column in &columns {
            let cell_key: GroupKey = smallvec![key[0].clone(), column.clone()];
            if let Some(cell_items) = cells.get(&cell_key) {
                row.set(column, aggregate_well(cell_items, value));
            }
        }
        row.set(TOTAL_LABEL, aggregate_well(items, value));
        rows.push(row);
    }

    let all: Vec<&R> = records.iter().collect();
    let mut totals = ChartRow::new().with(row_key, TOTAL_LABEL);
    for (key, items) in by_col.iter() {
        totals.set(&key[0], aggregate_well(items, value));
    }
    totals.set(TOTAL_LABEL, aggregate_well(&all, value));

    ChartData::Matrix(MatrixData {
        row_key: row_key.to_string(),
        columns,
        rows,
        totals,
    })
}

fn heatmap<R: Record>(records: &[R], widget: &HeatmapWidget) -> ChartData {
    let (Some(x), Some(y), Some(value)) = (&widget.x, &widget.y, &widget.value) else {
        return ChartData::Empty;
    };
    if records.is_empty() {
        return ChartData::Empty;
    }

    let groups = group_by(records, &[x.field.as_str(), y.field.as_str()]);
    let cells: Vec<HeatCell> = groups
        .iter()
        .map(|(key, items)| HeatCell {
            x: key[0].clone(),
            y: key[1].clone(),
            value: aggregate_well(items, value),
        })
        .collect();

    let min = cells.iter().map(|c| c.value).fold(f64::INFINITY, f64::min);
    let max = cells.iter().map(|c| c.value).fold(f64::NEG_INFINITY, f64::max);

    ChartData::Heatmap(HeatmapData {
        x_labels: groups.distinct_at(0),
        y_labels: groups.distinct_at(1),
        cells,
        min,
        max,
    })
}

fn geo_points<R: Record>(records: &[R], widget: &GeoMapWidget) -> ChartData {
    let (Some(location), Some(value)) = (&widget.location, &widget.value) else {
        return ChartData::Empty;
    };

    let groups = group_by(records, &[location.field.as_str()]);
    let points: Vec<GeoPoint> = groups
        .iter()
        .filter_map(|(key, items)| {
            let (lat, lng) = items.iter().find_map(|r| {
                let lat = r.field(&widget.lat_field);
                let lng = r.field(&widget.lng_field);
                if lat.is_empty() || lng.is_empty() {
                    None
                } else {
                    Some((lat.as_number(), lng.as_number()))
                }
            })?;
            Some(GeoPoint {
                name: key[0].clone(),
                lat,
                lng,
                value: aggregate_well(items, value),
            })
        })
        .collect();

    if points.is_empty() {
        ChartData::Empty
    } else {
        ChartData::GeoPoints(points)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::definition::AggregationKind;
    use crate::widget::SourceDataKey;
    use records::{DynamicRecord, FieldValue};

    fn sale(id: u64, month: &str, region: &str, category: &str, sales: f64, profit: f64) -> DynamicRecord {
        DynamicRecord::new(id)
            .with("month", month)
            .with("region", region)
            .with("category", category)
            .with("sales", sales)
            .with("profit", profit)
    }

    fn dataset() -> Vec<DynamicRecord> {
        vec![
            sale(1, "Feb", "South", "A", 150.0, 15.0),
            sale(2, "Jan", "South", "A", 100.0, 10.0),
            sale(3, "Jan", "South", "A", 200.0, 30.0),
            sale(4, "Jan", "North", "B", 50.0, -5.0),
            sale(5, "Mar", "North", "B", 0.0, 0.0),
        ]
    }

    fn bar() -> ChartConfig {
        ChartConfig::new(ChartKind::Bar)
            .with_category(WellConfig::dimension("month"))
            .with_value(WellConfig::new("sales", AggregationKind::Sum))
    }

    #[test]
    fn category_sum_rows() {
        let records = vec![
            sale(1, "Jan", "South", "A", 100.0, 0.0),
            sale(2, "Jan", "South", "A", 200.0, 0.0),
            sale(3, "Feb", "South", "A", 150.0, 0.0),
        ];
        let data = process_chart_data(&records, &bar());
        assert_eq!(
            data.rows(),
            &[
                ChartRow::new().with("month", "Jan").with("sales", 300.0),
                ChartRow::new().with("month", "Feb").with("sales", 150.0),
            ]
        );
    }

    #[test]
    fn legend_pivot_omits_absent_pairs() {
        let config = bar().with_legend(WellConfig::dimension("region"));
        let data = process_chart_data(&dataset(), &config);
        let rows = data.rows();

        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].get("month"), Some(&FieldValue::from("Feb")));
        assert_eq!(rows[0].number("South"), Some(150.0));
        assert_eq!(rows[0].number("North"), None);
        assert_eq!(rows[1].number("South"), Some(300.0));
        assert_eq!(rows[1].number("North"), Some(50.0));
        assert_eq!(rows[2].number("North"), Some(0.0));
        assert_eq!(rows[2].number("South"), None);
    }

    #[test]
    fn percent_stack_rows_sum_to_one() {
        let config = bar()
            .with_legend(WellConfig::dimension("region"))
            .with_stack(StackMode::Percent);
        let data = process_chart_data(&dataset(), &config);

        let jan = &data.rows()[1];
        let sum = jan.number("South").unwrap_or(0.0) + jan.number("North").unwrap_or(0.0);
        assert!((sum - 1.0).abs() < 1e-9);
        assert!((jan.number("North").unwrap_or(0.0) - 50.0 / 350.0).abs() < 1e-9);

        // Mar sums to zero and keeps its raw value.
        assert_eq!(data.rows()[2].number("North"), Some(0.0));
    }

    #[test]
    fn percent_stack_negative_row_keeps_raw_values() {
        let records = vec![
            sale(1, "Jan", "South", "A", 100.0, -50.0),
            sale(2, "Jan", "North", "B", 80.0, 20.0),
            sale(3, "Feb", "South", "A", 60.0, 30.0),
            sale(4, "Feb", "North", "B", 40.0, 10.0),
        ];
        let config = ChartConfig::new(ChartKind::Bar)
            .with_category(WellConfig::dimension("month"))
            .with_value(WellConfig::new("profit", AggregationKind::Sum))
            .with_legend(WellConfig::dimension("region"))
            .with_stack(StackMode::Percent);
        let data = process_chart_data(&records, &config);

        // Jan sums to -30: left as-is.
        let jan = &data.rows()[0];
        assert_eq!(jan.get("month"), Some(&FieldValue::from("Jan")));
        assert_eq!(jan.number("South"), Some(-50.0));
        assert_eq!(jan.number("North"), Some(20.0));

        let feb = &data.rows()[1];
        assert!((feb.number("South").unwrap_or(0.0) - 0.75).abs() < 1e-9);
        assert!((feb.number("North").unwrap_or(0.0) - 0.25).abs() < 1e-9);
    }

    #[test]
    fn stacked_mode_keeps_raw_values() {
        let config = bar()
            .with_legend(WellConfig::dimension("region"))
            .with_stack(StackMode::Stacked);
        let data = process_chart_data(&dataset(), &config);
        assert_eq!(data.rows()[1].number("South"), Some(300.0));
    }

    #[test]
    fn missing_legend_values_go_to_default_series() {
        let records = vec![
            DynamicRecord::new(1).with("month", "Jan").with("sales", 5.0),
            DynamicRecord::new(2).with("month", "Jan").with("region", "North").with("sales", 7.0),
        ];
        let config = bar().with_legend(WellConfig::dimension("region"));
        let data = process_chart_data(&records, &config);
        assert_eq!(data.rows()[0].number("default"), Some(5.0));
        assert_eq!(data.rows()[0].number("North"), Some(7.0));
    }

    #[test]
    fn pie_emits_name_value_slices() {
        let config = ChartConfig::new(ChartKind::Pie)
            .with_category(WellConfig::dimension("category"))
            .with_value(WellConfig::new("sales", AggregationKind::Sum))
            .with_legend(WellConfig::dimension("region"));
        let data = process_chart_data(&dataset(), &config);
        assert_eq!(
            data,
            ChartData::Slices(vec![
                PieSlice { name: "A".to_string(), value: 450.0 },
                PieSlice { name: "B".to_string(), value: 50.0 },
            ])
        );
    }

    #[test]
    fn treemap_nodes_with_color_metric() {
        let config = ChartConfig::new(ChartKind::Treemap)
            .with_category(WellConfig::dimension("category"))
            .with_value(WellConfig::new("sales", AggregationKind::Sum))
            .with_color(WellConfig::new("profit", AggregationKind::Average));
        let ChartData::Treemap(nodes) = process_chart_data(&dataset(), &config) else {
            panic!("expected treemap data");
        };
        assert_eq!(nodes.len(), 2);
        assert_eq!(nodes[0].size, 450.0);
        assert_eq!(nodes[0].color_metric, Some(55.0 / 3.0));
        assert_eq!(nodes[1].color_metric, Some(-2.5));
    }

    #[test]
    fn combo_orders_by_injected_category_order() {
        let config = ChartConfig::new(ChartKind::Combo)
            .with_category(WellConfig::dimension("month"))
            .with_value(WellConfig::new("sales", AggregationKind::Sum))
            .with_line(WellConfig::new("profit", AggregationKind::Sum))
            .with_category_order(["Jan", "Feb", "Mar"]);
        let data = process_chart_data(&dataset(), &config);
        let months: Vec<String> = data
            .rows()
            .iter()
            .map(|r| r.get("month").map(FieldValue::display_value).unwrap_or_default())
            .collect();
        assert_eq!(months, vec!["Jan", "Feb", "Mar"]);
        assert_eq!(data.rows()[0].number("sales"), Some(350.0));
        assert_eq!(data.rows()[0].number("profit"), Some(35.0));
    }

    #[test]
    fn combo_without_order_keeps_first_appearance() {
        let config = ChartConfig::new(ChartKind::Combo)
            .with_category(WellConfig::dimension("month"))
            .with_value(WellConfig::new("sales", AggregationKind::Sum))
            .with_line(WellConfig::new("sales", AggregationKind::Count));
        let data = process_chart_data(&dataset(), &config);
        assert_eq!(data.rows()[0].get("month"), Some(&FieldValue::from("Feb")));
        assert_eq!(data.rows()[1].number("sales_line"), Some(3.0));
    }

    #[test]
    fn passthrough_kinds_return_raw_rows() {
        let config = ChartConfig::new(ChartKind::Scatter);
        let data = process_chart_data(&dataset(), &config);
        assert_eq!(data.len(), 5);
        assert_eq!(data.rows()[0].number("id"), Some(1.0));
    }

    #[test]
    fn configuration_gaps_yield_empty() {
        let no_value = ChartConfig::new(ChartKind::Bar).with_category(WellConfig::dimension("month"));
        assert_eq!(process_chart_data(&dataset(), &no_value), ChartData::Empty);

        let empty: Vec<DynamicRecord> = Vec::new();
        assert_eq!(process_chart_data(&empty, &bar()), ChartData::Empty);
        assert_eq!(process_chart_data(&empty, &ChartConfig::new(ChartKind::Funnel)), ChartData::Empty);
    }

    #[test]
    fn matrix_with_totals() {
        let widget = WidgetConfig::Matrix(MatrixWidget {
            id: "m".to_string(),
            title: "Region x Category".to_string(),
            source: SourceDataKey::Sales,
            rows: Some(WellConfig::dimension("region")),
            columns: Some(WellConfig::dimension("category")),
            value: Some(WellConfig::new("sales", AggregationKind::Sum)),
        });
        let ChartData::Matrix(matrix) = process_widget_data(&dataset(), &widget) else {
            panic!("expected matrix data");
        };
        assert_eq!(matrix.columns, vec!["A", "B"]);
        assert_eq!(matrix.rows[0].number("A"), Some(450.0));
        assert_eq!(matrix.rows[0].number("B"), None);
        assert_eq!(matrix.rows[0].number(TOTAL_LABEL), Some(450.0));
        assert_eq!(matrix.rows[1].number(TOTAL_LABEL), Some(50.0));
        assert_eq!(matrix.totals.number(TOTAL_LABEL), Some(500.0));
        assert_eq!(matrix.totals.keys().last(), Some(TOTAL_LABEL));
    }

    #[test]
    fn heatmap_cells_and_range() {
        let widget = WidgetConfig::Heatmap(HeatmapWidget {
            id: "h".to_string(),
            title: "Month x Region".to_string(),
            source: SourceDataKey::Sales,
            x: Some(WellConfig::dimension("month")),
            y: Some(WellConfig::dimension("region")),
            value: Some(WellConfig::new("sales", AggregationKind::Sum)),
        });
        let ChartData::Heatmap(heat) = process_widget_data(&dataset(), &widget) else {
            panic!("expected heatmap data");
        };
        assert_eq!(heat.x_labels, vec!["Feb", "Jan", "Mar"]);
        assert_eq!(heat.y_labels, vec!["South", "North"]);
        assert_eq!(heat.cells.len(), 4);
        assert_eq!(heat.min, 0.0);
        assert_eq!(heat.max, 300.0);
    }

    #[test]
    fn geo_points_need_coordinates() {
        let records = vec![
            DynamicRecord::new(1).with("region", "North").with("sales", 10.0).with("lat", 59.3).with("lng", 18.1),
            DynamicRecord::new(2).with("region", "North").with("sales", 5.0),
            DynamicRecord::new(3).with("region", "Nowhere").with("sales", 1.0),
        ];
        let widget = WidgetConfig::GeoMap(GeoMapWidget {
            id: "g".to_string(),
            title: "Map".to_string(),
            source: SourceDataKey::Sales,
            location: Some(WellConfig::dimension("region")),
            value: Some(WellConfig::new("sales", AggregationKind::Sum)),
            lat_field: "lat".to_string(),
            lng_field: "lng".to_string(),
        });
        assert_eq!(
            process_widget_data(&records, &widget),
            ChartData::GeoPoints(vec![GeoPoint {
                name: "North".to_string(),
                lat: 59.3,
                lng: 18.1,
                value: 15.0,
            }])
        );
    }

    #[test]
    fn table_widget_projects_and_limits() {
        let widget = WidgetConfig::DataTable(TableWidget {
            id: "t".to_string(),
            title: "Detail".to_string(),
            source: SourceDataKey::Sales,
            columns: Some(vec!["region".to_string(), "sales".to_string(), "missing".to_string()]),
            max_rows: Some(2),
        });
        let data = process_widget_data(&dataset(), &widget);
        assert_eq!(data.len(), 2);
        assert_eq!(data.rows()[0].keys().collect::<Vec<_>>(), vec!["region", "sales"]);
    }

    #[test]
    fn kpi_and_unsupported_widgets_have_no_chart_data() {
        assert_eq!(process_widget_data(&dataset(), &WidgetConfig::Unsupported), ChartData::Empty);
    }
}
