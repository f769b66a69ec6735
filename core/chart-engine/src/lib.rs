//! FILENAME: core/chart-engine/src/lib.rs
//! Chart-data subsystem for the admin console dashboard.
//!
//! Turns a flat record set into the data shape each chart family expects,
//! driven by declarative "well" configurations. Depends on `records` only
//! for the row-shape trait and field values.
//!
//! Layers:
//! - `definition`: Serializable well and chart configuration (what to draw)
//! - `widget`: The closed set of dashboard widget kinds
//! - `aggregate`: SUM / COUNT / AVERAGE / NONE reductions
//! - `group`: Insertion-ordered group-by
//! - `output`: Chart-ready rows and shapes (what renderers receive)
//! - `engine`: The pipeline (how we get there)

pub mod aggregate;
pub mod definition;
pub mod engine;
pub mod group;
pub mod output;
pub mod widget;

pub use aggregate::{aggregate, aggregate_well};
pub use definition::{AggregationKind, ChartConfig, ChartKind, StackMode, WellConfig};
pub use engine::{process_chart_data, process_widget_data};
pub use group::{group_by, GroupKey, Groups};
pub use output::{
    ChartData, ChartRow, GeoPoint, HeatCell, HeatmapData, MatrixData, PieSlice, TreemapNode,
    TOTAL_LABEL,
};
pub use widget::{
    ChartWidget, GeoMapWidget, HeatmapWidget, KpiMetric, KpiWidget, MatrixWidget,
    SourceDataKey, TableWidget, ValueFormat, WidgetConfig,
};
