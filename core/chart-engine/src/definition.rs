//! FILENAME: core/chart-engine/src/definition.rs
//! Chart Definition - The serializable configuration.
//!
//! This module contains the types needed to DESCRIBE a chart's data.
//! These structures are:
//! - Loaded once from the dashboard configuration (JSON-compatible)
//! - Read-only to the pipeline
//! - Free of any rendering concerns

use serde::{Deserialize, Serialize};

// ============================================================================
// AGGREGATION
// ============================================================================

/// Reduction applied to a well's field over one group of records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AggregationKind {
    #[default]
    Sum,
    Count,
    Average,
    /// The first record's value, when numeric. Used for raw points.
    None,
}

// ============================================================================
// WELLS
// ============================================================================

/// Binds a source field to a chart role (category, value, legend, color...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WellConfig {
    pub field: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default)]
    pub aggregation: AggregationKind,
}

impl WellConfig {
    pub fn new(field: &str, aggregation: AggregationKind) -> Self {
        WellConfig {
            field: field.to_string(),
            label: None,
            aggregation,
        }
    }

    /// Well used only for grouping (category, legend, axes).
    pub fn dimension(field: &str) -> Self {
        WellConfig::new(field, AggregationKind::None)
    }

    pub fn with_label(mut self, label: &str) -> Self {
        self.label = Some(label.to_string());
        self
    }

    /// The key this well's aggregated value is written under.
    pub fn output_key(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.field)
    }
}

// ============================================================================
// CHART CONFIGURATION
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ChartKind {
    Bar,
    Line,
    Area,
    Pie,
    Scatter,
    Waterfall,
    Funnel,
    Treemap,
    Combo,
}

impl ChartKind {
    /// Kinds that consume raw records rather than aggregated rows.
    pub fn is_passthrough(self) -> bool {
        matches!(self, ChartKind::Scatter | ChartKind::Waterfall | ChartKind::Funnel)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StackMode {
    #[default]
    None,
    Stacked,
    /// Each category's series are normalized to sum to 1.
    Percent,
}

/// Well bindings for one chart.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartConfig {
    pub chart_type: Option<ChartKind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<WellConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<WellConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub legend: Option<WellConfig>,
    /// Treemap color metric.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<WellConfig>,
    /// Combo secondary (line) series.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line: Option<WellConfig>,
    #[serde(default)]
    pub stack: StackMode,
    /// Canonical category order for combo charts (e.g. calendar months).
    /// Categories not listed keep their first-appearance order after the listed ones.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_order: Option<Vec<String>>,
}

impl ChartConfig {
    pub fn new(kind: ChartKind) -> Self {
        ChartConfig {
            chart_type: Some(kind),
            ..Default::default()
        }
    }

    pub fn kind(&self) -> ChartKind {
        self.chart_type.unwrap_or(ChartKind::Bar)
    }

    /// Output key of the combo line series. Suffixed with `_line` when it
    /// would collide with the value series key.
    pub fn line_output_key(&self) -> Option<String> {
        let line = self.line.as_ref()?;
        let value_key = self.value.as_ref().map(WellConfig::output_key);
        if value_key == Some(line.output_key()) {
            Some(format!("{}_line", line.output_key()))
        } else {
            Some(line.output_key().to_string())
        }
    }

    pub fn with_category(mut self, well: WellConfig) -> Self {
        self.category = Some(well);
        self
    }

    pub fn with_value(mut self, well: WellConfig) -> Self {
        self.value = Some(well);
        self
    }

    pub fn with_legend(mut self, well: WellConfig) -> Self {
        self.legend = Some(well);
        self
    }

    pub fn with_color(mut self, well: WellConfig) -> Self {
        self.color = Some(well);
        self
    }

    pub fn with_line(mut self, well: WellConfig) -> Self {
        self.line = Some(well);
        self
    }

    pub fn with_stack(mut self, stack: StackMode) -> Self {
        self.stack = stack;
        self
    }

    pub fn with_category_order<I, S>(mut self, order: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.category_order = Some(order.into_iter().map(Into::into).collect());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aggregation_wire_names() {
        let kinds: Vec<AggregationKind> =
            serde_json::from_str(r#"["SUM","COUNT","AVERAGE","NONE"]"#).unwrap();
        assert_eq!(
            kinds,
            vec![
                AggregationKind::Sum,
                AggregationKind::Count,
                AggregationKind::Average,
                AggregationKind::None,
            ]
        );
    }

    #[test]
    fn chart_config_from_json() {
        let config: ChartConfig = serde_json::from_str(
            r#"{
                "chartType": "bar",
                "category": {"field": "month"},
                "value": {"field": "sales", "aggregation": "SUM"},
                "legend": {"field": "region"},
                "stack": "percent"
            }"#,
        )
        .unwrap();
        assert_eq!(config.kind(), ChartKind::Bar);
        assert_eq!(config.stack, StackMode::Percent);
        assert_eq!(config.value.as_ref().map(WellConfig::output_key), Some("sales"));
        assert!(config.color.is_none());
    }

    #[test]
    fn label_overrides_output_key() {
        let well = WellConfig::new("salesAmount", AggregationKind::Sum).with_label("Sales");
        assert_eq!(well.output_key(), "Sales");
    }
}
