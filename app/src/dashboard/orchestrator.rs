//! FILENAME: app/src/dashboard/orchestrator.rs
//! PURPOSE: Loads the three datasets once and keeps widget data in step with
//! the global filters.
//! CONTEXT: `Loading` moves to `Ready` or `Error` exactly once. Filter changes
//! only recompute derived data; they never touch the phase. Waterfall and
//! funnel data are never filtered.

use std::collections::{BTreeSet, HashMap};

use chart_engine::{process_widget_data, ChartData, SourceDataKey, WidgetConfig};
use records::Record;
use serde_json::Value;

use crate::dashboard::config::DashboardConfig;
use crate::dashboard::filters::{DashboardFilters, FilterDimension};
use crate::dashboard::kpi::KpiSummary;
use crate::dashboard::props::widget_props;
use crate::data_source::{DataSource, FunnelStage, SalesRecord, WaterfallStep, MONTH_ORDER};
use crate::{log_enter_info, log_error, log_exit_info, log_info};

#[derive(Debug, Clone, PartialEq)]
pub enum LoadPhase {
    Loading,
    Ready,
    /// Terminal. Holds the user-visible message.
    Error(String),
}

pub struct Dashboard {
    config: DashboardConfig,
    phase: LoadPhase,
    sales: Vec<SalesRecord>,
    waterfall: Vec<WaterfallStep>,
    funnel: Vec<FunnelStage>,
    filters: DashboardFilters,
    derived: HashMap<String, ChartData>,
    kpis: KpiSummary,
}

impl Dashboard {
    pub fn new(config: DashboardConfig) -> Self {
        let filters = DashboardFilters::new(&config.filters);
        Dashboard {
            config,
            phase: LoadPhase::Loading,
            sales: Vec::new(),
            waterfall: Vec::new(),
            funnel: Vec::new(),
            filters,
            derived: HashMap::new(),
            kpis: KpiSummary::default(),
        }
    }

    /// Fetches all three datasets concurrently. All must succeed; any failure
    /// leaves no partial data behind. Only the first call does anything.
    pub async fn load<S: DataSource>(&mut self, source: &S) -> &LoadPhase {
        if self.phase != LoadPhase::Loading {
            return &self.phase;
        }
        log_enter_info!("DASH", "load", "widgets={}", self.config.widgets.len());

        let result = tokio::try_join!(
            source.fetch_sales(),
            source.fetch_waterfall(),
            source.fetch_funnel()
        );

        match result {
            Ok((sales, waterfall, funnel)) => {
                log_info!(
                    "DASH",
                    "loaded sales={} waterfall={} funnel={}",
                    sales.len(),
                    waterfall.len(),
                    funnel.len()
                );
                self.sales = sales;
                self.waterfall = waterfall;
                self.funnel = funnel;
                self.phase = LoadPhase::Ready;
                self.recompute();
            }
            Err(e) => {
                log_error!("DASH", "load failed: {}", e);
                self.phase = LoadPhase::Error(e.to_string());
            }
        }

        log_exit_info!("DASH", "load", "phase={:?}", self.phase);
        &self.phase
    }

    pub fn phase(&self) -> &LoadPhase {
        &self.phase
    }

    pub fn is_ready(&self) -> bool {
        self.phase == LoadPhase::Ready
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    pub fn filters(&self) -> &DashboardFilters {
        &self.filters
    }

    // ========================================================================
    // FILTER MUTATIONS
    // ========================================================================

    /// Replaces one dimension's selection. Ignored for dimensions the config
    /// does not enable.
    pub fn set_filter<I, S>(&mut self, dimension: FilterDimension, values: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        if self.filters.set(dimension, values) {
            log_info!("DASH", "filter {:?} = {:?}", dimension, self.filters.selection(dimension));
            self.recompute();
        }
    }

    pub fn toggle_filter(&mut self, dimension: FilterDimension, value: &str) {
        if self.filters.toggle(dimension, value) {
            log_info!("DASH", "filter {:?} toggled {}", dimension, value);
            self.recompute();
        }
    }

    pub fn clear_filter(&mut self, dimension: FilterDimension) {
        if self.filters.clear(dimension) {
            log_info!("DASH", "filter {:?} cleared", dimension);
            self.recompute();
        }
    }

    pub fn clear_filters(&mut self) {
        self.filters.clear_all();
        self.recompute();
    }

    /// Selectable values of a dimension over the unfiltered sales data.
    /// Months come in calendar order, everything else alphabetically.
    pub fn filter_options(&self, dimension: FilterDimension) -> Vec<String> {
        let values: BTreeSet<String> = self
            .sales
            .iter()
            .map(|r| r.field(dimension.field()).display_value())
            .filter(|v| !v.is_empty())
            .collect();
        let mut values: Vec<String> = values.into_iter().collect();
        if dimension == FilterDimension::Month {
            values.sort_by_key(|m| MONTH_ORDER.iter().position(|o| o == m).unwrap_or(usize::MAX));
        }
        values
    }

    // ========================================================================
    // DERIVED DATA
    // ========================================================================

    pub fn filtered_sales(&self) -> Vec<&SalesRecord> {
        self.filters.apply(&self.sales)
    }

    pub fn kpis(&self) -> &KpiSummary {
        &self.kpis
    }

    pub fn widget_data(&self, id: &str) -> Option<&ChartData> {
        self.derived.get(id)
    }

    pub fn widget_props(&self, id: &str) -> Option<Value> {
        let widget = self.config.widget(id)?;
        Some(self.props_for(widget, id))
    }

    /// Props for every widget in layout order. Widgets without an id are skipped.
    pub fn all_props(&self) -> Vec<(String, Value)> {
        self.config
            .widgets
            .iter()
            .filter_map(|w| {
                let id = w.id()?;
                Some((id.to_string(), self.props_for(w, id)))
            })
            .collect()
    }

    fn props_for(&self, widget: &WidgetConfig, id: &str) -> Value {
        match self.derived.get(id) {
            Some(data) => widget_props(widget, data, &self.kpis),
            None => widget_props(widget, &ChartData::Empty, &self.kpis),
        }
    }

    fn recompute(&mut self) {
        if !self.is_ready() {
            return;
        }

        let filtered = self.filters.apply(&self.sales);
        self.kpis = KpiSummary::from_sales(&filtered);

        let mut derived = HashMap::with_capacity(self.config.widgets.len());
        for widget in &self.config.widgets {
            let Some(id) = widget.id() else {
                continue;
            };
            let data = match widget.source() {
                SourceDataKey::Sales => process_widget_data(&filtered, widget),
                SourceDataKey::Waterfall => process_widget_data(&self.waterfall, widget),
                SourceDataKey::Funnel => process_widget_data(&self.funnel, widget),
            };
            derived.insert(id.to_string(), data);
        }
        self.derived = derived;

        log_info!(
            "DASH",
            "recomputed widgets={} rows={}/{}",
            self.derived.len(),
            filtered.len(),
            self.sales.len()
        );
    }
}

