//! FILENAME: app/src/dashboard/mod.rs
//! Dashboard Orchestrator
//!
//! Owns the loaded datasets and the global filter selections, keeps every
//! widget's derived data current, and maps widget data to renderer props.

pub mod config;
pub mod filters;
pub mod kpi;
pub mod orchestrator;
pub mod props;

pub use config::DashboardConfig;
pub use filters::{DashboardFilters, FilterDimension};
pub use kpi::KpiSummary;
pub use orchestrator::{Dashboard, LoadPhase};
pub use props::widget_props;
