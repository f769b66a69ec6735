//! FILENAME: app/src/config.rs
//! PURPOSE: Console startup configuration, loaded from JSON.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::dashboard::DashboardConfig;
use crate::error::ConsoleError;

fn default_page_size() -> usize {
    10
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsoleConfig {
    /// Rows per page for every record table.
    #[serde(default = "default_page_size")]
    pub page_size: usize,
    /// Unified log file. Console output only when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_file: Option<PathBuf>,
    /// Column preferences file. Preferences live in memory when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferences_file: Option<PathBuf>,
    #[serde(default)]
    pub dashboard: DashboardConfig,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        ConsoleConfig {
            page_size: default_page_size(),
            log_file: None,
            preferences_file: None,
            dashboard: DashboardConfig::default_layout(),
        }
    }
}

impl ConsoleConfig {
    pub fn from_json(text: &str) -> Result<Self, ConsoleError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn load(path: &Path) -> Result<Self, ConsoleError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }
}
