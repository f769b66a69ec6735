//! FILENAME: app/src/preferences.rs
//! PURPOSE: Per-table column arrangement saved in the key/value store.
//! CONTEXT: Stored under `columns:<table>`. Saved layouts outlive schema
//! changes: unknown keys are dropped, new columns are appended.

use std::collections::BTreeSet;

use grid_engine::ColumnSpec;
use persistence::KeyValueStore;
use serde::{Deserialize, Serialize};

use crate::error::ConsoleError;
use crate::log_debug;

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnPreferences {
    /// Column keys in display order.
    #[serde(default)]
    pub order: Vec<String>,
    #[serde(default)]
    pub hidden: BTreeSet<String>,
}

pub fn storage_key(table: &str) -> String {
    format!("columns:{}", table)
}

impl ColumnPreferences {
    pub fn is_hidden(&self, key: &str) -> bool {
        self.hidden.contains(key)
    }

    pub fn hide(&mut self, key: &str) {
        self.hidden.insert(key.to_string());
    }

    pub fn show(&mut self, key: &str) {
        self.hidden.remove(key);
    }

    /// Moves `key` to `index` within the saved order, adding it if absent.
    pub fn move_column(&mut self, key: &str, index: usize) {
        self.order.retain(|k| k != key);
        let index = index.min(self.order.len());
        self.order.insert(index, key.to_string());
    }

    /// Applies the arrangement to the table's full column list.
    pub fn arrange<R>(&self, columns: Vec<ColumnSpec<R>>) -> Vec<ColumnSpec<R>> {
        let mut remaining = columns;
        let mut arranged = Vec::with_capacity(remaining.len());

        for key in &self.order {
            if let Some(pos) = remaining.iter().position(|c| &c.key == key) {
                arranged.push(remaining.remove(pos));
            }
        }
        arranged.extend(remaining);
        arranged.retain(|c| !self.is_hidden(&c.key));
        arranged
    }

    /// Loads the saved arrangement, or the default (declared order, nothing
    /// hidden) when none is stored.
    pub fn load<S: KeyValueStore>(store: &S, table: &str) -> Result<Self, ConsoleError> {
        let prefs = store.get::<ColumnPreferences>(&storage_key(table))?;
        Ok(prefs.unwrap_or_default())
    }

    pub fn save<S: KeyValueStore>(&self, store: &mut S, table: &str) -> Result<(), ConsoleError> {
        store.set(&storage_key(table), self)?;
        log_debug!("PREFS", "saved {} order={:?} hidden={:?}", table, self.order, self.hidden);
        Ok(())
    }

    pub fn reset<S: KeyValueStore>(store: &mut S, table: &str) -> Result<bool, ConsoleError> {
        Ok(store.remove(&storage_key(table))?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use records::DynamicRecord;

    fn columns() -> Vec<ColumnSpec<DynamicRecord>> {
        ["name", "region", "balance", "status"]
            .iter()
            .map(|k| ColumnSpec::keyed(k, k))
            .collect()
    }

    fn keys(columns: &[ColumnSpec<DynamicRecord>]) -> Vec<&str> {
        columns.iter().map(|c| c.key.as_str()).collect()
    }

    #[test]
    fn default_keeps_declared_order() {
        let arranged = ColumnPreferences::default().arrange(columns());
        assert_eq!(keys(&arranged), vec!["name", "region", "balance", "status"]);
    }

    #[test]
    fn saved_order_unknown_keys_and_new_columns() {
        let prefs = ColumnPreferences {
            order: vec!["balance".to_string(), "retired".to_string(), "name".to_string()],
            hidden: ["status".to_string()].into_iter().collect(),
        };
        let arranged = prefs.arrange(columns());
        assert_eq!(keys(&arranged), vec!["balance", "name", "region"]);
    }

    #[test]
    fn move_column_clamps_index() {
        let mut prefs = ColumnPreferences::default();
        prefs.move_column("status", 0);
        prefs.move_column("name", 10);
        prefs.move_column("status", 1);
        assert_eq!(prefs.order, vec!["name", "status"]);
    }
}
