//! FILENAME: app/src/dashboard/filters.rs
//! PURPOSE: Global month/region/category selections applied to the sales data.
//! CONTEXT: Same allow-list semantics as the record tables: an empty or absent
//! selection does not constrain.

use std::collections::{BTreeMap, BTreeSet};

use records::Record;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FilterDimension {
    Month,
    Region,
    Category,
}

impl FilterDimension {
    pub const ALL: [FilterDimension; 3] =
        [FilterDimension::Month, FilterDimension::Region, FilterDimension::Category];

    /// The sales field this dimension filters on.
    pub fn field(self) -> &'static str {
        match self {
            FilterDimension::Month => "month",
            FilterDimension::Region => "region",
            FilterDimension::Category => "category",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct DashboardFilters {
    enabled: Vec<FilterDimension>,
    selections: BTreeMap<FilterDimension, BTreeSet<String>>,
}

impl DashboardFilters {
    pub fn new(enabled: &[FilterDimension]) -> Self {
        DashboardFilters {
            enabled: enabled.to_vec(),
            selections: BTreeMap::new(),
        }
    }

    pub fn enabled(&self) -> &[FilterDimension] {
        &self.enabled
    }

    pub fn is_enabled(&self, dimension: FilterDimension) -> bool {
        self.enabled.contains(&dimension)
    }

    /// Replaces a selection. Returns false (and changes nothing) when the
    /// dimension is not enabled.
    pub fn set<I, S>(&mut self, dimension: FilterDimension, values: I) -> bool
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        if !self.is_enabled(dimension) {
            return false;
        }
        self.selections
            .insert(dimension, values.into_iter().map(Into::into).collect());
        true
    }

    /// Adds or removes one value. Returns false when the dimension is not enabled.
    pub fn toggle(&mut self, dimension: FilterDimension, value: &str) -> bool {
        if !self.is_enabled(dimension) {
            return false;
        }
        let set = self.selections.entry(dimension).or_default();
        if !set.remove(value) {
            set.insert(value.to_string());
        }
        true
    }

    pub fn clear(&mut self, dimension: FilterDimension) -> bool {
        self.selections.remove(&dimension).is_some()
    }

    pub fn clear_all(&mut self) {
        self.selections.clear();
    }

    pub fn selection(&self, dimension: FilterDimension) -> Option<&BTreeSet<String>> {
        self.selections.get(&dimension)
    }

    pub fn is_active(&self) -> bool {
        self.selections.values().any(|s| !s.is_empty())
    }

    pub fn matches<R: Record>(&self, record: &R) -> bool {
        self.selections
            .iter()
            .filter(|(_, allowed)| !allowed.is_empty())
            .all(|(dimension, allowed)| {
                allowed.contains(&record.field(dimension.field()).display_value())
            })
    }

    pub fn apply<'a, R: Record>(&self, records: &'a [R]) -> Vec<&'a R> {
        records.iter().filter(|r| self.matches(*r)).collect()
    }
}
