//! FILENAME: core/grid-engine/src/state.rs
//! PURPOSE: Caller-owned UI state for one grid instance.
//! CONTEXT: Created when a table is mounted, mutated by user interaction and
//! discarded on unmount. The engine only reads `FilterState`/`SortState` and
//! clamps `PageState`.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

// ============================================================================
// FILTER STATE
// ============================================================================

/// Global search text plus per-column allow-lists.
///
/// An absent key and a key mapped to an empty set both mean "no constraint".
/// `clear_column` removes the key; unchecking every value in a filter menu
/// leaves an empty set behind, which still shows every row.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterState {
    pub global_search: String,
    pub column_values: BTreeMap<String, BTreeSet<String>>,
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_search(&mut self, text: &str) {
        self.global_search = text.to_string();
    }

    /// Replaces the allow-list for one column.
    pub fn set_column_values<I, S>(&mut self, key: &str, values: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.column_values
            .insert(key.to_string(), values.into_iter().map(Into::into).collect());
    }

    /// Checks or unchecks a single value in a column's filter menu.
    pub fn toggle_value(&mut self, key: &str, value: &str) {
        let set = self.column_values.entry(key.to_string()).or_default();
        if !set.remove(value) {
            set.insert(value.to_string());
        }
    }

    /// Removes any constraint on the column.
    pub fn clear_column(&mut self, key: &str) {
        self.column_values.remove(key);
    }

    pub fn clear_all(&mut self) {
        self.global_search.clear();
        self.column_values.clear();
    }

    /// The trimmed, lowercased search needle, or `None` when searching is off.
    pub fn search_needle(&self) -> Option<String> {
        let trimmed = self.global_search.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_lowercase())
        }
    }

    /// True when at least one constraint would drop rows.
    pub fn is_filtered(&self) -> bool {
        self.search_needle().is_some() || self.column_values.values().any(|v| !v.is_empty())
    }
}

// ============================================================================
// SORT STATE
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortDirection {
    #[default]
    None,
    Ascending,
    Descending,
}

/// Active sort column and direction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SortState {
    pub key: Option<String>,
    pub direction: SortDirection,
}

impl SortState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn by(key: &str, direction: SortDirection) -> Self {
        SortState {
            key: Some(key.to_string()),
            direction,
        }
    }

    /// Header click: none -> descending -> ascending -> none on the same
    /// column. Activating another column starts over at descending.
    pub fn toggle(&mut self, key: &str) {
        if self.key.as_deref() != Some(key) {
            self.key = Some(key.to_string());
            self.direction = SortDirection::Descending;
            return;
        }

        self.direction = match self.direction {
            SortDirection::None => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
            SortDirection::Ascending => SortDirection::None,
        };
        if self.direction == SortDirection::None {
            self.key = None;
        }
    }

    /// The column to sort by, if sorting is in effect.
    pub fn active(&self) -> Option<(&str, SortDirection)> {
        match (&self.key, self.direction) {
            (Some(key), SortDirection::Ascending | SortDirection::Descending) => {
                Some((key.as_str(), self.direction))
            }
            _ => None,
        }
    }
}

// ============================================================================
// PAGE STATE
// ============================================================================

/// 1-based current page and page size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageState {
    pub current_page: usize,
    pub page_size: usize,
}

impl PageState {
    pub fn new(page_size: usize) -> Self {
        PageState {
            current_page: 1,
            page_size: page_size.max(1),
        }
    }

    pub fn set_page(&mut self, page: usize) {
        self.current_page = page.max(1);
    }

    /// Moves forward; the upper bound is enforced by `clamp`.
    pub fn next(&mut self) {
        self.current_page = self.current_page.saturating_add(1);
    }

    pub fn previous(&mut self) {
        self.current_page = self.current_page.saturating_sub(1).max(1);
    }

    /// Changing the page size returns to the first page.
    pub fn set_page_size(&mut self, page_size: usize) {
        self.page_size = page_size.max(1);
        self.current_page = 1;
    }

    /// Clamps the current page into `[1, total_pages]` and returns the page count.
    pub fn clamp(&mut self, total_rows: usize) -> usize {
        self.page_size = self.page_size.max(1);
        let pages = crate::pager::total_pages(total_rows, self.page_size);
        self.current_page = self.current_page.clamp(1, pages);
        pages
    }
}

impl Default for PageState {
    fn default() -> Self {
        PageState::new(10)
    }
}
