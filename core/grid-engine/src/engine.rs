//! FILENAME: core/grid-engine/src/engine.rs
//! Grid Engine - composes filtering, sorting and paging over one table.
//!
//! Query pipeline, in fixed order:
//! 1. Global search over every field
//! 2. Per-column allow-lists (AND)
//! 3. Stable single-key sort
//! 4. Clamp the page and slice it
//!
//! Writes are gated by role and never fail loudly: the outcome says what
//! happened and the table is left untouched unless it is `Applied`.

use std::collections::BTreeSet;

use records::{Record, RecordId};

use crate::access::{Action, Permissions, Role};
use crate::column::ColumnSpec;
use crate::filter::apply_filters;
use crate::pager::page_range;
use crate::sort::sort_records;
use crate::state::{FilterState, PageState, SortState};

/// The visible page of a query.
#[derive(Debug)]
pub struct GridView<'a, R> {
    pub rows: Vec<&'a R>,
    pub total_filtered: usize,
    pub total_pages: usize,
    pub current_page: usize,
    pub page_size: usize,
}

/// Result of an add/edit/delete request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationOutcome {
    Applied,
    /// The role may not perform the action.
    Denied(Action),
    /// No record with this id exists (edit/delete).
    NotFound(RecordId),
    /// A record with this id already exists (add).
    Conflict(RecordId),
}

impl MutationOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, MutationOutcome::Applied)
    }
}

/// Generic filter/sort/paginate/CRUD core for one logical table.
#[derive(Debug, Clone)]
pub struct GridEngine<R> {
    records: Vec<R>,
    columns: Vec<ColumnSpec<R>>,
}

impl<R: Record> GridEngine<R> {
    pub fn new(records: Vec<R>, columns: Vec<ColumnSpec<R>>) -> Self {
        GridEngine { records, columns }
    }

    pub fn records(&self) -> &[R] {
        &self.records
    }

    pub fn columns(&self) -> &[ColumnSpec<R>] {
        &self.columns
    }

    pub fn column(&self, key: &str) -> Option<&ColumnSpec<R>> {
        self.columns.iter().find(|c| c.key == key)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, id: RecordId) -> Option<&R> {
        self.records.iter().find(|r| r.id() == id)
    }

    /// Runs the query pipeline and clamps `page` into range.
    pub fn query(&self, filters: &FilterState, sort: &SortState, page: &mut PageState) -> GridView<'_, R> {
        let mut rows = apply_filters(&self.records, &self.columns, filters);

        if let Some((key, direction)) = sort.active() {
            if let Some(column) = self.column(key) {
                sort_records(&mut rows, column, direction);
            }
        }

        let total_filtered = rows.len();
        let total_pages = page.clamp(total_filtered);
        let range = page_range(total_filtered, page.current_page, page.page_size);
        let rows = rows[range].to_vec();

        GridView {
            rows,
            total_filtered,
            total_pages,
            current_page: page.current_page,
            page_size: page.page_size,
        }
    }

    /// Sorted unique non-empty string values of a column over ALL records,
    /// so values hidden by the current filters stay selectable.
    pub fn distinct_values(&self, key: &str) -> Vec<String> {
        let Some(column) = self.column(key) else {
            return Vec::new();
        };

        let unique: BTreeSet<String> = self
            .records
            .iter()
            .map(|r| column.value(r).display_value())
            .filter(|s| !s.is_empty())
            .collect();

        let mut values: Vec<String> = unique.into_iter().collect();
        values.sort_by(|a, b| a.to_lowercase().cmp(&b.to_lowercase()).then_with(|| a.cmp(b)));
        values
    }

    pub fn permissions(&self, role: Role) -> Permissions {
        role.permissions()
    }

    /// Next free id: one past the current maximum.
    pub fn next_id(&self) -> RecordId {
        self.records.iter().map(Record::id).max().map_or(1, |max| max + 1)
    }

    pub fn add(&mut self, role: Role, record: R) -> MutationOutcome {
        if !role.allows(Action::Add) {
            return MutationOutcome::Denied(Action::Add);
        }
        let id = record.id();
        if self.get(id).is_some() {
            return MutationOutcome::Conflict(id);
        }
        self.records.push(record);
        MutationOutcome::Applied
    }

    /// Replaces the record with the same id, keeping its position.
    pub fn update(&mut self, role: Role, record: R) -> MutationOutcome {
        if !role.allows(Action::Edit) {
            return MutationOutcome::Denied(Action::Edit);
        }
        let id = record.id();
        match self.records.iter_mut().find(|r| r.id() == id) {
            Some(slot) => {
                *slot = record;
                MutationOutcome::Applied
            }
            None => MutationOutcome::NotFound(id),
        }
    }

    pub fn delete(&mut self, role: Role, id: RecordId) -> MutationOutcome {
        if !role.allows(Action::Delete) {
            return MutationOutcome::Denied(Action::Delete);
        }
        let before = self.records.len();
        self.records.retain(|r| r.id() != id);
        if self.records.len() == before {
            MutationOutcome::NotFound(id)
        } else {
            MutationOutcome::Applied
        }
    }

    /// Swaps in a new column layout (reordered or with hidden columns removed).
    pub fn set_columns(&mut self, columns: Vec<ColumnSpec<R>>) {
        self.columns = columns;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::SortDirection;
    use records::{DynamicRecord, FieldValue};

    fn engine(count: u64) -> GridEngine<DynamicRecord> {
        let regions = ["North", "South", "East"];
        let records = (1..=count)
            .map(|i| {
                DynamicRecord::new(i)
                    .with("name", format!("Account {:02}", i))
                    .with("region", regions[(i % 3) as usize])
                    .with("balance", (i * 10) as f64)
            })
            .collect();
        let columns = vec![
            ColumnSpec::keyed("name", "Name"),
            ColumnSpec::keyed("region", "Region"),
            ColumnSpec::keyed("balance", "Balance"),
        ];
        GridEngine::new(records, columns)
    }

    #[test]
    fn empty_table_has_one_empty_page() {
        let grid = engine(0);
        let mut page = PageState::new(10);
        let view = grid.query(&FilterState::new(), &SortState::new(), &mut page);
        assert_eq!(view.total_pages, 1);
        assert_eq!(view.current_page, 1);
        assert!(view.rows.is_empty());
    }

    #[test]
    fn out_of_range_page_is_recovered() {
        let grid = engine(25);
        let mut page = PageState::new(10);
        page.set_page(3);

        let mut filters = FilterState::new();
        filters.set_column_values("region", ["North"]);
        let view = grid.query(&filters, &SortState::new(), &mut page);

        // 8 North rows fit on one page.
        assert_eq!(view.total_filtered, 8);
        assert_eq!(view.total_pages, 1);
        assert_eq!(page.current_page, 1);
        assert_eq!(view.rows.len(), 8);
    }

    #[test]
    fn sorted_and_paged() {
        let grid = engine(25);
        let mut page = PageState::new(10);
        let sort = SortState::by("balance", SortDirection::Descending);
        let view = grid.query(&FilterState::new(), &sort, &mut page);
        assert_eq!(view.rows[0].id, 25);
        assert_eq!(view.total_pages, 3);

        page.set_page(3);
        let view = grid.query(&FilterState::new(), &sort, &mut page);
        assert_eq!(view.rows.iter().map(|r| r.id).collect::<Vec<_>>(), vec![5, 4, 3, 2, 1]);
    }

    #[test]
    fn unknown_sort_key_keeps_order() {
        let grid = engine(5);
        let mut page = PageState::new(10);
        let sort = SortState::by("missing", SortDirection::Ascending);
        let view = grid.query(&FilterState::new(), &sort, &mut page);
        assert_eq!(view.rows.iter().map(|r| r.id).collect::<Vec<_>>(), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn distinct_values_ignore_filters() {
        let grid = engine(6);
        assert_eq!(grid.distinct_values("region"), vec!["East", "North", "South"]);
        assert!(grid.distinct_values("missing").is_empty());
    }

    #[test]
    fn role_gated_mutations() {
        let mut grid = engine(3);
        let new_row = DynamicRecord::new(grid.next_id()).with("name", "New");
        assert_eq!(grid.add(Role::Viewer, new_row.clone()), MutationOutcome::Denied(Action::Add));
        assert_eq!(grid.add(Role::Editor, new_row.clone()), MutationOutcome::Applied);
        assert_eq!(grid.add(Role::Editor, new_row), MutationOutcome::Conflict(4));

        let edited = DynamicRecord::new(2).with("name", "Renamed");
        assert_eq!(grid.update(Role::Editor, edited), MutationOutcome::Applied);
        assert_eq!(grid.records()[1].field("name"), FieldValue::from("Renamed"));

        assert_eq!(grid.delete(Role::Editor, 2), MutationOutcome::Denied(Action::Delete));
        assert_eq!(grid.delete(Role::Admin, 99), MutationOutcome::NotFound(99));
        assert_eq!(grid.len(), 4);
        assert_eq!(grid.delete(Role::Admin, 2), MutationOutcome::Applied);
        assert!(grid.get(2).is_none());
    }
}
