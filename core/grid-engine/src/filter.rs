//! FILENAME: core/grid-engine/src/filter.rs
//! PURPOSE: Row predicates for the global search box and column filter menus.
//! CONTEXT: Search runs first, then every non-empty column allow-list is
//! ANDed on top. An empty allow-list, or an allow-list for a key that matches
//! no column, imposes no constraint.

use records::Record;

use crate::column::ColumnSpec;
use crate::state::FilterState;

/// True when any field of the record contains `needle` (already trimmed and
/// lowercased). Empty field values never match.
pub fn matches_search<R: Record>(record: &R, needle: &str) -> bool {
    record.entries().iter().any(|(_, value)| {
        !value.is_empty() && value.display_value().to_lowercase().contains(needle)
    })
}

/// True when the record passes every active column allow-list.
pub fn matches_column_filters<R>(record: &R, columns: &[ColumnSpec<R>], filters: &FilterState) -> bool {
    filters
        .column_values
        .iter()
        .filter(|(_, allowed)| !allowed.is_empty())
        .all(|(key, allowed)| match columns.iter().find(|c| &c.key == key) {
            Some(column) => allowed.contains(&column.value(record).display_value()),
            None => true,
        })
}

/// Applies search and column filters, preserving input order.
pub fn apply_filters<'a, R: Record>(
    records: &'a [R],
    columns: &[ColumnSpec<R>],
    filters: &FilterState,
) -> Vec<&'a R> {
    let needle = filters.search_needle();
    records
        .iter()
        .filter(|r| needle.as_deref().map_or(true, |n| matches_search(*r, n)))
        .filter(|r| matches_column_filters(*r, columns, filters))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use records::DynamicRecord;

    fn columns() -> Vec<ColumnSpec<DynamicRecord>> {
        vec![
            ColumnSpec::keyed("name", "Name"),
            ColumnSpec::keyed("region", "Region"),
            ColumnSpec::keyed("balance", "Balance"),
        ]
    }

    fn rows() -> Vec<DynamicRecord> {
        vec![
            DynamicRecord::new(1).with("name", "Acme Ltd").with("region", "North").with("balance", 100.0),
            DynamicRecord::new(2).with("name", "Borealis").with("region", "South").with("balance", 250.0),
            DynamicRecord::new(3).with("name", "Cobalt").with("region", "North").with("balance", 250.0),
            DynamicRecord::new(4).with("name", "").with("region", "East").with("balance", 5.0),
        ]
    }

    fn ids(rows: &[&DynamicRecord]) -> Vec<u64> {
        rows.iter().map(|r| r.id).collect()
    }

    #[test]
    fn search_is_case_insensitive_and_trimmed() {
        let data = rows();
        let mut filters = FilterState::new();
        filters.set_search("  NORTH ");
        assert_eq!(ids(&apply_filters(&data, &columns(), &filters)), vec![1, 3]);
    }

    #[test]
    fn search_matches_numbers_by_string_form() {
        let data = rows();
        let mut filters = FilterState::new();
        filters.set_search("250");
        assert_eq!(ids(&apply_filters(&data, &columns(), &filters)), vec![2, 3]);
    }

    #[test]
    fn column_filters_compose_with_and() {
        let data = rows();
        let mut filters = FilterState::new();
        filters.set_column_values("region", ["North", "South"]);
        filters.set_column_values("balance", ["250"]);
        assert_eq!(ids(&apply_filters(&data, &columns(), &filters)), vec![2, 3]);
    }

    #[test]
    fn empty_allow_list_is_unfiltered() {
        let data = rows();
        let mut filters = FilterState::new();
        filters.set_column_values("region", Vec::<String>::new());
        assert_eq!(apply_filters(&data, &columns(), &filters).len(), 4);
    }

    #[test]
    fn unknown_column_key_is_ignored() {
        let data = rows();
        let mut filters = FilterState::new();
        filters.set_column_values("does_not_exist", ["x"]);
        assert_eq!(apply_filters(&data, &columns(), &filters).len(), 4);
    }

    #[test]
    fn search_then_columns_equals_combined() {
        let data = rows();
        let cols = columns();

        let mut combined = FilterState::new();
        combined.set_search("o");
        combined.set_column_values("region", ["North"]);

        let mut search_only = FilterState::new();
        search_only.set_search("o");
        let first: Vec<DynamicRecord> = apply_filters(&data, &cols, &search_only)
            .into_iter()
            .cloned()
            .collect();

        let mut columns_only = FilterState::new();
        columns_only.set_column_values("region", ["North"]);
        let staged = apply_filters(&first, &cols, &columns_only);

        assert_eq!(ids(&apply_filters(&data, &cols, &combined)), ids(&staged));
    }
}
