//! FILENAME: core/grid-engine/src/sort.rs
//! PURPOSE: Type-aware comparator for single-key table sorting.
//! CONTEXT: Numbers compare numerically, ISO `YYYY-MM-DD` strings compare as
//! dates, everything else compares case-insensitively. Empty values sort
//! last ascending and first descending.

use std::cmp::Ordering;

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use records::FieldValue;
use regex::Regex;

use crate::column::ColumnSpec;
use crate::state::SortDirection;

static ISO_DATE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("ISO date pattern is valid")
});

fn parse_iso_date(value: &FieldValue) -> Option<NaiveDate> {
    let text = value.text()?;
    if !ISO_DATE.is_match(text) {
        return None;
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d").ok()
}

/// Ascending comparison of two field values.
pub fn compare_values(a: &FieldValue, b: &FieldValue) -> Ordering {
    // Blank text counts as empty.
    match (a.is_empty(), b.is_empty()) {
        (true, true) => return Ordering::Equal,
        (true, false) => return Ordering::Greater,
        (false, true) => return Ordering::Less,
        (false, false) => {}
    }

    match (a, b) {
        (FieldValue::Number(na), FieldValue::Number(nb)) => {
            na.partial_cmp(nb).unwrap_or(Ordering::Equal)
        }

        _ => match (parse_iso_date(a), parse_iso_date(b)) {
            (Some(da), Some(db)) => da.cmp(&db),
            _ => a
                .display_value()
                .to_lowercase()
                .cmp(&b.display_value().to_lowercase()),
        },
    }
}

/// Stable in-place sort of a filtered row set by one column.
pub fn sort_records<R>(rows: &mut [&R], column: &ColumnSpec<R>, direction: SortDirection) {
    match direction {
        SortDirection::None => {}
        SortDirection::Ascending => {
            rows.sort_by(|a, b| compare_values(&column.value(a), &column.value(b)));
        }
        SortDirection::Descending => {
            rows.sort_by(|a, b| compare_values(&column.value(a), &column.value(b)).reverse());
        }
    }
}
