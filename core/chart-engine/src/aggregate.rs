//! FILENAME: core/chart-engine/src/aggregate.rs
//! PURPOSE: Reduces one group of records to a number.
//! CONTEXT: Total over its inputs: empty groups, missing fields and
//! non-numeric text all reduce to 0 instead of failing.

use records::Record;

use crate::definition::{AggregationKind, WellConfig};

/// Reduces `items` on `field` with the given kind.
///
/// - `Sum`: numeric-coerced values, non-numeric counts as 0
/// - `Count`: number of items, the field is ignored
/// - `Average`: sum / count, 0 for an empty group
/// - `None`: the first item's value when it is a number, else 0
pub fn aggregate<R: Record>(items: &[&R], field: &str, kind: AggregationKind) -> f64 {
    match kind {
        AggregationKind::Sum => sum(items, field),
        AggregationKind::Count => items.len() as f64,
        AggregationKind::Average => {
            if items.is_empty() {
                0.0
            } else {
                sum(items, field) / items.len() as f64
            }
        }
        AggregationKind::None => items
            .first()
            .and_then(|r| r.field(field).number())
            .filter(|n| n.is_finite())
            .unwrap_or(0.0),
    }
}

/// Reduces `items` with the well's field and aggregation.
pub fn aggregate_well<R: Record>(items: &[&R], well: &WellConfig) -> f64 {
    aggregate(items, &well.field, well.aggregation)
}

/// Starts from positive zero; `Iterator::sum` on an empty f64 iterator yields -0.0.
fn sum<R: Record>(items: &[&R], field: &str) -> f64 {
    items
        .iter()
        .map(|r| r.field(field).as_number())
        .fold(0.0, |acc, v| acc + v)
}

#[cfg(test)]
mod tests {
    use super::*;
    use records::DynamicRecord;

    fn rows() -> Vec<DynamicRecord> {
        vec![
            DynamicRecord::new(1).with("sales", 100.0).with("note", "x"),
            DynamicRecord::new(2).with("sales", "200"),
            DynamicRecord::new(3).with("sales", "n/a"),
        ]
    }

    #[test]
    fn empty_input() {
        let none: Vec<&DynamicRecord> = Vec::new();
        assert_eq!(aggregate(&none, "sales", AggregationKind::Sum), 0.0);
        assert_eq!(aggregate(&none, "sales", AggregationKind::Average), 0.0);
        assert_eq!(aggregate(&none, "sales", AggregationKind::Count), 0.0);
        assert_eq!(aggregate(&none, "sales", AggregationKind::None), 0.0);
    }

    #[test]
    fn empty_sum_is_positive_zero() {
        let none: Vec<&DynamicRecord> = Vec::new();
        assert!(!aggregate(&none, "x", AggregationKind::Sum).is_sign_negative());
        assert!(!aggregate(&none, "x", AggregationKind::Average).is_sign_negative());
    }

    #[test]
    fn sum_and_average_coerce_text() {
        let data = rows();
        let items: Vec<&DynamicRecord> = data.iter().collect();
        assert_eq!(aggregate(&items, "sales", AggregationKind::Sum), 300.0);
        assert_eq!(aggregate(&items, "sales", AggregationKind::Average), 100.0);
    }

    #[test]
    fn count_ignores_field() {
        let data = rows();
        let items: Vec<&DynamicRecord> = data.iter().collect();
        assert_eq!(aggregate(&items, "does_not_exist", AggregationKind::Count), 3.0);
    }

    #[test]
    fn none_takes_first_numeric() {
        let data = rows();
        let items: Vec<&DynamicRecord> = data.iter().collect();
        assert_eq!(aggregate(&items, "sales", AggregationKind::None), 100.0);
        assert_eq!(aggregate(&items[1..], "sales", AggregationKind::None), 0.0);
    }
}
