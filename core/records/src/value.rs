//! FILENAME: core/records/src/value.rs
//! PURPOSE: Defines the primitive value a record field can hold.
//! CONTEXT: Every table column, filter menu entry and chart well reads
//! record fields through `FieldValue`. The string form produced by
//! `display_value` is the canonical representation for search, per-column
//! filters and distinct-value menus.

use serde::{Deserialize, Serialize};

/// The value of a single record field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Empty,
    Number(f64),
    Text(String),
}

impl FieldValue {
    /// Returns the string representation of the value.
    /// Whole numbers print without a decimal point; empty values print as "".
    pub fn display_value(&self) -> String {
        match self {
            FieldValue::Empty => String::new(),
            // -0.0 == 0.0, so negative zero prints as "0".
            FieldValue::Number(n) if *n == 0.0 => "0".to_string(),
            FieldValue::Number(n) => {
                if n.fract() == 0.0 && n.abs() < 1e15 {
                    format!("{:.0}", n)
                } else {
                    format!("{}", n)
                }
            }
            FieldValue::Text(s) => s.clone(),
        }
    }

    /// Numeric coercion used by aggregation: text is parsed, anything
    /// that is not a finite number becomes 0.
    pub fn as_number(&self) -> f64 {
        let n = match self {
            FieldValue::Empty => 0.0,
            FieldValue::Number(n) => *n,
            FieldValue::Text(s) => s.trim().parse::<f64>().unwrap_or(0.0),
        };
        if n.is_finite() {
            n
        } else {
            0.0
        }
    }

    /// Returns the number if this value is numeric (no coercion).
    pub fn number(&self) -> Option<f64> {
        match self {
            FieldValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the text if this value is a string (no coercion).
    pub fn text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// True for `Empty` and for empty text.
    pub fn is_empty(&self) -> bool {
        match self {
            FieldValue::Empty => true,
            FieldValue::Text(s) => s.is_empty(),
            FieldValue::Number(_) => false,
        }
    }
}

impl Default for FieldValue {
    fn default() -> Self {
        FieldValue::Empty
    }
}

impl From<f64> for FieldValue {
    fn from(n: f64) -> Self {
        FieldValue::Number(n)
    }
}

impl From<i64> for FieldValue {
    fn from(n: i64) -> Self {
        FieldValue::Number(n as f64)
    }
}

impl From<u32> for FieldValue {
    fn from(n: u32) -> Self {
        FieldValue::Number(f64::from(n))
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Text(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::Text(s)
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(FieldValue::Empty)
    }
}
