//! FILENAME: core/grid-engine/src/form.rs
//! PURPOSE: Add/edit form field metadata and required-field checks.
//! CONTEXT: Distinct from `ColumnSpec`: not every column is editable and the
//! form order may differ from the display order. Validation stops at
//! required-field presence.

use std::collections::BTreeMap;

use records::{FieldValue, Record};
use serde::{Deserialize, Serialize};

/// Raw values collected by an add/edit form, keyed by field key.
pub type FormValues = BTreeMap<String, FieldValue>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum InputKind {
    Text,
    Number,
    Select,
    Date,
}

/// One editable form field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldSpec {
    pub key: String,
    pub label: String,
    pub input: InputKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
    #[serde(default)]
    pub required: bool,
}

impl FieldSpec {
    pub fn new(key: &str, label: &str, input: InputKind) -> Self {
        FieldSpec {
            key: key.to_string(),
            label: label.to_string(),
            input,
            options: None,
            required: false,
        }
    }

    pub fn select(key: &str, label: &str, options: &[&str]) -> Self {
        FieldSpec {
            options: Some(options.iter().map(|o| o.to_string()).collect()),
            ..FieldSpec::new(key, label, InputKind::Select)
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Converts raw input text to a field value according to the input kind.
    /// Number inputs that do not parse keep their text.
    pub fn coerce(&self, raw: &str) -> FieldValue {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return FieldValue::Empty;
        }
        match self.input {
            InputKind::Number => trimmed
                .parse::<f64>()
                .map(FieldValue::Number)
                .unwrap_or_else(|_| FieldValue::Text(trimmed.to_string())),
            InputKind::Text | InputKind::Select | InputKind::Date => {
                FieldValue::Text(trimmed.to_string())
            }
        }
    }
}

/// Initial form values: the record's current values when editing, empty
/// values when adding.
pub fn initial_values<R: Record>(fields: &[FieldSpec], record: Option<&R>) -> FormValues {
    fields
        .iter()
        .map(|f| {
            let value = record.map(|r| r.field(&f.key)).unwrap_or_default();
            (f.key.clone(), value)
        })
        .collect()
}

/// Returns the keys of required fields with no value, in form order.
pub fn validate_required(fields: &[FieldSpec], values: &FormValues) -> Vec<String> {
    fields
        .iter()
        .filter(|f| f.required)
        .filter(|f| values.get(&f.key).map_or(true, FieldValue::is_empty))
        .map(|f| f.key.clone())
        .collect()
}
