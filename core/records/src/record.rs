//! FILENAME: core/records/src/record.rs
//! PURPOSE: The row-shape abstraction shared by the grid and chart engines.
//! CONTEXT: Typed tables (accounts, brokers, sales) implement `Record`
//! directly; JSON-configured tables use `DynamicRecord`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::value::FieldValue;

/// Stable unique identifier of a record within one table.
pub type RecordId = u64;

/// A homogeneous row of one logical table.
pub trait Record {
    /// The stable identifier. Presence in a table is decided by id equality alone.
    fn id(&self) -> RecordId;

    /// Looks up a field by key. Unknown keys yield `FieldValue::Empty`.
    fn field(&self, key: &str) -> FieldValue;

    /// Every field of the record, in declaration order, including the id.
    fn entries(&self) -> Vec<(&str, FieldValue)>;
}

impl<R: Record + ?Sized> Record for &R {
    fn id(&self) -> RecordId {
        (**self).id()
    }

    fn field(&self, key: &str) -> FieldValue {
        (**self).field(key)
    }

    fn entries(&self) -> Vec<(&str, FieldValue)> {
        (**self).entries()
    }
}

/// A record whose field set is only known at runtime.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DynamicRecord {
    pub id: RecordId,
    #[serde(flatten)]
    pub fields: BTreeMap<String, FieldValue>,
}

impl DynamicRecord {
    pub fn new(id: RecordId) -> Self {
        DynamicRecord {
            id,
            fields: BTreeMap::new(),
        }
    }

    /// Builder-style field setter.
    pub fn with(mut self, key: &str, value: impl Into<FieldValue>) -> Self {
        self.fields.insert(key.to_string(), value.into());
        self
    }

    pub fn set(&mut self, key: &str, value: impl Into<FieldValue>) {
        self.fields.insert(key.to_string(), value.into());
    }
}

impl Record for DynamicRecord {
    fn id(&self) -> RecordId {
        self.id
    }

    fn field(&self, key: &str) -> FieldValue {
        if key == "id" {
            return FieldValue::Number(self.id as f64);
        }
        self.fields.get(key).cloned().unwrap_or_default()
    }

    fn entries(&self) -> Vec<(&str, FieldValue)> {
        let mut entries = Vec::with_capacity(self.fields.len() + 1);
        entries.push(("id", FieldValue::Number(self.id as f64)));
        entries.extend(self.fields.iter().map(|(k, v)| (k.as_str(), v.clone())));
        entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_field_is_empty() {
        let rec = DynamicRecord::new(1).with("month", "Jan");
        assert_eq!(rec.field("month"), FieldValue::Text("Jan".to_string()));
        assert_eq!(rec.field("nope"), FieldValue::Empty);
        assert_eq!(rec.field("id"), FieldValue::Number(1.0));
    }

    #[test]
    fn entries_start_with_id() {
        let rec = DynamicRecord::new(9).with("b", 2.0).with("a", "x");
        let keys: Vec<&str> = rec.entries().iter().map(|(k, _)| *k).collect();
        assert_eq!(keys, vec!["id", "a", "b"]);
    }

    #[test]
    fn json_round_trip_flattens_fields() {
        let rec: DynamicRecord =
            serde_json::from_str(r#"{"id": 3, "region": "South", "sales": 100}"#).unwrap();
        assert_eq!(rec.id, 3);
        assert_eq!(rec.field("sales"), FieldValue::Number(100.0));
        let json = serde_json::to_value(&rec).unwrap();
        assert_eq!(json["region"], "South");
    }
}
