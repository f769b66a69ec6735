//! FILENAME: core/grid-engine/src/column.rs
//! PURPOSE: Display columns with typed accessors.
//! CONTEXT: A `ColumnSpec` binds a field key (used by filter and sort state)
//! to an accessor over the row type, so the engine never indexes records by
//! raw string at query time. The order of specs is the column order.

use std::fmt;
use std::sync::Arc;

use records::{FieldValue, Record};
use serde::{Deserialize, Serialize};

type Accessor<R> = Arc<dyn Fn(&R) -> FieldValue + Send + Sync>;
type Renderer<R> = Arc<dyn Fn(&FieldValue, &R) -> String + Send + Sync>;

/// One visible table column.
pub struct ColumnSpec<R> {
    pub key: String,
    pub label: String,
    accessor: Accessor<R>,
    renderer: Option<Renderer<R>>,
}

impl<R> ColumnSpec<R> {
    pub fn new<F>(key: &str, label: &str, accessor: F) -> Self
    where
        F: Fn(&R) -> FieldValue + Send + Sync + 'static,
    {
        ColumnSpec {
            key: key.to_string(),
            label: label.to_string(),
            accessor: Arc::new(accessor),
            renderer: None,
        }
    }

    /// Attaches a display renderer (currency, dates, status badges...).
    pub fn with_renderer<F>(mut self, renderer: F) -> Self
    where
        F: Fn(&FieldValue, &R) -> String + Send + Sync + 'static,
    {
        self.renderer = Some(Arc::new(renderer));
        self
    }

    pub fn value(&self, record: &R) -> FieldValue {
        (self.accessor)(record)
    }

    /// Display text for a cell; falls back to the plain string representation.
    pub fn render(&self, record: &R) -> String {
        let value = self.value(record);
        match &self.renderer {
            Some(renderer) => renderer(&value, record),
            None => value.display_value(),
        }
    }
}

impl<R: Record> ColumnSpec<R> {
    /// Column reading `Record::field(key)`.
    pub fn keyed(key: &str, label: &str) -> Self {
        let field = key.to_string();
        ColumnSpec::new(key, label, move |r: &R| r.field(&field))
    }
}

impl<R> Clone for ColumnSpec<R> {
    fn clone(&self) -> Self {
        ColumnSpec {
            key: self.key.clone(),
            label: self.label.clone(),
            accessor: Arc::clone(&self.accessor),
            renderer: self.renderer.clone(),
        }
    }
}

impl<R> fmt::Debug for ColumnSpec<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ColumnSpec")
            .field("key", &self.key)
            .field("label", &self.label)
            .field("has_renderer", &self.renderer.is_some())
            .finish()
    }
}

/// Serializable column definition for JSON-configured tables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnDef {
    pub key: String,
    pub label: String,
}

impl ColumnDef {
    pub fn into_spec<R: Record>(self) -> ColumnSpec<R> {
        ColumnSpec::keyed(&self.key, &self.label)
    }
}
