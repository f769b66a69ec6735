//! FILENAME: app/src/tables/mod.rs
//! PURPOSE: The console's fixed record tables.
//! CONTEXT: Each table type supplies its columns, form fields and mock rows;
//! `TableSession` drives any of them through the grid engine.

pub mod accounts;
pub mod brokers;
pub mod session;

pub use accounts::AccountRecord;
pub use brokers::BrokerRecord;
pub use session::TableSession;

use grid_engine::{ColumnSpec, FieldSpec, FormValues};
use records::{FieldValue, Record, RecordId};

/// Static description of one logical table.
pub trait TableDefinition: Record + Clone {
    /// Table name; also the preferences key suffix.
    const NAME: &'static str;

    fn columns() -> Vec<ColumnSpec<Self>>;

    fn form_fields() -> Vec<FieldSpec>;

    /// Builds a record from submitted form values.
    fn from_form(id: RecordId, values: &FormValues) -> Self;

    fn mock_rows() -> Vec<Self>;
}

pub(crate) fn form_text(values: &FormValues, key: &str) -> String {
    values.get(key).map(FieldValue::display_value).unwrap_or_default()
}

pub(crate) fn form_number(values: &FormValues, key: &str) -> f64 {
    values.get(key).map(FieldValue::as_number).unwrap_or(0.0)
}
