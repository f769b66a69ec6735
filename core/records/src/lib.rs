//! FILENAME: core/records/src/lib.rs
//! PURPOSE: Shared record types for the grid and chart engines.
//! CONTEXT: Re-exports the field value, the row-shape trait and the
//! fixed-locale number formatting helpers used by every other crate.

pub mod format;
pub mod record;
pub mod value;

pub use format::{format_compact, format_currency, format_number, format_percent};
pub use record::{DynamicRecord, Record, RecordId};
pub use value::FieldValue;
