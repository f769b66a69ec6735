//! FILENAME: core/grid-engine/src/lib.rs
//! Generic tabular data-grid engine.
//!
//! Takes a typed record collection plus column metadata and produces a
//! filterable, sortable, paginated, role-gated CRUD view. The engine never
//! stores UI state: filter, sort and page state are owned by the caller and
//! passed into `GridEngine::query`.
//!
//! Layers:
//! - `state`: Filter/Sort/Page state owned by the caller
//! - `filter`: global search and per-column allow-lists
//! - `sort`: type-aware comparator
//! - `pager`: page count, clamping and slicing
//! - `column` / `form`: display columns and add/edit form fields
//! - `access`: role gating
//! - `engine`: composes the above

pub mod access;
pub mod column;
pub mod engine;
pub mod filter;
pub mod form;
pub mod pager;
pub mod sort;
pub mod state;

pub use access::{Action, Permissions, Role};
pub use column::{ColumnDef, ColumnSpec};
pub use engine::{GridEngine, GridView, MutationOutcome};
pub use filter::{apply_filters, matches_column_filters, matches_search};
pub use form::{initial_values, validate_required, FieldSpec, FormValues, InputKind};
pub use pager::{page_range, total_pages};
pub use sort::{compare_values, sort_records};
pub use state::{FilterState, PageState, SortDirection, SortState};
