//! FILENAME: app/src/tables/session.rs
//! PURPOSE: One mounted table: the grid engine plus the UI state it is queried with.
//! CONTEXT: The engine stores records and columns only. This session owns the
//! filter, sort and page state and logs every write outcome.

use grid_engine::{
    initial_values, validate_required, Action, FilterState, FormValues, GridEngine, GridView,
    MutationOutcome, PageState, Permissions, Role, SortState,
};
use records::RecordId;

use crate::preferences::ColumnPreferences;
use crate::tables::TableDefinition;
use crate::{log_debug, log_info, log_warn};

pub struct TableSession<R: TableDefinition> {
    engine: GridEngine<R>,
    role: Role,
    filters: FilterState,
    sort: SortState,
    page: PageState,
}

impl<R: TableDefinition> TableSession<R> {
    /// A session over the table's mock rows.
    pub fn new(role: Role, page_size: usize) -> Self {
        Self::with_records(role, page_size, R::mock_rows())
    }

    pub fn with_records(role: Role, page_size: usize, records: Vec<R>) -> Self {
        log_debug!("TABLE", "{} mounted rows={} role={}", R::NAME, records.len(), role);
        TableSession {
            engine: GridEngine::new(records, R::columns()),
            role,
            filters: FilterState::new(),
            sort: SortState::new(),
            page: PageState::new(page_size),
        }
    }

    pub fn engine(&self) -> &GridEngine<R> {
        &self.engine
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    pub fn sort(&self) -> &SortState {
        &self.sort
    }

    pub fn page(&self) -> &PageState {
        &self.page
    }

    pub fn permissions(&self) -> Permissions {
        self.engine.permissions(self.role)
    }

    /// The current page. Clamps the page state if the row count shrank.
    pub fn view(&mut self) -> GridView<'_, R> {
        self.engine.query(&self.filters, &self.sort, &mut self.page)
    }

    // ========================================================================
    // FILTER / SORT / PAGE
    // ========================================================================

    pub fn search(&mut self, text: &str) {
        self.filters.set_search(text);
        self.page.set_page(1);
    }

    pub fn filter_column<I, S>(&mut self, key: &str, values: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.filters.set_column_values(key, values);
        self.page.set_page(1);
    }

    pub fn toggle_filter_value(&mut self, key: &str, value: &str) {
        self.filters.toggle_value(key, value);
        self.page.set_page(1);
    }

    pub fn clear_filter(&mut self, key: &str) {
        self.filters.clear_column(key);
    }

    pub fn clear_filters(&mut self) {
        self.filters.clear_all();
    }

    /// Values offered in a column's filter menu (from all rows, not just visible ones).
    pub fn filter_options(&self, key: &str) -> Vec<String> {
        self.engine.distinct_values(key)
    }

    pub fn toggle_sort(&mut self, key: &str) {
        self.sort.toggle(key);
    }

    pub fn go_to_page(&mut self, page: usize) {
        self.page.set_page(page);
    }

    pub fn next_page(&mut self) {
        self.page.next();
    }

    pub fn previous_page(&mut self) {
        self.page.previous();
    }

    pub fn set_page_size(&mut self, page_size: usize) {
        self.page.set_page_size(page_size);
    }

    // ========================================================================
    // COLUMNS
    // ========================================================================

    /// Reorders and hides columns according to saved preferences.
    pub fn apply_preferences(&mut self, prefs: &ColumnPreferences) {
        let columns = prefs.arrange(R::columns());
        log_debug!(
            "TABLE",
            "{} columns={:?}",
            R::NAME,
            columns.iter().map(|c| c.key.as_str()).collect::<Vec<_>>()
        );
        self.engine.set_columns(columns);
    }

    // ========================================================================
    // WRITES
    // ========================================================================

    /// Form values for the add form (`None`) or the edit form of a record.
    pub fn form_values(&self, id: Option<RecordId>) -> FormValues {
        let record = id.and_then(|id| self.engine.get(id));
        initial_values(&R::form_fields(), record)
    }

    /// Adds a record built from form values. Missing required fields are
    /// returned as `Err` and nothing is written.
    pub fn submit_new(&mut self, values: &FormValues) -> Result<MutationOutcome, Vec<String>> {
        if !self.role.allows(Action::Add) {
            return Ok(self.report(Action::Add, None, MutationOutcome::Denied(Action::Add)));
        }
        let missing = validate_required(&R::form_fields(), values);
        if !missing.is_empty() {
            log_info!("TABLE", "{} add rejected missing={:?}", R::NAME, missing);
            return Err(missing);
        }
        let id = self.engine.next_id();
        let outcome = self.engine.add(self.role, R::from_form(id, values));
        Ok(self.report(Action::Add, Some(id), outcome))
    }

    /// Replaces record `id` with one built from form values.
    pub fn submit_edit(
        &mut self,
        id: RecordId,
        values: &FormValues,
    ) -> Result<MutationOutcome, Vec<String>> {
        if !self.role.allows(Action::Edit) {
            return Ok(self.report(Action::Edit, Some(id), MutationOutcome::Denied(Action::Edit)));
        }
        let missing = validate_required(&R::form_fields(), values);
        if !missing.is_empty() {
            log_info!("TABLE", "{} edit id={} rejected missing={:?}", R::NAME, id, missing);
            return Err(missing);
        }
        let outcome = self.engine.update(self.role, R::from_form(id, values));
        Ok(self.report(Action::Edit, Some(id), outcome))
    }

    pub fn delete(&mut self, id: RecordId) -> MutationOutcome {
        let outcome = self.engine.delete(self.role, id);
        self.report(Action::Delete, Some(id), outcome)
    }

    fn report(&self, action: Action, id: Option<RecordId>, outcome: MutationOutcome) -> MutationOutcome {
        let id = id.map_or_else(|| "-".to_string(), |id| id.to_string());
        match outcome {
            MutationOutcome::Applied => {
                log_info!("TABLE", "{} {} id={} applied", R::NAME, action, id)
            }
            MutationOutcome::Denied(_) => {
                log_warn!("TABLE", "{} {} id={} denied for role={}", R::NAME, action, id, self.role)
            }
            MutationOutcome::NotFound(_) => {
                log_info!("TABLE", "{} {} id={} not found, nothing changed", R::NAME, action, id)
            }
            MutationOutcome::Conflict(_) => {
                log_warn!("TABLE", "{} {} id={} already exists", R::NAME, action, id)
            }
        }
        outcome
    }
}
