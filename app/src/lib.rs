//! FILENAME: app/src/lib.rs
// PURPOSE: Main library entry point of the admin console.
// CONTEXT: Wires the record tables, the dashboard and the preference store
// into one state object. The core crates stay pure; logging happens here.

use grid_engine::Role;

pub mod config;
pub mod dashboard;
pub mod data_source;
pub mod error;
pub mod logging;
pub mod preferences;
pub mod store;
pub mod tables;

pub use config::ConsoleConfig;
pub use dashboard::{
    Dashboard, DashboardConfig, DashboardFilters, FilterDimension, KpiSummary, LoadPhase,
};
pub use data_source::{
    DataSource, FunnelStage, MockDataSource, SalesRecord, WaterfallStep, MONTH_ORDER,
};
pub use error::ConsoleError;
pub use logging::{init_log_file, init_logger, next_seq, write_log};
pub use preferences::ColumnPreferences;
pub use store::PreferenceStore;
pub use tables::{AccountRecord, BrokerRecord, TableDefinition, TableSession};

/// Everything one signed-in console session holds.
pub struct ConsoleState {
    pub config: ConsoleConfig,
    pub role: Role,
    pub dashboard: Dashboard,
    pub accounts: TableSession<AccountRecord>,
    pub brokers: TableSession<BrokerRecord>,
    pub preferences: PreferenceStore,
}

/// Builds the session state and applies any saved column preferences.
/// The dashboard starts in `Loading`; call `Dashboard::load` to fetch data.
pub fn create_console_state(config: ConsoleConfig, role: Role) -> Result<ConsoleState, ConsoleError> {
    log_info!("SYS", "Creating ConsoleState role={}", role);

    let preferences = PreferenceStore::open(config.preferences_file.as_deref())?;

    let mut accounts = TableSession::new(role, config.page_size);
    accounts.apply_preferences(&ColumnPreferences::load(&preferences, AccountRecord::NAME)?);

    let mut brokers = TableSession::new(role, config.page_size);
    brokers.apply_preferences(&ColumnPreferences::load(&preferences, BrokerRecord::NAME)?);

    Ok(ConsoleState {
        dashboard: Dashboard::new(config.dashboard.clone()),
        config,
        role,
        accounts,
        brokers,
        preferences,
    })
}

impl ConsoleState {
    /// Saves a table's column arrangement and applies it to the open session.
    pub fn set_column_preferences(
        &mut self,
        table: &str,
        prefs: &ColumnPreferences,
    ) -> Result<(), ConsoleError> {
        prefs.save(&mut self.preferences, table)?;
        if !self.arrange_table(table, prefs) {
            log_warn!("PREFS", "no open table named {}", table);
        }
        Ok(())
    }

    /// Drops a table's saved arrangement and restores the declared columns.
    pub fn reset_column_preferences(&mut self, table: &str) -> Result<(), ConsoleError> {
        ColumnPreferences::reset(&mut self.preferences, table)?;
        self.arrange_table(table, &ColumnPreferences::default());
        Ok(())
    }

    fn arrange_table(&mut self, table: &str, prefs: &ColumnPreferences) -> bool {
        if table == AccountRecord::NAME {
            self.accounts.apply_preferences(prefs);
        } else if table == BrokerRecord::NAME {
            self.brokers.apply_preferences(prefs);
        } else {
            return false;
        }
        true
    }
}
