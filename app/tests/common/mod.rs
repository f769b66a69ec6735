//! FILENAME: tests/common/mod.rs
//! Test harness and fixtures for admin console integration tests.

#![allow(dead_code)]

use console_lib::{
    create_console_state, logging, AccountRecord, ConsoleConfig, ConsoleState, FunnelStage,
    MockDataSource, SalesRecord, WaterfallStep,
};
use grid_engine::Role;

/// Test harness for creating and managing console state.
pub struct TestHarness {
    pub state: ConsoleState,
}

impl TestHarness {
    /// Create a harness with default configuration and in-memory preferences.
    pub fn new(role: Role) -> Self {
        Self::with_config(ConsoleConfig::default(), role)
    }

    pub fn with_config(config: ConsoleConfig, role: Role) -> Self {
        logging::set_echo(false);
        TestHarness {
            state: create_console_state(config, role).expect("console state"),
        }
    }

    /// Create a harness whose dashboard has loaded the fixture datasets.
    pub async fn loaded(role: Role) -> Self {
        let mut harness = Self::new(role);
        harness.state.dashboard.load(&SalesFixture::source()).await;
        harness
    }

    pub fn account_ids_on_page(&mut self) -> Vec<u64> {
        self.state.accounts.view().rows.iter().map(|r| r.id).collect()
    }
}

// ============================================================================
// TEST DATA FIXTURES
// ============================================================================

/// Small sales dataset with known totals.
pub struct SalesFixture;

impl SalesFixture {
    pub fn data() -> Vec<SalesRecord> {
        let rows = [
            ("Jan", "North", "Electronics", 1000.0, 200.0, 10, Some((47.6, -122.3))),
            ("Jan", "South", "Furniture", 500.0, 50.0, 5, Some((29.8, -95.4))),
            ("Feb", "North", "Furniture", 800.0, 80.0, 8, Some((47.6, -122.3))),
            ("Feb", "South", "Electronics", 1200.0, 240.0, 12, None),
            ("Mar", "East", "Electronics", 600.0, 90.0, 6, Some((40.7, -74.0))),
        ];
        rows.into_iter()
            .enumerate()
            .map(|(i, (month, region, category, sales, profit, customers, coords))| SalesRecord {
                id: i as u64 + 1,
                month: month.to_string(),
                region: region.to_string(),
                category: category.to_string(),
                sales_amount: sales,
                profit,
                customer_count: customers,
                lat: coords.map(|c: (f64, f64)| c.0),
                lng: coords.map(|c: (f64, f64)| c.1),
            })
            .collect()
    }

    pub fn total_sales() -> f64 {
        4100.0
    }

    pub fn waterfall() -> Vec<WaterfallStep> {
        vec![
            WaterfallStep { id: 1, category: "Start".to_string(), value: 100.0 },
            WaterfallStep { id: 2, category: "Churn".to_string(), value: -20.0 },
        ]
    }

    pub fn funnel() -> Vec<FunnelStage> {
        vec![
            FunnelStage { id: 1, stage: "Leads".to_string(), value: 50.0 },
            FunnelStage { id: 2, stage: "Won".to_string(), value: 5.0 },
        ]
    }

    pub fn source() -> MockDataSource {
        MockDataSource::with_data(Self::data(), Self::waterfall(), Self::funnel())
    }
}

/// Account rows with varied balances, dates and blanks for grid tests.
pub struct AccountFixture;

impl AccountFixture {
    pub fn data() -> Vec<AccountRecord> {
        let rows = [
            ("Zephyr", "Bluefin Markets", "Cash", "USD", 1200.0, "2023-05-01", "Active"),
            ("alpha", "Summit Prime", "Margin", "EUR", 90.0, "2022-11-15", "Active"),
            ("Bravo", "Bluefin Markets", "Cash", "USD", 15000.0, "", "Suspended"),
            ("charlie", "Northwind Securities", "Retirement", "GBP", 300.0, "2024-01-09", "Active"),
            ("Delta", "Summit Prime", "Cash", "USD", 300.0, "2021-07-30", "Closed"),
        ];
        rows.into_iter()
            .enumerate()
            .map(|(i, (name, broker, kind, currency, balance, opened, status))| AccountRecord {
                id: i as u64 + 1,
                account_name: name.to_string(),
                broker: broker.to_string(),
                account_type: kind.to_string(),
                currency: currency.to_string(),
                balance,
                opened: opened.to_string(),
                status: status.to_string(),
            })
            .collect()
    }
}
