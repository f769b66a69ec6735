//! FILENAME: app/src/tables/accounts.rs
//! PURPOSE: Trading accounts and their configuration.

use chrono::{Duration, NaiveDate};
use grid_engine::{ColumnSpec, FieldSpec, FormValues, InputKind};
use records::{format_currency, FieldValue, Record, RecordId};
use serde::{Deserialize, Serialize};

use crate::tables::{form_number, form_text, TableDefinition};

pub const ACCOUNT_TYPES: [&str; 3] = ["Cash", "Margin", "Retirement"];
pub const CURRENCIES: [&str; 3] = ["USD", "EUR", "GBP"];
pub const ACCOUNT_STATUSES: [&str; 3] = ["Active", "Suspended", "Closed"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountRecord {
    pub id: RecordId,
    pub account_name: String,
    pub broker: String,
    pub account_type: String,
    pub currency: String,
    pub balance: f64,
    /// ISO `YYYY-MM-DD`.
    pub opened: String,
    pub status: String,
}

const FIELDS: [&str; 8] = [
    "id",
    "accountName",
    "broker",
    "accountType",
    "currency",
    "balance",
    "opened",
    "status",
];

impl Record for AccountRecord {
    fn id(&self) -> RecordId {
        self.id
    }

    fn field(&self, key: &str) -> FieldValue {
        match key {
            "id" => FieldValue::Number(self.id as f64),
            "accountName" => self.account_name.as_str().into(),
            "broker" => self.broker.as_str().into(),
            "accountType" => self.account_type.as_str().into(),
            "currency" => self.currency.as_str().into(),
            "balance" => self.balance.into(),
            "opened" => self.opened.as_str().into(),
            "status" => self.status.as_str().into(),
            _ => FieldValue::Empty,
        }
    }

    fn entries(&self) -> Vec<(&str, FieldValue)> {
        FIELDS.into_iter().map(|k| (k, self.field(k))).collect()
    }
}

impl TableDefinition for AccountRecord {
    const NAME: &'static str = "accounts";

    fn columns() -> Vec<ColumnSpec<Self>> {
        vec![
            ColumnSpec::new("accountName", "Account", |a: &AccountRecord| {
                a.account_name.as_str().into()
            }),
            ColumnSpec::new("broker", "Broker", |a: &AccountRecord| a.broker.as_str().into()),
            ColumnSpec::new("accountType", "Type", |a: &AccountRecord| {
                a.account_type.as_str().into()
            }),
            ColumnSpec::new("currency", "Currency", |a: &AccountRecord| a.currency.as_str().into()),
            ColumnSpec::new("balance", "Balance", |a: &AccountRecord| a.balance.into())
                .with_renderer(|v, a: &AccountRecord| {
                    let amount = format_currency(v.as_number(), 2);
                    if a.currency == "USD" {
                        amount
                    } else {
                        format!("{} {}", amount.trim_start_matches('$'), a.currency)
                    }
                }),
            ColumnSpec::new("opened", "Opened", |a: &AccountRecord| a.opened.as_str().into()),
            ColumnSpec::new("status", "Status", |a: &AccountRecord| a.status.as_str().into()),
        ]
    }

    fn form_fields() -> Vec<FieldSpec> {
        vec![
            FieldSpec::new("accountName", "Account Name", InputKind::Text).required(),
            FieldSpec::new("broker", "Broker", InputKind::Text).required(),
            FieldSpec::select("accountType", "Account Type", &ACCOUNT_TYPES).required(),
            FieldSpec::select("currency", "Currency", &CURRENCIES).required(),
            FieldSpec::new("balance", "Balance", InputKind::Number),
            FieldSpec::new("opened", "Opened", InputKind::Date),
            FieldSpec::select("status", "Status", &ACCOUNT_STATUSES).required(),
        ]
    }

    fn from_form(id: RecordId, values: &FormValues) -> Self {
        AccountRecord {
            id,
            account_name: form_text(values, "accountName"),
            broker: form_text(values, "broker"),
            account_type: form_text(values, "accountType"),
            currency: form_text(values, "currency"),
            balance: form_number(values, "balance"),
            opened: form_text(values, "opened"),
            status: form_text(values, "status"),
        }
    }

    fn mock_rows() -> Vec<Self> {
        const NAMES: [&str; 12] = [
            "Atlas Growth", "Birch Income", "Cedar Value", "Delta Hedge", "Elm Balanced",
            "Fjord Capital", "Granite Core", "Harbor Yield", "Iris Macro", "Juniper Tech",
            "Kestrel Bonds", "Linden Global",
        ];
        const BROKERS: [&str; 4] = ["Northwind Securities", "Bluefin Markets", "Crescent Clearing", "Summit Prime"];

        let Some(start) = NaiveDate::from_ymd_opt(2021, 1, 4) else {
            return Vec::new();
        };
        NAMES
            .iter()
            .enumerate()
            .map(|(i, name)| AccountRecord {
                id: i as RecordId + 1,
                account_name: name.to_string(),
                broker: BROKERS[i % BROKERS.len()].to_string(),
                account_type: ACCOUNT_TYPES[i % ACCOUNT_TYPES.len()].to_string(),
                currency: CURRENCIES[(i / 2) % CURRENCIES.len()].to_string(),
                balance: 25_000.0 + (i as f64 * 17_350.0) % 240_000.0,
                opened: (start + Duration::days(i as i64 * 73)).format("%Y-%m-%d").to_string(),
                status: if i % 5 == 4 { "Suspended" } else { "Active" }.to_string(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use grid_engine::validate_required;

    #[test]
    fn balance_renders_in_account_currency() {
        let columns = AccountRecord::columns();
        let balance = columns.iter().find(|c| c.key == "balance").unwrap();
        let mut account = AccountRecord::mock_rows()[0].clone();
        account.balance = 1234.5;
        account.currency = "USD".to_string();
        assert_eq!(balance.render(&account), "$1,234.50");
        account.currency = "EUR".to_string();
        assert_eq!(balance.render(&account), "1,234.50 EUR");
    }

    #[test]
    fn mock_rows_have_iso_dates() {
        let rows = AccountRecord::mock_rows();
        assert_eq!(rows.len(), 12);
        assert_eq!(rows[0].opened, "2021-01-04");
        assert!(rows.iter().all(|r| NaiveDate::parse_from_str(&r.opened, "%Y-%m-%d").is_ok()));
    }

    #[test]
    fn form_roundtrip_through_fields() {
        let fields = AccountRecord::form_fields();
        let mut values = FormValues::new();
        for field in &fields {
            let raw = match field.key.as_str() {
                "balance" => "1500.25",
                "opened" => "2024-03-01",
                "accountType" => "Cash",
                "currency" => "USD",
                "status" => "Active",
                _ => "x",
            };
            values.insert(field.key.clone(), field.coerce(raw));
        }
        assert!(validate_required(&fields, &values).is_empty());

        let account = AccountRecord::from_form(99, &values);
        assert_eq!(account.id, 99);
        assert_eq!(account.balance, 1500.25);
        assert_eq!(account.opened, "2024-03-01");
    }
}
