//! FILENAME: app/src/tables/brokers.rs
//! PURPOSE: Broker counterparties.

use chrono::{Duration, NaiveDate};
use grid_engine::{ColumnSpec, FieldSpec, FormValues, InputKind};
use records::{format_percent, FieldValue, Record, RecordId};
use serde::{Deserialize, Serialize};

use crate::tables::{form_number, form_text, TableDefinition};

pub const BROKER_REGIONS: [&str; 4] = ["North America", "Europe", "Asia Pacific", "Latin America"];
pub const BROKER_STATUSES: [&str; 3] = ["Active", "Onboarding", "Inactive"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrokerRecord {
    pub id: RecordId,
    pub name: String,
    pub region: String,
    /// Fraction of notional, e.g. 0.0025 for 25 bps.
    pub commission_rate: f64,
    pub contact_email: String,
    /// ISO `YYYY-MM-DD`.
    pub onboarded: String,
    pub status: String,
}

const FIELDS: [&str; 7] = [
    "id",
    "name",
    "region",
    "commissionRate",
    "contactEmail",
    "onboarded",
    "status",
];

impl Record for BrokerRecord {
    fn id(&self) -> RecordId {
        self.id
    }

    fn field(&self, key: &str) -> FieldValue {
        match key {
            "id" => FieldValue::Number(self.id as f64),
            "name" => self.name.as_str().into(),
            "region" => self.region.as_str().into(),
            "commissionRate" => self.commission_rate.into(),
            "contactEmail" => self.contact_email.as_str().into(),
            "onboarded" => self.onboarded.as_str().into(),
            "status" => self.status.as_str().into(),
            _ => FieldValue::Empty,
        }
    }

    fn entries(&self) -> Vec<(&str, FieldValue)> {
        FIELDS.into_iter().map(|k| (k, self.field(k))).collect()
    }
}

impl TableDefinition for BrokerRecord {
    const NAME: &'static str = "brokers";

    fn columns() -> Vec<ColumnSpec<Self>> {
        vec![
            ColumnSpec::keyed("name", "Broker"),
            ColumnSpec::keyed("region", "Region"),
            ColumnSpec::new("commissionRate", "Commission", |b: &BrokerRecord| {
                b.commission_rate.into()
            })
            .with_renderer(|v, _: &BrokerRecord| format_percent(v.as_number(), 2)),
            ColumnSpec::keyed("contactEmail", "Contact"),
            ColumnSpec::keyed("onboarded", "Onboarded"),
            ColumnSpec::keyed("status", "Status"),
        ]
    }

    fn form_fields() -> Vec<FieldSpec> {
        vec![
            FieldSpec::new("name", "Broker Name", InputKind::Text).required(),
            FieldSpec::select("region", "Region", &BROKER_REGIONS).required(),
            FieldSpec::new("commissionRate", "Commission Rate", InputKind::Number).required(),
            FieldSpec::new("contactEmail", "Contact Email", InputKind::Text),
            FieldSpec::new("onboarded", "Onboarded", InputKind::Date),
            FieldSpec::select("status", "Status", &BROKER_STATUSES).required(),
        ]
    }

    fn from_form(id: RecordId, values: &FormValues) -> Self {
        BrokerRecord {
            id,
            name: form_text(values, "name"),
            region: form_text(values, "region"),
            commission_rate: form_number(values, "commissionRate"),
            contact_email: form_text(values, "contactEmail"),
            onboarded: form_text(values, "onboarded"),
            status: form_text(values, "status"),
        }
    }

    fn mock_rows() -> Vec<Self> {
        const NAMES: [&str; 6] = [
            "Northwind Securities",
            "Bluefin Markets",
            "Crescent Clearing",
            "Summit Prime",
            "Meridian Execution",
            "Pacifica Capital",
        ];

        let Some(start) = NaiveDate::from_ymd_opt(2019, 6, 3) else {
            return Vec::new();
        };
        NAMES
            .iter()
            .enumerate()
            .map(|(i, name)| {
                let slug: String = name
                    .split_whitespace()
                    .next()
                    .unwrap_or("desk")
                    .to_ascii_lowercase();
                BrokerRecord {
                    id: i as RecordId + 1,
                    name: name.to_string(),
                    region: BROKER_REGIONS[i % BROKER_REGIONS.len()].to_string(),
                    commission_rate: 0.0010 + 0.0005 * i as f64,
                    contact_email: format!("desk@{}.example", slug),
                    onboarded: (start + Duration::days(i as i64 * 190)).format("%Y-%m-%d").to_string(),
                    status: if i == 5 { "Onboarding" } else { "Active" }.to_string(),
                }
            })
            .collect()
    }
}
