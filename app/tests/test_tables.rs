//! FILENAME: tests/test_tables.rs
//! Integration tests for add/edit/delete through a table session.

mod common;

use common::AccountFixture;
use console_lib::{AccountRecord, BrokerRecord, TableDefinition, TableSession};
use grid_engine::{Action, FormValues, MutationOutcome, Role};
use records::FieldValue;

fn session(role: Role) -> TableSession<AccountRecord> {
    TableSession::with_records(role, 10, AccountFixture::data())
}

fn account_form(name: &str) -> FormValues {
    let mut values = FormValues::new();
    values.insert("accountName".to_string(), name.into());
    values.insert("broker".to_string(), "Summit Prime".into());
    values.insert("accountType".to_string(), "Margin".into());
    values.insert("currency".to_string(), "EUR".into());
    values.insert("balance".to_string(), FieldValue::Number(2500.0));
    values.insert("opened".to_string(), "2024-03-01".into());
    values.insert("status".to_string(), "Active".into());
    values
}

// ============================================================================
// ADD
// ============================================================================

#[test]
fn test_add_assigns_next_id() {
    let mut s = session(Role::Editor);

    let outcome = s.submit_new(&account_form("Echo")).unwrap();
    assert_eq!(outcome, MutationOutcome::Applied);
    assert_eq!(s.engine().len(), 6);

    let added = s.engine().get(6).unwrap();
    assert_eq!(added.account_name, "Echo");
    assert_eq!(added.balance, 2500.0);
}

#[test]
fn test_add_reports_missing_required_fields() {
    let mut s = session(Role::Admin);

    let mut values = account_form("");
    values.remove("status");
    let missing = s.submit_new(&values).unwrap_err();

    assert_eq!(missing, vec!["accountName", "status"]);
    assert_eq!(s.engine().len(), 5);
}

#[test]
fn test_viewer_add_is_denied_before_validation() {
    let mut s = session(Role::Viewer);
    let outcome = s.submit_new(&FormValues::new()).unwrap();
    assert_eq!(outcome, MutationOutcome::Denied(Action::Add));
    assert_eq!(s.engine().len(), 5);
}

#[test]
fn test_add_to_empty_table_starts_at_one() {
    let mut s: TableSession<BrokerRecord> = TableSession::with_records(Role::Admin, 10, Vec::new());
    let mut values = s.form_values(None);
    values.insert("name".to_string(), "Orbit Capital".into());
    values.insert("region".to_string(), "Europe".into());
    values.insert("commissionRate".to_string(), FieldValue::Number(0.001));
    values.insert("status".to_string(), "Active".into());

    assert_eq!(s.submit_new(&values), Ok(MutationOutcome::Applied));
    assert!(s.engine().get(1).is_some());
}

// ============================================================================
// EDIT
// ============================================================================

#[test]
fn test_edit_replaces_in_place() {
    let mut s = session(Role::Editor);

    let mut values = s.form_values(Some(2));
    values.insert("accountName".to_string(), "Alpha Prime".into());
    assert_eq!(s.submit_edit(2, &values), Ok(MutationOutcome::Applied));

    let records = s.engine().records();
    assert_eq!(records[1].id, 2);
    assert_eq!(records[1].account_name, "Alpha Prime");
    assert_eq!(records[1].currency, "EUR");
}

#[test]
fn test_edit_missing_record_is_not_found() {
    let mut s = session(Role::Editor);
    assert_eq!(
        s.submit_edit(99, &account_form("Ghost")),
        Ok(MutationOutcome::NotFound(99))
    );
    assert_eq!(s.engine().len(), 5);
}

#[test]
fn test_viewer_edit_is_denied() {
    let mut s = session(Role::Viewer);
    assert_eq!(
        s.submit_edit(1, &account_form("Nope")),
        Ok(MutationOutcome::Denied(Action::Edit))
    );
    assert_eq!(s.engine().get(1).unwrap().account_name, "Zephyr");
}

// ============================================================================
// DELETE
// ============================================================================

#[test]
fn test_only_admin_deletes() {
    let mut editor = session(Role::Editor);
    assert_eq!(editor.delete(3), MutationOutcome::Denied(Action::Delete));
    assert_eq!(editor.engine().len(), 5);

    let mut admin = session(Role::Admin);
    assert_eq!(admin.delete(3), MutationOutcome::Applied);
    assert!(admin.engine().get(3).is_none());
    assert_eq!(admin.delete(3), MutationOutcome::NotFound(3));
}

#[test]
fn test_id_reuse_after_deleting_max() {
    let mut s = session(Role::Admin);
    s.delete(5);
    assert_eq!(s.engine().next_id(), 5);
}

#[test]
fn test_delete_shrinks_pages() {
    let mut s = TableSession::with_records(Role::Admin, 2, AccountFixture::data());
    s.go_to_page(3);
    s.delete(5);

    let view = s.view();
    assert_eq!(view.total_pages, 2);
    assert_eq!(view.current_page, 2);
}

// ============================================================================
// FORMS
// ============================================================================

#[test]
fn test_form_values_for_add_and_edit() {
    let s = session(Role::Editor);

    let blank = s.form_values(None);
    assert_eq!(blank.len(), AccountRecord::form_fields().len());
    assert!(blank.values().all(FieldValue::is_empty));

    let edit = s.form_values(Some(1));
    assert_eq!(edit["accountName"], FieldValue::Text("Zephyr".to_string()));
    assert_eq!(edit["balance"], FieldValue::Number(1200.0));

    let missing = s.form_values(Some(99));
    assert!(missing.values().all(FieldValue::is_empty));
}

#[test]
fn test_balance_renders_currency() {
    let s = session(Role::Viewer);
    let column = s.engine().column("balance").unwrap();

    assert_eq!(column.render(s.engine().get(1).unwrap()), "$1,200.00");
    assert_eq!(column.render(s.engine().get(2).unwrap()), "90.00 EUR");
}
