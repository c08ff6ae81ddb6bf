// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rusqlite::Connection;
use rust_decimal::Decimal;
use stockroom::commands::reports;

fn setup() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(
        r#"
        CREATE TABLE settings(key TEXT PRIMARY KEY, value TEXT NOT NULL);
        CREATE TABLE ink_entries(
            id INTEGER PRIMARY KEY,
            date TEXT NOT NULL,
            kind TEXT NOT NULL,
            amount TEXT NOT NULL,
            description TEXT NOT NULL,
            category TEXT
        );
        "#,
    )
    .unwrap();
    conn
}

fn insert(conn: &Connection, date: &str, kind: &str, amount: &str) {
    conn.execute(
        "INSERT INTO ink_entries(date,kind,amount,description) VALUES (?1,?2,?3,'cartridge')",
        rusqlite::params![date, kind, amount],
    )
    .unwrap();
}

fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

#[test]
fn summary_buckets_window_months() {
    let conn = setup();
    insert(&conn, "2025-01-15", "income", "5000");
    insert(&conn, "2025-01-20", "expense", "3500");
    // outside the trailing 12 months as of 2025-01-25
    insert(&conn, "2023-11-01", "income", "777");

    let as_of = NaiveDate::from_ymd_opt(2025, 1, 25).unwrap();
    let report = reports::build_summary(&conn, as_of).unwrap();

    assert_eq!(report.buckets.len(), 12);
    assert_eq!(report.buckets.first().unwrap().key, "2024-02");
    assert_eq!(report.buckets.last().unwrap().key, "2025-01");

    let jan = report.buckets.last().unwrap();
    assert_eq!(jan.income_total, dec("5000"));
    assert_eq!(jan.expense_total, dec("3500"));
    assert_eq!(jan.net, dec("1500"));
    assert_eq!(jan.count, 2);
    assert_eq!(report.yearly_net, dec("1500"));
    assert_eq!(report.yearly_count, 2);
}

#[test]
fn summary_fails_on_bad_kind_row() {
    let conn = setup();
    insert(&conn, "2025-01-15", "income", "10");
    insert(&conn, "2025-01-16", "transfer", "10");

    let as_of = NaiveDate::from_ymd_opt(2025, 1, 25).unwrap();
    let err = reports::build_summary(&conn, as_of).unwrap_err();
    assert!(err.to_string().contains("transfer"));
}

#[test]
fn summary_fails_on_bad_date_row() {
    let conn = setup();
    insert(&conn, "01/15/2025", "income", "10");

    let as_of = NaiveDate::from_ymd_opt(2025, 1, 25).unwrap();
    assert!(reports::build_summary(&conn, as_of).is_err());
}

#[test]
fn load_entries_parses_typed_snapshot() {
    let conn = setup();
    insert(&conn, "2025-03-05", "expense", "12.50");
    let entries = reports::load_entries(&conn).unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].amount, dec("12.50"));
    assert_eq!(
        entries[0].date,
        NaiveDate::from_ymd_opt(2025, 3, 5).unwrap()
    );
}
