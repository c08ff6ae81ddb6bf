// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rusqlite::Connection;
use stockroom::{cli, commands::importer};
use tempfile::tempdir;

fn base_conn() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(
        r#"
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

fn run_import(conn: &mut Connection, path: &str) -> anyhow::Result<()> {
    let cli = cli::build_cli();
    let matches = cli.get_matches_from(["stockroom", "import", "entries", path]);
    match matches.subcommand() {
        Some(("import", import_m)) => importer::handle(conn, import_m),
        _ => panic!("no import subcommand"),
    }
}

#[test]
fn import_entries_from_csv() {
    let mut conn = base_conn();
    let dir = tempdir().unwrap();
    let path = dir.path().join("entries.csv");
    std::fs::write(
        &path,
        "date,kind,amount,description,category\n\
         2025-01-15,income,5000,Refill sale,ink\n\
         2025-01-20,expense,3500,Toner order,\n",
    )
    .unwrap();

    run_import(&mut conn, &path.to_string_lossy()).unwrap();

    let n: i64 = conn
        .query_row("SELECT COUNT(*) FROM ink_entries", [], |r| r.get(0))
        .unwrap();
    assert_eq!(n, 2);

    let (kind, category): (String, Option<String>) = conn
        .query_row(
            "SELECT kind, category FROM ink_entries WHERE description='Toner order'",
            [],
            |r| Ok((r.get(0)?, r.get(1)?)),
        )
        .unwrap();
    assert_eq!(kind, "expense");
    assert!(category.is_none());
}

#[test]
fn import_aborts_whole_file_on_bad_kind() {
    let mut conn = base_conn();
    let dir = tempdir().unwrap();
    let path = dir.path().join("entries.csv");
    std::fs::write(
        &path,
        "date,kind,amount,description,category\n\
         2025-01-15,income,5000,Refill sale,ink\n\
         2025-01-16,transfer,10,Bad row,\n",
    )
    .unwrap();

    assert!(run_import(&mut conn, &path.to_string_lossy()).is_err());
    // transaction rolled back: the good row must not land either
    let n: i64 = conn
        .query_row("SELECT COUNT(*) FROM ink_entries", [], |r| r.get(0))
        .unwrap();
    assert_eq!(n, 0);
}

#[test]
fn import_rejects_negative_amount() {
    let mut conn = base_conn();
    let dir = tempdir().unwrap();
    let path = dir.path().join("entries.csv");
    std::fs::write(
        &path,
        "date,kind,amount,description,category\n\
         2025-01-15,expense,-3500,Bad sign,\n",
    )
    .unwrap();

    assert!(run_import(&mut conn, &path.to_string_lossy()).is_err());
}

#[test]
fn import_rejects_bad_date() {
    let mut conn = base_conn();
    let dir = tempdir().unwrap();
    let path = dir.path().join("entries.csv");
    std::fs::write(
        &path,
        "date,kind,amount,description,category\n\
         15/01/2025,income,5000,Refill sale,\n",
    )
    .unwrap();

    assert!(run_import(&mut conn, &path.to_string_lossy()).is_err());
}
