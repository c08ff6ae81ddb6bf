// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rusqlite::Connection;
use stockroom::{cli, commands::equipment};

fn setup() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(
        r#"
        CREATE TABLE departments(id INTEGER PRIMARY KEY, name TEXT NOT NULL UNIQUE, location TEXT);
        CREATE TABLE categories(id INTEGER PRIMARY KEY, name TEXT NOT NULL UNIQUE);
        CREATE TABLE equipment(
            id INTEGER PRIMARY KEY,
            tag TEXT NOT NULL UNIQUE,
            name TEXT NOT NULL,
            category_id INTEGER,
            department_id INTEGER,
            serial TEXT,
            status TEXT NOT NULL DEFAULT 'in-service',
            acquired_on TEXT,
            price TEXT,
            note TEXT
        );
        "#,
    )
    .unwrap();
    conn.execute("INSERT INTO departments(id,name) VALUES (1,'IT')", [])
        .unwrap();
    conn.execute("INSERT INTO departments(id,name) VALUES (2,'Finance')", [])
        .unwrap();
    conn.execute("INSERT INTO categories(id,name) VALUES (1,'Printer')", [])
        .unwrap();
    conn
}

fn equipment_matches(args: &[&str]) -> clap::ArgMatches {
    let full: Vec<&str> = std::iter::once("stockroom").chain(args.iter().copied()).collect();
    let matches = cli::build_cli().get_matches_from(full);
    match matches.subcommand() {
        Some(("equipment", sub)) => sub.clone(),
        _ => panic!("no equipment subcommand"),
    }
}

#[test]
fn add_then_list() {
    let conn = setup();
    let m = equipment_matches(&[
        "equipment",
        "add",
        "--tag",
        "PRN-001",
        "--name",
        "LaserJet 4100",
        "--category",
        "Printer",
        "--department",
        "IT",
        "--acquired",
        "2024-06-01",
        "--price",
        "349.99",
    ]);
    equipment::handle(&conn, &m).unwrap();

    let m = equipment_matches(&["equipment", "list"]);
    if let Some(("list", list_m)) = m.subcommand() {
        let rows = equipment::query_rows(&conn, list_m).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].tag, "PRN-001");
        assert_eq!(rows[0].category.as_deref(), Some("Printer"));
        assert_eq!(rows[0].department.as_deref(), Some("IT"));
        assert_eq!(rows[0].status, "in-service");
    } else {
        panic!("no list subcommand");
    }
}

#[test]
fn add_unknown_department_fails() {
    let conn = setup();
    let m = equipment_matches(&[
        "equipment",
        "add",
        "--tag",
        "PRN-002",
        "--name",
        "Inkjet",
        "--department",
        "Warehouse",
    ]);
    assert!(equipment::handle(&conn, &m).is_err());
}

#[test]
fn set_status_and_filtered_list() {
    let conn = setup();
    conn.execute(
        "INSERT INTO equipment(tag,name,status) VALUES ('PRN-001','LaserJet','in-service')",
        [],
    )
    .unwrap();
    conn.execute(
        "INSERT INTO equipment(tag,name,status) VALUES ('PRN-002','Inkjet','in-service')",
        [],
    )
    .unwrap();

    let m = equipment_matches(&["equipment", "set-status", "PRN-002", "retired"]);
    equipment::handle(&conn, &m).unwrap();

    let m = equipment_matches(&["equipment", "list", "--status", "retired"]);
    if let Some(("list", list_m)) = m.subcommand() {
        let rows = equipment::query_rows(&conn, list_m).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].tag, "PRN-002");
    } else {
        panic!("no list subcommand");
    }
}

#[test]
fn assign_moves_department() {
    let conn = setup();
    conn.execute(
        "INSERT INTO equipment(tag,name,department_id) VALUES ('PRN-001','LaserJet',1)",
        [],
    )
    .unwrap();

    let m = equipment_matches(&["equipment", "assign", "PRN-001", "Finance"]);
    equipment::handle(&conn, &m).unwrap();

    let dep: i64 = conn
        .query_row(
            "SELECT department_id FROM equipment WHERE tag='PRN-001'",
            [],
            |r| r.get(0),
        )
        .unwrap();
    assert_eq!(dep, 2);
}

#[test]
fn rm_deletes_row() {
    let conn = setup();
    conn.execute(
        "INSERT INTO equipment(tag,name) VALUES ('PRN-001','LaserJet')",
        [],
    )
    .unwrap();
    let m = equipment_matches(&["equipment", "rm", "PRN-001"]);
    equipment::handle(&conn, &m).unwrap();
    let n: i64 = conn
        .query_row("SELECT COUNT(*) FROM equipment", [], |r| r.get(0))
        .unwrap();
    assert_eq!(n, 0);
}
