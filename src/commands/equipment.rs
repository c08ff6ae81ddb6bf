// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::Equipment;
use crate::utils::{
    id_for_department, id_for_equipment, maybe_print_json, parse_date, parse_decimal, pretty_table,
};
use anyhow::Result;
use rusqlite::{params, Connection};

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        Some(("set-status", sub)) => set_status(conn, sub)?,
        Some(("assign", sub)) => assign(conn, sub)?,
        Some(("rm", sub)) => {
            let tag = sub.get_one::<String>("tag").unwrap();
            conn.execute("DELETE FROM equipment WHERE tag=?1", params![tag])?;
            println!("Removed equipment '{}'", tag);
        }
        _ => {}
    }
    Ok(())
}

fn add(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let tag = sub.get_one::<String>("tag").unwrap();
    let name = sub.get_one::<String>("name").unwrap();
    let category_id = match sub.get_one::<String>("category") {
        Some(cat) => Some(crate::utils::id_for_category(conn, cat)?),
        None => None,
    };
    let department_id = match sub.get_one::<String>("department") {
        Some(dep) => Some(id_for_department(conn, dep)?),
        None => None,
    };
    let serial = sub.get_one::<String>("serial").map(|s| s.to_string());
    let acquired = match sub.get_one::<String>("acquired") {
        Some(s) => Some(parse_date(s)?.to_string()),
        None => None,
    };
    let price = match sub.get_one::<String>("price") {
        Some(s) => Some(parse_decimal(s)?.to_string()),
        None => None,
    };
    let note = sub.get_one::<String>("note").map(|s| s.to_string());

    conn.execute(
        "INSERT INTO equipment(tag, name, category_id, department_id, serial, acquired_on, price, note)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        params![tag, name, category_id, department_id, serial, acquired, price, note],
    )?;
    println!("Registered equipment '{}' ({})", tag, name);
    Ok(())
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let data = query_rows(conn, sub)?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|e| {
                vec![
                    e.tag.clone(),
                    e.name.clone(),
                    e.category.clone().unwrap_or_default(),
                    e.department.clone().unwrap_or_default(),
                    e.status.clone(),
                    e.serial.clone().unwrap_or_default(),
                    e.acquired_on.clone().unwrap_or_default(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["Tag", "Name", "Category", "Department", "Status", "Serial", "Acquired"],
                rows,
            )
        );
    }
    Ok(())
}

pub fn query_rows(conn: &Connection, sub: &clap::ArgMatches) -> Result<Vec<Equipment>> {
    let mut sql = String::from(
        "SELECT e.id, e.tag, e.name, c.name, d.name, e.serial, e.status, e.acquired_on, e.price, e.note \
         FROM equipment e \
         LEFT JOIN categories c ON e.category_id=c.id \
         LEFT JOIN departments d ON e.department_id=d.id WHERE 1=1",
    );
    let mut params_vec: Vec<String> = Vec::new();

    if let Some(dep) = sub.get_one::<String>("department") {
        sql.push_str(" AND d.name=?");
        params_vec.push(dep.into());
    }
    if let Some(cat) = sub.get_one::<String>("category") {
        sql.push_str(" AND c.name=?");
        params_vec.push(cat.into());
    }
    if let Some(status) = sub.get_one::<String>("status") {
        sql.push_str(" AND e.status=?");
        params_vec.push(status.into());
    }
    sql.push_str(" ORDER BY e.tag");
    if let Some(limit) = sub.get_one::<usize>("limit") {
        sql.push_str(" LIMIT ?");
        params_vec.push(limit.to_string());
    }

    let mut stmt = conn.prepare(&sql)?;
    let mut rows = if params_vec.is_empty() {
        stmt.query([])?
    } else {
        let params: Vec<&dyn rusqlite::ToSql> = params_vec
            .iter()
            .map(|s| s as &dyn rusqlite::ToSql)
            .collect();
        stmt.query(rusqlite::params_from_iter(params))?
    };

    let mut data = Vec::new();
    while let Some(r) = rows.next()? {
        data.push(Equipment {
            id: r.get(0)?,
            tag: r.get(1)?,
            name: r.get(2)?,
            category: r.get(3)?,
            department: r.get(4)?,
            serial: r.get(5)?,
            status: r.get(6)?,
            acquired_on: r.get(7)?,
            price: r.get(8)?,
            note: r.get(9)?,
        });
    }
    Ok(data)
}

fn set_status(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let tag = sub.get_one::<String>("tag").unwrap();
    let status = sub.get_one::<String>("status").unwrap();
    let id = id_for_equipment(conn, tag)?;
    conn.execute(
        "UPDATE equipment SET status=?1 WHERE id=?2",
        params![status, id],
    )?;
    println!("Equipment '{}' is now {}", tag, status);
    Ok(())
}

fn assign(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let tag = sub.get_one::<String>("tag").unwrap();
    let dep = sub.get_one::<String>("department").unwrap();
    let id = id_for_equipment(conn, tag)?;
    let dep_id = id_for_department(conn, dep)?;
    conn.execute(
        "UPDATE equipment SET department_id=?1 WHERE id=?2",
        params![dep_id, id],
    )?;
    println!("Assigned '{}' to {}", tag, dep);
    Ok(())
}
