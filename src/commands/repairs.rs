// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::Repair;
use crate::utils::{id_for_equipment, maybe_print_json, parse_date, parse_decimal, pretty_table};
use anyhow::{Context, Result};
use rusqlite::{params, Connection};

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("open", sub)) => open(conn, sub)?,
        Some(("close", sub)) => close(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn open(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let tag = sub.get_one::<String>("equipment").unwrap();
    let date = parse_date(sub.get_one::<String>("date").unwrap())?;
    let description = sub.get_one::<String>("description").unwrap();
    let cost = match sub.get_one::<String>("cost") {
        Some(s) => parse_decimal(s)?,
        None => rust_decimal::Decimal::ZERO,
    };

    let equipment_id = id_for_equipment(conn, tag)?;
    conn.execute(
        "INSERT INTO repairs(equipment_id, reported_on, description, cost)
         VALUES (?1, ?2, ?3, ?4)",
        params![equipment_id, date.to_string(), description, cost.to_string()],
    )?;
    conn.execute(
        "UPDATE equipment SET status='in-repair' WHERE id=?1",
        params![equipment_id],
    )?;
    println!(
        "Opened repair #{} for '{}' on {}",
        conn.last_insert_rowid(),
        tag,
        date
    );
    Ok(())
}

fn close(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").unwrap();
    let date = parse_date(sub.get_one::<String>("date").unwrap())?;

    let equipment_id: i64 = conn
        .query_row(
            "SELECT equipment_id FROM repairs WHERE id=?1 AND resolved_on IS NULL",
            params![id],
            |r| r.get(0),
        )
        .with_context(|| format!("Open repair #{} not found", id))?;

    if let Some(cost) = sub.get_one::<String>("cost") {
        let cost = parse_decimal(cost)?;
        conn.execute(
            "UPDATE repairs SET resolved_on=?1, cost=?2 WHERE id=?3",
            params![date.to_string(), cost.to_string(), id],
        )?;
    } else {
        conn.execute(
            "UPDATE repairs SET resolved_on=?1 WHERE id=?2",
            params![date.to_string(), id],
        )?;
    }
    conn.execute(
        "UPDATE equipment SET status='in-service' WHERE id=?1",
        params![equipment_id],
    )?;
    println!("Closed repair #{} on {}", id, date);
    Ok(())
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let data = query_rows(conn, sub)?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|r| {
                vec![
                    r.id.to_string(),
                    r.equipment_tag.clone(),
                    r.reported_on.clone(),
                    r.description.clone(),
                    r.cost.clone(),
                    r.resolved_on.clone().unwrap_or_else(|| "(open)".into()),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["Id", "Equipment", "Reported", "Description", "Cost", "Resolved"],
                rows,
            )
        );
    }
    Ok(())
}

pub fn query_rows(conn: &Connection, sub: &clap::ArgMatches) -> Result<Vec<Repair>> {
    let mut sql = String::from(
        "SELECT r.id, e.tag, r.reported_on, r.description, r.cost, r.resolved_on \
         FROM repairs r JOIN equipment e ON r.equipment_id=e.id WHERE 1=1",
    );
    let mut params_vec: Vec<String> = Vec::new();

    if sub.get_flag("open") {
        sql.push_str(" AND r.resolved_on IS NULL");
    }
    if let Some(tag) = sub.get_one::<String>("equipment") {
        sql.push_str(" AND e.tag=?");
        params_vec.push(tag.into());
    }
    sql.push_str(" ORDER BY r.reported_on DESC, r.id DESC");

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
        data.push(Repair {
            id: r.get(0)?,
            equipment_tag: r.get(1)?,
            reported_on: r.get(2)?,
            description: r.get(3)?,
            cost: r.get(4)?,
            resolved_on: r.get(5)?,
        });
    }
    Ok(data)
}
