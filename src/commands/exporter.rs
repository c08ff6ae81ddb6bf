// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{anyhow, Result};
use rusqlite::Connection;
use serde_json::json;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("equipment", sub)) => export_equipment(conn, sub),
        Some(("entries", sub)) => export_entries(conn, sub),
        _ => Ok(()),
    }
}

fn export_equipment(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let fmt = sub.get_one::<String>("format").unwrap().to_lowercase();
    let out = sub.get_one::<String>("out").unwrap();

    let mut stmt = conn.prepare(
        "SELECT e.tag, e.name, c.name as category, d.name as department, e.serial, e.status, e.acquired_on, e.price, e.note
         FROM equipment e
         LEFT JOIN categories c ON e.category_id=c.id
         LEFT JOIN departments d ON e.department_id=d.id
         ORDER BY e.tag")?;
    let rows = stmt.query_map([], |r| {
        Ok((
            r.get::<_, String>(0)?,
            r.get::<_, String>(1)?,
            r.get::<_, Option<String>>(2)?,
            r.get::<_, Option<String>>(3)?,
            r.get::<_, Option<String>>(4)?,
            r.get::<_, String>(5)?,
            r.get::<_, Option<String>>(6)?,
            r.get::<_, Option<String>>(7)?,
            r.get::<_, Option<String>>(8)?,
        ))
    })?;

    match fmt.as_str() {
        "csv" => {
            let mut wtr = csv::Writer::from_path(out)?;
            wtr.write_record([
                "tag", "name", "category", "department", "serial", "status", "acquired_on",
                "price", "note",
            ])?;
            for row in rows {
                let (tag, name, cat, dep, serial, status, acq, price, note) = row?;
                wtr.write_record([
                    tag,
                    name,
                    cat.unwrap_or_default(),
                    dep.unwrap_or_default(),
                    serial.unwrap_or_default(),
                    status,
                    acq.unwrap_or_default(),
                    price.unwrap_or_default(),
                    note.unwrap_or_default(),
                ])?;
            }
            wtr.flush()?;
        }
        "json" => {
            let mut items = Vec::new();
            for row in rows {
                let (tag, name, cat, dep, serial, status, acq, price, note) = row?;
                items.push(json!({
                    "tag": tag, "name": name, "category": cat, "department": dep,
                    "serial": serial, "status": status, "acquired_on": acq,
                    "price": price, "note": note
                }));
            }
            std::fs::write(out, serde_json::to_string_pretty(&items)?)?;
        }
        _ => {
            return Err(anyhow!("Unknown format: {} (use csv|json)", fmt));
        }
    }
    println!("Exported equipment to {}", out);
    Ok(())
}

fn export_entries(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let fmt = sub.get_one::<String>("format").unwrap().to_lowercase();
    let out = sub.get_one::<String>("out").unwrap();

    let mut stmt = conn.prepare(
        "SELECT date, kind, amount, description, category
         FROM ink_entries ORDER BY date, id",
    )?;
    let rows = stmt.query_map([], |r| {
        Ok((
            r.get::<_, String>(0)?,
            r.get::<_, String>(1)?,
            r.get::<_, String>(2)?,
            r.get::<_, String>(3)?,
            r.get::<_, Option<String>>(4)?,
        ))
    })?;

    match fmt.as_str() {
        "csv" => {
            let mut wtr = csv::Writer::from_path(out)?;
            wtr.write_record(["date", "kind", "amount", "description", "category"])?;
            for row in rows {
                let (d, k, amt, desc, cat) = row?;
                wtr.write_record([d, k, amt, desc, cat.unwrap_or_default()])?;
            }
            wtr.flush()?;
        }
        "json" => {
            let mut items = Vec::new();
            for row in rows {
                let (d, k, amt, desc, cat) = row?;
                items.push(json!({
                    "date": d, "kind": k, "amount": amt, "description": desc, "category": cat
                }));
            }
            std::fs::write(out, serde_json::to_string_pretty(&items)?)?;
        }
        _ => {
            return Err(anyhow!("Unknown format: {} (use csv|json)", fmt));
        }
    }
    println!("Exported entries to {}", out);
    Ok(())
}
