// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::ledger::{self, EntryKind};
use crate::utils::pretty_table;
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &Connection) -> Result<()> {
    let mut rows = Vec::new();

    // 1) Ledger rows the aggregator would refuse
    let mut stmt = conn.prepare("SELECT id, date, kind, amount FROM ink_entries ORDER BY id")?;
    let mut cur = stmt.query([])?;
    while let Some(r) = cur.next()? {
        let id: i64 = r.get(0)?;
        let date: String = r.get(1)?;
        let kind: String = r.get(2)?;
        let amount: String = r.get(3)?;
        if ledger::parse_entry_date(&date).is_err() {
            rows.push(vec!["bad_entry_date".into(), format!("#{} '{}'", id, date)]);
        }
        if EntryKind::parse(&kind).is_err() {
            rows.push(vec!["bad_entry_kind".into(), format!("#{} '{}'", id, kind)]);
        }
        match amount.parse::<rust_decimal::Decimal>() {
            Ok(d) if d.is_sign_negative() => {
                rows.push(vec!["negative_amount".into(), format!("#{} {}", id, amount)]);
            }
            Ok(_) => {}
            Err(_) => {
                rows.push(vec!["bad_amount".into(), format!("#{} '{}'", id, amount)]);
            }
        }
    }

    // 2) Open repairs on retired equipment
    let mut stmt2 = conn.prepare(
        "SELECT r.id, e.tag FROM repairs r JOIN equipment e ON r.equipment_id=e.id
         WHERE r.resolved_on IS NULL AND e.status='retired' ORDER BY r.id",
    )?;
    let mut cur2 = stmt2.query([])?;
    while let Some(r) = cur2.next()? {
        let id: i64 = r.get(0)?;
        let tag: String = r.get(1)?;
        rows.push(vec!["open_repair_on_retired".into(), format!("#{} {}", id, tag)]);
    }

    // 3) Dangling references (possible on databases created before FK enforcement)
    let mut stmt3 = conn.prepare(
        "SELECT tag FROM equipment WHERE category_id IS NOT NULL
         AND category_id NOT IN (SELECT id FROM categories)",
    )?;
    let mut cur3 = stmt3.query([])?;
    while let Some(r) = cur3.next()? {
        let tag: String = r.get(0)?;
        rows.push(vec!["missing_category".into(), tag]);
    }
    let mut stmt4 = conn.prepare(
        "SELECT tag FROM equipment WHERE department_id IS NOT NULL
         AND department_id NOT IN (SELECT id FROM departments)",
    )?;
    let mut cur4 = stmt4.query([])?;
    while let Some(r) = cur4.next()? {
        let tag: String = r.get(0)?;
        rows.push(vec!["missing_department".into(), tag]);
    }

    if rows.is_empty() {
        println!("✅ doctor: no issues found");
    } else {
        println!("{}", pretty_table(&["Issue", "Detail"], rows));
    }
    Ok(())
}
