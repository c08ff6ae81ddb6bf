// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::ledger::{self, AggregateReport, EntryKind, LedgerEntry};
use crate::utils::{
    fmt_money, get_currency, maybe_print_json, parse_date, parse_decimal, pretty_table,
};
use anyhow::{Context, Result};
use chrono::NaiveDate;
use rusqlite::Connection;
use std::collections::BTreeMap;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("summary", sub)) => summary(conn, sub)?,
        Some(("ledger", sub)) => ledger_listing(conn, sub)?,
        Some(("inventory", sub)) => inventory(conn, sub)?,
        _ => {}
    }
    Ok(())
}

/// Snapshot of the full ink ledger, parsed through the core types.
/// A row with an unparseable date or kind fails the whole load; a
/// partially aggregated report would be worse than a visible error.
pub fn load_entries(conn: &Connection) -> Result<Vec<LedgerEntry>> {
    let mut stmt = conn.prepare(
        "SELECT date, kind, amount, description, category
         FROM ink_entries ORDER BY date DESC, id DESC",
    )?;
    let mut rows = stmt.query([])?;
    let mut entries = Vec::new();
    while let Some(r) = rows.next()? {
        let date_s: String = r.get(0)?;
        let kind_s: String = r.get(1)?;
        let amount_s: String = r.get(2)?;
        let description: String = r.get(3)?;
        let category: Option<String> = r.get(4)?;
        entries.push(LedgerEntry {
            date: ledger::parse_entry_date(&date_s)?,
            kind: EntryKind::parse(&kind_s)?,
            amount: parse_decimal(&amount_s)
                .with_context(|| format!("Invalid amount '{}' in ink_entries", amount_s))?,
            description,
            category,
        });
    }
    Ok(entries)
}

pub fn build_summary(conn: &Connection, as_of: NaiveDate) -> Result<AggregateReport> {
    let entries = load_entries(conn)?;
    Ok(ledger::aggregate(&entries, as_of))
}

fn summary(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let as_of = match sub.get_one::<String>("as-of") {
        Some(s) => parse_date(s)?,
        None => chrono::Utc::now().date_naive(),
    };

    let report = build_summary(conn, as_of)?;
    if !maybe_print_json(json_flag, jsonl_flag, &report)? {
        let ccy = get_currency(conn)?;
        let data: Vec<Vec<String>> = report
            .buckets
            .iter()
            .map(|b| {
                vec![
                    b.key.clone(),
                    format!("{:.2}", b.income_total),
                    format!("{:.2}", b.expense_total),
                    format!("{:.2}", b.net),
                    b.count.to_string(),
                ]
            })
            .collect();
        let income_hdr = format!("Income ({})", ccy);
        let expense_hdr = format!("Expense ({})", ccy);
        println!(
            "{}",
            pretty_table(&["Month", &income_hdr, &expense_hdr, "Net", "Count"], data)
        );
        println!(
            "Trailing 12 months: income {}, expense {}, net {} ({} entries)",
            fmt_money(&report.yearly_income, &ccy),
            fmt_money(&report.yearly_expense, &ccy),
            fmt_money(&report.yearly_net, &ccy),
            report.yearly_count
        );
    }
    Ok(())
}

fn ledger_listing(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let entries = ledger::sort_for_listing(load_entries(conn)?);
    if !maybe_print_json(json_flag, jsonl_flag, &entries)? {
        let rows: Vec<Vec<String>> = entries
            .iter()
            .map(|e| {
                vec![
                    e.date.to_string(),
                    e.kind.as_str().to_string(),
                    format!("{:.2}", e.amount),
                    e.description.clone(),
                    e.category.clone().unwrap_or_default(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Date", "Kind", "Amount", "Description", "Category"], rows)
        );
    }
    Ok(())
}

fn inventory(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");

    let mut stmt = conn.prepare(
        "SELECT IFNULL(d.name,'(unassigned)'), e.status
         FROM equipment e LEFT JOIN departments d ON e.department_id=d.id",
    )?;
    let rows = stmt.query_map([], |r| {
        Ok((r.get::<_, String>(0)?, r.get::<_, String>(1)?))
    })?;

    // counts per department: [in-service, in-repair, retired]
    let mut map: BTreeMap<String, [usize; 3]> = BTreeMap::new();
    for row in rows {
        let (dep, status) = row?;
        let slot = match status.as_str() {
            "in-service" => 0,
            "in-repair" => 1,
            _ => 2,
        };
        map.entry(dep).or_insert([0, 0, 0])[slot] += 1;
    }

    let data: Vec<Vec<String>> = map
        .into_iter()
        .map(|(dep, counts)| {
            vec![
                dep,
                counts[0].to_string(),
                counts[1].to_string(),
                counts[2].to_string(),
                (counts[0] + counts[1] + counts[2]).to_string(),
            ]
        })
        .collect();
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        println!(
            "{}",
            pretty_table(
                &["Department", "In service", "In repair", "Retired", "Total"],
                data,
            )
        );
    }
    Ok(())
}
