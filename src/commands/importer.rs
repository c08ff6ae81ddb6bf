// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::ledger::{self, EntryKind};
use crate::utils::parse_decimal;
use anyhow::{anyhow, Context, Result};
use csv::ReaderBuilder;
use rusqlite::{params, Connection};

pub fn handle(conn: &mut Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("entries", sub)) => import_entries(conn, sub),
        _ => Ok(()),
    }
}

fn import_entries(conn: &mut Connection, sub: &clap::ArgMatches) -> Result<()> {
    let path = sub.get_one::<String>("path").unwrap().trim();
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .with_context(|| format!("Open CSV {}", path))?;

    let tx = conn.transaction()?;
    let mut imported = 0usize;

    for result in rdr.records() {
        let rec = result?;
        let date_raw = rec.get(0).context("date missing")?.trim();
        let kind_raw = rec.get(1).context("kind missing")?.trim();
        let amount_raw = rec.get(2).context("amount missing")?.trim();
        let description = rec.get(3).context("description missing")?.trim();
        let category = rec
            .get(4)
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .map(|s| s.to_string());

        let date = ledger::parse_entry_date(date_raw)?;
        let kind = EntryKind::parse(kind_raw)?;
        let amount = parse_decimal(amount_raw)
            .with_context(|| format!("Invalid amount '{}' for {}", amount_raw, description))?;
        if amount.is_sign_negative() {
            return Err(anyhow!(
                "Negative amount '{}' on {}; sign is carried by kind",
                amount_raw,
                date_raw
            ));
        }

        tx.execute(
            "INSERT INTO ink_entries(date, kind, amount, description, category) \
             VALUES (?1,?2,?3,?4,?5)",
            params![
                date.to_string(),
                kind.as_str(),
                amount.to_string(),
                description,
                category
            ],
        )?;
        imported += 1;
    }
    tx.commit()?;
    println!("Imported {} entries from {}", imported, path);
    Ok(())
}
