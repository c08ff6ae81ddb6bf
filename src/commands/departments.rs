// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::utils::pretty_table;
use anyhow::Result;
use rusqlite::{params, Connection};

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let name = sub.get_one::<String>("name").unwrap();
            let location = sub.get_one::<String>("location").map(|s| s.to_string());
            conn.execute(
                "INSERT INTO departments(name, location) VALUES (?1, ?2)",
                params![name, location],
            )?;
            println!("Added department '{}'", name);
        }
        Some(("list", _)) => {
            let mut stmt = conn.prepare(
                "SELECT name, IFNULL(location,''), created_at FROM departments ORDER BY name",
            )?;
            let rows = stmt.query_map([], |r| {
                Ok((
                    r.get::<_, String>(0)?,
                    r.get::<_, String>(1)?,
                    r.get::<_, String>(2)?,
                ))
            })?;
            let mut data = Vec::new();
            for row in rows {
                let (n, l, cr) = row?;
                data.push(vec![n, l, cr]);
            }
            println!("{}", pretty_table(&["Name", "Location", "Created"], data));
        }
        Some(("rm", sub)) => {
            let name = sub.get_one::<String>("name").unwrap();
            conn.execute("DELETE FROM departments WHERE name=?1", params![name])?;
            println!("Removed department '{}'", name);
        }
        _ => {}
    }
    Ok(())
}
