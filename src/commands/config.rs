// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::utils::{get_currency, set_currency};
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("set-currency", sub)) => {
            let ccy = sub.get_one::<String>("currency").unwrap().to_uppercase();
            set_currency(conn, &ccy)?;
            println!("Currency set to {}", ccy);
        }
        Some(("show", _)) => {
            println!("currency = {}", get_currency(conn)?);
        }
        _ => {}
    }
    Ok(())
}
