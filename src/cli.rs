// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{value_parser, Arg, ArgAction, Command};

fn json_args() -> [Arg; 2] {
    [
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print pretty JSON instead of a table"),
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .help("Print one JSON object per line"),
    ]
}

pub fn build_cli() -> Command {
    Command::new("stockroom")
        .version(clap::crate_version!())
        .about("IT equipment inventory, repair tracking, and consumables ledger")
        .subcommand(Command::new("init").about("Initialize the local database"))
        .subcommand(department_cmd())
        .subcommand(category_cmd())
        .subcommand(equipment_cmd())
        .subcommand(repair_cmd())
        .subcommand(entry_cmd())
        .subcommand(report_cmd())
        .subcommand(import_cmd())
        .subcommand(export_cmd())
        .subcommand(config_cmd())
        .subcommand(Command::new("doctor").about("Run integrity checks on the database"))
}

fn department_cmd() -> Command {
    Command::new("department")
        .about("Manage departments")
        .subcommand(
            Command::new("add")
                .about("Add a department")
                .arg(Arg::new("name").required(true))
                .arg(Arg::new("location").long("location")),
        )
        .subcommand(Command::new("list").about("List departments"))
        .subcommand(
            Command::new("rm")
                .about("Remove a department")
                .arg(Arg::new("name").required(true)),
        )
}

fn category_cmd() -> Command {
    Command::new("category")
        .about("Manage equipment categories")
        .subcommand(
            Command::new("add")
                .about("Add a category")
                .arg(Arg::new("name").required(true)),
        )
        .subcommand(Command::new("list").about("List categories"))
        .subcommand(
            Command::new("rm")
                .about("Remove a category")
                .arg(Arg::new("name").required(true)),
        )
}

fn equipment_cmd() -> Command {
    Command::new("equipment")
        .about("Manage equipment records")
        .subcommand(
            Command::new("add")
                .about("Register a piece of equipment")
                .arg(Arg::new("tag").long("tag").required(true))
                .arg(Arg::new("name").long("name").required(true))
                .arg(Arg::new("category").long("category"))
                .arg(Arg::new("department").long("department"))
                .arg(Arg::new("serial").long("serial"))
                .arg(Arg::new("acquired").long("acquired").help("YYYY-MM-DD"))
                .arg(Arg::new("price").long("price"))
                .arg(Arg::new("note").long("note")),
        )
        .subcommand(
            Command::new("list")
                .about("List equipment")
                .arg(Arg::new("department").long("department"))
                .arg(Arg::new("category").long("category"))
                .arg(
                    Arg::new("status")
                        .long("status")
                        .value_parser(["in-service", "in-repair", "retired"]),
                )
                .arg(
                    Arg::new("limit")
                        .long("limit")
                        .value_parser(value_parser!(usize)),
                )
                .args(json_args()),
        )
        .subcommand(
            Command::new("set-status")
                .about("Change equipment status")
                .arg(Arg::new("tag").required(true))
                .arg(
                    Arg::new("status")
                        .required(true)
                        .value_parser(["in-service", "in-repair", "retired"]),
                ),
        )
        .subcommand(
            Command::new("assign")
                .about("Assign equipment to a department")
                .arg(Arg::new("tag").required(true))
                .arg(Arg::new("department").required(true)),
        )
        .subcommand(
            Command::new("rm")
                .about("Remove equipment")
                .arg(Arg::new("tag").required(true)),
        )
}

fn repair_cmd() -> Command {
    Command::new("repair")
        .about("Track repair records")
        .subcommand(
            Command::new("open")
                .about("Open a repair for a piece of equipment")
                .arg(Arg::new("equipment").long("equipment").required(true))
                .arg(Arg::new("date").long("date").required(true).help("YYYY-MM-DD"))
                .arg(Arg::new("description").long("description").required(true))
                .arg(Arg::new("cost").long("cost")),
        )
        .subcommand(
            Command::new("close")
                .about("Close a repair")
                .arg(
                    Arg::new("id")
                        .required(true)
                        .value_parser(value_parser!(i64)),
                )
                .arg(Arg::new("date").long("date").required(true).help("YYYY-MM-DD"))
                .arg(Arg::new("cost").long("cost").help("Final repair cost")),
        )
        .subcommand(
            Command::new("list")
                .about("List repairs")
                .arg(
                    Arg::new("open")
                        .long("open")
                        .action(ArgAction::SetTrue)
                        .help("Only unresolved repairs"),
                )
                .arg(Arg::new("equipment").long("equipment"))
                .args(json_args()),
        )
}

fn entry_cmd() -> Command {
    Command::new("entry")
        .about("Manage ink ledger entries")
        .subcommand(
            Command::new("add")
                .about("Record an income or expense entry")
                .arg(Arg::new("date").long("date").required(true).help("YYYY-MM-DD"))
                .arg(
                    Arg::new("kind")
                        .long("kind")
                        .required(true)
                        .help("income or expense"),
                )
                .arg(Arg::new("amount").long("amount").required(true))
                .arg(Arg::new("description").long("description").required(true))
                .arg(Arg::new("category").long("category")),
        )
        .subcommand(
            Command::new("list")
                .about("List ledger entries")
                .arg(Arg::new("month").long("month").help("YYYY-MM"))
                .arg(Arg::new("kind").long("kind"))
                .arg(
                    Arg::new("limit")
                        .long("limit")
                        .value_parser(value_parser!(usize)),
                )
                .args(json_args()),
        )
        .subcommand(
            Command::new("rm")
                .about("Delete a ledger entry")
                .arg(
                    Arg::new("id")
                        .required(true)
                        .value_parser(value_parser!(i64)),
                ),
        )
}

fn report_cmd() -> Command {
    Command::new("report")
        .about("Reports")
        .subcommand(
            Command::new("summary")
                .about("Trailing 12-month income/expense summary")
                .arg(
                    Arg::new("as-of")
                        .long("as-of")
                        .help("Reference date YYYY-MM-DD (defaults to today)"),
                )
                .args(json_args()),
        )
        .subcommand(
            Command::new("ledger")
                .about("Full ledger listing, most recent month first")
                .args(json_args()),
        )
        .subcommand(
            Command::new("inventory")
                .about("Equipment counts by department and status")
                .args(json_args()),
        )
}

fn import_cmd() -> Command {
    Command::new("import").about("Import data").subcommand(
        Command::new("entries")
            .about("Import ledger entries from CSV (date,kind,amount,description,category)")
            .arg(Arg::new("path").required(true)),
    )
}

fn export_cmd() -> Command {
    Command::new("export")
        .about("Export data")
        .subcommand(
            Command::new("equipment")
                .about("Export equipment records")
                .arg(Arg::new("format").long("format").required(true).help("csv|json"))
                .arg(Arg::new("out").long("out").required(true)),
        )
        .subcommand(
            Command::new("entries")
                .about("Export ledger entries")
                .arg(Arg::new("format").long("format").required(true).help("csv|json"))
                .arg(Arg::new("out").long("out").required(true)),
        )
}

fn config_cmd() -> Command {
    Command::new("config")
        .about("Settings")
        .subcommand(
            Command::new("set-currency")
                .about("Set the currency label used in reports")
                .arg(Arg::new("currency").required(true)),
        )
        .subcommand(Command::new("show").about("Show current settings"))
}
