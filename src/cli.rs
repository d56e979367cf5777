// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, value_parser};

fn json_flags(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print JSON instead of a table"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .help("Print one JSON value per line"),
    )
}

fn user_arg() -> Arg {
    Arg::new("user")
        .long("user")
        .required(true)
        .help("Owner email")
}

fn user_cmd() -> Command {
    Command::new("user")
        .about("Manage registered users")
        .subcommand(
            Command::new("register")
                .about("Register a user")
                .arg(Arg::new("name").long("name").required(true))
                .arg(Arg::new("email").long("email").required(true))
                .arg(
                    Arg::new("cpf")
                        .long("cpf")
                        .required(true)
                        .help("CPF, with or without punctuation"),
                ),
        )
        .subcommand(Command::new("list").about("List registered users"))
        .subcommand(
            Command::new("rm")
                .about("Remove a user and all of their transactions")
                .arg(Arg::new("email").long("email").required(true)),
        )
}

fn tx_cmd() -> Command {
    Command::new("tx")
        .about("Record and inspect transactions")
        .subcommand(
            Command::new("add")
                .about("Record an income or expense")
                .arg(user_arg())
                .arg(
                    Arg::new("kind")
                        .long("kind")
                        .required(true)
                        .value_parser(["income", "expense"]),
                )
                .arg(Arg::new("amount").long("amount").required(true))
                .arg(Arg::new("description").long("description").required(true))
                .arg(Arg::new("category").long("category"))
                .arg(
                    Arg::new("date")
                        .long("date")
                        .help("YYYY-MM-DD, defaults to today"),
                ),
        )
        .subcommand(json_flags(
            Command::new("list")
                .about("List transactions, newest first")
                .arg(user_arg())
                .arg(Arg::new("month").long("month").help("Filter by YYYY-MM"))
                .arg(
                    Arg::new("kind")
                        .long("kind")
                        .value_parser(["income", "expense"]),
                )
                .arg(Arg::new("category").long("category"))
                .arg(
                    Arg::new("search")
                        .long("search")
                        .help("Regex matched against descriptions"),
                )
                .arg(
                    Arg::new("limit")
                        .long("limit")
                        .value_parser(value_parser!(usize)),
                ),
        ))
        .subcommand(
            Command::new("rm")
                .about("Delete a transaction by id")
                .arg(Arg::new("id").long("id").required(true)),
        )
}

fn report_cmd() -> Command {
    Command::new("report")
        .about("Aggregated views over a user's transactions")
        .subcommand(json_flags(
            Command::new("summary")
                .about("Total income, total expense, balance")
                .arg(user_arg()),
        ))
        .subcommand(json_flags(
            Command::new("by-category")
                .about("Expense totals per category, largest first")
                .arg(user_arg())
                .arg(Arg::new("month").long("month").help("Restrict to YYYY-MM")),
        ))
        .subcommand(json_flags(
            Command::new("monthly")
                .about("Income and expense per month")
                .arg(user_arg())
                .arg(
                    Arg::new("months")
                        .long("months")
                        .value_parser(value_parser!(usize))
                        .help("Keep only the most recent N months (default 12)"),
                ),
        ))
}

fn export_cmd() -> Command {
    Command::new("export")
        .about("Export data to files")
        .subcommand(
            Command::new("transactions")
                .about("Write a user's transactions to a file")
                .arg(user_arg())
                .arg(
                    Arg::new("format")
                        .long("format")
                        .required(true)
                        .value_parser(["csv", "json"]),
                )
                .arg(Arg::new("out").long("out").required(true)),
        )
}

pub fn build_cli() -> Command {
    Command::new("fintrack")
        .version(clap::crate_version!())
        .about("Personal income/expense tracking with summaries and reports")
        .subcommand(Command::new("init").about("Initialize the database"))
        .subcommand(user_cmd())
        .subcommand(tx_cmd())
        .subcommand(report_cmd())
        .subcommand(export_cmd())
        .subcommand(Command::new("doctor").about("Check stored data for integrity issues"))
}
