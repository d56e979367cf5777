// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::commands::transactions::load_for_user;
use crate::summary::{self, MonthFlow, Summary};
use crate::utils::{fmt_money, id_for_user, maybe_print_json, parse_month, pretty_table};
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("summary", sub)) => totals(conn, sub)?,
        Some(("by-category", sub)) => by_category(conn, sub)?,
        Some(("monthly", sub)) => monthly(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn user_summary(conn: &Connection, sub: &clap::ArgMatches) -> Result<Summary> {
    let email = sub.get_one::<String>("user").unwrap();
    let user_id = id_for_user(conn, email)?;
    let txs = load_for_user(conn, &user_id)?;
    Ok(summary::aggregate(&txs))
}

fn totals(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let s = user_summary(conn, sub)?;
    if !maybe_print_json(json_flag, jsonl_flag, &s)? {
        let rows = vec![
            vec!["Income".to_string(), fmt_money(s.total_income)],
            vec!["Expense".to_string(), fmt_money(s.total_expense)],
            vec!["Balance".to_string(), fmt_money(s.balance)],
        ];
        println!("{}", pretty_table(&["", "Total"], rows));
    }
    Ok(())
}

fn by_category(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let email = sub.get_one::<String>("user").unwrap();
    let user_id = id_for_user(conn, email)?;
    let mut txs = load_for_user(conn, &user_id)?;
    if let Some(month) = sub.get_one::<String>("month") {
        let month = parse_month(month)?;
        txs.retain(|t| summary::month_key(t.date) == month);
    }
    let s = summary::aggregate(&txs);
    if !maybe_print_json(json_flag, jsonl_flag, &s.by_category)? {
        let rows: Vec<Vec<String>> = s
            .by_category
            .iter()
            .map(|c| vec![c.category.clone(), fmt_money(c.amount)])
            .collect();
        println!("{}", pretty_table(&["Category", "Spent"], rows));
    }
    Ok(())
}

/// The most recent `months` entries, still oldest-first for display.
pub fn recent_months(s: &Summary, months: usize) -> Vec<(String, MonthFlow)> {
    let mut data: Vec<(String, MonthFlow)> = s
        .by_month
        .iter()
        .rev()
        .take(months)
        .map(|(m, flow)| (m.clone(), *flow))
        .collect();
    data.reverse();
    data
}

fn monthly(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let months: usize = *sub.get_one::<usize>("months").unwrap_or(&12);
    let s = user_summary(conn, sub)?;
    let data: Vec<Vec<String>> = recent_months(&s, months)
        .into_iter()
        .map(|(m, flow)| {
            vec![
                m,
                format!("{:.2}", flow.income),
                format!("{:.2}", flow.expense),
            ]
        })
        .collect();
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        println!("{}", pretty_table(&["Month", "Income", "Expense"], data));
    }
    Ok(())
}
