// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{Transaction, TransactionKind};
use crate::utils::{
    fmt_money, id_for_user, maybe_print_json, parse_amount, parse_date, pretty_table,
};
use anyhow::{Context, Result};
use regex::Regex;
use rusqlite::{Connection, params};
use serde::Serialize;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        Some(("rm", sub)) => rm(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn add(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let email = sub.get_one::<String>("user").unwrap();
    let kind_s = sub.get_one::<String>("kind").unwrap();
    let kind = TransactionKind::parse(kind_s)
        .with_context(|| format!("Unknown kind '{}', expected income|expense", kind_s))?;
    let amount = parse_amount(sub.get_one::<String>("amount").unwrap())?;
    let description = sub.get_one::<String>("description").unwrap();
    let category = sub.get_one::<String>("category").map(|s| s.to_string());
    let date = match sub.get_one::<String>("date") {
        Some(d) => parse_date(d)?,
        None => chrono::Local::now().date_naive(),
    };

    let user_id = id_for_user(conn, email)?;
    let id = uuid::Uuid::new_v4().to_string();
    conn.execute(
        "INSERT INTO transactions(id, kind, category, amount, description, date, user_id)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            id,
            kind.as_str(),
            category,
            amount,
            description,
            date.to_string(),
            user_id
        ],
    )?;
    println!(
        "Recorded {} {} on {} ('{}')",
        kind.as_str(),
        fmt_money(amount),
        date,
        description
    );
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
                    r.date.clone(),
                    r.kind.clone(),
                    fmt_money(r.amount),
                    r.category.clone(),
                    r.description.clone(),
                    r.id.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["Date", "Kind", "Amount", "Category", "Description", "Id"],
                rows,
            )
        );
    }
    Ok(())
}

fn rm(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let id = sub.get_one::<String>("id").unwrap();
    let n = conn.execute("DELETE FROM transactions WHERE id=?1", params![id])?;
    if n == 0 {
        anyhow::bail!("Transaction '{}' not found", id);
    }
    println!("Removed transaction {}", id);
    Ok(())
}

#[derive(Serialize)]
pub struct TransactionRow {
    pub id: String,
    pub date: String,
    pub kind: String,
    pub amount: f64,
    pub category: String,
    pub description: String,
}

pub fn query_rows(conn: &Connection, sub: &clap::ArgMatches) -> Result<Vec<TransactionRow>> {
    let email = sub.get_one::<String>("user").unwrap();
    let user_id = id_for_user(conn, email)?;

    let mut sql = String::from(
        "SELECT id, date, kind, amount, category, description FROM transactions WHERE user_id=?",
    );
    let mut params_vec: Vec<String> = vec![user_id];

    if let Some(month) = sub.get_one::<String>("month") {
        sql.push_str(" AND substr(date,1,7)=?");
        params_vec.push(month.into());
    }
    if let Some(kind) = sub.get_one::<String>("kind") {
        sql.push_str(" AND kind=?");
        params_vec.push(kind.into());
    }
    if let Some(cat) = sub.get_one::<String>("category") {
        sql.push_str(" AND category=?");
        params_vec.push(cat.into());
    }
    sql.push_str(" ORDER BY date DESC, rowid DESC");

    let search = sub
        .get_one::<String>("search")
        .map(|p| Regex::new(p).with_context(|| format!("Invalid search pattern '{}'", p)))
        .transpose()?;

    let mut stmt = conn.prepare(&sql)?;
    let params: Vec<&dyn rusqlite::ToSql> = params_vec
        .iter()
        .map(|s| s as &dyn rusqlite::ToSql)
        .collect();
    let mut rows = stmt.query(rusqlite::params_from_iter(params))?;

    let mut data = Vec::new();
    while let Some(r) = rows.next()? {
        let row = TransactionRow {
            id: r.get(0)?,
            date: r.get(1)?,
            kind: r.get(2)?,
            amount: r.get(3)?,
            category: r.get::<_, Option<String>>(4)?.unwrap_or_default(),
            description: r.get(5)?,
        };
        if let Some(ref re) = search {
            if !re.is_match(&row.description) {
                continue;
            }
        }
        data.push(row);
    }
    // Applied after the search filter so --limit counts what is shown.
    if let Some(&limit) = sub.get_one::<usize>("limit") {
        data.truncate(limit);
    }
    Ok(data)
}

/// Every transaction owned by `user_id`, newest first, as model values
/// ready for aggregation.
pub fn load_for_user(conn: &Connection, user_id: &str) -> Result<Vec<Transaction>> {
    let mut stmt = conn.prepare(
        "SELECT id, kind, category, amount, description, date FROM transactions
         WHERE user_id=?1 ORDER BY date DESC, rowid DESC",
    )?;
    let mut rows = stmt.query(params![user_id])?;
    let mut data = Vec::new();
    while let Some(r) = rows.next()? {
        let kind_s: String = r.get(1)?;
        let kind = TransactionKind::parse(&kind_s)
            .with_context(|| format!("Unknown transaction kind '{}'", kind_s))?;
        let date_s: String = r.get(5)?;
        data.push(Transaction {
            id: r.get(0)?,
            kind,
            category: r.get(2)?,
            amount: r.get(3)?,
            description: r.get(4)?,
            date: parse_date(&date_s)?,
            user_id: user_id.to_string(),
        });
    }
    Ok(data)
}
