// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use fintrack::commands::{reports, transactions};
use fintrack::{cli, summary};
use rusqlite::{Connection, params};

fn setup() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(
        r#"
        PRAGMA foreign_keys = ON;
        CREATE TABLE users(
            id TEXT PRIMARY KEY,
            name TEXT NOT NULL,
            email TEXT NOT NULL UNIQUE,
            cpf TEXT NOT NULL,
            created_at TEXT NOT NULL DEFAULT (datetime('now'))
        );
        CREATE TABLE transactions(
            id TEXT PRIMARY KEY,
            kind TEXT NOT NULL CHECK(kind IN ('income','expense')),
            category TEXT,
            amount REAL NOT NULL CHECK(amount >= 0),
            description TEXT NOT NULL,
            date TEXT NOT NULL,
            user_id TEXT NOT NULL,
            created_at TEXT NOT NULL DEFAULT (datetime('now')),
            FOREIGN KEY(user_id) REFERENCES users(id) ON DELETE CASCADE
        );
        "#,
    )
    .unwrap();
    conn.execute(
        "INSERT INTO users(id, name, email, cpf) VALUES ('u1', 'Ana Lima', 'ana@example.com', '52998224725')",
        [],
    )
    .unwrap();
    conn
}

fn seed_tx(conn: &Connection, id: &str, kind: &str, amount: f64, cat: Option<&str>, date: &str) {
    conn.execute(
        "INSERT INTO transactions(id, kind, category, amount, description, date, user_id)
         VALUES (?1, ?2, ?3, ?4, 'seed', ?5, 'u1')",
        params![id, kind, cat, amount, date],
    )
    .unwrap();
}

#[test]
fn load_for_user_returns_models_newest_first() {
    let conn = setup();
    seed_tx(&conn, "t1", "income", 100.0, None, "2025-01-05");
    seed_tx(&conn, "t2", "expense", 20.0, Some("Food"), "2025-02-01");

    let txs = transactions::load_for_user(&conn, "u1").unwrap();
    assert_eq!(txs.len(), 2);
    assert_eq!(txs[0].id, "t2");
    assert_eq!(txs[1].id, "t1");
    assert_eq!(txs[1].amount, 100.0);
    assert_eq!(txs[0].category.as_deref(), Some("Food"));
}

#[test]
fn report_numbers_come_from_the_aggregation() {
    let conn = setup();
    seed_tx(&conn, "t1", "income", 1000.0, None, "2024-01-05");
    seed_tx(&conn, "t2", "expense", 300.0, Some("Food"), "2024-01-12");
    seed_tx(&conn, "t3", "expense", 200.0, Some("Food"), "2024-02-03");

    let txs = transactions::load_for_user(&conn, "u1").unwrap();
    let s = summary::aggregate(&txs);
    assert_eq!(s.total_income, 1000.0);
    assert_eq!(s.total_expense, 500.0);
    assert_eq!(s.balance, 500.0);
    assert_eq!(s.by_month["2024-01"].expense, 300.0);
    assert_eq!(s.by_month["2024-02"].expense, 200.0);
}

#[test]
fn recent_months_keeps_the_latest_ascending() {
    let conn = setup();
    seed_tx(&conn, "t1", "income", 1.0, None, "2024-01-01");
    seed_tx(&conn, "t2", "income", 2.0, None, "2024-02-01");
    seed_tx(&conn, "t3", "income", 3.0, None, "2024-03-01");

    let txs = transactions::load_for_user(&conn, "u1").unwrap();
    let s = summary::aggregate(&txs);

    let recent = reports::recent_months(&s, 2);
    let keys: Vec<&str> = recent.iter().map(|(m, _)| m.as_str()).collect();
    assert_eq!(keys, vec!["2024-02", "2024-03"]);
    assert_eq!(recent[1].1.income, 3.0);
}

#[test]
fn report_handle_runs_end_to_end() {
    let conn = setup();
    seed_tx(&conn, "t1", "income", 100.0, None, "2024-01-05");

    for args in [
        vec!["fintrack", "report", "summary", "--user", "ana@example.com", "--json"],
        vec![
            "fintrack",
            "report",
            "by-category",
            "--user",
            "ana@example.com",
            "--month",
            "2024-01",
        ],
        vec!["fintrack", "report", "monthly", "--user", "ana@example.com", "--months", "6"],
    ] {
        let matches = cli::build_cli().get_matches_from(args);
        if let Some(("report", sub)) = matches.subcommand() {
            reports::handle(&conn, sub).unwrap();
        } else {
            panic!("no report subcommand");
        }
    }
}

#[test]
fn report_fails_for_unknown_user() {
    let conn = setup();
    let matches = cli::build_cli().get_matches_from([
        "fintrack",
        "report",
        "summary",
        "--user",
        "ghost@example.com",
    ]);
    if let Some(("report", sub)) = matches.subcommand() {
        assert!(reports::handle(&conn, sub).is_err());
    } else {
        panic!("no report subcommand");
    }
}
