// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::cpf;
use crate::utils::pretty_table;
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &Connection) -> Result<()> {
    let mut rows = Vec::new();

    // 1) Stored CPFs that no longer pass validation
    let mut stmt = conn.prepare("SELECT email, cpf FROM users ORDER BY email")?;
    let mut cur = stmt.query([])?;
    while let Some(r) = cur.next()? {
        let email: String = r.get(0)?;
        let cpf_digits: String = r.get(1)?;
        if !cpf::validate(&cpf_digits) {
            rows.push(vec!["invalid_cpf".into(), email]);
        }
    }

    // 2) Amounts the aggregation layer must never see
    let mut stmt2 = conn.prepare("SELECT id, amount FROM transactions")?;
    let mut cur2 = stmt2.query([])?;
    while let Some(r) = cur2.next()? {
        let id: String = r.get(0)?;
        let amount: f64 = r.get(1)?;
        if !amount.is_finite() || amount < 0.0 {
            rows.push(vec!["bad_amount".into(), format!("{} {}", id, amount)]);
        }
    }

    // 3) Dates that do not parse as YYYY-MM-DD
    let mut stmt3 = conn.prepare("SELECT id, date FROM transactions")?;
    let mut cur3 = stmt3.query([])?;
    while let Some(r) = cur3.next()? {
        let id: String = r.get(0)?;
        let d: String = r.get(1)?;
        if chrono::NaiveDate::parse_from_str(&d, "%Y-%m-%d").is_err() {
            rows.push(vec!["bad_date".into(), format!("{} {}", id, d)]);
        }
    }

    if rows.is_empty() {
        println!("doctor: no issues found");
    } else {
        println!("{}", pretty_table(&["Issue", "Detail"], rows));
    }
    Ok(())
}
