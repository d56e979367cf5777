// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::cpf;
use crate::models::User;
use crate::utils::pretty_table;
use anyhow::{Context, Result};
use rusqlite::{Connection, params};

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("register", sub)) => register(conn, sub)?,
        Some(("list", _)) => list(conn)?,
        Some(("rm", sub)) => {
            let email = sub.get_one::<String>("email").unwrap();
            let n = conn.execute("DELETE FROM users WHERE email=?1", params![email])?;
            if n == 0 {
                anyhow::bail!("User '{}' not found", email);
            }
            println!("Removed user '{}'", email);
        }
        _ => {}
    }
    Ok(())
}

fn register(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let name = sub.get_one::<String>("name").unwrap();
    let email = sub.get_one::<String>("email").unwrap();
    let raw_cpf = sub.get_one::<String>("cpf").unwrap();

    if name.trim().chars().count() < 2 {
        anyhow::bail!("Name must have at least 2 characters");
    }
    if !cpf::validate(raw_cpf) {
        anyhow::bail!("Invalid CPF '{}'", raw_cpf);
    }
    // Persist the bare digits; punctuation is a display concern.
    let stripped: String = raw_cpf.chars().filter(|c| c.is_ascii_digit()).collect();

    let id = uuid::Uuid::new_v4().to_string();
    conn.execute(
        "INSERT INTO users(id, name, email, cpf) VALUES (?1, ?2, ?3, ?4)",
        params![id, name, email, stripped],
    )
    .with_context(|| format!("Could not register '{}'", email))?;
    println!("Registered '{}' <{}> (CPF {})", name, email, cpf::format(&stripped));
    Ok(())
}

fn list(conn: &Connection) -> Result<()> {
    let mut stmt = conn.prepare("SELECT id, name, email, cpf FROM users ORDER BY name")?;
    let rows = stmt.query_map([], |r| {
        Ok(User {
            id: r.get(0)?,
            name: r.get(1)?,
            email: r.get(2)?,
            cpf: r.get(3)?,
        })
    })?;
    let mut data = Vec::new();
    for row in rows {
        let u = row?;
        data.push(vec![u.name, u.email, cpf::format(&u.cpf)]);
    }
    println!("{}", pretty_table(&["Name", "Email", "CPF"], data));
    Ok(())
}
