// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Pure aggregation over a list of transactions.
//!
//! Everything here is recomputed from scratch on each call and touches no
//! external state; callers fetch the owner's transactions first and hand
//! them in as a slice. Sums are plain f64 addition; callers that need exact
//! currency math must convert to integer minor units before recording.

use std::collections::{BTreeMap, HashMap};

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::models::{Transaction, TransactionKind};

/// Label applied to expenses recorded without a category.
pub const UNCATEGORIZED: &str = "Other";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryTotal {
    pub category: String,
    pub amount: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct MonthFlow {
    pub income: f64,
    pub expense: f64,
}

/// Derived view of a transaction list: overall totals, expense totals per
/// category (largest first), and income/expense per calendar month.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub total_income: f64,
    pub total_expense: f64,
    pub balance: f64,
    pub by_category: Vec<CategoryTotal>,
    pub by_month: BTreeMap<String, MonthFlow>,
}

/// `YYYY-MM` key for a date; lexicographic order on these keys is
/// chronological order.
pub fn month_key(date: NaiveDate) -> String {
    format!("{:04}-{:02}", date.year(), date.month())
}

pub fn aggregate(transactions: &[Transaction]) -> Summary {
    let mut total_income = 0.0;
    let mut total_expense = 0.0;
    let mut by_month: BTreeMap<String, MonthFlow> = BTreeMap::new();

    // Expense categories keep their first-encounter slot so the descending
    // sort below stays stable across equal totals.
    let mut by_category: Vec<CategoryTotal> = Vec::new();
    let mut category_slot: HashMap<String, usize> = HashMap::new();

    for tx in transactions {
        let flow = by_month.entry(month_key(tx.date)).or_default();
        match tx.kind {
            TransactionKind::Income => {
                total_income += tx.amount;
                flow.income += tx.amount;
            }
            TransactionKind::Expense => {
                total_expense += tx.amount;
                flow.expense += tx.amount;
                let label = match tx.category.as_deref() {
                    Some(c) if !c.is_empty() => c,
                    _ => UNCATEGORIZED,
                };
                match category_slot.get(label) {
                    Some(&slot) => by_category[slot].amount += tx.amount,
                    None => {
                        category_slot.insert(label.to_string(), by_category.len());
                        by_category.push(CategoryTotal {
                            category: label.to_string(),
                            amount: tx.amount,
                        });
                    }
                }
            }
        }
    }

    by_category.sort_by(|a, b| {
        b.amount
            .partial_cmp(&a.amount)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    Summary {
        total_income,
        total_expense,
        balance: total_income - total_expense,
        by_category,
        by_month,
    }
}
